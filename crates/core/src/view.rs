//! Generic list-view controller.
//!
//! Every dashboard table follows the same shape: a static record collection
//! is narrowed by enum filters and a free-text search, stably sorted by one
//! of a small set of keys, and rendered with at most one row expanded. This
//! module implements that shape once, generically; per-collection bindings
//! live in [`crate::views`].
//!
//! All operations here are total, pure functions over immutable records:
//! a projection never mutates its input, never fails, and recomputing it
//! with the same inputs yields the same sequence.

use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Wire spelling used in query parameters and CLI flags.
    pub fn as_wire(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Ascending),
            "desc" => Some(SortOrder::Descending),
            _ => None,
        }
    }

    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// The active sort key and direction for a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: K,
    pub order: SortOrder,
}

/// Typed comparison value for one sortable field of one record.
///
/// Each sort key of a record type always yields the same variant, so
/// comparisons within a view compare like with like. Values of different
/// kinds compare as equal rather than panicking.
#[derive(Clone, Copy, Debug)]
pub enum SortValue<'a> {
    /// Compared case-insensitively.
    Text(&'a str),
    Integer(u64),
    /// Compared with `total_cmp`.
    Float(f64),
    Date(NaiveDate),
    Instant(DateTime<Utc>),
}

impl SortValue<'_> {
    /// Total order over sort values of the same kind.
    pub fn compare(&self, other: &SortValue<'_>) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (SortValue::Integer(a), SortValue::Integer(b)) => a.cmp(b),
            (SortValue::Float(a), SortValue::Float(b)) => a.total_cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::Instant(a), SortValue::Instant(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// A record type usable by the generic list-view controller.
///
/// Implementations describe a view's filter dimensions, searchable fields,
/// and sortable keys; the controller supplies the shared semantics.
pub trait ViewRecord {
    /// Enum-filter selections for this view. The `Default` value applies no
    /// constraints.
    type Filter: Default;

    /// Closed set of sortable fields.
    type SortKey: Copy + Eq;

    /// Stable identifier, unique within the collection. Used as the
    /// expansion-tracking key.
    fn id(&self) -> &str;

    /// Whether this record passes every active constraint in `filter`.
    /// Unset constraints must pass everything.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// The fields scanned by free-text search. May be empty for views
    /// without a search box.
    fn search_fields(&self) -> Vec<&str>;

    /// The comparison value for `key`.
    fn sort_value(&self, key: Self::SortKey) -> SortValue<'_>;

    /// The sort applied when the view first renders.
    fn default_sort() -> SortState<Self::SortKey>;

    /// The direction applied when `key` is selected while a different key
    /// is active.
    fn initial_order(key: Self::SortKey) -> SortOrder;
}

/// Case-insensitive substring test over a record's search fields.
///
/// `needle` must already be lowercased. An empty needle matches everything;
/// a non-empty needle over a record with no search fields matches nothing.
fn matches_search<R: ViewRecord>(record: &R, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Filter, search, and stably sort `records`.
///
/// A record is kept iff it passes every active enum constraint and the
/// search test. The sort is stable: records with equal keys keep their
/// relative order from `records`, in both directions. The input is never
/// mutated and the result length is at most `records.len()`.
pub fn project<'a, R: ViewRecord>(
    records: &'a [R],
    filter: &R::Filter,
    search: &str,
    sort: SortState<R::SortKey>,
) -> Vec<&'a R> {
    let needle = search.trim().to_lowercase();

    let mut rows: Vec<&'a R> = records
        .iter()
        .filter(|record| record.matches(filter) && matches_search(*record, &needle))
        .collect();

    rows.sort_by(|a, b| {
        let ordering = a.sort_value(sort.key).compare(&b.sort_value(sort.key));
        match sort.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    rows
}

/// Integer percentage of `part` in `total`, rounded half up.
///
/// An empty `total` yields 0 rather than an undefined value.
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

/// Owned view state for one page session: filter selections, search text,
/// sort, and the expanded row.
///
/// The state is exclusive to one view instance; nothing is shared across
/// views or sessions. Projections derived from it are recomputed on demand
/// and never cached.
pub struct ViewState<R: ViewRecord> {
    filter: R::Filter,
    search: String,
    sort: SortState<R::SortKey>,
    expanded: Option<String>,
}

impl<R: ViewRecord> ViewState<R> {
    pub fn new() -> Self {
        Self {
            filter: R::Filter::default(),
            search: String::new(),
            sort: R::default_sort(),
            expanded: None,
        }
    }

    pub fn filter(&self) -> &R::Filter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: R::Filter) {
        self.filter = filter;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn sort(&self) -> SortState<R::SortKey> {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortState<R::SortKey>) {
        self.sort = sort;
    }

    /// Header-click semantics: selecting the active key flips its
    /// direction; selecting a new key applies that key's initial order.
    pub fn toggle_sort(&mut self, key: R::SortKey) {
        if self.sort.key == key {
            self.sort.order = self.sort.order.flipped();
        } else {
            self.sort = SortState {
                key,
                order: R::initial_order(key),
            };
        }
    }

    /// The currently expanded record id, which may refer to a row the
    /// active filter hides. Expansion is deliberately not reset when
    /// filter, search, or sort change; rendering only shows detail for a
    /// visible row whose id matches.
    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn set_expanded(&mut self, id: Option<String>) {
        self.expanded = id;
    }

    /// Row-click semantics: collapse the row if it is already expanded,
    /// otherwise expand it, collapsing any other row.
    pub fn toggle_expanded(&mut self, id: &str) {
        if self.expanded.as_deref() == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.to_string());
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.as_deref() == Some(id)
    }

    /// The current projection of `records` under this state.
    pub fn project<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        project(records, &self.filter, &self.search, self.sort)
    }

    /// The expanded record, if it is present in the visible `rows`.
    pub fn expanded_row<'a>(&self, rows: &[&'a R]) -> Option<&'a R> {
        let id = self.expanded.as_deref()?;
        rows.iter().copied().find(|row| row.id() == id)
    }
}

impl<R: ViewRecord> Default for ViewState<R> {
    fn default() -> Self {
        Self::new()
    }
}
