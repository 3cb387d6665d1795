//! EMR feed view.
//!
//! Feeds render as a card grid with a status filter and no sortable
//! columns, so this view uses a plain filter function rather than the
//! generic controller.

use cdi_types::{EmrFeed, IntegrationStatus};
use serde::Serialize;
use utoipa::ToSchema;

/// Filter selections for the feed grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeedFilter {
    pub status: Option<IntegrationStatus>,
}

/// Narrow `feeds` by the status filter, preserving store order.
pub fn filter_feeds<'a>(feeds: &'a [EmrFeed], filter: &FeedFilter) -> Vec<&'a EmrFeed> {
    feeds
        .iter()
        .filter(|feed| filter.status.is_none_or(|status| feed.status == status))
        .collect()
}

/// Look up a feed by id.
pub fn find<'a>(feeds: &'a [EmrFeed], id: &str) -> Option<&'a EmrFeed> {
    feeds.iter().find(|feed| feed.id == id)
}

/// Whole-grid summary, independent of the active filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedSummary {
    pub active: usize,
    pub degraded: usize,
    pub error: usize,
    pub maintenance: usize,
    /// Combined hourly throughput across every feed.
    pub messages_per_hour: u64,
}

/// Reduce the full, unfiltered feed list to its summary.
pub fn summarize(feeds: &[EmrFeed]) -> FeedSummary {
    let count = |status: IntegrationStatus| feeds.iter().filter(|f| f.status == status).count();

    FeedSummary {
        active: count(IntegrationStatus::Active),
        degraded: count(IntegrationStatus::Degraded),
        error: count(IntegrationStatus::Error),
        maintenance: count(IntegrationStatus::Maintenance),
        messages_per_hour: feeds.iter().map(|f| u64::from(f.messages_per_hour)).sum(),
    }
}
