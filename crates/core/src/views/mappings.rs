//! Field-mapping configuration view.

use crate::error::{CoreError, CoreResult};
use crate::view::{SortOrder, SortState, SortValue, ViewRecord};
use cdi_types::{DataMapping, MappingStatus};
use serde::Serialize;
use utoipa::ToSchema;

/// Filter selections for the mapping table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MappingFilter {
    pub status: Option<MappingStatus>,
}

/// Sortable columns of the mapping table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingSortKey {
    Name,
    MappedRecords,
    ErrorCount,
    LastModified,
}

impl MappingSortKey {
    pub fn as_wire(self) -> &'static str {
        match self {
            MappingSortKey::Name => "name",
            MappingSortKey::MappedRecords => "mappedRecords",
            MappingSortKey::ErrorCount => "errorCount",
            MappingSortKey::LastModified => "lastModified",
        }
    }

    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "name" => Ok(MappingSortKey::Name),
            "mappedRecords" => Ok(MappingSortKey::MappedRecords),
            "errorCount" => Ok(MappingSortKey::ErrorCount),
            "lastModified" => Ok(MappingSortKey::LastModified),
            other => Err(CoreError::UnknownSortKey(other.to_string())),
        }
    }
}

impl ViewRecord for DataMapping {
    type Filter = MappingFilter;
    type SortKey = MappingSortKey;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &MappingFilter) -> bool {
        filter.status.is_none_or(|status| self.status == status)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.name,
            &self.source_system,
            &self.source_field,
            &self.target_field,
            &self.transform_rule,
        ]
    }

    fn sort_value(&self, key: MappingSortKey) -> SortValue<'_> {
        match key {
            MappingSortKey::Name => SortValue::Text(&self.name),
            MappingSortKey::MappedRecords => SortValue::Integer(self.mapped_records),
            MappingSortKey::ErrorCount => SortValue::Integer(u64::from(self.error_count)),
            MappingSortKey::LastModified => SortValue::Date(self.last_modified),
        }
    }

    fn default_sort() -> SortState<MappingSortKey> {
        SortState {
            key: MappingSortKey::Name,
            order: SortOrder::Ascending,
        }
    }

    // This table opens every newly selected column ascending, including the
    // numeric ones.
    fn initial_order(_key: MappingSortKey) -> SortOrder {
        SortOrder::Ascending
    }
}

/// Whole-table summary, independent of the active filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingSummary {
    /// Records processed across every mapping.
    pub mapped_records: u64,
    /// Transformation failures across every mapping.
    pub errors: u64,
    pub active: usize,
}

/// Reduce the full, unfiltered mapping table to its summary.
pub fn summarize(mappings: &[DataMapping]) -> MappingSummary {
    MappingSummary {
        mapped_records: mappings.iter().map(|m| m.mapped_records).sum(),
        errors: mappings.iter().map(|m| u64::from(m.error_count)).sum(),
        active: mappings
            .iter()
            .filter(|m| m.status == MappingStatus::Active)
            .count(),
    }
}
