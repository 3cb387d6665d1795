//! HL7-to-FHIR field mapping configuration records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of a field mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MappingStatus {
    /// Mapping is live.
    Active,
    /// Mapping is being authored and is not yet applied.
    Draft,
    /// Mapping is retained for history but no longer applied.
    Deprecated,
    /// Mapping is failing; see `error_count`.
    Error,
}

impl MappingStatus {
    pub fn as_wire(self) -> &'static str {
        match self {
            MappingStatus::Active => "active",
            MappingStatus::Draft => "draft",
            MappingStatus::Deprecated => "deprecated",
            MappingStatus::Error => "error",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "active" => Some(MappingStatus::Active),
            "draft" => Some(MappingStatus::Draft),
            "deprecated" => Some(MappingStatus::Deprecated),
            "error" => Some(MappingStatus::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// One source-field to target-field transformation rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DataMapping {
    pub id: String,
    pub name: String,
    pub source_system: String,
    pub source_field: String,
    pub target_field: String,
    pub data_type: String,
    pub transform_rule: String,
    pub status: MappingStatus,
    pub last_modified: NaiveDate,
    pub mapped_records: u64,
    pub error_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_status_wire_spellings_round_trip() {
        for status in [
            MappingStatus::Active,
            MappingStatus::Draft,
            MappingStatus::Deprecated,
            MappingStatus::Error,
        ] {
            assert_eq!(MappingStatus::from_wire(status.as_wire()), Some(status));
        }
        assert_eq!(MappingStatus::from_wire("retired"), None);
    }
}
