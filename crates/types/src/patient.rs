//! Integrated patient records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Live state of a patient's data feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PatientFeedStatus {
    /// Updates are flowing.
    Streaming,
    /// Feed intentionally paused.
    Paused,
    /// Feed is failing.
    Error,
    /// Waiting for the next sync window.
    Queued,
}

impl PatientFeedStatus {
    pub fn as_wire(self) -> &'static str {
        match self {
            PatientFeedStatus::Streaming => "streaming",
            PatientFeedStatus::Paused => "paused",
            PatientFeedStatus::Error => "error",
            PatientFeedStatus::Queued => "queued",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "streaming" => Some(PatientFeedStatus::Streaming),
            "paused" => Some(PatientFeedStatus::Paused),
            "error" => Some(PatientFeedStatus::Error),
            "queued" => Some(PatientFeedStatus::Queued),
            _ => None,
        }
    }
}

impl std::fmt::Display for PatientFeedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Administrative gender as recorded in the source EMR.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

impl Gender {
    /// Human-readable label for display surfaces.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// One patient as aggregated across EMR source systems.
///
/// `data_completeness` is a 0–100 percentage of populated demographic and
/// clinical fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatientRecord {
    pub id: String,
    pub mrn: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    pub insurance_provider: String,
    pub primary_provider: String,
    pub facility: String,
    pub last_encounter: NaiveDate,
    pub feed_status: PatientFeedStatus,
    pub data_completeness: u8,
    pub emr_source: String,
    pub diagnosis_codes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_status_wire_spellings_round_trip() {
        for status in [
            PatientFeedStatus::Streaming,
            PatientFeedStatus::Paused,
            PatientFeedStatus::Error,
            PatientFeedStatus::Queued,
        ] {
            assert_eq!(PatientFeedStatus::from_wire(status.as_wire()), Some(status));
        }
    }

    #[test]
    fn gender_serialises_single_letter_codes() {
        assert_eq!(
            serde_json::to_string(&Gender::Female).expect("serialise"),
            "\"F\""
        );
        assert_eq!(Gender::Other.label(), "Other");
    }
}
