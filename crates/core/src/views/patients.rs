//! Patient record view.

use crate::error::{CoreError, CoreResult};
use crate::view::{SortOrder, SortState, SortValue, ViewRecord};
use cdi_types::{PatientFeedStatus, PatientRecord};
use serde::Serialize;
use utoipa::ToSchema;

/// Filter selections for the patient table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatientFilter {
    pub feed_status: Option<PatientFeedStatus>,
}

/// Sortable columns of the patient table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatientSortKey {
    LastName,
    LastEncounter,
    DataCompleteness,
}

impl PatientSortKey {
    pub fn as_wire(self) -> &'static str {
        match self {
            PatientSortKey::LastName => "lastName",
            PatientSortKey::LastEncounter => "lastEncounter",
            PatientSortKey::DataCompleteness => "dataCompleteness",
        }
    }

    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "lastName" => Ok(PatientSortKey::LastName),
            "lastEncounter" => Ok(PatientSortKey::LastEncounter),
            "dataCompleteness" => Ok(PatientSortKey::DataCompleteness),
            other => Err(CoreError::UnknownSortKey(other.to_string())),
        }
    }
}

impl ViewRecord for PatientRecord {
    type Filter = PatientFilter;
    type SortKey = PatientSortKey;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &PatientFilter) -> bool {
        filter
            .feed_status
            .is_none_or(|status| self.feed_status == status)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.mrn,
            &self.first_name,
            &self.last_name,
            &self.primary_provider,
            &self.facility,
        ]
    }

    fn sort_value(&self, key: PatientSortKey) -> SortValue<'_> {
        match key {
            PatientSortKey::LastName => SortValue::Text(&self.last_name),
            PatientSortKey::LastEncounter => SortValue::Date(self.last_encounter),
            PatientSortKey::DataCompleteness => {
                SortValue::Integer(u64::from(self.data_completeness))
            }
        }
    }

    fn default_sort() -> SortState<PatientSortKey> {
        SortState {
            key: PatientSortKey::LastEncounter,
            order: SortOrder::Descending,
        }
    }

    fn initial_order(_key: PatientSortKey) -> SortOrder {
        SortOrder::Descending
    }
}

/// Whole-table summary, independent of the active filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub streaming: usize,
    pub feed_errors: usize,
    /// Mean data completeness rounded to the nearest whole percent;
    /// 0 for an empty table.
    pub avg_completeness: u32,
}

/// Reduce the full, unfiltered patient table to its summary.
pub fn summarize(patients: &[PatientRecord]) -> PatientSummary {
    let streaming = patients
        .iter()
        .filter(|p| p.feed_status == PatientFeedStatus::Streaming)
        .count();
    let feed_errors = patients
        .iter()
        .filter(|p| p.feed_status == PatientFeedStatus::Error)
        .count();

    let avg_completeness = if patients.is_empty() {
        0
    } else {
        let total: u64 = patients
            .iter()
            .map(|p| u64::from(p.data_completeness))
            .sum();
        (total as f64 / patients.len() as f64).round() as u32
    };

    PatientSummary {
        streaming,
        feed_errors,
        avg_completeness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::project;
    use cdi_types::Gender;
    use chrono::NaiveDate;

    fn patient(
        id: &str,
        last_name: &str,
        feed_status: PatientFeedStatus,
        completeness: u8,
        encounter_day: u32,
    ) -> PatientRecord {
        PatientRecord {
            id: id.to_string(),
            mrn: format!("MRN-{id}"),
            first_name: "Alex".to_string(),
            last_name: last_name.to_string(),
            dob: NaiveDate::from_ymd_opt(1985, 6, 12).unwrap(),
            gender: Gender::Other,
            insurance_provider: "Aetna".to_string(),
            primary_provider: "Dr. Chen".to_string(),
            facility: "Mercy General".to_string(),
            last_encounter: NaiveDate::from_ymd_opt(2026, 2, encounter_day).unwrap(),
            feed_status,
            data_completeness: completeness,
            emr_source: "Epic".to_string(),
            diagnosis_codes: vec!["E11.9".to_string()],
        }
    }

    #[test]
    fn default_sort_is_most_recent_encounter_first() {
        let store = vec![
            patient("p1", "Williams", PatientFeedStatus::Streaming, 95, 3),
            patient("p2", "Garcia", PatientFeedStatus::Streaming, 88, 21),
            patient("p3", "Okafor", PatientFeedStatus::Paused, 70, 12),
        ];
        let rows = project(
            &store,
            &PatientFilter::default(),
            "",
            PatientRecord::default_sort(),
        );
        assert_eq!(
            rows.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["p2", "p3", "p1"]
        );
    }

    #[test]
    fn last_name_sort_ignores_case() {
        let store = vec![
            patient("p1", "williams", PatientFeedStatus::Streaming, 95, 3),
            patient("p2", "GARCIA", PatientFeedStatus::Streaming, 88, 4),
        ];
        let sort = SortState {
            key: PatientSortKey::LastName,
            order: SortOrder::Ascending,
        };
        let rows = project(&store, &PatientFilter::default(), "", sort);
        assert_eq!(
            rows.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["p2", "p1"]
        );
    }

    #[test]
    fn feed_filter_and_search_conjoin() {
        let store = vec![
            patient("p1", "Williams", PatientFeedStatus::Streaming, 95, 3),
            patient("p2", "Garcia", PatientFeedStatus::Error, 88, 4),
        ];
        let filter = PatientFilter {
            feed_status: Some(PatientFeedStatus::Error),
        };
        let rows = project(&store, &filter, "garcia", PatientRecord::default_sort());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "p2");

        let rows = project(&store, &filter, "williams", PatientRecord::default_sort());
        assert!(rows.is_empty());
    }

    #[test]
    fn summary_averages_completeness_with_rounding() {
        let store = vec![
            patient("p1", "A", PatientFeedStatus::Streaming, 90, 1),
            patient("p2", "B", PatientFeedStatus::Streaming, 85, 2),
            patient("p3", "C", PatientFeedStatus::Error, 76, 3),
        ];
        let summary = summarize(&store);
        assert_eq!(summary.streaming, 2);
        assert_eq!(summary.feed_errors, 1);
        // (90 + 85 + 76) / 3 = 83.67 → 84
        assert_eq!(summary.avg_completeness, 84);
    }

    #[test]
    fn empty_table_summarises_to_zeroes() {
        let summary = summarize(&[]);
        assert_eq!(summary.streaming, 0);
        assert_eq!(summary.avg_completeness, 0);
    }
}
