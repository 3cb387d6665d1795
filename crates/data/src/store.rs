//! The loaded dashboard store.

use crate::validate;
use crate::{DataError, DataResult};
use cdi_types::{
    ComplianceAudit, DataMapping, EmrFeed, Hl7Message, PatientRecord, SystemMetric,
    ThroughputPoint,
};
use serde::de::DeserializeOwned;

const FEEDS_YAML: &str = include_str!("../fixtures/feeds.yaml");
const MESSAGES_YAML: &str = include_str!("../fixtures/messages.yaml");
const MAPPINGS_YAML: &str = include_str!("../fixtures/mappings.yaml");
const AUDITS_YAML: &str = include_str!("../fixtures/audits.yaml");
const PATIENTS_YAML: &str = include_str!("../fixtures/patients.yaml");
const THROUGHPUT_YAML: &str = include_str!("../fixtures/throughput.yaml");
const METRICS_YAML: &str = include_str!("../fixtures/metrics.yaml");

/// Parse one fixture document, surfacing the path to any failing field.
fn parse_fixture<T: DeserializeOwned>(fixture: &'static str, text: &str) -> DataResult<Vec<T>> {
    let deserializer = serde_yaml::Deserializer::from_str(text);
    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let path = err.path().to_string();
        let path = if path.is_empty() {
            "<root>".to_string()
        } else {
            path
        };
        DataError::Parse {
            fixture,
            path,
            source: err.into_inner(),
        }
    })
}

/// Every collection the dashboard renders, loaded once and never mutated.
#[derive(Clone, Debug)]
pub struct DashboardStore {
    pub feeds: Vec<EmrFeed>,
    pub messages: Vec<Hl7Message>,
    pub mappings: Vec<DataMapping>,
    pub audits: Vec<ComplianceAudit>,
    pub patients: Vec<PatientRecord>,
    pub throughput: Vec<ThroughputPoint>,
    pub metrics: Vec<SystemMetric>,
}

impl DashboardStore {
    /// Parse and validate the embedded fixtures.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] if any fixture fails to parse or violates a
    /// collection invariant. This indicates a defective build, so callers
    /// treat it as fatal at startup.
    pub fn load() -> DataResult<Self> {
        let feeds: Vec<EmrFeed> = parse_fixture("feeds", FEEDS_YAML)?;
        let messages: Vec<Hl7Message> = parse_fixture("messages", MESSAGES_YAML)?;
        let mappings: Vec<DataMapping> = parse_fixture("mappings", MAPPINGS_YAML)?;
        let audits: Vec<ComplianceAudit> = parse_fixture("audits", AUDITS_YAML)?;
        let patients: Vec<PatientRecord> = parse_fixture("patients", PATIENTS_YAML)?;
        let throughput: Vec<ThroughputPoint> = parse_fixture("throughput", THROUGHPUT_YAML)?;
        let metrics: Vec<SystemMetric> = parse_fixture("metrics", METRICS_YAML)?;

        validate::check_unique_ids("feeds", feeds.iter().map(|f| f.id.as_str()))?;
        validate::check_unique_ids("messages", messages.iter().map(|m| m.id.as_str()))?;
        validate::check_unique_ids("mappings", mappings.iter().map(|m| m.id.as_str()))?;
        validate::check_unique_ids("audits", audits.iter().map(|a| a.id.as_str()))?;
        validate::check_unique_ids("patients", patients.iter().map(|p| p.id.as_str()))?;

        validate::check_feeds(&feeds)?;
        validate::check_audits(&audits)?;
        validate::check_patients(&patients)?;
        validate::check_throughput(&throughput)?;

        Ok(Self {
            feeds,
            messages,
            mappings,
            audits,
            patients,
            throughput,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdi_types::{ComplianceStatus, IntegrationStatus, MessageStatus};

    #[test]
    fn embedded_fixtures_load_and_validate() {
        let store = DashboardStore::load().expect("fixtures should load");
        assert!(!store.feeds.is_empty());
        assert!(!store.messages.is_empty());
        assert!(!store.mappings.is_empty());
        assert!(!store.audits.is_empty());
        assert!(!store.patients.is_empty());
        assert_eq!(store.throughput.len(), 12);
        assert!(!store.metrics.is_empty());
    }

    #[test]
    fn fixtures_exercise_the_filterable_statuses() {
        let store = DashboardStore::load().expect("fixtures should load");
        // The demo is meant to show off every badge; make sure the sample
        // data keeps at least one unhealthy entry per collection.
        assert!(store
            .feeds
            .iter()
            .any(|f| f.status == IntegrationStatus::Error));
        assert!(store
            .messages
            .iter()
            .any(|m| m.status == MessageStatus::Error && m.error_detail.is_some()));
        assert!(store
            .audits
            .iter()
            .any(|a| a.status == ComplianceStatus::NonCompliant));
    }

    #[test]
    fn audit_fixtures_never_resolve_more_than_found() {
        let store = DashboardStore::load().expect("fixtures should load");
        assert!(store
            .audits
            .iter()
            .all(|a| a.resolved_findings <= a.findings));
    }

    #[test]
    fn parse_reports_the_failing_field_path() {
        let bad = r#"
- id: FEED-900
  emrSystem: Epic
  facilityName: Nowhere
  status: offline
  messageTypes: [ADT]
  messagesPerHour: 10
  lastSync: "2026-02-24T14:00:00Z"
  errorRate: 0.1
  uptime: 99.0
  connectionType: SFTP
"#;
        let err = parse_fixture::<EmrFeed>("feeds", bad).expect_err("unknown status");
        match err {
            DataError::Parse { fixture, path, .. } => {
                assert_eq!(fixture, "feeds");
                assert!(path.contains("status"), "path was {path}");
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        let bad = r#"
- id: FEED-901
  emrSystem: Epic
  facilityName: Nowhere
  status: active
  messageTypes: [ADT]
  messagesPerHour: 10
  lastSync: "2026-02-24T14:00:00Z"
  errorRate: 0.1
  uptime: 99.0
  connectionType: SFTP
  bandwidth: 12
"#;
        assert!(parse_fixture::<EmrFeed>("feeds", bad).is_err());
    }

    #[test]
    fn invariant_violations_are_invalid_records() {
        let bad = r#"
- id: AUD-900
  auditType: Access Log
  category: PHI Access Controls
  description: Review
  status: compliant
  auditor: K. Osei
  auditDate: "2026-01-15"
  dueDate: "2026-03-15"
  findings: 1
  resolvedFindings: 4
  riskLevel: low
"#;
        let audits = parse_fixture::<ComplianceAudit>("audits", bad).expect("shape is valid");
        let err = crate::validate::check_audits(&audits).expect_err("invariant violated");
        match err {
            DataError::InvalidRecord { collection, id, .. } => {
                assert_eq!(collection, "audits");
                assert_eq!(id, "AUD-900");
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }
}
