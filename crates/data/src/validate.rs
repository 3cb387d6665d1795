//! Load-time invariant checks for the sample collections.
//!
//! serde already enforces the closed enum sets and field shapes; these
//! checks cover what the type system cannot: id uniqueness and numeric
//! range invariants.

use crate::{DataError, DataResult};
use cdi_types::{ComplianceAudit, EmrFeed, PatientRecord, ThroughputPoint};
use std::collections::HashSet;

/// Every id in `ids` must be unique within `collection`.
pub(crate) fn check_unique_ids<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> DataResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DataError::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn invalid(collection: &'static str, id: &str, reason: String) -> DataError {
    DataError::InvalidRecord {
        collection,
        id: id.to_string(),
        reason,
    }
}

/// Feed rates and uptime are percentages.
pub(crate) fn check_feeds(feeds: &[EmrFeed]) -> DataResult<()> {
    for feed in feeds {
        if !(0.0..=100.0).contains(&feed.error_rate) {
            return Err(invalid(
                "feeds",
                &feed.id,
                format!("error rate {} outside 0..=100", feed.error_rate),
            ));
        }
        if !(0.0..=100.0).contains(&feed.uptime) {
            return Err(invalid(
                "feeds",
                &feed.id,
                format!("uptime {} outside 0..=100", feed.uptime),
            ));
        }
    }
    Ok(())
}

/// An audit cannot resolve more findings than it raised.
pub(crate) fn check_audits(audits: &[ComplianceAudit]) -> DataResult<()> {
    for audit in audits {
        if audit.resolved_findings > audit.findings {
            return Err(invalid(
                "audits",
                &audit.id,
                format!(
                    "resolved findings {} exceed findings {}",
                    audit.resolved_findings, audit.findings
                ),
            ));
        }
    }
    Ok(())
}

/// Completeness is a 0–100 percentage.
pub(crate) fn check_patients(patients: &[PatientRecord]) -> DataResult<()> {
    for patient in patients {
        if patient.data_completeness > 100 {
            return Err(invalid(
                "patients",
                &patient.id,
                format!("data completeness {} exceeds 100", patient.data_completeness),
            ));
        }
    }
    Ok(())
}

/// Latency cannot be negative.
pub(crate) fn check_throughput(points: &[ThroughputPoint]) -> DataResult<()> {
    for point in points {
        if point.avg_latency < 0.0 {
            return Err(invalid(
                "throughput",
                &point.month,
                format!("negative average latency {}", point.avg_latency),
            ));
        }
    }
    Ok(())
}
