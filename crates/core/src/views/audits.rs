//! Compliance audit trail view.
//!
//! The audit table filters by risk level and compliance status; it has no
//! free-text search box, so its search-field set is empty.

use crate::error::{CoreError, CoreResult};
use crate::view::{percentage, SortOrder, SortState, SortValue, ViewRecord};
use cdi_types::{ComplianceAudit, ComplianceStatus, RiskLevel};
use serde::Serialize;
use utoipa::ToSchema;

/// Filter selections for the audit table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuditFilter {
    pub risk_level: Option<RiskLevel>,
    pub status: Option<ComplianceStatus>,
}

/// Sortable columns of the audit table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditSortKey {
    AuditDate,
    DueDate,
    Findings,
}

impl AuditSortKey {
    pub fn as_wire(self) -> &'static str {
        match self {
            AuditSortKey::AuditDate => "auditDate",
            AuditSortKey::DueDate => "dueDate",
            AuditSortKey::Findings => "findings",
        }
    }

    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "auditDate" => Ok(AuditSortKey::AuditDate),
            "dueDate" => Ok(AuditSortKey::DueDate),
            "findings" => Ok(AuditSortKey::Findings),
            other => Err(CoreError::UnknownSortKey(other.to_string())),
        }
    }
}

impl ViewRecord for ComplianceAudit {
    type Filter = AuditFilter;
    type SortKey = AuditSortKey;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &AuditFilter) -> bool {
        filter.risk_level.is_none_or(|risk| self.risk_level == risk)
            && filter.status.is_none_or(|status| self.status == status)
    }

    fn search_fields(&self) -> Vec<&str> {
        Vec::new()
    }

    fn sort_value(&self, key: AuditSortKey) -> SortValue<'_> {
        match key {
            AuditSortKey::AuditDate => SortValue::Date(self.audit_date),
            AuditSortKey::DueDate => SortValue::Date(self.due_date),
            AuditSortKey::Findings => SortValue::Integer(u64::from(self.findings)),
        }
    }

    fn default_sort() -> SortState<AuditSortKey> {
        SortState {
            key: AuditSortKey::AuditDate,
            order: SortOrder::Descending,
        }
    }

    fn initial_order(_key: AuditSortKey) -> SortOrder {
        SortOrder::Descending
    }
}

/// Whole-trail summary, independent of the active filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub compliant: usize,
    pub pending: usize,
    pub critical: usize,
    /// Findings not yet resolved, across every audit.
    pub open_findings: u64,
    /// Compliant audits as a whole-number percentage of all audits;
    /// 0 for an empty trail.
    pub compliance_score: u32,
}

/// Reduce the full, unfiltered audit trail to its summary.
pub fn summarize(audits: &[ComplianceAudit]) -> AuditSummary {
    let compliant = audits
        .iter()
        .filter(|a| a.status == ComplianceStatus::Compliant)
        .count();
    let pending = audits
        .iter()
        .filter(|a| a.status == ComplianceStatus::PendingAudit)
        .count();
    let critical = audits
        .iter()
        .filter(|a| a.risk_level == RiskLevel::Critical)
        .count();
    let open_findings = audits.iter().map(|a| u64::from(a.open_findings())).sum();

    AuditSummary {
        compliant,
        pending,
        critical,
        open_findings,
        compliance_score: percentage(compliant, audits.len()),
    }
}
