//! HIPAA compliance audit records.
//!
//! Each record is one audit engagement with a finding count and a
//! resolution count. The invariant `resolved_findings <= findings` is
//! enforced when sample data is loaded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of a compliance audit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Compliant,
    ReviewNeeded,
    NonCompliant,
    PendingAudit,
}

impl ComplianceStatus {
    pub fn as_wire(self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::ReviewNeeded => "review-needed",
            ComplianceStatus::NonCompliant => "non-compliant",
            ComplianceStatus::PendingAudit => "pending-audit",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "compliant" => Some(ComplianceStatus::Compliant),
            "review-needed" => Some(ComplianceStatus::ReviewNeeded),
            "non-compliant" => Some(ComplianceStatus::NonCompliant),
            "pending-audit" => Some(ComplianceStatus::PendingAudit),
            _ => None,
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Kind of compliance audit engagement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AuditType {
    #[serde(rename = "Access Log")]
    AccessLog,
    #[serde(rename = "PHI Disclosure")]
    PhiDisclosure,
    #[serde(rename = "System Audit")]
    SystemAudit,
    #[serde(rename = "BAA Review")]
    BaaReview,
    #[serde(rename = "Risk Assessment")]
    RiskAssessment,
}

impl AuditType {
    pub fn as_wire(self) -> &'static str {
        match self {
            AuditType::AccessLog => "Access Log",
            AuditType::PhiDisclosure => "PHI Disclosure",
            AuditType::SystemAudit => "System Audit",
            AuditType::BaaReview => "BAA Review",
            AuditType::RiskAssessment => "Risk Assessment",
        }
    }
}

impl std::fmt::Display for AuditType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Risk classification assigned to an audit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_wire(self) -> &'static str {
        match self {
            RiskLevel::Critical => "critical",
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "critical" => Some(RiskLevel::Critical),
            "high" => Some(RiskLevel::High),
            "medium" => Some(RiskLevel::Medium),
            "low" => Some(RiskLevel::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// One compliance audit engagement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComplianceAudit {
    pub id: String,
    pub audit_type: AuditType,
    pub category: String,
    pub description: String,
    pub status: ComplianceStatus,
    pub auditor: String,
    pub audit_date: NaiveDate,
    pub due_date: NaiveDate,
    pub findings: u32,
    pub resolved_findings: u32,
    pub risk_level: RiskLevel,
}

impl ComplianceAudit {
    /// Findings not yet resolved.
    pub fn open_findings(&self) -> u32 {
        self.findings.saturating_sub(self.resolved_findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compliance_status_uses_kebab_case_wire_spellings() {
        assert_eq!(ComplianceStatus::ReviewNeeded.as_wire(), "review-needed");
        assert_eq!(
            ComplianceStatus::from_wire("pending-audit"),
            Some(ComplianceStatus::PendingAudit)
        );
        assert_eq!(ComplianceStatus::from_wire("pending_audit"), None);
    }

    #[test]
    fn risk_level_wire_spellings_round_trip() {
        for level in [
            RiskLevel::Critical,
            RiskLevel::High,
            RiskLevel::Medium,
            RiskLevel::Low,
        ] {
            assert_eq!(RiskLevel::from_wire(level.as_wire()), Some(level));
        }
    }
}
