//! # CDI Types
//!
//! Domain types for the clinical data integration dashboard.
//!
//! This crate defines the record shapes for every dashboard collection
//! (EMR feeds, HL7 message log entries, field mappings, compliance audits,
//! patient records) plus the throughput series and headline metrics shown
//! on the overview page.
//!
//! Records are flat, immutable values with a stable string `id`. Status and
//! category fields are closed enumerations with fixed wire spellings; the
//! same spellings are used by serde, by query-parameter parsing, and by the
//! CLI. Temporal fields are typed (`DateTime<Utc>` for instants,
//! `NaiveDate` for calendar dates) rather than carried as strings.
//!
//! **No view concerns**: filtering, sorting, and aggregation live in
//! `cdi-core`; sample data and its validation live in `cdi-data`.

pub mod audit;
pub mod feed;
pub mod mapping;
pub mod message;
pub mod metrics;
pub mod patient;

pub use audit::{AuditType, ComplianceAudit, ComplianceStatus, RiskLevel};
pub use feed::{ConnectionType, EmrFeed, IntegrationStatus};
pub use mapping::{DataMapping, MappingStatus};
pub use message::{Hl7Message, Hl7MessageType, MessageStatus};
pub use metrics::{SystemMetric, ThroughputPoint, TrendStatus};
pub use patient::{Gender, PatientFeedStatus, PatientRecord};
