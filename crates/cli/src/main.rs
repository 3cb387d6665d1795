use clap::{Args, Parser, Subcommand};

use cdi_core::views::audits::{self, AuditFilter, AuditSortKey};
use cdi_core::views::feeds::{self, FeedFilter};
use cdi_core::views::mappings::{self, MappingFilter, MappingSortKey};
use cdi_core::views::messages::{self, MessageFilter, MessageSortKey};
use cdi_core::views::patients::{self, PatientFilter, PatientSortKey};
use cdi_core::{CoreError, SortOrder, SortState, ViewRecord, ViewState};
use cdi_data::DashboardStore;
use cdi_types::{
    ComplianceStatus, Hl7MessageType, IntegrationStatus, MappingStatus, MessageStatus,
    PatientFeedStatus, RiskLevel,
};

#[derive(Parser)]
#[command(name = "cdi")]
#[command(about = "Clinical data integration dashboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Sort and expansion flags shared by the table views.
#[derive(Args)]
struct TableArgs {
    /// Sort key (matches the JSON field name, e.g. "timestamp")
    #[arg(long)]
    sort: Option<String>,
    /// Sort order: asc or desc
    #[arg(long)]
    order: Option<String>,
    /// Print the detail block under the row with this id
    #[arg(long)]
    expand: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show EMR integration feeds
    Feeds {
        /// Filter by integration status
        #[arg(long)]
        status: Option<String>,
    },
    /// Show the HL7 message log
    Messages {
        /// Filter by message type (ADT, ORU, ...)
        #[arg(long = "type")]
        message_type: Option<String>,
        /// Filter by delivery status
        #[arg(long)]
        status: Option<String>,
        /// Case-insensitive substring search
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Show field mapping rules
    Mappings {
        /// Filter by mapping status
        #[arg(long)]
        status: Option<String>,
        /// Case-insensitive substring search
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Show the compliance audit trail
    Audits {
        /// Filter by risk level
        #[arg(long)]
        risk: Option<String>,
        /// Filter by compliance status
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Show integrated patient records
    Patients {
        /// Filter by patient feed status
        #[arg(long)]
        feed: Option<String>,
        /// Case-insensitive substring search
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Show the overview summaries
    Overview,
}

/// Resolve --sort/--order flags the same way a column-header click would.
fn resolve_sort<R: ViewRecord>(
    table: &TableArgs,
    parse_key: fn(&str) -> Result<R::SortKey, CoreError>,
) -> Result<SortState<R::SortKey>, CoreError> {
    let key = match table.sort.as_deref() {
        Some(token) => parse_key(token)?,
        None => R::default_sort().key,
    };
    let order = match table.order.as_deref() {
        Some(token) => {
            SortOrder::from_wire(token).ok_or_else(|| CoreError::UnknownSortOrder(token.into()))?
        }
        None if table.sort.is_some() => R::initial_order(key),
        None => R::default_sort().order,
    };
    Ok(SortState { key, order })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let store = DashboardStore::load()?;

    match cli.command {
        Some(Commands::Feeds { status }) => {
            let filter = FeedFilter {
                status: status.as_deref().and_then(IntegrationStatus::from_wire),
            };
            let rows = feeds::filter_feeds(&store.feeds, &filter);
            for feed in &rows {
                println!(
                    "ID: {}, System: {}, Facility: {}, Status: {}, Msg/hr: {}, Uptime: {}%, Via: {}",
                    feed.id,
                    feed.emr_system,
                    feed.facility_name,
                    feed.status,
                    feed.messages_per_hour,
                    feed.uptime,
                    feed.connection_type
                );
            }
            println!("{} of {} feeds", rows.len(), store.feeds.len());
            let summary = feeds::summarize(&store.feeds);
            println!(
                "Active: {}, Degraded: {}, Error: {}, Maintenance: {}, Messages/hr: {}",
                summary.active,
                summary.degraded,
                summary.error,
                summary.maintenance,
                summary.messages_per_hour
            );
        }
        Some(Commands::Messages {
            message_type,
            status,
            search,
            table,
        }) => {
            let mut view = ViewState::<cdi_types::Hl7Message>::new();
            view.set_filter(MessageFilter {
                message_type: message_type.as_deref().and_then(Hl7MessageType::from_wire),
                status: status.as_deref().and_then(MessageStatus::from_wire),
            });
            view.set_search(search.unwrap_or_default());
            view.set_sort(resolve_sort::<cdi_types::Hl7Message>(
                &table,
                MessageSortKey::parse,
            )?);
            view.set_expanded(table.expand);

            let rows = view.project(&store.messages);
            if rows.is_empty() {
                println!("No HL7 messages match this filter.");
            }
            for msg in &rows {
                println!(
                    "ID: {}, Type: {}, Event: {}, From: {}, MRN: {}, At: {}, Status: {}, Proc: {}ms, Segs: {}",
                    msg.id,
                    msg.message_type,
                    msg.trigger_event,
                    msg.sending_facility,
                    msg.patient_mrn,
                    msg.timestamp.format("%H:%M:%S"),
                    msg.status,
                    msg.processing_time,
                    msg.segment_count
                );
                if view.is_expanded(&msg.id) {
                    println!("    Control ID: {}", msg.message_control_id);
                    println!("    Patient: {}", msg.patient_name);
                    println!("    Receiving: {}", msg.receiving_facility);
                    if let Some(detail) = &msg.error_detail {
                        println!("    Error: {detail}");
                    }
                }
            }
            println!("{} of {} messages", rows.len(), store.messages.len());
            let summary = messages::summarize(&store.messages);
            println!(
                "Delivered: {}, Errors: {}, In flight: {}, Avg processing: {}ms",
                summary.delivered, summary.errors, summary.in_flight, summary.avg_processing_time
            );
        }
        Some(Commands::Mappings {
            status,
            search,
            table,
        }) => {
            let mut view = ViewState::<cdi_types::DataMapping>::new();
            view.set_filter(MappingFilter {
                status: status.as_deref().and_then(MappingStatus::from_wire),
            });
            view.set_search(search.unwrap_or_default());
            view.set_sort(resolve_sort::<cdi_types::DataMapping>(
                &table,
                MappingSortKey::parse,
            )?);
            view.set_expanded(table.expand);

            let rows = view.project(&store.mappings);
            if rows.is_empty() {
                println!("No mappings match this filter.");
            }
            for mapping in &rows {
                println!(
                    "ID: {}, Name: {}, {} {} -> {}, Status: {}, Records: {}, Errors: {}",
                    mapping.id,
                    mapping.name,
                    mapping.source_system,
                    mapping.source_field,
                    mapping.target_field,
                    mapping.status,
                    mapping.mapped_records,
                    mapping.error_count
                );
                if view.is_expanded(&mapping.id) {
                    println!("    Data type: {}", mapping.data_type);
                    println!("    Transform: {}", mapping.transform_rule);
                    println!("    Modified: {}", mapping.last_modified);
                }
            }
            println!("{} of {} mappings", rows.len(), store.mappings.len());
            let summary = mappings::summarize(&store.mappings);
            println!(
                "Mapped records: {}, Errors: {}, Active: {}",
                summary.mapped_records, summary.errors, summary.active
            );
        }
        Some(Commands::Audits {
            risk,
            status,
            table,
        }) => {
            let mut view = ViewState::<cdi_types::ComplianceAudit>::new();
            view.set_filter(AuditFilter {
                risk_level: risk.as_deref().and_then(RiskLevel::from_wire),
                status: status.as_deref().and_then(ComplianceStatus::from_wire),
            });
            view.set_sort(resolve_sort::<cdi_types::ComplianceAudit>(
                &table,
                AuditSortKey::parse,
            )?);
            view.set_expanded(table.expand);

            let rows = view.project(&store.audits);
            if rows.is_empty() {
                println!("No compliance audits match this filter.");
            }
            for audit in &rows {
                println!(
                    "ID: {}, Type: {}, Status: {}, Risk: {}, Auditor: {}, Audited: {}, Due: {}, Findings: {}/{}",
                    audit.id,
                    audit.audit_type,
                    audit.status,
                    audit.risk_level,
                    audit.auditor,
                    audit.audit_date,
                    audit.due_date,
                    audit.resolved_findings,
                    audit.findings
                );
                if view.is_expanded(&audit.id) {
                    println!("    Category: {}", audit.category);
                    println!("    {}", audit.description);
                    println!("    Open findings: {}", audit.open_findings());
                }
            }
            println!("{} of {} audits", rows.len(), store.audits.len());
            let summary = audits::summarize(&store.audits);
            println!(
                "Score: {}%, Open findings: {}, Pending: {}, Critical: {}",
                summary.compliance_score, summary.open_findings, summary.pending, summary.critical
            );
        }
        Some(Commands::Patients {
            feed,
            search,
            table,
        }) => {
            let mut view = ViewState::<cdi_types::PatientRecord>::new();
            view.set_filter(PatientFilter {
                feed_status: feed.as_deref().and_then(PatientFeedStatus::from_wire),
            });
            view.set_search(search.unwrap_or_default());
            view.set_sort(resolve_sort::<cdi_types::PatientRecord>(
                &table,
                PatientSortKey::parse,
            )?);
            view.set_expanded(table.expand);

            let rows = view.project(&store.patients);
            if rows.is_empty() {
                println!("No patient records match this filter.");
            }
            for patient in &rows {
                println!(
                    "ID: {}, MRN: {}, Name: {} {}, Facility: {}, Feed: {}, Complete: {}%, Last seen: {}",
                    patient.id,
                    patient.mrn,
                    patient.first_name,
                    patient.last_name,
                    patient.facility,
                    patient.feed_status,
                    patient.data_completeness,
                    patient.last_encounter
                );
                if view.is_expanded(&patient.id) {
                    println!("    DOB: {} ({})", patient.dob, patient.gender.label());
                    println!("    Insurance: {}", patient.insurance_provider);
                    println!("    Provider: {}", patient.primary_provider);
                    println!("    Source: {}", patient.emr_source);
                    println!("    Diagnoses: {}", patient.diagnosis_codes.join(", "));
                }
            }
            println!("{} of {} patients", rows.len(), store.patients.len());
            let summary = patients::summarize(&store.patients);
            println!(
                "Streaming: {}, Feed errors: {}, Avg completeness: {}%",
                summary.streaming, summary.feed_errors, summary.avg_completeness
            );
        }
        Some(Commands::Overview) => {
            for metric in &store.metrics {
                println!(
                    "{}: {} ({:+} {})",
                    metric.label, metric.value, metric.change, metric.change_label
                );
            }
            let summary = feeds::summarize(&store.feeds);
            println!(
                "Feeds: {} active, {} degraded, {} error, {} maintenance",
                summary.active, summary.degraded, summary.error, summary.maintenance
            );
            println!("Recent messages:");
            for msg in messages::recent(&store.messages, cdi_core::config::DEFAULT_RECENT_MESSAGES) {
                println!(
                    "  {} {} {} from {} ({})",
                    msg.timestamp.format("%H:%M:%S"),
                    msg.message_type,
                    msg.trigger_event,
                    msg.sending_facility,
                    msg.status
                );
            }
        }
        None => {
            println!("Use 'cdi --help' for commands");
        }
    }

    Ok(())
}
