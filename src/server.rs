//! REST surface for the dashboard.
//!
//! Every list endpoint accepts the same family of query parameters the
//! dashboard's filter bar exposes: enum filters, free-text `q`, `sort` and
//! `order` tokens matching the serialised field names, and `expanded` for
//! the open detail row. Unknown filter values act as "no constraint";
//! unknown sort tokens are a 400.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use cdi_core::views::audits::{self, AuditFilter, AuditSortKey, AuditSummary};
use cdi_core::views::feeds::{self, FeedFilter, FeedSummary};
use cdi_core::views::mappings::{self, MappingFilter, MappingSortKey, MappingSummary};
use cdi_core::views::messages::{self, MessageFilter, MessageSortKey, MessageSummary};
use cdi_core::views::patients::{self, PatientFilter, PatientSortKey, PatientSummary};
use cdi_core::{
    ConnectionProbe, CoreError, CoreResult, ProbeOutcome, SortOrder, SortState, ViewRecord,
    ViewState,
};
use cdi_data::DashboardStore;
use cdi_types::{
    AuditType, ComplianceAudit, ComplianceStatus, ConnectionType, DataMapping, EmrFeed, Gender,
    Hl7Message, Hl7MessageType, IntegrationStatus, MappingStatus, MessageStatus, PatientFeedStatus,
    PatientRecord, RiskLevel, SystemMetric, ThroughputPoint, TrendStatus,
};

/// Application state shared across REST API handlers.
///
/// The store is loaded once at startup and never mutated; handlers derive
/// per-request projections from it.
#[derive(Clone)]
pub struct AppState {
    store: Arc<DashboardStore>,
    probe: Arc<dyn ConnectionProbe + Send + Sync>,
    recent_messages: usize,
}

impl AppState {
    pub fn new(
        store: Arc<DashboardStore>,
        probe: Arc<dyn ConnectionProbe + Send + Sync>,
        recent_messages: usize,
    ) -> Self {
        Self {
            store,
            probe,
            recent_messages,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_feeds,
        test_feed,
        list_messages,
        list_mappings,
        list_audits,
        list_patients,
        overview
    ),
    components(schemas(
        HealthRes,
        ListFeedsRes,
        TestFeedRes,
        ListMessagesRes,
        ListMappingsRes,
        ListAuditsRes,
        ListPatientsRes,
        OverviewRes,
        EmrFeed,
        Hl7Message,
        DataMapping,
        ComplianceAudit,
        PatientRecord,
        SystemMetric,
        ThroughputPoint,
        IntegrationStatus,
        ConnectionType,
        Hl7MessageType,
        MessageStatus,
        MappingStatus,
        AuditType,
        ComplianceStatus,
        RiskLevel,
        PatientFeedStatus,
        Gender,
        TrendStatus,
        FeedSummary,
        MessageSummary,
        MappingSummary,
        AuditSummary,
        PatientSummary,
        ProbeOutcome
    ))
)]
struct ApiDoc;

/// Build the dashboard router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/feeds", get(list_feeds))
        .route("/feeds/:id/test", post(test_feed))
        .route("/messages", get(list_messages))
        .route("/mappings", get(list_mappings))
        .route("/audits", get(list_audits))
        .route("/patients", get(list_patients))
        .route("/overview", get(overview))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn bad_request(err: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}

/// Resolve `sort`/`order` tokens into a sort state.
///
/// No tokens means the view's default sort. A sort token alone applies
/// that key's initial order, matching a first click on the column header.
fn resolve_sort<R: ViewRecord>(
    sort: Option<&str>,
    order: Option<&str>,
    parse_key: fn(&str) -> CoreResult<R::SortKey>,
) -> Result<SortState<R::SortKey>, (StatusCode, String)> {
    let key = match sort {
        Some(token) => parse_key(token).map_err(bad_request)?,
        None => R::default_sort().key,
    };

    let order = match order {
        Some(token) => SortOrder::from_wire(token)
            .ok_or_else(|| bad_request(CoreError::UnknownSortOrder(token.to_string())))?,
        None if sort.is_some() => R::initial_order(key),
        None => R::default_sort().order,
    };

    Ok(SortState { key, order })
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize, ToSchema)]
struct HealthRes {
    ok: bool,
    message: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "CDI is alive".into(),
    })
}

// ---------------------------------------------------------------------------
// Feeds
// ---------------------------------------------------------------------------

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct FeedsQuery {
    /// Integration status filter; unknown values apply no constraint.
    status: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListFeedsRes {
    feeds: Vec<EmrFeed>,
    matched: usize,
    total: usize,
    summary: FeedSummary,
}

#[utoipa::path(
    get,
    path = "/feeds",
    params(FeedsQuery),
    responses(
        (status = 200, description = "EMR feed grid with whole-grid summary", body = ListFeedsRes)
    )
)]
/// List EMR integration feeds.
///
/// The summary always reflects every feed, regardless of the filter.
async fn list_feeds(
    State(state): State<AppState>,
    Query(query): Query<FeedsQuery>,
) -> Json<ListFeedsRes> {
    let filter = FeedFilter {
        status: query
            .status
            .as_deref()
            .and_then(IntegrationStatus::from_wire),
    };
    let rows = feeds::filter_feeds(&state.store.feeds, &filter);

    Json(ListFeedsRes {
        matched: rows.len(),
        total: state.store.feeds.len(),
        summary: feeds::summarize(&state.store.feeds),
        feeds: rows.into_iter().cloned().collect(),
    })
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct TestFeedRes {
    feed_id: String,
    outcome: ProbeOutcome,
    latency_ms: u64,
}

#[utoipa::path(
    post,
    path = "/feeds/{id}/test",
    params(("id" = String, Path, description = "Feed id")),
    responses(
        (status = 200, description = "Probe verdict for the feed", body = TestFeedRes),
        (status = 404, description = "Unknown feed id")
    )
)]
/// Test the connection of one feed.
///
/// Waits out the probe's simulated round-trip before answering.
async fn test_feed(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TestFeedRes>, (StatusCode, String)> {
    let feed = feeds::find(&state.store.feeds, &id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown feed: {id}")))?;

    let latency = state.probe.latency();
    tokio::time::sleep(latency).await;
    let outcome = state.probe.check(feed);
    tracing::info!(feed = %id, %outcome, "connection test completed");

    Ok(Json(TestFeedRes {
        feed_id: id,
        outcome,
        latency_ms: latency.as_millis() as u64,
    }))
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct MessagesQuery {
    /// Message type filter (ADT, ORU, ...); unknown values apply no constraint.
    #[serde(rename = "type")]
    message_type: Option<String>,
    /// Delivery status filter; unknown values apply no constraint.
    status: Option<String>,
    /// Case-insensitive substring search.
    q: Option<String>,
    /// Sort key: timestamp, processingTime, or segmentCount.
    sort: Option<String>,
    /// Sort order: asc or desc.
    order: Option<String>,
    /// Id of the expanded row, if any.
    expanded: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListMessagesRes {
    messages: Vec<Hl7Message>,
    matched: usize,
    total: usize,
    summary: MessageSummary,
    /// Detail row, present when `expanded` names a visible message.
    #[serde(skip_serializing_if = "Option::is_none")]
    expanded: Option<Hl7Message>,
}

#[utoipa::path(
    get,
    path = "/messages",
    params(MessagesQuery),
    responses(
        (status = 200, description = "Filtered, sorted message log", body = ListMessagesRes),
        (status = 400, description = "Unknown sort key or order")
    )
)]
/// List HL7 message log entries.
async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<ListMessagesRes>, (StatusCode, String)> {
    let mut view = ViewState::<Hl7Message>::new();
    view.set_filter(MessageFilter {
        message_type: query
            .message_type
            .as_deref()
            .and_then(Hl7MessageType::from_wire),
        status: query.status.as_deref().and_then(MessageStatus::from_wire),
    });
    view.set_search(query.q.unwrap_or_default());
    view.set_sort(resolve_sort::<Hl7Message>(
        query.sort.as_deref(),
        query.order.as_deref(),
        MessageSortKey::parse,
    )?);
    view.set_expanded(query.expanded);

    let rows = view.project(&state.store.messages);
    let expanded = view.expanded_row(&rows).cloned();

    Ok(Json(ListMessagesRes {
        matched: rows.len(),
        total: state.store.messages.len(),
        summary: messages::summarize(&state.store.messages),
        expanded,
        messages: rows.into_iter().cloned().collect(),
    }))
}

// ---------------------------------------------------------------------------
// Mappings
// ---------------------------------------------------------------------------

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct MappingsQuery {
    /// Mapping status filter; unknown values apply no constraint.
    status: Option<String>,
    /// Case-insensitive substring search.
    q: Option<String>,
    /// Sort key: name, mappedRecords, errorCount, or lastModified.
    sort: Option<String>,
    /// Sort order: asc or desc.
    order: Option<String>,
    /// Id of the expanded row, if any.
    expanded: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListMappingsRes {
    mappings: Vec<DataMapping>,
    matched: usize,
    total: usize,
    summary: MappingSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    expanded: Option<DataMapping>,
}

#[utoipa::path(
    get,
    path = "/mappings",
    params(MappingsQuery),
    responses(
        (status = 200, description = "Filtered, sorted mapping table", body = ListMappingsRes),
        (status = 400, description = "Unknown sort key or order")
    )
)]
/// List field mapping rules.
async fn list_mappings(
    State(state): State<AppState>,
    Query(query): Query<MappingsQuery>,
) -> Result<Json<ListMappingsRes>, (StatusCode, String)> {
    let mut view = ViewState::<DataMapping>::new();
    view.set_filter(MappingFilter {
        status: query.status.as_deref().and_then(MappingStatus::from_wire),
    });
    view.set_search(query.q.unwrap_or_default());
    view.set_sort(resolve_sort::<DataMapping>(
        query.sort.as_deref(),
        query.order.as_deref(),
        MappingSortKey::parse,
    )?);
    view.set_expanded(query.expanded);

    let rows = view.project(&state.store.mappings);
    let expanded = view.expanded_row(&rows).cloned();

    Ok(Json(ListMappingsRes {
        matched: rows.len(),
        total: state.store.mappings.len(),
        summary: mappings::summarize(&state.store.mappings),
        expanded,
        mappings: rows.into_iter().cloned().collect(),
    }))
}

// ---------------------------------------------------------------------------
// Audits
// ---------------------------------------------------------------------------

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct AuditsQuery {
    /// Risk level filter; unknown values apply no constraint.
    risk: Option<String>,
    /// Compliance status filter; unknown values apply no constraint.
    status: Option<String>,
    /// Sort key: auditDate, dueDate, or findings.
    sort: Option<String>,
    /// Sort order: asc or desc.
    order: Option<String>,
    /// Id of the expanded row, if any.
    expanded: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListAuditsRes {
    audits: Vec<ComplianceAudit>,
    matched: usize,
    total: usize,
    summary: AuditSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    expanded: Option<ComplianceAudit>,
}

#[utoipa::path(
    get,
    path = "/audits",
    params(AuditsQuery),
    responses(
        (status = 200, description = "Filtered, sorted audit trail", body = ListAuditsRes),
        (status = 400, description = "Unknown sort key or order")
    )
)]
/// List compliance audits.
async fn list_audits(
    State(state): State<AppState>,
    Query(query): Query<AuditsQuery>,
) -> Result<Json<ListAuditsRes>, (StatusCode, String)> {
    let mut view = ViewState::<ComplianceAudit>::new();
    view.set_filter(AuditFilter {
        risk_level: query.risk.as_deref().and_then(RiskLevel::from_wire),
        status: query
            .status
            .as_deref()
            .and_then(ComplianceStatus::from_wire),
    });
    view.set_sort(resolve_sort::<ComplianceAudit>(
        query.sort.as_deref(),
        query.order.as_deref(),
        AuditSortKey::parse,
    )?);
    view.set_expanded(query.expanded);

    let rows = view.project(&state.store.audits);
    let expanded = view.expanded_row(&rows).cloned();

    Ok(Json(ListAuditsRes {
        matched: rows.len(),
        total: state.store.audits.len(),
        summary: audits::summarize(&state.store.audits),
        expanded,
        audits: rows.into_iter().cloned().collect(),
    }))
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct PatientsQuery {
    /// Patient feed status filter; unknown values apply no constraint.
    feed: Option<String>,
    /// Case-insensitive substring search.
    q: Option<String>,
    /// Sort key: lastName, lastEncounter, or dataCompleteness.
    sort: Option<String>,
    /// Sort order: asc or desc.
    order: Option<String>,
    /// Id of the expanded row, if any.
    expanded: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListPatientsRes {
    patients: Vec<PatientRecord>,
    matched: usize,
    total: usize,
    summary: PatientSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    expanded: Option<PatientRecord>,
}

#[utoipa::path(
    get,
    path = "/patients",
    params(PatientsQuery),
    responses(
        (status = 200, description = "Filtered, sorted patient table", body = ListPatientsRes),
        (status = 400, description = "Unknown sort key or order")
    )
)]
/// List integrated patient records.
async fn list_patients(
    State(state): State<AppState>,
    Query(query): Query<PatientsQuery>,
) -> Result<Json<ListPatientsRes>, (StatusCode, String)> {
    let mut view = ViewState::<PatientRecord>::new();
    view.set_filter(PatientFilter {
        feed_status: query.feed.as_deref().and_then(PatientFeedStatus::from_wire),
    });
    view.set_search(query.q.unwrap_or_default());
    view.set_sort(resolve_sort::<PatientRecord>(
        query.sort.as_deref(),
        query.order.as_deref(),
        PatientSortKey::parse,
    )?);
    view.set_expanded(query.expanded);

    let rows = view.project(&state.store.patients);
    let expanded = view.expanded_row(&rows).cloned();

    Ok(Json(ListPatientsRes {
        matched: rows.len(),
        total: state.store.patients.len(),
        summary: patients::summarize(&state.store.patients),
        expanded,
        patients: rows.into_iter().cloned().collect(),
    }))
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct OverviewRes {
    metrics: Vec<SystemMetric>,
    throughput: Vec<ThroughputPoint>,
    feeds: FeedSummary,
    recent_messages: Vec<Hl7Message>,
}

#[utoipa::path(
    get,
    path = "/overview",
    responses(
        (status = 200, description = "Headline metrics, throughput series, and recent activity", body = OverviewRes)
    )
)]
/// Overview page data: headline metrics, the 12-month throughput series,
/// the feed summary, and the most recent messages.
async fn overview(State(state): State<AppState>) -> Json<OverviewRes> {
    let recent = messages::recent(&state.store.messages, state.recent_messages);

    Json(OverviewRes {
        metrics: state.store.metrics.clone(),
        throughput: state.store.throughput.clone(),
        feeds: feeds::summarize(&state.store.feeds),
        recent_messages: recent.into_iter().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use cdi_core::SimulatedProbe;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let store = Arc::new(DashboardStore::load().expect("fixtures load"));
        // Zero latency keeps probe tests instant.
        let probe = Arc::new(SimulatedProbe::new(Duration::ZERO));
        router(AppState::new(store, probe, 8))
    }

    async fn request(method: &str, uri: &str) -> (StatusCode, Value) {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        request("GET", uri).await
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], Value::Bool(true));
    }

    #[tokio::test]
    async fn messages_filter_narrows_but_summary_stays_whole_store() {
        let (status, body) = get("/messages?status=error").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched"], 3);
        assert_eq!(body["total"], 20);
        // Summary is over all 20 messages, not the 3 filtered ones.
        assert_eq!(body["summary"]["errors"], 3);
        assert_eq!(body["summary"]["delivered"], 15);
        for message in body["messages"].as_array().expect("messages array") {
            assert_eq!(message["status"], "error");
        }
    }

    #[tokio::test]
    async fn unknown_filter_value_applies_no_constraint() {
        let (status, body) = get("/messages?status=bogus").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched"], body["total"]);
    }

    #[tokio::test]
    async fn unknown_sort_key_is_bad_request() {
        let (status, _) = get("/messages?sort=severity").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get("/messages?sort=timestamp&order=upwards").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn messages_sort_ascending_by_processing_time() {
        let (status, body) = get("/messages?sort=processingTime&order=asc").await;
        assert_eq!(status, StatusCode::OK);
        let times: Vec<u64> = body["messages"]
            .as_array()
            .expect("messages array")
            .iter()
            .map(|m| m["processingTime"].as_u64().expect("processing time"))
            .collect();
        let mut sorted = times.clone();
        sorted.sort_unstable();
        assert_eq!(times, sorted);
    }

    #[tokio::test]
    async fn expanded_row_is_returned_only_when_visible() {
        let (status, body) = get("/messages?expanded=MSG-2841").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["expanded"]["id"], "MSG-2841");

        // MSG-2841 is acknowledged; an error filter hides it and the
        // detail disappears without an error.
        let (status, body) = get("/messages?status=error&expanded=MSG-2841").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.get("expanded").is_none());
    }

    #[tokio::test]
    async fn audits_compliance_score_ignores_filters() {
        let (_, unfiltered) = get("/audits").await;
        let (_, filtered) = get("/audits?risk=critical").await;
        assert_eq!(unfiltered["summary"]["complianceScore"], 50);
        assert_eq!(
            filtered["summary"]["complianceScore"],
            unfiltered["summary"]["complianceScore"]
        );
        assert_eq!(filtered["matched"], 2);
    }

    #[tokio::test]
    async fn patients_search_is_case_insensitive() {
        let (status, body) = get("/patients?q=MERCY").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched"], 2);
    }

    #[tokio::test]
    async fn feed_probe_follows_status_and_rejects_unknown_ids() {
        let (status, body) = request("POST", "/feeds/FEED-001/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "connected");

        let (status, body) = request("POST", "/feeds/FEED-006/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "failed");

        let (status, _) = request("POST", "/feeds/FEED-999/test").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn overview_returns_recent_messages_newest_first() {
        let (status, body) = get("/overview").await;
        assert_eq!(status, StatusCode::OK);
        let recent = body["recentMessages"].as_array().expect("recent messages");
        assert_eq!(recent.len(), 8);
        assert_eq!(recent[0]["id"], "MSG-2841");
        assert_eq!(body["throughput"].as_array().expect("series").len(), 12);
    }
}
