//! Overview-page metrics: the 12-month throughput series and the headline
//! stat cards.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Direction of a headline metric since the previous period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrendStatus {
    Up,
    Down,
    Neutral,
}

/// One month of message throughput.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThroughputPoint {
    /// Month label, e.g. "Mar".
    pub month: String,
    pub messages: u64,
    pub errors: u64,
    /// Average end-to-end latency in milliseconds.
    pub avg_latency: f64,
}

/// One headline stat card on the overview page.
///
/// `value` is pre-formatted display text (the original data is a demo; the
/// headline figures are curated, not derived).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SystemMetric {
    pub label: String,
    pub value: String,
    pub change: f64,
    pub change_label: String,
    pub status: TrendStatus,
}
