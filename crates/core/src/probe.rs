//! Simulated connection probe.
//!
//! The dashboard's "Test" button checks a feed endpoint and reports a
//! verdict after a short round-trip. There is no live integration in this
//! demo, so the default probe is a stand-in that keys its verdict off the
//! feed's recorded status. The trait keeps the simulation swappable and
//! out of the view logic; callers decide how to spend the latency (the
//! REST handler sleeps on the async runtime before answering).

use cdi_types::{EmrFeed, IntegrationStatus};
use serde::Serialize;
use std::time::Duration;
use utoipa::ToSchema;

/// Verdict of a connection test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProbeOutcome {
    Connected,
    Failed,
}

impl ProbeOutcome {
    pub fn as_wire(self) -> &'static str {
        match self {
            ProbeOutcome::Connected => "connected",
            ProbeOutcome::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A connection tester for EMR feeds.
pub trait ConnectionProbe {
    /// Simulated round-trip before a verdict is available.
    fn latency(&self) -> Duration;

    /// Verdict for one feed.
    fn check(&self, feed: &EmrFeed) -> ProbeOutcome;
}

/// Probe stand-in: reachable feeds are those that are active or parked in
/// maintenance; degraded and down feeds fail the test.
#[derive(Clone, Debug)]
pub struct SimulatedProbe {
    latency: Duration,
}

impl SimulatedProbe {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedProbe {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PROBE_LATENCY)
    }
}

impl ConnectionProbe for SimulatedProbe {
    fn latency(&self) -> Duration {
        self.latency
    }

    fn check(&self, feed: &EmrFeed) -> ProbeOutcome {
        match feed.status {
            IntegrationStatus::Active | IntegrationStatus::Maintenance => ProbeOutcome::Connected,
            IntegrationStatus::Degraded | IntegrationStatus::Error => ProbeOutcome::Failed,
        }
    }
}
