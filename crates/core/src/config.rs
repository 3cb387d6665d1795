//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into services. The intent is to avoid reading
//! process-wide environment variables during request handling, which can lead
//! to inconsistent behaviour in multi-threaded runtimes and test harnesses.

use crate::{CoreError, CoreResult};
use std::time::Duration;

/// Default REST bind address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default simulated probe round-trip.
pub const DEFAULT_PROBE_LATENCY: Duration = Duration::from_millis(1200);

/// Default number of messages shown on the overview page.
pub const DEFAULT_RECENT_MESSAGES: usize = 8;

const MAX_PROBE_LATENCY: Duration = Duration::from_secs(30);

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    rest_addr: String,
    probe_latency: Duration,
    recent_messages: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(
        rest_addr: String,
        probe_latency: Duration,
        recent_messages: usize,
    ) -> CoreResult<Self> {
        if rest_addr.trim().is_empty() {
            return Err(CoreError::InvalidInput("rest_addr cannot be empty".into()));
        }
        if probe_latency > MAX_PROBE_LATENCY {
            return Err(CoreError::InvalidInput(format!(
                "probe latency exceeds maximum of {}s",
                MAX_PROBE_LATENCY.as_secs()
            )));
        }
        if recent_messages == 0 {
            return Err(CoreError::InvalidInput(
                "recent_messages must be at least 1".into(),
            ));
        }

        Ok(Self {
            rest_addr,
            probe_latency,
            recent_messages,
        })
    }

    pub fn rest_addr(&self) -> &str {
        &self.rest_addr
    }

    pub fn probe_latency(&self) -> Duration {
        self.probe_latency
    }

    pub fn recent_messages(&self) -> usize {
        self.recent_messages
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            rest_addr: DEFAULT_REST_ADDR.to_string(),
            probe_latency: DEFAULT_PROBE_LATENCY,
            recent_messages: DEFAULT_RECENT_MESSAGES,
        }
    }
}

/// Parse the probe latency from an optional environment value (milliseconds).
///
/// If `value` is `None` or empty/whitespace, returns the default latency.
pub fn probe_latency_from_env_value(value: Option<String>) -> CoreResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_PROBE_LATENCY),
        Some(v) => {
            let millis: u64 = v.parse().map_err(|_| {
                CoreError::InvalidInput(format!("invalid probe latency (milliseconds): {v}"))
            })?;
            Ok(Duration::from_millis(millis))
        }
    }
}

/// Parse the overview recent-message count from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns the default count.
pub fn recent_messages_from_env_value(value: Option<String>) -> CoreResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_RECENT_MESSAGES),
        Some(v) => v
            .parse()
            .map_err(|_| CoreError::InvalidInput(format!("invalid recent-message count: {v}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_bind_address() {
        let err = CoreConfig::new("  ".into(), DEFAULT_PROBE_LATENCY, 8);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_zero_recent_messages() {
        let err = CoreConfig::new(DEFAULT_REST_ADDR.into(), DEFAULT_PROBE_LATENCY, 0);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_unbounded_probe_latency() {
        let err = CoreConfig::new(DEFAULT_REST_ADDR.into(), Duration::from_secs(120), 8);
        assert!(err.is_err());
    }

    #[test]
    fn env_values_fall_back_to_defaults() {
        assert_eq!(
            probe_latency_from_env_value(None).expect("default latency"),
            DEFAULT_PROBE_LATENCY
        );
        assert_eq!(
            probe_latency_from_env_value(Some("  ".into())).expect("default latency"),
            DEFAULT_PROBE_LATENCY
        );
        assert_eq!(
            recent_messages_from_env_value(Some("12".into())).expect("parsed count"),
            12
        );
    }

    #[test]
    fn malformed_env_values_are_errors() {
        assert!(probe_latency_from_env_value(Some("soon".into())).is_err());
        assert!(recent_messages_from_env_value(Some("-3".into())).is_err());
    }
}
