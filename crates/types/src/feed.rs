//! EMR feed records and their status enumerations.
//!
//! A feed is one live integration channel between an EMR system at a
//! facility and the integration engine. Feeds are shown as a card grid on
//! the dashboard, filterable by connection status.

use crate::message::Hl7MessageType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Connection status of an EMR integration feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    /// Feed is connected and processing messages.
    Active,
    /// Feed is connected but unhealthy (elevated error rate or latency).
    Degraded,
    /// Feed is down.
    Error,
    /// Feed is intentionally paused for maintenance.
    Maintenance,
}

impl IntegrationStatus {
    /// Wire spelling used by serde, query parameters, and the CLI.
    pub fn as_wire(self) -> &'static str {
        match self {
            IntegrationStatus::Active => "active",
            IntegrationStatus::Degraded => "degraded",
            IntegrationStatus::Error => "error",
            IntegrationStatus::Maintenance => "maintenance",
        }
    }

    /// Parse from the wire spelling. Unknown spellings are `None`.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "active" => Some(IntegrationStatus::Active),
            "degraded" => Some(IntegrationStatus::Degraded),
            "error" => Some(IntegrationStatus::Error),
            "maintenance" => Some(IntegrationStatus::Maintenance),
            _ => None,
        }
    }
}

impl std::fmt::Display for IntegrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Transport used by an integration feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ConnectionType {
    #[serde(rename = "Mirth Connect")]
    MirthConnect,
    #[serde(rename = "Direct API")]
    DirectApi,
    #[serde(rename = "SFTP")]
    Sftp,
    #[serde(rename = "VPN Tunnel")]
    VpnTunnel,
}

impl ConnectionType {
    pub fn as_wire(self) -> &'static str {
        match self {
            ConnectionType::MirthConnect => "Mirth Connect",
            ConnectionType::DirectApi => "Direct API",
            ConnectionType::Sftp => "SFTP",
            ConnectionType::VpnTunnel => "VPN Tunnel",
        }
    }
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// One EMR integration feed.
///
/// `error_rate` and `uptime` are percentages (0–100). `messages_per_hour`
/// is the rolling hourly throughput for the channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmrFeed {
    pub id: String,
    pub emr_system: String,
    pub facility_name: String,
    pub status: IntegrationStatus,
    pub message_types: Vec<Hl7MessageType>,
    pub messages_per_hour: u32,
    pub last_sync: DateTime<Utc>,
    pub error_rate: f64,
    pub uptime: f64,
    pub connection_type: ConnectionType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integration_status_wire_spellings_round_trip() {
        for status in [
            IntegrationStatus::Active,
            IntegrationStatus::Degraded,
            IntegrationStatus::Error,
            IntegrationStatus::Maintenance,
        ] {
            assert_eq!(IntegrationStatus::from_wire(status.as_wire()), Some(status));
        }
    }

    #[test]
    fn unknown_status_spelling_is_none() {
        assert_eq!(IntegrationStatus::from_wire("offline"), None);
        assert_eq!(IntegrationStatus::from_wire(""), None);
    }

    #[test]
    fn connection_type_serialises_display_names() {
        let json = serde_json::to_string(&ConnectionType::MirthConnect).expect("serialise");
        assert_eq!(json, "\"Mirth Connect\"");
        let json = serde_json::to_string(&ConnectionType::VpnTunnel).expect("serialise");
        assert_eq!(json, "\"VPN Tunnel\"");
    }
}
