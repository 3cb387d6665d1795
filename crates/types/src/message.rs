//! HL7 message log entries.
//!
//! Each entry is one message transaction observed on an integration
//! channel. The log page filters by message type and delivery status and
//! searches across control id, MRN, patient name, sending facility, and
//! trigger event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// HL7 v2 message category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Hl7MessageType {
    /// Admit/discharge/transfer.
    ADT,
    /// Order message.
    ORM,
    /// Observation result.
    ORU,
    /// Scheduling information.
    SIU,
    /// Medical document management.
    MDM,
    /// Detailed financial transaction.
    DFT,
    /// Pharmacy encoded order.
    RDE,
}

impl Hl7MessageType {
    pub fn as_wire(self) -> &'static str {
        match self {
            Hl7MessageType::ADT => "ADT",
            Hl7MessageType::ORM => "ORM",
            Hl7MessageType::ORU => "ORU",
            Hl7MessageType::SIU => "SIU",
            Hl7MessageType::MDM => "MDM",
            Hl7MessageType::DFT => "DFT",
            Hl7MessageType::RDE => "RDE",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "ADT" => Some(Hl7MessageType::ADT),
            "ORM" => Some(Hl7MessageType::ORM),
            "ORU" => Some(Hl7MessageType::ORU),
            "SIU" => Some(Hl7MessageType::SIU),
            "MDM" => Some(Hl7MessageType::MDM),
            "DFT" => Some(Hl7MessageType::DFT),
            "RDE" => Some(Hl7MessageType::RDE),
            _ => None,
        }
    }
}

impl std::fmt::Display for Hl7MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Delivery status of a logged message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Sent to the receiving system.
    Delivered,
    /// Application acknowledgement received.
    Acknowledged,
    /// Processing failed; see `error_detail`.
    Error,
    /// Queued, not yet sent.
    Pending,
    /// Delivery failed, retry in progress.
    Retrying,
}

impl MessageStatus {
    pub fn as_wire(self) -> &'static str {
        match self {
            MessageStatus::Delivered => "delivered",
            MessageStatus::Acknowledged => "acknowledged",
            MessageStatus::Error => "error",
            MessageStatus::Pending => "pending",
            MessageStatus::Retrying => "retrying",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "delivered" => Some(MessageStatus::Delivered),
            "acknowledged" => Some(MessageStatus::Acknowledged),
            "error" => Some(MessageStatus::Error),
            "pending" => Some(MessageStatus::Pending),
            "retrying" => Some(MessageStatus::Retrying),
            _ => None,
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// One HL7 message transaction in the log.
///
/// `processing_time` is in milliseconds; zero means the message has not
/// been processed yet (pending/queued entries).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Hl7Message {
    pub id: String,
    pub message_control_id: String,
    pub message_type: Hl7MessageType,
    pub trigger_event: String,
    pub sending_facility: String,
    pub receiving_facility: String,
    #[serde(rename = "patientMRN")]
    pub patient_mrn: String,
    pub patient_name: String,
    pub timestamp: DateTime<Utc>,
    pub status: MessageStatus,
    pub processing_time: u32,
    pub segment_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_type_wire_spellings_round_trip() {
        for t in [
            Hl7MessageType::ADT,
            Hl7MessageType::ORM,
            Hl7MessageType::ORU,
            Hl7MessageType::SIU,
            Hl7MessageType::MDM,
            Hl7MessageType::DFT,
            Hl7MessageType::RDE,
        ] {
            assert_eq!(Hl7MessageType::from_wire(t.as_wire()), Some(t));
        }
        assert_eq!(Hl7MessageType::from_wire("adt"), None);
    }

    #[test]
    fn message_deserialises_from_camel_case() {
        let json = r#"{
            "id": "MSG-0001",
            "messageControlId": "2026022414320501",
            "messageType": "ADT",
            "triggerEvent": "A01",
            "sendingFacility": "Mercy General",
            "receivingFacility": "Integration Engine",
            "patientMRN": "MRN-448291",
            "patientName": "Sarah Williams",
            "timestamp": "2026-02-24T14:32:05Z",
            "status": "delivered",
            "processingTime": 142,
            "segmentCount": 18
        }"#;

        let msg: Hl7Message = serde_json::from_str(json).expect("deserialise message");
        assert_eq!(msg.message_type, Hl7MessageType::ADT);
        assert_eq!(msg.status, MessageStatus::Delivered);
        assert!(msg.error_detail.is_none());
    }

    #[test]
    fn message_rejects_unknown_fields() {
        let json = r#"{
            "id": "MSG-0001",
            "messageControlId": "2026022414320501",
            "messageType": "ADT",
            "triggerEvent": "A01",
            "sendingFacility": "Mercy General",
            "receivingFacility": "Integration Engine",
            "patientMRN": "MRN-448291",
            "patientName": "Sarah Williams",
            "timestamp": "2026-02-24T14:32:05Z",
            "status": "delivered",
            "processingTime": 142,
            "segmentCount": 18,
            "unexpected": true
        }"#;

        assert!(serde_json::from_str::<Hl7Message>(json).is_err());
    }
}
