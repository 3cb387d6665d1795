//! HL7 message log view.

use crate::error::{CoreError, CoreResult};
use crate::view::{SortOrder, SortState, SortValue, ViewRecord};
use cdi_types::{Hl7Message, Hl7MessageType, MessageStatus};
use serde::Serialize;
use utoipa::ToSchema;

/// Filter selections for the message log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MessageFilter {
    pub message_type: Option<Hl7MessageType>,
    pub status: Option<MessageStatus>,
}

/// Sortable columns of the message log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageSortKey {
    Timestamp,
    ProcessingTime,
    SegmentCount,
}

impl MessageSortKey {
    pub fn as_wire(self) -> &'static str {
        match self {
            MessageSortKey::Timestamp => "timestamp",
            MessageSortKey::ProcessingTime => "processingTime",
            MessageSortKey::SegmentCount => "segmentCount",
        }
    }

    /// Parse a query-parameter / CLI sort token.
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "timestamp" => Ok(MessageSortKey::Timestamp),
            "processingTime" => Ok(MessageSortKey::ProcessingTime),
            "segmentCount" => Ok(MessageSortKey::SegmentCount),
            other => Err(CoreError::UnknownSortKey(other.to_string())),
        }
    }
}

impl ViewRecord for Hl7Message {
    type Filter = MessageFilter;
    type SortKey = MessageSortKey;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &MessageFilter) -> bool {
        filter.message_type.is_none_or(|t| self.message_type == t)
            && filter.status.is_none_or(|s| self.status == s)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.message_control_id,
            &self.patient_mrn,
            &self.patient_name,
            &self.sending_facility,
            &self.trigger_event,
        ]
    }

    fn sort_value(&self, key: MessageSortKey) -> SortValue<'_> {
        match key {
            MessageSortKey::Timestamp => SortValue::Instant(self.timestamp),
            MessageSortKey::ProcessingTime => SortValue::Integer(u64::from(self.processing_time)),
            MessageSortKey::SegmentCount => SortValue::Integer(u64::from(self.segment_count)),
        }
    }

    fn default_sort() -> SortState<MessageSortKey> {
        SortState {
            key: MessageSortKey::Timestamp,
            order: SortOrder::Descending,
        }
    }

    fn initial_order(_key: MessageSortKey) -> SortOrder {
        SortOrder::Descending
    }
}

/// Whole-log summary, independent of the active filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageSummary {
    /// Delivered or acknowledged.
    pub delivered: usize,
    pub errors: usize,
    /// Pending or retrying.
    pub in_flight: usize,
    /// Average processing time in milliseconds over processed messages,
    /// rounded to the nearest integer; 0 when nothing has been processed.
    pub avg_processing_time: u32,
}

/// Reduce the full, unfiltered log to its summary.
pub fn summarize(messages: &[Hl7Message]) -> MessageSummary {
    let delivered = messages
        .iter()
        .filter(|m| {
            matches!(
                m.status,
                MessageStatus::Delivered | MessageStatus::Acknowledged
            )
        })
        .count();
    let errors = messages
        .iter()
        .filter(|m| m.status == MessageStatus::Error)
        .count();
    let in_flight = messages
        .iter()
        .filter(|m| matches!(m.status, MessageStatus::Pending | MessageStatus::Retrying))
        .count();

    // Unprocessed entries carry a zero processing time and are excluded
    // from the average.
    let processed: Vec<u32> = messages
        .iter()
        .map(|m| m.processing_time)
        .filter(|&ms| ms > 0)
        .collect();
    let avg_processing_time = if processed.is_empty() {
        0
    } else {
        let total: u64 = processed.iter().map(|&ms| u64::from(ms)).sum();
        (total as f64 / processed.len() as f64).round() as u32
    };

    MessageSummary {
        delivered,
        errors,
        in_flight,
        avg_processing_time,
    }
}

/// The most recent `count` messages, newest first. Ties keep store order.
pub fn recent(messages: &[Hl7Message], count: usize) -> Vec<&Hl7Message> {
    let mut rows: Vec<&Hl7Message> = messages.iter().collect();
    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    rows.truncate(count);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::project;
    use chrono::{TimeZone, Utc};

    fn msg(
        id: &str,
        message_type: Hl7MessageType,
        status: MessageStatus,
        hour: u32,
        processing_time: u32,
    ) -> Hl7Message {
        Hl7Message {
            id: id.to_string(),
            message_control_id: format!("20260224{id}"),
            message_type,
            trigger_event: "A01".to_string(),
            sending_facility: "Mercy General".to_string(),
            receiving_facility: "Integration Engine".to_string(),
            patient_mrn: format!("MRN-{id}"),
            patient_name: "Sarah Williams".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 2, 24, hour, 0, 0).unwrap(),
            status,
            processing_time,
            segment_count: 12,
            error_detail: None,
        }
    }

    #[test]
    fn type_and_status_filters_are_conjoined() {
        let store = vec![
            msg("m1", Hl7MessageType::ADT, MessageStatus::Delivered, 9, 100),
            msg("m2", Hl7MessageType::ADT, MessageStatus::Error, 10, 80),
            msg("m3", Hl7MessageType::ORU, MessageStatus::Error, 11, 220),
        ];

        let filter = MessageFilter {
            message_type: Some(Hl7MessageType::ADT),
            status: Some(MessageStatus::Error),
        };
        let rows = project(&store, &filter, "", Hl7Message::default_sort());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "m2");
    }

    #[test]
    fn search_covers_control_id_mrn_name_facility_and_event() {
        let mut store = vec![msg(
            "m1",
            Hl7MessageType::ADT,
            MessageStatus::Delivered,
            9,
            100,
        )];
        store[0].trigger_event = "O01".to_string();

        let rows = project(
            &store,
            &MessageFilter::default(),
            "o01",
            Hl7Message::default_sort(),
        );
        assert_eq!(rows.len(), 1);

        let rows = project(
            &store,
            &MessageFilter::default(),
            "mrn-m1",
            Hl7Message::default_sort(),
        );
        assert_eq!(rows.len(), 1);

        let rows = project(
            &store,
            &MessageFilter::default(),
            "receiving",
            Hl7Message::default_sort(),
        );
        assert!(rows.is_empty(), "receiving facility is not searched");
    }

    #[test]
    fn default_sort_is_newest_first() {
        let store = vec![
            msg("m1", Hl7MessageType::ADT, MessageStatus::Delivered, 9, 100),
            msg("m2", Hl7MessageType::ADT, MessageStatus::Delivered, 14, 100),
            msg("m3", Hl7MessageType::ADT, MessageStatus::Delivered, 11, 100),
        ];
        let rows = project(
            &store,
            &MessageFilter::default(),
            "",
            Hl7Message::default_sort(),
        );
        assert_eq!(
            rows.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
            vec!["m2", "m3", "m1"]
        );
    }

    #[test]
    fn sort_key_tokens_parse_and_reject() {
        assert_eq!(
            MessageSortKey::parse("processingTime").expect("known key"),
            MessageSortKey::ProcessingTime
        );
        assert!(MessageSortKey::parse("severity").is_err());
    }

    #[test]
    fn summary_counts_statuses_and_averages_processed_only() {
        let store = vec![
            msg("m1", Hl7MessageType::ADT, MessageStatus::Delivered, 9, 100),
            msg(
                "m2",
                Hl7MessageType::ORM,
                MessageStatus::Acknowledged,
                10,
                200,
            ),
            msg("m3", Hl7MessageType::ORU, MessageStatus::Error, 11, 300),
            msg("m4", Hl7MessageType::SIU, MessageStatus::Pending, 12, 0),
        ];
        let summary = summarize(&store);
        assert_eq!(summary.delivered, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.in_flight, 1);
        assert_eq!(summary.avg_processing_time, 200);
    }

    #[test]
    fn summary_of_empty_log_is_all_zeroes() {
        let summary = summarize(&[]);
        assert_eq!(summary.delivered, 0);
        assert_eq!(summary.errors, 0);
        assert_eq!(summary.in_flight, 0);
        assert_eq!(summary.avg_processing_time, 0);
    }

    #[test]
    fn recent_returns_newest_first_and_truncates() {
        let store = vec![
            msg("m1", Hl7MessageType::ADT, MessageStatus::Delivered, 9, 100),
            msg("m2", Hl7MessageType::ADT, MessageStatus::Delivered, 14, 100),
            msg("m3", Hl7MessageType::ADT, MessageStatus::Delivered, 11, 100),
        ];
        let rows = recent(&store, 2);
        assert_eq!(
            rows.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
            vec!["m2", "m3"]
        );
    }
}
