//! Logging facility tests
//!
//! Drives the `log_op_*` macros against the in-memory capture layer and checks
//! the canonical event names and fields. Every test uses an operation name of
//! its own because all tests in the binary share one capture buffer.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use odoorpc_core::core_types::schema::{
    FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_RECORD_COUNT,
    FIELD_REQUEST_ID, FIELD_TRACE_ID,
};
use odoorpc_core::core_types::{Correlation, TraceId};
use odoorpc_core::errors::{DecodeError, EnvelopeError, RpcError, RpcErrorKind};
use odoorpc_core::logging_facility::init_test_capture;
use odoorpc_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_start_and_end_events_are_captured() {
    let capture = init_test_capture();

    log_op_start!("logging_test_start_end", intent = "fetch_initial");
    log_op_end!("logging_test_start_end", duration_ms = 12, record_count = 3);

    capture.assert_event_exists("logging_test_start_end", "start");
    capture.assert_event_exists("logging_test_start_end", "end");

    let events = capture.events_for("logging_test_start_end");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].field("intent"), Some("fetch_initial"));
    assert_eq!(events[1].field(FIELD_DURATION_MS), Some("12"));
    assert_eq!(events[1].field(FIELD_RECORD_COUNT), Some("3"));
}

#[test]
fn test_error_event_carries_stable_code() {
    let capture = init_test_capture();

    log_op_error!(
        "logging_test_envelope_error",
        EnvelopeError::MissingRecords,
        duration_ms = 4
    );

    let events = capture.events_for("logging_test_envelope_error");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some("end_error"));
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_ENVELOPE_SHAPE"));
    assert_eq!(events[0].field(FIELD_ERR_KIND), Some("EnvelopeShape"));
    assert_eq!(events[0].field(FIELD_REQUEST_ID), None);
    assert_eq!(events[0].level, tracing::Level::ERROR);
}

#[test]
fn test_error_event_carries_correlation_of_the_error() {
    let capture = init_test_capture();

    let trace_id = TraceId::new();
    let correlation = Correlation::new().with_trace_id(trace_id.clone());
    let err = RpcError::new(RpcErrorKind::Transport)
        .with_request_id(correlation.request_id.clone())
        .with_trace_id(trace_id.clone());
    log_op_error!("logging_test_correlated_error", err, duration_ms = 7);

    let events = capture.events_for("logging_test_correlated_error");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_TRANSPORT"));
    assert_eq!(
        events[0].field(FIELD_REQUEST_ID),
        Some(correlation.request_id.as_str())
    );
    assert_eq!(events[0].field(FIELD_TRACE_ID), Some(trace_id.as_str()));
}

#[test]
fn test_error_event_with_extra_fields() {
    let capture = init_test_capture();

    let err = DecodeError::MissingField {
        field: "id".to_string(),
    };
    log_op_error!("logging_test_decode_error", err, duration_ms = 1, record_index = 2);

    let events = capture.events_for("logging_test_decode_error");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_MISSING_FIELD"));
    assert_eq!(events[0].field("record_index"), Some("2"));
}

#[test]
fn test_events_are_tagged_with_component() {
    let capture = init_test_capture();

    log_op_start!("logging_test_component");

    let events = capture.events_for("logging_test_component");
    assert_eq!(events.len(), 1);
    assert!(events[0]
        .field(FIELD_COMPONENT)
        .unwrap()
        .contains("logging_facility_tests"));
}

#[test]
fn test_count_events() {
    let capture = init_test_capture();

    for _ in 0..3 {
        log_op_start!("logging_test_count");
    }

    assert_eq!(
        capture.count_events(|e| e.op.as_deref() == Some("logging_test_count")),
        3
    );
}
