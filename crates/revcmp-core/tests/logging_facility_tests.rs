#![allow(clippy::unwrap_used, clippy::expect_used)]

use revcmp_core::errors::{ExErrorKind, RevcmpError};
use revcmp_core::logging_facility::test_capture::init_test_capture;
use revcmp_core::model::{Metadata, Revision, Section};
use revcmp_core::plugins::{default_registry, PluginRegistry};
use revcmp_core::{log_op_end, log_op_error, log_op_start, CompareOptions, RevisionComparer};
use revcmp_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_FALLBACK, EVENT_START};
use revcmp_core_types::{RequestContext, RequestId};
use serde_json::json;
use std::sync::Arc;
use tracing::Level;

fn revision(id: &str, keys: &[&str]) -> Revision {
    let sections = keys
        .iter()
        .map(|k| Section::new(*k, "text", json!({ "body": k })))
        .collect();
    Revision::new(id, Metadata::new(), sections)
}

fn context(id: &str) -> RequestContext {
    RequestContext::with_request_id(RequestId::from_string(id.to_string()))
}

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    assert_eq!(start_events, 1);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = RevcmpError::DuplicateSectionKey {
        revision_id: "r1".to_string(),
        key: "a".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    let error_event = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(error_event.level, Level::ERROR);
    assert_eq!(error_event.field("err_code"), Some("ERR_DUPLICATE_KEY"));
    assert_eq!(
        error_event.field("err_kind"),
        Some(format!("{:?}", ExErrorKind::DuplicateKey).as_str())
    );
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_4";

    log_op_start!(op_name, revision_id = "r9", old_sections = 3);

    capture.assert_event_exists(op_name, EVENT_START);
    let event = &capture.events_for_op(op_name)[0];
    assert_eq!(event.field("revision_id"), Some("r9"));
    assert_eq!(event.field("old_sections"), Some("3"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_compare_brackets_with_start_and_end() {
    let capture = init_test_capture();
    let comparer = RevisionComparer::new(Arc::new(default_registry()));

    comparer
        .compare_with_context(
            &context("req-bracket-5"),
            &revision("r1", &["a", "b"]),
            &revision("r2", &["b", "a"]),
        )
        .unwrap();

    let events: Vec<_> = capture
        .events_for_op("compare_revisions")
        .into_iter()
        .filter(|e| e.field("request_id") == Some("req-bracket-5"))
        .collect();
    let kinds: Vec<&str> = events.iter().filter_map(|e| e.event.as_deref()).collect();
    assert_eq!(kinds, vec![EVENT_START, EVENT_END]);
    assert_eq!(events[0].field("old_sections"), Some("2"));
    assert_eq!(events[1].field("entries"), Some("3"));
}

#[test]
fn test_compare_failure_logs_end_error() {
    let capture = init_test_capture();
    let comparer = RevisionComparer::new(Arc::new(default_registry()));

    let err = comparer
        .compare_with_context(
            &context("req-error-6"),
            &revision("dup", &["a", "a"]),
            &revision("r2", &["a"]),
        )
        .unwrap_err();
    assert!(matches!(err, RevcmpError::DuplicateSectionKey { .. }));

    let events: Vec<_> = capture
        .events_for_op("compare_revisions")
        .into_iter()
        .filter(|e| e.field("request_id") == Some("req-error-6"))
        .collect();
    let kinds: Vec<&str> = events.iter().filter_map(|e| e.event.as_deref()).collect();
    assert_eq!(kinds, vec![EVENT_START, EVENT_END_ERROR]);
    assert_eq!(events[1].field("err_code"), Some("ERR_DUPLICATE_KEY"));
}

#[test]
fn test_plugin_fallback_logged_as_warning() {
    let capture = init_test_capture();
    let registry = default_registry();
    // The text plugin reads `body`; this content has none
    let old = Revision::new(
        "r1",
        Metadata::new(),
        vec![Section::new("fallback-key-7", "text", json!({"title": "x"}))],
    );

    revcmp_core::compare_revisions(&old, &old, &registry).unwrap();

    let warnings: Vec<_> = capture
        .events_for_op("resolve_section_text")
        .into_iter()
        .filter(|e| e.field("section_key") == Some("fallback-key-7"))
        .collect();
    // One warning per side of the entry
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|e| e.level == Level::WARN));
    assert_eq!(warnings[0].event.as_deref(), Some(EVENT_FALLBACK));
    assert_eq!(warnings[0].field("err_code"), Some("ERR_PLUGIN_FAILURE"));
}

#[test]
fn test_missing_plugin_is_not_a_warning() {
    let capture = init_test_capture();
    let old = Revision::new(
        "r1",
        Metadata::new(),
        vec![Section::new("no-plugin-key-8", "map", json!({"lat": 1}))],
    );

    revcmp_core::compare_revisions(&old, &old, &PluginRegistry::new()).unwrap();

    let warnings = capture.count_events(|e| {
        e.level == Level::WARN && e.field("section_key") == Some("no-plugin-key-8")
    });
    assert_eq!(warnings, 0);
}

#[test]
fn test_tokenization_fallback_logged() {
    let capture = init_test_capture();
    let comparer = RevisionComparer::with_options(
        Arc::new(default_registry()),
        CompareOptions {
            max_inline_line_len: 3,
            ..CompareOptions::default()
        },
    );
    let before = capture.count_events(|e| e.op.as_deref() == Some("tokenize_hunks"));

    let section = |body: &str| Section::new("k", "text", json!({ "body": body }));
    let old = Revision::new("r1", Metadata::new(), vec![section("long-a")]);
    let new = Revision::new("r2", Metadata::new(), vec![section("long-b")]);

    let result = comparer.compare(&old, &new).unwrap();
    assert!(result.sections.iter().all(|s| s.diff.tokens.is_none()));

    let after = capture.count_events(|e| {
        e.op.as_deref() == Some("tokenize_hunks")
            && e.event.as_deref() == Some(EVENT_FALLBACK)
            && e.field("err_code") == Some("ERR_TOKENIZATION_FAILURE")
    });
    assert!(after > before);
}
