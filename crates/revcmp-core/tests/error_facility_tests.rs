use revcmp_core::errors::{ExError, ExErrorKind, RevcmpError, TokenizeError};
use revcmp_core::plugins::PluginError;
use revcmp_core::CompareOptions;
use revcmp_core_types::RequestId;

#[test]
fn test_duplicate_key_verifiable_by_kind() {
    let err = RevcmpError::DuplicateSectionKey {
        revision_id: "rev-1".to_string(),
        key: "intro".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::DuplicateKey);
    assert_eq!(ex_err.code(), "ERR_DUPLICATE_KEY");
    assert_eq!(ex_err.revision_id(), Some("rev-1"));
    assert_eq!(ex_err.section_key(), Some("intro"));
}

#[test]
fn test_limit_distinct_from_duplicate() {
    let err = RevcmpError::TooManySections {
        revision_id: "rev-2".to_string(),
        count: 12,
        limit: 10,
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::LimitExceeded);
    assert_ne!(ex_err.kind(), ExErrorKind::DuplicateKey);
    assert!(ex_err.message().contains("12 sections"));
}

#[test]
fn test_invalid_config_from_options() {
    let err = CompareOptions::from_toml_str("max_sections = -1").unwrap_err();
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::InvalidConfig);
    assert_eq!(ex_err.code(), "ERR_INVALID_CONFIG");
    assert!(ex_err.message().contains("Invalid comparison options"));
}

#[test]
fn test_serialization_error_from_serde_json() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: RevcmpError = parse_err.into();
    assert!(matches!(err, RevcmpError::Serialization { .. }));

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.code(), "ERR_SERIALIZATION");
}

#[test]
fn test_recovered_errors_have_codes() {
    let ex_err: ExError = PluginError::Resolve {
        section_type: "map".to_string(),
        reason: "offline".to_string(),
    }
    .into();
    assert_eq!(ex_err.code(), "ERR_PLUGIN_FAILURE");
    assert_eq!(ex_err.op(), Some("resolve_plugin"));

    let ex_err: ExError = TokenizeError::LineTooLong {
        line: 2,
        len: 30,
        limit: 10,
    }
    .into();
    assert_eq!(ex_err.code(), "ERR_TOKENIZATION_FAILURE");
}

#[test]
fn test_error_kind_code_mapping() {
    // Each kind has a stable, unique code
    let kinds = vec![
        (ExErrorKind::DuplicateKey, "ERR_DUPLICATE_KEY"),
        (ExErrorKind::LimitExceeded, "ERR_LIMIT_EXCEEDED"),
        (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
        (ExErrorKind::InvariantViolation, "ERR_INVARIANT_VIOLATION"),
        (ExErrorKind::PluginFailure, "ERR_PLUGIN_FAILURE"),
        (ExErrorKind::TokenizationFailure, "ERR_TOKENIZATION_FAILURE"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
    ];

    let mut codes: Vec<&str> = kinds.iter().map(|(k, _)| k.code()).collect();
    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), 7);
}

#[test]
fn test_request_context_attached() {
    let request_id = RequestId::from_string("req-42".to_string());
    let ex_err = ExError::new(ExErrorKind::LimitExceeded)
        .with_op("compare_revisions")
        .with_request_id(request_id.clone())
        .with_message("too many sections");

    assert_eq!(ex_err.request_id(), Some(&request_id));
    assert_eq!(ex_err.op(), Some("compare_revisions"));
    assert!(ex_err
        .to_string()
        .starts_with("[ERR_LIMIT_EXCEEDED] in operation 'compare_revisions'"));
}
