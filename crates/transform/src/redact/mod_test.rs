//! Tests for the redact filter

use super::*;
use serde_json::json;

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => panic!("test record must be an object"),
    }
}

fn run(filter: &RedactFilter, value: Value) -> Record {
    let mut r = record(value);
    let verdict = filter.filter("test", EventTime::default(), &mut r).unwrap();
    assert_eq!(verdict, Verdict::Keep);
    r
}

// =============================================================================
// Targeted fields
// =============================================================================

#[test]
fn test_mask_field() {
    let filter = RedactFilter::new(RedactConfig::new().with_field("password")).unwrap();
    let out = run(&filter, json!({"user": "ann", "password": "hunter2"}));
    assert_eq!(out["password"], "[REDACTED]");
    assert_eq!(out["user"], "ann");
}

#[test]
fn test_mask_nested_field() {
    let filter = RedactFilter::new(RedactConfig::new().with_field("user.ssn")).unwrap();
    let out = run(&filter, json!({"user": {"ssn": "123-45-6789", "name": "ann"}}));
    assert_eq!(out["user"]["ssn"], "[REDACTED]");
    assert_eq!(out["user"]["name"], "ann");
}

#[test]
fn test_missing_field_untouched() {
    let filter = RedactFilter::new(RedactConfig::new().with_field("password")).unwrap();
    let out = run(&filter, json!({"user": "ann"}));
    assert!(!out.contains_key("password"));
    assert_eq!(filter.metrics().fields_redacted.load(Ordering::Relaxed), 0);
}

#[test]
fn test_remove_field() {
    let filter = RedactFilter::new(
        RedactConfig::new()
            .with_strategy(RedactStrategy::Remove)
            .with_field("token")
            .with_field("auth.secret"),
    )
    .unwrap();
    let out = run(&filter, json!({"token": "t", "auth": {"secret": "s", "user": "u"}, "keep": 1}));
    assert!(!out.contains_key("token"));
    assert_eq!(out["auth"], json!({"user": "u"}));
    assert_eq!(out["keep"], 1);
}

#[test]
fn test_hash_field_deterministic() {
    let filter = RedactFilter::new(
        RedactConfig::new()
            .with_strategy(RedactStrategy::Hash)
            .with_hash_key("secret")
            .with_field("user_id"),
    )
    .unwrap();
    let a = run(&filter, json!({"user_id": 42}));
    let b = run(&filter, json!({"user_id": 42}));
    let hashed = a["user_id"].as_str().unwrap();
    assert!(hashed.starts_with(DEFAULT_PREFIX));
    assert_eq!(a["user_id"], b["user_id"]);
}

#[test]
fn test_hash_numeric_field_uses_text_form() {
    let filter = RedactFilter::new(
        RedactConfig::new()
            .with_strategy(RedactStrategy::Hash)
            .with_hash_key("secret")
            .with_field("account"),
    )
    .unwrap();
    let number = run(&filter, json!({"account": 1234}));
    let text = run(&filter, json!({"account": "1234"}));
    assert!(number["account"].is_string());
    assert_eq!(number["account"], text["account"]);
}

#[test]
fn test_custom_replacement() {
    let filter = RedactFilter::new(RedactConfig::new().with_field("card").with_replacement("***")).unwrap();
    let out = run(&filter, json!({"card": "4111"}));
    assert_eq!(out["card"], "***");
}

// =============================================================================
// Pattern scanning
// =============================================================================

#[test]
fn test_scan_email_mask() {
    let filter = RedactFilter::new(RedactConfig::new().with_pattern(PatternType::Email)).unwrap();
    let out = run(&filter, json!({"msg": "contact ann@example.com now", "n": 3}));
    assert_eq!(out["msg"], "contact [REDACTED] now");
    assert_eq!(out["n"], 3);
}

#[test]
fn test_scan_nested_and_arrays() {
    let filter = RedactFilter::new(RedactConfig::new().with_pattern(PatternType::Ipv4)).unwrap();
    let out = run(&filter, json!({"peers": ["10.0.0.1", "local"], "conn": {"ip": "192.168.1.1"}}));
    assert_eq!(out["peers"], json!(["[REDACTED]", "local"]));
    assert_eq!(out["conn"]["ip"], "[REDACTED]");
    assert_eq!(filter.metrics().patterns_matched.load(Ordering::Relaxed), 2);
}

#[test]
fn test_scan_hash_uses_pattern_prefix() {
    let filter = RedactFilter::new(
        RedactConfig::new()
            .with_strategy(RedactStrategy::Hash)
            .with_hash_key("secret")
            .with_pattern(PatternType::Email),
    )
    .unwrap();
    let out = run(&filter, json!({"email": "ann@example.com"}));
    let value = out["email"].as_str().unwrap();
    assert!(value.starts_with("usr_"));
    assert!(!value.contains('@'));
}

// =============================================================================
// Factory
// =============================================================================

#[test]
fn test_factory_creates_filter() {
    let options: FilterOptions = toml::from_str(r#"fields = ["password"]"#).unwrap();
    let filter = RedactFactory.create(&options).unwrap();
    assert_eq!(filter.name(), "redact");
    assert!(!filter.has_filter_with_time());
}

#[test]
fn test_factory_rejects_invalid() {
    let options: FilterOptions = toml::from_str(r#"strategy = "hash""#).unwrap();
    assert!(RedactFactory.create(&options).is_err());
}
