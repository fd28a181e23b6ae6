//! Tests for the grep filter

use super::*;
use serde_json::json;

fn record(value: serde_json::Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => panic!("test record must be an object"),
    }
}

fn run(filter: &GrepFilter, value: serde_json::Value) -> Verdict {
    let mut r = record(value);
    filter.filter("test", EventTime::default(), &mut r).unwrap()
}

// =============================================================================
// Actions
// =============================================================================

#[test]
fn test_drop_matching() {
    let filter = GrepFilter::new(GrepConfig::new().with_condition(Condition::eq("level", "debug"))).unwrap();

    assert_eq!(run(&filter, json!({"level": "debug"})), Verdict::Drop);
    assert_eq!(run(&filter, json!({"level": "info"})), Verdict::Keep);
}

#[test]
fn test_keep_matching() {
    let filter = GrepFilter::new(
        GrepConfig::new()
            .with_action(GrepAction::Keep)
            .with_condition(Condition::eq("level", "error")),
    )
    .unwrap();

    assert_eq!(run(&filter, json!({"level": "error"})), Verdict::Keep);
    assert_eq!(run(&filter, json!({"level": "info"})), Verdict::Drop);
    assert_eq!(run(&filter, json!({})), Verdict::Drop);
}

#[test]
fn test_match_mode_any() {
    let filter = GrepFilter::new(
        GrepConfig::new()
            .with_match_mode(MatchMode::Any)
            .with_condition(Condition::eq("path", "/health"))
            .with_condition(Condition::starts_with("path", "/metrics")),
    )
    .unwrap();

    assert_eq!(run(&filter, json!({"path": "/health"})), Verdict::Drop);
    assert_eq!(run(&filter, json!({"path": "/metrics/cpu"})), Verdict::Drop);
    assert_eq!(run(&filter, json!({"path": "/api"})), Verdict::Keep);
}

#[test]
fn test_match_mode_all() {
    let filter = GrepFilter::new(
        GrepConfig::new()
            .with_condition(Condition::eq("level", "debug"))
            .with_condition(Condition::eq("env", "dev")),
    )
    .unwrap();

    assert_eq!(run(&filter, json!({"level": "debug", "env": "dev"})), Verdict::Drop);
    assert_eq!(run(&filter, json!({"level": "debug", "env": "prod"})), Verdict::Keep);
}

// =============================================================================
// Operators
// =============================================================================

#[test]
fn test_nested_field() {
    let filter = GrepFilter::new(GrepConfig::new().with_condition(Condition::eq("user.role", "bot"))).unwrap();
    assert_eq!(run(&filter, json!({"user": {"role": "bot"}})), Verdict::Drop);
    assert_eq!(run(&filter, json!({"user": "bot"})), Verdict::Keep);
}

#[test]
fn test_ne_missing_field_matches() {
    let filter = GrepFilter::new(GrepConfig::new().with_condition(Condition::ne("env", "prod"))).unwrap();
    assert_eq!(run(&filter, json!({})), Verdict::Drop);
    assert_eq!(run(&filter, json!({"env": "prod"})), Verdict::Keep);
}

#[test]
fn test_contains_and_exists() {
    let contains = GrepFilter::new(GrepConfig::new().with_condition(Condition::contains("msg", "timeout"))).unwrap();
    assert_eq!(run(&contains, json!({"msg": "read timeout after 3s"})), Verdict::Drop);

    let exists = GrepFilter::new(GrepConfig::new().with_condition(Condition::exists("trace_id"))).unwrap();
    assert_eq!(run(&exists, json!({"trace_id": null})), Verdict::Drop);
    assert_eq!(run(&exists, json!({"span": 1})), Verdict::Keep);
}

#[test]
fn test_numeric_comparison() {
    let filter = GrepFilter::new(GrepConfig::new().with_condition(Condition::gt("status", "499"))).unwrap();
    assert_eq!(run(&filter, json!({"status": 500})), Verdict::Drop);
    assert_eq!(run(&filter, json!({"status": "503"})), Verdict::Drop);
    assert_eq!(run(&filter, json!({"status": 200})), Verdict::Keep);
    assert_eq!(run(&filter, json!({"status": "n/a"})), Verdict::Keep);
}

#[test]
fn test_regex_condition() {
    let filter = GrepFilter::new(GrepConfig::new().with_condition(Condition::regex("ua", "(?i)bot").unwrap())).unwrap();
    assert_eq!(run(&filter, json!({"ua": "Googlebot/2.1"})), Verdict::Drop);
    assert_eq!(run(&filter, json!({"ua": "Firefox"})), Verdict::Keep);
}

#[test]
fn test_bool_and_number_equality() {
    let filter = GrepFilter::new(
        GrepConfig::new()
            .with_match_mode(MatchMode::Any)
            .with_condition(Condition::eq("internal", "true"))
            .with_condition(Condition::eq("code", "7")),
    )
    .unwrap();
    assert_eq!(run(&filter, json!({"internal": true})), Verdict::Drop);
    assert_eq!(run(&filter, json!({"code": 7})), Verdict::Drop);
    assert_eq!(run(&filter, json!({"internal": false, "code": 8})), Verdict::Keep);
}

// =============================================================================
// Metrics and factory
// =============================================================================

#[test]
fn test_metrics() {
    let filter = GrepFilter::new(GrepConfig::new().with_condition(Condition::eq("level", "debug"))).unwrap();
    run(&filter, json!({"level": "debug"}));
    run(&filter, json!({"level": "info"}));

    let m = filter.metrics();
    assert_eq!(m.records_received.load(Ordering::Relaxed), 2);
    assert_eq!(m.records_passed.load(Ordering::Relaxed), 1);
    assert_eq!(m.records_dropped.load(Ordering::Relaxed), 1);
    assert!((m.drop_rate() - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_invalid_config_rejected() {
    assert!(GrepFilter::new(GrepConfig::new()).is_err());
}

#[test]
fn test_factory_creates_filter() {
    let options: FilterOptions = toml::from_str(
        r#"
        field = "level"
        value = "debug"
        "#,
    )
    .unwrap();
    let filter = GrepFactory.create(&options).unwrap();
    assert_eq!(filter.name(), "grep");
    assert!(!filter.has_filter_stream());
}
