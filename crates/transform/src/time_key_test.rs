//! Tests for the time key filter

use serde_json::json;

use super::*;

fn rec(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("test record must be an object"),
    }
}

fn filter(config: TimeKeyConfig) -> TimeKeyFilter {
    TimeKeyFilter::new(config).unwrap()
}

#[test]
fn test_sets_time_and_removes_key() {
    let f = filter(TimeKeyConfig::default());
    let mut time = EventTime::new(0, 0);
    let mut record = rec(json!({"time": 1_700_000_000, "msg": "x"}));

    assert_eq!(f.filter_with_time("t", &mut time, &mut record).unwrap(), Verdict::Keep);
    assert_eq!(time, EventTime::new(1_700_000_000, 0));
    assert!(!record.contains_key("time"));
}

#[test]
fn test_keep_key() {
    let f = filter(TimeKeyConfig {
        key: "ts".into(),
        keep_key: true,
        required: true,
    });
    let mut time = EventTime::default();
    let mut record = rec(json!({"ts": "1970-01-01T00:00:10Z"}));

    f.filter_with_time("t", &mut time, &mut record).unwrap();
    assert_eq!(time.sec(), 10);
    assert!(record.contains_key("ts"));
}

#[test]
fn test_missing_required_key_fails() {
    let f = filter(TimeKeyConfig::default());
    let mut time = EventTime::default();
    let mut record = rec(json!({"msg": "x"}));

    let err = f.filter_with_time("t", &mut time, &mut record).unwrap_err();
    assert!(matches!(err, TransformError::MissingField(_)));
}

#[test]
fn test_missing_optional_key_passes() {
    let f = filter(TimeKeyConfig {
        required: false,
        ..TimeKeyConfig::default()
    });
    let mut time = EventTime::new(7, 0);
    let mut record = rec(json!({"msg": "x"}));

    assert_eq!(f.filter_with_time("t", &mut time, &mut record).unwrap(), Verdict::Keep);
    assert_eq!(time.sec(), 7);
}

#[test]
fn test_unparseable_time_fails() {
    let f = filter(TimeKeyConfig::default());
    let mut time = EventTime::default();
    let mut record = rec(json!({"time": "last tuesday"}));

    let err = f.filter_with_time("t", &mut time, &mut record).unwrap_err();
    assert!(matches!(err, TransformError::Time(_)));
}

#[test]
fn test_reports_time_capability() {
    assert!(filter(TimeKeyConfig::default()).has_filter_with_time());
}

#[test]
fn test_empty_key_rejected() {
    let config = TimeKeyConfig {
        key: String::new(),
        ..TimeKeyConfig::default()
    };
    assert!(TimeKeyFilter::new(config).is_err());
}

#[test]
fn test_factory_parses_options() {
    let options: FilterOptions = toml::from_str(
        r#"
        key = "timestamp"
        keep_key = true
        "#,
    )
    .unwrap();
    let f = TimeKeyFactory.create(&options).unwrap();
    assert_eq!(f.name(), "time_key");

    let bad: FilterOptions = toml::from_str(r#"field = "x""#).unwrap();
    assert!(TimeKeyFactory.create(&bad).is_err());
}
