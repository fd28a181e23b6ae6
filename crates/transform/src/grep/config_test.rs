//! Tests for grep filter configuration

use super::*;

fn options(toml_str: &str) -> FilterOptions {
    toml::from_str(toml_str).unwrap()
}

#[test]
fn test_default_config() {
    let config = GrepConfig::default();
    assert_eq!(config.action, GrepAction::Drop);
    assert_eq!(config.match_mode, MatchMode::All);
    assert!(config.conditions.is_empty());
}

#[test]
fn test_validate_requires_condition() {
    let err = GrepConfig::new().validate().unwrap_err();
    assert!(err.contains("at least one condition"));
}

#[test]
fn test_validate_requires_value() {
    let config = GrepConfig::new().with_condition(Condition::new("level", Operator::Eq, None));
    assert!(config.validate().unwrap_err().contains("requires a value"));
}

#[test]
fn test_validate_exists_without_value() {
    let config = GrepConfig::new().with_condition(Condition::exists("user"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_condition_regex_invalid() {
    assert!(Condition::regex("msg", "[unclosed").is_err());
}

// =============================================================================
// Parsing from options
// =============================================================================

#[test]
fn test_parse_shorthand() {
    let opts = options(
        r#"
        action = "keep"
        field = "level"
        value = "error"
        "#,
    );
    let config = GrepConfig::try_from(&opts).unwrap();
    assert_eq!(config.action, GrepAction::Keep);
    assert_eq!(config.conditions.len(), 1);
    assert!(matches!(config.conditions[0].operator, Operator::Eq));
}

#[test]
fn test_parse_conditions_array() {
    let opts = options(
        r#"
        match = "any"

        [[conditions]]
        field = "path"
        value = "/health"

        [[conditions]]
        field = "status"
        operator = "gte"
        value = 500
        "#,
    );
    let config = GrepConfig::try_from(&opts).unwrap();
    assert_eq!(config.match_mode, MatchMode::Any);
    assert_eq!(config.conditions.len(), 2);
    assert_eq!(config.conditions[1].value.as_deref(), Some("500"));
    assert!(matches!(config.conditions[1].operator, Operator::Gte));
}

#[test]
fn test_parse_regex_operator() {
    let opts = options(
        r#"
        field = "message"
        operator = "regex"
        value = "^GET /"
        "#,
    );
    let config = GrepConfig::try_from(&opts).unwrap();
    assert!(matches!(config.conditions[0].operator, Operator::Regex(_)));
}

#[test]
fn test_parse_unknown_action() {
    let opts = options(
        r#"
        action = "explode"
        field = "a"
        value = "b"
        "#,
    );
    assert!(GrepConfig::try_from(&opts).unwrap_err().contains("unknown action"));
}

#[test]
fn test_parse_unknown_operator() {
    let opts = options(
        r#"
        field = "a"
        operator = "like"
        value = "b"
        "#,
    );
    assert!(GrepConfig::try_from(&opts).unwrap_err().contains("unknown operator"));
}

#[test]
fn test_parse_condition_missing_field() {
    let opts = options(
        r#"
        [[conditions]]
        value = "b"
        "#,
    );
    assert!(GrepConfig::try_from(&opts).unwrap_err().contains("requires 'field'"));
}

#[test]
fn test_parse_no_conditions() {
    let opts = options(r#"action = "drop""#);
    assert!(GrepConfig::try_from(&opts).is_err());
}
