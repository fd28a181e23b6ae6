//! Tests for redact filter configuration

use super::*;

fn options(toml_str: &str) -> FilterOptions {
    toml::from_str(toml_str).unwrap()
}

#[test]
fn test_default_config() {
    let config = RedactConfig::default();
    assert_eq!(config.strategy, RedactStrategy::Mask);
    assert_eq!(config.replacement, DEFAULT_REPLACEMENT);
    assert!(config.validate().is_err());
}

#[test]
fn test_hash_requires_key() {
    let config = RedactConfig::new()
        .with_strategy(RedactStrategy::Hash)
        .with_field("password");
    assert!(config.validate().unwrap_err().contains("hash_key"));
}

#[test]
fn test_remove_rejects_patterns() {
    let config = RedactConfig::new()
        .with_strategy(RedactStrategy::Remove)
        .with_pattern(PatternType::Email);
    assert!(config.validate().unwrap_err().contains("fields only"));
}

#[test]
fn test_empty_path_segment_rejected() {
    let config = RedactConfig::new().with_field("user..email");
    assert!(config.validate().is_err());
}

#[test]
fn test_with_pattern_deduplicates() {
    let config = RedactConfig::new()
        .with_pattern(PatternType::Email)
        .with_pattern(PatternType::Email);
    assert_eq!(config.patterns.len(), 1);
}

#[test]
fn test_strategy_parse() {
    assert_eq!(RedactStrategy::parse("mask"), Some(RedactStrategy::Mask));
    assert_eq!(RedactStrategy::parse("redact"), Some(RedactStrategy::Mask));
    assert_eq!(RedactStrategy::parse("remove"), Some(RedactStrategy::Remove));
    assert_eq!(RedactStrategy::parse("hash"), Some(RedactStrategy::Hash));
    assert_eq!(RedactStrategy::parse("shred"), None);
}

// =============================================================================
// Parsing from options
// =============================================================================

#[test]
fn test_parse_full() {
    let opts = options(
        r#"
        strategy = "hash"
        hash_key = "k"
        fields = ["password", "user.ssn"]
        patterns = ["email", "ipv4"]
        "#,
    );
    let config = RedactConfig::try_from(&opts).unwrap();
    assert_eq!(config.strategy, RedactStrategy::Hash);
    assert_eq!(config.fields, vec!["password", "user.ssn"]);
    assert_eq!(config.patterns, vec![PatternType::Email, PatternType::Ipv4]);
}

#[test]
fn test_parse_replacement() {
    let opts = options(
        r#"
        fields = ["token"]
        replacement = "***"
        "#,
    );
    assert_eq!(RedactConfig::try_from(&opts).unwrap().replacement, "***");
}

#[test]
fn test_parse_unknown_pattern() {
    let opts = options(r#"patterns = ["dna"]"#);
    assert!(RedactConfig::try_from(&opts).unwrap_err().contains("unknown pattern type"));
}

#[test]
fn test_parse_unknown_strategy() {
    let opts = options(
        r#"
        strategy = "burn"
        fields = ["a"]
        "#,
    );
    assert!(RedactConfig::try_from(&opts).unwrap_err().contains("unknown strategy"));
}

#[test]
fn test_parse_unknown_option() {
    let opts = options(
        r#"
        fields = ["a"]
        scan_everything = true
        "#,
    );
    assert!(RedactConfig::try_from(&opts).unwrap_err().contains("invalid redact options"));
}
