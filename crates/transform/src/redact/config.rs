//! Redact filter configuration

use serde::Deserialize;

use crate::registry::FilterOptions;

/// What happens to a sensitive value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedactStrategy {
    /// Replace with the replacement text
    #[default]
    Mask,
    /// Remove the field (targeted fields only)
    Remove,
    /// Replace with a deterministic keyed hash
    Hash,
}

impl RedactStrategy {
    /// Parse strategy from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mask" | "redact" => Some(Self::Mask),
            "remove" => Some(Self::Remove),
            "hash" => Some(Self::Hash),
            _ => None,
        }
    }
}

/// Built-in pattern types scanned inside string values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternType {
    /// Email addresses
    Email,
    /// Credit card numbers (13-19 digits)
    CreditCard,
    /// US Social Security Number (XXX-XX-XXXX)
    SsnUs,
    /// IPv4 address
    Ipv4,
    /// IBAN
    Iban,
}

impl PatternType {
    /// Every built-in pattern
    pub const ALL: [PatternType; 5] = [
        PatternType::Email,
        PatternType::CreditCard,
        PatternType::SsnUs,
        PatternType::Ipv4,
        PatternType::Iban,
    ];

    /// Get the hash prefix for this pattern type
    pub fn hash_prefix(&self) -> &'static str {
        match self {
            PatternType::Email => "usr_",
            PatternType::CreditCard => "cc_",
            PatternType::SsnUs => "ssn_",
            PatternType::Ipv4 => "ip4_",
            PatternType::Iban => "iba_",
        }
    }

    /// Parse pattern type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email" => Some(PatternType::Email),
            "credit_card" => Some(PatternType::CreditCard),
            "ssn_us" => Some(PatternType::SsnUs),
            "ipv4" => Some(PatternType::Ipv4),
            "iban" => Some(PatternType::Iban),
            _ => None,
        }
    }
}

/// Default replacement text for masked values
pub const DEFAULT_REPLACEMENT: &str = "[REDACTED]";

/// Configuration for the redact filter
#[derive(Debug, Clone)]
pub struct RedactConfig {
    /// How sensitive values are replaced
    pub strategy: RedactStrategy,
    /// HMAC key (required for the hash strategy)
    pub hash_key: Option<String>,
    /// Field paths whose whole value is redacted (dot notation)
    pub fields: Vec<String>,
    /// Patterns scanned inside every string value
    pub patterns: Vec<PatternType>,
    /// Text used by the mask strategy
    pub replacement: String,
}

impl Default for RedactConfig {
    fn default() -> Self {
        Self {
            strategy: RedactStrategy::Mask,
            hash_key: None,
            fields: Vec::new(),
            patterns: Vec::new(),
            replacement: DEFAULT_REPLACEMENT.to_string(),
        }
    }
}

impl RedactConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy
    pub fn with_strategy(mut self, strategy: RedactStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the hash key
    pub fn with_hash_key(mut self, key: impl Into<String>) -> Self {
        self.hash_key = Some(key.into());
        self
    }

    /// Add a targeted field
    pub fn with_field(mut self, path: impl Into<String>) -> Self {
        self.fields.push(path.into());
        self
    }

    /// Add a scan pattern
    pub fn with_pattern(mut self, pattern: PatternType) -> Self {
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
        self
    }

    /// Set the mask replacement text
    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = replacement.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.strategy == RedactStrategy::Hash && self.hash_key.is_none() {
            return Err("hash strategy requires hash_key to be set".to_string());
        }

        if self.fields.is_empty() && self.patterns.is_empty() {
            return Err("at least one field or pattern is required".to_string());
        }

        if self.strategy == RedactStrategy::Remove && !self.patterns.is_empty() {
            return Err("remove strategy applies to fields only, not patterns".to_string());
        }

        if let Some(empty) = self.fields.iter().position(|f| f.is_empty() || f.split('.').any(str::is_empty)) {
            return Err(format!("field {} has an empty path segment", empty));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRedactConfig {
    strategy: Option<String>,
    hash_key: Option<String>,
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    patterns: Vec<String>,
    replacement: Option<String>,
}

impl TryFrom<&FilterOptions> for RedactConfig {
    type Error = String;

    fn try_from(options: &FilterOptions) -> Result<Self, Self::Error> {
        let raw: RawRedactConfig = toml::Value::Table(options.clone())
            .try_into()
            .map_err(|e| format!("invalid redact options: {}", e))?;

        let mut config = RedactConfig::default();

        if let Some(strategy) = raw.strategy {
            config.strategy = RedactStrategy::parse(&strategy)
                .ok_or_else(|| format!("unknown strategy: {}", strategy))?;
        }
        config.hash_key = raw.hash_key;
        config.fields = raw.fields;

        for p in raw.patterns {
            let pt = PatternType::parse(&p).ok_or_else(|| format!("unknown pattern type: {}", p))?;
            config = config.with_pattern(pt);
        }

        if let Some(replacement) = raw.replacement {
            config.replacement = replacement;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
