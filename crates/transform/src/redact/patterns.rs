//! Built-in PII patterns
//!
//! Regex sources for detecting common PII inside string values. Patterns are
//! compiled once, when a redact filter is built.

use regex::Regex;

use super::config::PatternType;

impl PatternType {
    /// Regex source for this pattern type
    pub fn regex_source(&self) -> &'static str {
        match self {
            // Simplified RFC 5322
            PatternType::Email => r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
            // Format check only, no Luhn validation
            PatternType::CreditCard => r"\b(?:\d[ -]*?){13,19}\b",
            PatternType::SsnUs => r"\b\d{3}-\d{2}-\d{4}\b",
            PatternType::Ipv4 => {
                r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b"
            }
            PatternType::Iban => r"\b[A-Z]{2}\d{2}[A-Z0-9]{4,30}\b",
        }
    }

    /// Compile the pattern
    pub fn compile(&self) -> Result<Regex, regex::Error> {
        Regex::new(self.regex_source())
    }
}

/// A compiled scan pattern
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Pattern type, used for the hash prefix
    pub kind: PatternType,
    /// Compiled regex
    pub regex: Regex,
}
