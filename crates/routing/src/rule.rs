//! Routing rules
//!
//! A rule binds a parsed pattern to a collector. Rules are evaluated in
//! registration order; position, not specificity, decides priority.

use crate::{MatchPattern, Result};

/// A `(pattern, collector)` binding
#[derive(Debug, Clone)]
pub struct Rule<C> {
    pattern: MatchPattern,
    collector: C,
    source: String,
}

impl<C> Rule<C> {
    /// Parse `pattern` and bind it to `collector`
    pub fn new(pattern: &str, collector: C) -> Result<Self> {
        Ok(Self {
            pattern: MatchPattern::parse(pattern)?,
            collector,
            source: pattern.to_string(),
        })
    }

    /// Test a tag against the rule's pattern
    #[inline]
    pub fn matches(&self, tag: &str) -> bool {
        self.pattern.matches(tag)
    }

    /// Bound collector
    #[inline]
    pub fn collector(&self) -> &C {
        &self.collector
    }

    /// Parsed pattern
    #[inline]
    pub fn pattern(&self) -> &MatchPattern {
        &self.pattern
    }

    /// Pattern text as written
    #[inline]
    pub fn pattern_str(&self) -> &str {
        &self.source
    }
}
