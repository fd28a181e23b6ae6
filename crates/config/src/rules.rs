//! Rule configuration
//!
//! Rules are kept in file order, which is the order the router scans them.
//!
//! ```toml
//! [[rules]]
//! match = "access.** app.{web,api}.*"
//! collector = "scrub"
//! ```

use serde::Deserialize;

/// One routing rule
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Tag pattern text; whitespace separates alternatives
    #[serde(rename = "match")]
    pub pattern: String,

    /// Name of a filter or output
    pub collector: String,
}
