//! Output configuration
//!
//! Named output instances. Rules, copy stores and `router.default` refer to
//! outputs by name. `null` and `stdout` are built in and may be referenced
//! without being declared.
//!
//! ```toml
//! [outputs.console]
//! type = "stdout"
//! plugin_id = "out_console"
//! color = false
//!
//! [outputs.fan]
//! type = "copy"
//! stores = ["console", "null"]
//! ```

use std::collections::HashMap;

use serde::Deserialize;

/// Outputs available without a declaration
pub const BUILTIN_OUTPUTS: &[&str] = &["null", "stdout"];

/// All configured outputs, keyed by name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct OutputsConfig {
    outputs: HashMap<String, OutputConfig>,
}

impl OutputsConfig {
    /// Get an output by name
    pub fn get(&self, name: &str) -> Option<&OutputConfig> {
        self.outputs.get(name)
    }

    /// Check if an output is declared
    pub fn contains(&self, name: &str) -> bool {
        self.outputs.contains_key(name)
    }

    /// Check if a name resolves to a declared or built-in output
    pub fn resolves(&self, name: &str) -> bool {
        self.contains(name) || BUILTIN_OUTPUTS.contains(&name)
    }

    /// Iterate over all outputs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &OutputConfig)> {
        self.outputs.iter()
    }

    /// Get all output names
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.outputs.keys()
    }

    /// Get the number of declared outputs
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Check if no outputs are declared
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Configuration for a single output instance
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputConfig {
    /// Discard everything
    Null(NullOutputConfig),

    /// Print records
    Stdout(StdoutOutputConfig),

    /// Fan out to other outputs
    Copy(CopyOutputConfig),

    /// Capture batches in memory
    Memory(MemoryOutputConfig),
}

impl OutputConfig {
    /// Output type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null(_) => "null",
            Self::Stdout(_) => "stdout",
            Self::Copy(_) => "copy",
            Self::Memory(_) => "memory",
        }
    }

    /// Configured plugin id
    pub fn plugin_id(&self) -> Option<&str> {
        match self {
            Self::Null(c) => c.plugin_id.as_deref(),
            Self::Stdout(c) => c.plugin_id.as_deref(),
            Self::Copy(c) => c.plugin_id.as_deref(),
            Self::Memory(c) => c.plugin_id.as_deref(),
        }
    }
}

/// Null output options
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NullOutputConfig {
    pub plugin_id: Option<String>,
}

/// Stdout output options
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StdoutOutputConfig {
    pub plugin_id: Option<String>,

    /// Colorize time and tag
    pub color: bool,

    /// `json` or `hash`
    pub format: String,

    /// Records printed per batch, 0 for all
    pub max_records: usize,
}

impl Default for StdoutOutputConfig {
    fn default() -> Self {
        Self {
            plugin_id: None,
            color: true,
            format: "json".to_string(),
            max_records: 0,
        }
    }
}

/// Copy output options
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyOutputConfig {
    pub plugin_id: Option<String>,

    /// Output names, in fan-out order
    pub stores: Vec<String>,

    /// Give each store its own clone of the batch
    pub deep_copy: bool,
}

/// Memory output options
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryOutputConfig {
    pub plugin_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_outputs() {
        let toml = r#"
[console]
type = "stdout"
color = false

[fan]
type = "copy"
plugin_id = "out_fan"
stores = ["console", "null"]
"#;
        let outputs: OutputsConfig = toml::from_str(toml).unwrap();
        assert_eq!(outputs.len(), 2);

        match outputs.get("console") {
            Some(OutputConfig::Stdout(c)) => {
                assert!(!c.color);
                assert_eq!(c.format, "json");
            }
            other => panic!("unexpected: {other:?}"),
        }

        let fan = outputs.get("fan").unwrap();
        assert_eq!(fan.type_name(), "copy");
        assert_eq!(fan.plugin_id(), Some("out_fan"));
    }

    #[test]
    fn test_builtin_outputs_resolve() {
        let outputs = OutputsConfig::default();
        assert!(outputs.resolves("null"));
        assert!(outputs.resolves("stdout"));
        assert!(!outputs.resolves("archive"));
        assert!(!outputs.contains("stdout"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let toml = r#"
[s3]
type = "s3"
"#;
        assert!(toml::from_str::<OutputsConfig>(toml).is_err());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let toml = r#"
[n]
type = "null"
path = "/tmp"
"#;
        assert!(toml::from_str::<OutputsConfig>(toml).is_err());
    }
}
