//! Route counter configuration
//!
//! `[metrics]` turns the router's per-scope counters on and sets how often
//! the reporter logs them.
//!
//! | Key | Default | Meaning |
//! |-----|---------|---------|
//! | `enabled` | `true` | Count routed records and bytes per scope |
//! | `interval` | `"60s"` | Report period; `"0s"` counts without reporting |
//! | `format` | `"human"` | `human` or `json` report lines |

use std::time::Duration;

use serde::Deserialize;

/// Shape of reported counter lines
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetricsFormat {
    /// `[metrics] scope: name=value (+delta)`
    #[default]
    Human,
    /// One JSON object per scope
    Json,
}

/// `[metrics]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,

    #[serde(with = "humantime_serde")]
    pub interval: Duration,

    pub format: MetricsFormat,
}

impl MetricsConfig {
    /// True when a periodic reporter should run
    pub fn reports(&self) -> bool {
        self.enabled && !self.interval.is_zero()
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: Duration::from_secs(60),
            format: MetricsFormat::Human,
        }
    }
}
