//! Router assembly from configuration
//!
//! Turns a validated [`Config`] into a ready [`EventRouter`]:
//!
//! ```text
//! [outputs.*] ──► Arc<dyn Output> ──┐
//!                                   ├──► rules (in order) ──► EventRouter
//! [filters.*] ──► FilterRef ────────┘
//! ```
//!
//! Built-in outputs (`null`, `stdout`) are created on first reference and
//! shared by every rule that names them.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use ripple_config::{Config, OutputConfig, SourceConfig};
use ripple_metrics::MemoryCounterBackend;
use ripple_pipeline::{Collector, EventRouter, LogErrorHandler};
use ripple_protocol::Record;
use ripple_sinks::{CopyOutput, MemoryOutput, NullOutput, Output, StdoutConfig, StdoutFormat, StdoutOutput};
use ripple_sources::DummySource;
use ripple_transform::{FilterRef, default_registry};
use tracing::{debug, info};

/// A router plus the handles the commands need next to it
pub struct Assembly {
    /// The configured router
    pub router: EventRouter,

    /// Route counters, when `[metrics]` is enabled
    pub counters: Option<Arc<MemoryCounterBackend>>,

    /// Declared memory outputs by name
    pub memories: HashMap<String, Arc<MemoryOutput>>,
}

/// Build the router described by `config`
pub fn build_router(config: &Config) -> Result<Assembly> {
    let mut outputs = OutputSet::default();
    outputs.build_declared(config)?;

    let filters = build_filters(config)?;

    let default_output = match &config.router.default {
        Some(name) => outputs.resolve(name)?,
        None => Arc::new(NullOutput::unmatched()) as Arc<dyn Output>,
    };

    let mut router = EventRouter::new(default_output, Arc::new(LogErrorHandler::new()))
        .with_cache_capacity(config.router.cache_capacity);

    let counters = if config.metrics.enabled {
        let backend = Arc::new(MemoryCounterBackend::new());
        router = router.with_counter_backend(backend.clone());
        Some(backend)
    } else {
        None
    };

    for rule in &config.rules {
        let collector: Collector = if let Some(filter) = filters.get(&rule.collector) {
            filter.clone().into()
        } else if config.filters.contains(&rule.collector) {
            info!(pattern = %rule.pattern, filter = %rule.collector, "skipping rule for disabled filter");
            continue;
        } else {
            outputs.resolve(&rule.collector)?.into()
        };

        router
            .add_rule(&rule.pattern, collector)
            .with_context(|| format!("invalid rule '{}'", rule.pattern))?;
    }

    debug!(
        rules = router.rules().len(),
        outputs = outputs.built.len(),
        filters = filters.len(),
        "router assembled"
    );

    Ok(Assembly {
        router,
        counters,
        memories: outputs.memories,
    })
}

/// Create one source per `[[sources]]` entry, all emitting into `router`
pub fn build_sources(config: &Config, router: &Arc<EventRouter>) -> Result<Vec<DummySource>> {
    config
        .sources
        .iter()
        .map(|source| match source {
            SourceConfig::Dummy(dummy) => {
                let records = dummy
                    .records
                    .iter()
                    .map(toml_record)
                    .collect::<Result<Vec<_>>>()?;
                let source_config = ripple_sources::DummySourceConfig {
                    tag: dummy.tag.clone(),
                    rate: dummy.rate,
                    auto_increment_key: dummy.auto_increment_key.clone(),
                    records,
                };
                DummySource::new(source_config, Arc::clone(router))
                    .with_context(|| format!("invalid source for tag '{}'", dummy.tag))
            }
        })
        .collect()
}

fn toml_record(table: &toml::Table) -> Result<Record> {
    match serde_json::to_value(table)? {
        serde_json::Value::Object(record) => Ok(record),
        other => Err(anyhow!("record must be a table, got {other}")),
    }
}

// =============================================================================
// Outputs
// =============================================================================

#[derive(Default)]
struct OutputSet {
    built: HashMap<String, Arc<dyn Output>>,
    memories: HashMap<String, Arc<MemoryOutput>>,
}

impl OutputSet {
    /// Build declared outputs; copies last so their stores exist
    fn build_declared(&mut self, config: &Config) -> Result<()> {
        for (name, output) in config.outputs.iter() {
            if matches!(output, OutputConfig::Copy(_)) {
                continue;
            }
            let built = self.build_leaf(name, output)?;
            self.built.insert(name.clone(), built);
        }

        for (name, output) in config.outputs.iter() {
            let OutputConfig::Copy(copy) = output else {
                continue;
            };
            let stores = copy
                .stores
                .iter()
                .map(|store| self.resolve(store))
                .collect::<Result<Vec<_>>>()?;
            let mut built = CopyOutput::new(stores)
                .with_context(|| format!("invalid copy output '{name}'"))?
                .with_deep_copy(copy.deep_copy);
            if let Some(id) = &copy.plugin_id {
                built = built.with_plugin_id(id.clone());
            }
            self.built.insert(name.clone(), Arc::new(built));
        }
        Ok(())
    }

    fn build_leaf(&mut self, name: &str, output: &OutputConfig) -> Result<Arc<dyn Output>> {
        let built: Arc<dyn Output> = match output {
            OutputConfig::Null(c) => {
                let mut null = NullOutput::new();
                if let Some(id) = &c.plugin_id {
                    null = null.with_plugin_id(id.clone());
                }
                Arc::new(null)
            }
            OutputConfig::Stdout(c) => {
                let format = StdoutFormat::parse(&c.format)
                    .ok_or_else(|| anyhow!("output '{name}': unknown stdout format '{}'", c.format))?;
                let mut stdout = StdoutOutput::with_config(StdoutConfig {
                    color: c.color,
                    format,
                    max_records: c.max_records,
                });
                if let Some(id) = &c.plugin_id {
                    stdout = stdout.with_plugin_id(id.clone());
                }
                Arc::new(stdout)
            }
            OutputConfig::Memory(c) => {
                let mut memory = MemoryOutput::new();
                if let Some(id) = &c.plugin_id {
                    memory = memory.with_plugin_id(id.clone());
                }
                let memory = Arc::new(memory);
                self.memories.insert(name.to_string(), Arc::clone(&memory));
                memory
            }
            OutputConfig::Copy(_) => bail!("output '{name}': copy outputs cannot be nested"),
        };
        Ok(built)
    }

    /// Look up a declared output, creating built-ins on first use
    fn resolve(&mut self, name: &str) -> Result<Arc<dyn Output>> {
        if let Some(output) = self.built.get(name) {
            return Ok(Arc::clone(output));
        }
        let builtin: Arc<dyn Output> = match name {
            "null" => Arc::new(NullOutput::new()),
            "stdout" => Arc::new(StdoutOutput::new()),
            _ => bail!("unknown output '{name}'"),
        };
        self.built.insert(name.to_string(), Arc::clone(&builtin));
        Ok(builtin)
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Create every enabled filter, keyed by name
fn build_filters(config: &Config) -> Result<HashMap<String, FilterRef>> {
    let registry = default_registry();
    let mut filters = HashMap::new();

    for (name, filter) in config.filters.iter() {
        if !filter.enabled {
            debug!(filter = %name, "filter disabled");
            continue;
        }

        let mut options = registry.default_options(&filter.filter_type).unwrap_or_default();
        options.extend(filter.options.clone());

        let created = registry
            .create(&filter.filter_type, &options)
            .with_context(|| format!("failed to create filter '{name}'"))?;

        let mut filter_ref = FilterRef::new(created);
        if let Some(id) = &filter.plugin_id {
            filter_ref = filter_ref.with_plugin_id(id.as_str());
        }
        filters.insert(name.clone(), filter_ref);
    }

    Ok(filters)
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
