//! Configuration validation
//!
//! Validates config consistency:
//! - Rules reference declared filters or resolvable outputs
//! - Rule patterns are non-empty
//! - `router.default` and copy stores resolve to outputs
//! - Copy outputs do not nest
//! - No name is both a filter and an output
//! - Filter types are known
//! - Sources have a tag and a positive rate

use crate::error::{ConfigError, Result};
use crate::filters::is_known_filter_type;
use crate::outputs::OutputConfig;
use crate::sources::SourceConfig;
use crate::Config;

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_names(config)?;
    validate_router(config)?;
    validate_outputs(config)?;
    validate_filters(config)?;
    validate_rules(config)?;
    validate_sources(config)?;
    Ok(())
}

fn validate_names(config: &Config) -> Result<()> {
    let mut shared: Vec<&String> = config
        .filters
        .names()
        .filter(|name| config.outputs.resolves(name))
        .collect();
    shared.sort();

    match shared.first() {
        Some(name) => Err(ConfigError::duplicate_name(*name)),
        None => Ok(()),
    }
}

fn validate_router(config: &Config) -> Result<()> {
    if config.router.cache_capacity == 0 {
        return Err(ConfigError::invalid_value(
            "router",
            "router",
            "cache_capacity",
            "must be greater than 0",
        ));
    }

    if let Some(ref default) = config.router.default
        && !config.outputs.resolves(default)
    {
        return Err(ConfigError::unknown_output("router.default", default));
    }

    Ok(())
}

fn validate_outputs(config: &Config) -> Result<()> {
    for (name, output) in config.outputs.iter() {
        let OutputConfig::Copy(copy) = output else {
            continue;
        };

        if copy.stores.is_empty() {
            return Err(ConfigError::missing_field("output", name, "stores"));
        }

        for store in &copy.stores {
            if !config.outputs.resolves(store) {
                return Err(ConfigError::unknown_output(format!("output '{name}'"), store));
            }
            if let Some(OutputConfig::Copy(_)) = config.outputs.get(store) {
                return Err(ConfigError::invalid_value(
                    "output",
                    name,
                    "stores",
                    format!("'{store}' is itself a copy output"),
                ));
            }
        }
    }

    for (name, output) in config.outputs.iter() {
        if let OutputConfig::Stdout(stdout) = output
            && !matches!(stdout.format.as_str(), "json" | "hash")
        {
            return Err(ConfigError::invalid_value(
                "output",
                name,
                "format",
                format!("unknown format '{}', expected json or hash", stdout.format),
            ));
        }
    }

    Ok(())
}

fn validate_filters(config: &Config) -> Result<()> {
    for (name, filter) in config.filters.iter() {
        if !filter.enabled {
            continue;
        }
        if !is_known_filter_type(&filter.filter_type) {
            return Err(ConfigError::invalid_value(
                "filter",
                name,
                "type",
                format!(
                    "unknown filter type '{}', expected one of: {}",
                    filter.filter_type,
                    crate::KNOWN_FILTER_TYPES.join(", ")
                ),
            ));
        }
    }
    Ok(())
}

fn validate_rules(config: &Config) -> Result<()> {
    for (index, rule) in config.rules.iter().enumerate() {
        if rule.pattern.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "rule",
                format!("rules[{index}]"),
                "match",
                "pattern must not be empty",
            ));
        }

        let known = config.filters.contains(&rule.collector) || config.outputs.resolves(&rule.collector);
        if !known {
            return Err(ConfigError::unknown_collector(index, &rule.pattern, &rule.collector));
        }
    }
    Ok(())
}

fn validate_sources(config: &Config) -> Result<()> {
    for (index, source) in config.sources.iter().enumerate() {
        let name = format!("sources[{index}]");
        match source {
            SourceConfig::Dummy(dummy) => {
                if dummy.tag.is_empty() {
                    return Err(ConfigError::missing_field("source", name, "tag"));
                }
                if dummy.rate == 0 {
                    return Err(ConfigError::invalid_value("source", name, "rate", "must be greater than 0"));
                }
                if dummy.records.is_empty() {
                    return Err(ConfigError::invalid_value(
                        "source",
                        name,
                        "records",
                        "at least one record is required",
                    ));
                }
            }
        }
    }
    Ok(())
}
