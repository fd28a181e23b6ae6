//! Check command - validate configuration and print the rule table

use anyhow::Result;
use ripple_config::Config;

use crate::builder::build_router;

/// Build the router and describe it on stdout
pub fn run(config: &Config, source: &str) -> Result<()> {
    let assembly = build_router(config)?;
    let router = &assembly.router;

    println!("config: {source}");
    println!("outputs: {}", config.outputs.len());
    println!("filters: {}", config.filters.len());
    println!("sources: {}", config.sources.len());
    println!("rules:");
    for (position, rule) in router.rules().iter().enumerate() {
        println!("  {position:>3}  {:<24} {}", rule.pattern_str(), rule.collector());
    }
    println!("default: {}", router.default_output().name());

    router.setup_metric_counter();
    let scopes = router.counter_scopes();
    if !scopes.is_empty() {
        println!("counter scopes: {}", scopes.join(", "));
    }

    println!("configuration ok");
    Ok(())
}
