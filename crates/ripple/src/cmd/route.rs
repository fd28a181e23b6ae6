//! Route command - print where tags would be delivered

use anyhow::Result;
use clap::Args;
use ripple_config::Config;

use crate::builder::build_router;

/// Route command arguments
#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Tags to resolve
    #[arg(required = true)]
    pub tags: Vec<String>,
}

/// Resolve each tag and print `tag -> route`
///
/// Tags no rule matches are marked as going to the default output.
pub fn run(config: &Config, args: RouteArgs) -> Result<()> {
    let router = build_router(config)?.router;

    for tag in &args.tags {
        let route = router.route_for(tag);
        if router.matches(tag) {
            println!("{tag} -> {route}");
        } else {
            println!("{tag} -> {route} (default)");
        }
    }
    Ok(())
}
