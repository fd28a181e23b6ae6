//! Ripple Routing - Tag patterns, rules and the match cache
//!
//! Decides which rules apply to a tag. Rules are compiled once at setup
//! time; per-tag results are memoized by the router in a [`MatchCache`].
//!
//! # Design
//!
//! - Patterns are parsed into segment matchers up front; matching is a pure
//!   function of the tag and never allocates beyond splitting it
//! - Rules are generic over the collector they carry, so this crate knows
//!   nothing about filters or outputs
//! - First matching rule wins; specificity is ignored
//!
//! # Example
//!
//! ```
//! use ripple_routing::{MatchCache, Rule};
//!
//! let rules = vec![
//!     Rule::new("access.**", "web").unwrap(),
//!     Rule::new("**", "default").unwrap(),
//! ];
//!
//! let cache: MatchCache<&str> = MatchCache::new(16);
//! let target = cache.get_or_insert_with("access.nginx", || {
//!     rules
//!         .iter()
//!         .find(|r| r.matches("access.nginx"))
//!         .map(|r| *r.collector())
//!         .unwrap_or("none")
//! });
//! assert_eq!(target, "web");
//! ```

mod cache;
mod error;
mod pattern;
mod rule;


pub use cache::{CacheStats, CacheStatsSnapshot, MATCH_CACHE_SIZE, MatchCache};
pub use error::{Result, RoutingError};
pub use pattern::{MAX_BRACE_ALTERNATIVES, MatchPattern, Segment, TagPattern};
pub use rule::Rule;
