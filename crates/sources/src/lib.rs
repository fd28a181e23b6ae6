//! Ripple - Sources
//!
//! Inputs that produce events and emit them into an [`EventRouter`].
//!
//! # Available Sources
//!
//! - **Dummy** - Synthetic records at a fixed rate
//!
//! # Design Principles
//!
//! - **Direct emit**: sources call the shared router on their own task;
//!   there is no channel between a source and the router
//! - **Cancellation**: `run` returns once its `CancellationToken` fires
//! - **Fire and forget**: delivery errors are the router's concern
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ripple_sources::{DummySource, DummySourceConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! let config = DummySourceConfig {
//!     tag: "test.dummy".into(),
//!     rate: 10,
//!     ..Default::default()
//! };
//!
//! let source = DummySource::new(config, router)?;
//! let cancel = CancellationToken::new();
//! tokio::spawn(async move { source.run(cancel).await });
//! ```
//!
//! [`EventRouter`]: ripple_pipeline::EventRouter

pub mod dummy;

// Common types for sources
mod common;

pub use common::{MetricsSnapshot, SourceError, SourceMetrics};
pub use dummy::{DummySource, DummySourceConfig, RecordGenerator};
