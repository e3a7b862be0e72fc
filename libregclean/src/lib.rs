//! regclean - Container Registry Retention Library
//!
//! libregclean finds tags in a Docker Registry (HTTP API v2) that fall
//! outside a retention policy and deletes them.
//!
//! # Quick Start
//!
//! ```no_run
//! use libregclean::{Cleaner, Client, OlderThanDate, Registry, TracingLogger};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let logger = Arc::new(TracingLogger);
//!     let registry = Registry::new("localhost", 5000, true).with_basic_auth("admin", "secret");
//!     let client = Client::new(registry, logger.clone())?;
//!
//!     let report = Cleaner::new(client, logger).run(&OlderThanDate::new("01.01.2022"))?;
//!     println!("{} tags deleted", report.deleted.len());
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`Registry`] - Connection descriptor (host, port, credentials, dry-run)
//! - [`Client`] - Blocking HTTP client for catalog, tags, manifests, deletes
//! - [`Evaluator`] - Resolves tag metadata and applies a [`RetentionPolicy`]
//! - [`Cleaner`] - Runs a policy over a whole registry
//! - [`Config`] - YAML and environment configuration
//!
//! # Architecture
//!
//! The pipeline runs strictly in sequence: catalog, repository grouping
//! ([`split_repositories`]), per-image evaluation, then one DELETE per
//! deletable tag. Logging goes through an injected [`Logger`].

/// Returns the libregclean crate version.
///
/// # Examples
///
/// ```
/// let version = libregclean::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// Re-export commonly used types for convenience
pub use auth::Credentials;
pub use cleaner::{Cleaner, CleanupReport};
pub use client::Client;
pub use config::Config;
pub use digest::Digest;
pub use error::{CleanError, Result};
pub use logging::{Logger, MemoryLogger, NullLogger, TracingLogger};
pub use manifest::Manifest;
pub use model::{Catalog, Image, Tag};
pub use policy::{Evaluator, KeepLast, OlderThanDate, RetentionPolicy, TagSource, parse_date};
pub use registry::Registry;
pub use repository::split_repositories;

pub mod auth;
pub mod cleaner;
pub mod client;
pub mod config;
pub mod digest;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod model;
pub mod policy;
pub mod registry;
pub mod repository;
