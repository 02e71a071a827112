//! Animalfacts - animal facts lookup library
//!
//! Looks up animals by name against a keyed HTTP API and returns the
//! matching records as opaque JSON objects, with optional HTML rendering.
//!
//! ## Usage
//!
//! Load a [`Config`] once (usually [`Config::from_env`]), build an
//! [`AnimalClient`] from it and call [`AnimalSource::fetch`] with a validated
//! [`AnimalQuery`]. The result distinguishes records found, an empty match,
//! and each failure kind. [`AnimalSource::fetch_records`] collapses every
//! non-success into an empty list for callers that only want records.

pub mod client;
pub mod config;
mod error;
pub mod render;
mod source;
mod types;

pub use client::{normalize, AnimalClient};
pub use config::{AuthScheme, Config};
pub use error::{ConfigError, FetchError, QueryError, RenderError};
pub use render::{render_html, DEFAULT_TEMPLATE};
pub use source::AnimalSource;
pub use types::{AnimalQuery, AnimalRecord, FetchOutcome};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = concat!("animalfacts/", env!("CARGO_PKG_VERSION"));
