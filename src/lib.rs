//! BJJ Study - technique clip catalog
//!
//! Catalogs short clips of BJJ technique footage and serves tag, position and
//! clip-length search plus related-clip suggestions. The search and ranking
//! engines live in the `bjj-search` crate; this crate wires them to a
//! catalog store, configuration and the HTTP API.

pub mod catalog;
pub mod config;

#[cfg(feature = "api")]
pub mod api;

// Re-export main types for easy access
pub use crate::catalog::{CatalogError, CatalogStore};
pub use crate::config::{Config, ConfigBuilder};
pub use bjj_core::{NewVideo, Video};
pub use bjj_search::{filter, related_videos, FilterCriteria, DEFAULT_RELATED_LIMIT};

#[cfg(feature = "api")]
pub use crate::api::ApiServer;
