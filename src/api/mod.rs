//! API module for the BJJ Study catalog
//!
//! Provides the REST endpoints used by the web front-end: catalog listing,
//! clip creation, search and related clips.

use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::catalog::CatalogStore;
use crate::config::Config;

pub mod handlers;
pub mod models;
pub mod server;

pub use server::{router, AppState};

/// API server for handling REST requests
#[derive(Debug)]
pub struct ApiServer {
    store: CatalogStore,
    config: Arc<Config>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(store: CatalogStore, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    /// Start the API server in the background
    pub fn start_background(self) -> JoinHandle<Result<()>> {
        tokio::spawn(async move { self.start().await })
    }

    /// Start the API server
    pub async fn start(self) -> Result<()> {
        info!("🚀 Starting API server on port {}", self.config.server.port);

        server::start_http_server(self.store, self.config).await
    }
}
