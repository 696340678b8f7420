use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use bjj_search::DEFAULT_RELATED_LIMIT;

/// Configuration for the BJJ Study catalog service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Catalog storage settings
    pub catalog: CatalogConfig,

    /// Search and ranking settings
    pub search: SearchConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Listen port
    pub port: u16,

    /// Allow cross-origin browser access
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON snapshot file (None keeps the catalog in memory only)
    pub path: Option<PathBuf>,

    /// Write the snapshot after every create or delete
    pub persist_on_write: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of related clips returned per video
    pub related_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter level
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 1025,
            enable_cors: true,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            persist_on_write: true,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the first config file found, else environment
    pub fn load() -> Result<Self> {
        Self::load_from(&["bjj-study.toml", "config/bjj-study.toml"])
    }

    /// A config file that exists but does not parse is an error, not a
    /// silent fallback to the defaults
    fn load_from<P: AsRef<Path>>(config_paths: &[P]) -> Result<Self> {
        for path in config_paths {
            let path = path.as_ref();
            if path.is_file() {
                return Self::from_file(path);
            }
        }

        Self::from_env()
    }

    /// Load configuration from an explicit TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Cannot read config file {}: {}", path.display(), e))?;
        let config: Config = toml::from_str(&config_str)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config.with_env_overrides())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::default().with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("BJJ_STUDY_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("BJJ_STUDY_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid BJJ_STUDY_PORT: {}", port),
            }
        }

        if let Ok(path) = std::env::var("BJJ_STUDY_CATALOG") {
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Ok(limit) = std::env::var("BJJ_STUDY_RELATED_LIMIT") {
            match limit.parse() {
                Ok(limit) => self.search.related_limit = limit,
                Err(_) => tracing::warn!("Ignoring invalid BJJ_STUDY_RELATED_LIMIT: {}", limit),
            }
        }

        if let Ok(level) = std::env::var("BJJ_STUDY_LOG_LEVEL") {
            self.logging.level = level;
        }

        self
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.as_ref().display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow!("server.port must be greater than 0"));
        }

        if self.search.related_limit == 0 {
            return Err(anyhow!("search.related_limit must be greater than 0"));
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "BJJ Study Configuration:\n\
            - Listen: {}:{}\n\
            - CORS Enabled: {}\n\
            - Catalog: {}\n\
            - Related Limit: {}",
            self.server.host,
            self.server.port,
            self.server.enable_cors,
            self.catalog
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "in-memory".to_string()),
            self.search.related_limit
        )
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    pub fn with_catalog_path(mut self, path: PathBuf) -> Self {
        self.config.catalog.path = Some(path);
        self
    }

    pub fn persist_on_write(mut self, enable: bool) -> Self {
        self.config.catalog.persist_on_write = enable;
        self
    }

    pub fn with_related_limit(mut self, limit: usize) -> Self {
        self.config.search.related_limit = limit;
        self
    }

    pub fn enable_cors(mut self, enable: bool) -> Self {
        self.config.server.enable_cors = enable;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
