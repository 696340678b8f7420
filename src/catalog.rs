//! In-memory video catalog with optional JSON snapshot persistence
//!
//! The store owns id assignment and snapshot consistency. Search and ranking
//! never see the store itself, only the `Vec<Video>` snapshot it hands out.

use bjj_core::{CoreError, NewVideo, Video};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;

/// Result type for catalog operations
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Error types for catalog operations
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Video not found: {0}")]
    NotFound(u64),

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog file error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Video ids exhausted after {0}")]
    IdsExhausted(u64),
}

/// On-disk catalog layout
#[derive(Debug, Serialize, Deserialize)]
struct CatalogSnapshot {
    next_id: u64,
    videos: Vec<Video>,
}

/// Accepted catalog file contents: a full snapshot or a bare list of videos
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Snapshot(CatalogSnapshot),
    Videos(Vec<Video>),
}

#[derive(Debug)]
struct CatalogState {
    videos: Vec<Video>,
    next_id: u64,
}

impl CatalogState {
    fn new(videos: Vec<Video>, next_id: u64) -> CatalogResult<Self> {
        let mut seen = HashSet::new();
        for video in &videos {
            if !seen.insert(video.id) {
                warn!("Duplicate video id {} in catalog", video.id);
            }
        }

        let after_max = match videos.iter().map(|v| v.id).max() {
            Some(max_id) => max_id.checked_add(1).ok_or(CatalogError::IdsExhausted(max_id))?,
            None => 1,
        };

        Ok(Self {
            videos,
            next_id: next_id.max(after_max),
        })
    }
}

/// Catalog store shared between request handlers
#[derive(Debug, Clone)]
pub struct CatalogStore {
    /// Snapshot file (None = memory only)
    path: Option<PathBuf>,

    /// Persist after every write
    persist_on_write: bool,

    /// Videos in insertion order (thread-safe)
    state: Arc<RwLock<CatalogState>>,
}

impl CatalogStore {
    /// Create an empty, memory-only catalog
    pub fn in_memory() -> Self {
        Self {
            path: None,
            persist_on_write: false,
            state: Arc::new(RwLock::new(CatalogState {
                videos: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Create a memory-only catalog seeded with videos
    pub fn with_videos(videos: Vec<Video>) -> CatalogResult<Self> {
        Ok(Self {
            path: None,
            persist_on_write: false,
            state: Arc::new(RwLock::new(CatalogState::new(videos, 1)?)),
        })
    }

    /// Open a catalog backed by a JSON file, starting empty if it does not exist
    pub async fn open(path: PathBuf, persist_on_write: bool) -> CatalogResult<Self> {
        let state = if fs::try_exists(&path).await? {
            let content = fs::read_to_string(&path).await?;
            match serde_json::from_str::<CatalogFile>(&content)? {
                CatalogFile::Snapshot(snapshot) => CatalogState::new(snapshot.videos, snapshot.next_id)?,
                CatalogFile::Videos(videos) => CatalogState::new(videos, 1)?,
            }
        } else {
            debug!("Catalog file {} does not exist yet", path.display());
            CatalogState::new(Vec::new(), 1)?
        };

        info!("📚 Catalog opened from {} with {} videos", path.display(), state.videos.len());

        Ok(Self {
            path: Some(path),
            persist_on_write,
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Build the store described by the configuration
    pub async fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        match &config.path {
            Some(path) => Self::open(path.clone(), config.persist_on_write).await,
            None => {
                info!("📚 Using in-memory catalog");
                Ok(Self::in_memory())
            }
        }
    }

    /// Snapshot file path, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Copy of every video, in catalog order
    pub async fn snapshot(&self) -> Vec<Video> {
        self.state.read().await.videos.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.videos.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.videos.is_empty()
    }

    /// Look up a video by id
    pub async fn get(&self, id: u64) -> CatalogResult<Video> {
        self.state
            .read()
            .await
            .videos
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    /// Validate a draft, assign the next id and append it.
    /// Nothing changes in memory when the snapshot write fails.
    pub async fn create(&self, draft: NewVideo) -> CatalogResult<Video> {
        let mut state = self.state.write().await;

        let id = state.next_id;
        let next_id = id.checked_add(1).ok_or(CatalogError::IdsExhausted(id))?;
        let video = draft.into_video(id, Utc::now())?;

        state.videos.push(video.clone());
        state.next_id = next_id;

        if self.persist_on_write {
            if let Err(e) = self.write_snapshot(&state).await {
                state.videos.pop();
                state.next_id = id;
                return Err(e);
            }
        }

        info!("🆕 Added video {}: {}", video.id, video.title);
        Ok(video)
    }

    /// Remove a video. Its id is not handed out again.
    pub async fn delete(&self, id: u64) -> CatalogResult<Video> {
        let mut state = self.state.write().await;

        let index = state
            .videos
            .iter()
            .position(|v| v.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let video = state.videos.remove(index);

        if self.persist_on_write {
            if let Err(e) = self.write_snapshot(&state).await {
                state.videos.insert(index, video);
                return Err(e);
            }
        }

        info!("🗑️ Removed video {}: {}", video.id, video.title);
        Ok(video)
    }

    /// Write the catalog to its snapshot file
    pub async fn save(&self) -> CatalogResult<()> {
        let state = self.state.read().await;
        self.write_snapshot(&state).await
    }

    async fn write_snapshot(&self, state: &CatalogState) -> CatalogResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let snapshot = CatalogSnapshot {
            next_id: state.next_id,
            videos: state.videos.clone(),
        };
        let content = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, content).await?;

        debug!("💾 Saved {} videos to {}", state.videos.len(), path.display());
        Ok(())
    }
}
