//! API request handlers
//!
//! Each handler reads a snapshot from the store and hands it to the search
//! engine; no lock is held while filtering or ranking.

use bjj_core::{NewVideo, Video};
use bjj_search::{filter, related_videos, FilterCriteria};
use tracing::{debug, info};

use super::models::HealthResponse;
use crate::catalog::{CatalogError, CatalogResult, CatalogStore};

/// Handle health check requests
pub fn health_check() -> HealthResponse {
    HealthResponse {
        status: "healthy".to_string(),
        service: "bjj-study".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

/// Handle video listing requests
pub async fn list_videos(store: &CatalogStore) -> Vec<Video> {
    store.snapshot().await
}

/// Handle single video requests
pub async fn get_video(store: &CatalogStore, id: u64) -> CatalogResult<Video> {
    store.get(id).await
}

/// Handle video creation requests
pub async fn create_video(store: &CatalogStore, draft: NewVideo) -> CatalogResult<Video> {
    store.create(draft).await
}

/// Handle video deletion requests
pub async fn delete_video(store: &CatalogStore, id: u64) -> CatalogResult<Video> {
    store.delete(id).await
}

/// Handle search requests from raw query pairs.
///
/// Never fails: malformed parameters are dropped while building the criteria.
pub async fn search_videos(store: &CatalogStore, query: &[(String, String)]) -> Vec<Video> {
    let criteria = FilterCriteria::from_query_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    let catalog = store.snapshot().await;

    let videos = filter(&catalog, &criteria);
    info!("🔎 Search returned {}/{} videos", videos.len(), catalog.len());
    videos
}

/// Handle related video requests
pub async fn get_related_videos(store: &CatalogStore, id: u64, limit: usize) -> CatalogResult<Vec<Video>> {
    let catalog = store.snapshot().await;
    let reference = catalog
        .iter()
        .find(|v| v.id == id)
        .cloned()
        .ok_or(CatalogError::NotFound(id))?;

    let related = related_videos(&catalog, &reference, limit);
    debug!("Related videos for {}: {:?}", id, related.iter().map(|v| v.id).collect::<Vec<_>>());
    Ok(related)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CatalogStore {
        CatalogStore::with_videos(vec![
            Video::new(1, "Best Kimura Tutorial")
                .with_position("Guard")
                .with_tags(&["kimura"])
                .with_times("0:10", "1:10"),
            Video::new(2, "Best Triangle Tutorial")
                .with_position("Triangle")
                .with_tags(&["jimenez"])
                .with_times("3:10", "3:20"),
        ])
        .unwrap()
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[tokio::test]
    async fn test_search_without_query() {
        let videos = search_videos(&store(), &[]).await;
        assert_eq!(videos.len(), 2);
        assert!(videos[0].tags.contains("kimura"));
    }

    #[tokio::test]
    async fn test_search_by_length() {
        let videos = search_videos(&store(), &pairs(&[("maxVideoLength", "20")])).await;
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].position.as_deref(), Some("Triangle"));
    }

    #[tokio::test]
    async fn test_search_with_malformed_length() {
        let videos = search_videos(&store(), &pairs(&[("maxVideoLength", "abc")])).await;
        assert_eq!(videos.len(), 2);
    }

    #[tokio::test]
    async fn test_related_unknown_reference() {
        let result = get_related_videos(&store(), 999, 8).await;
        assert!(matches!(result, Err(CatalogError::NotFound(999))));
    }

    #[tokio::test]
    async fn test_related_excludes_reference() {
        let related = get_related_videos(&store(), 1, 8).await.unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, 2);
    }

    #[test]
    fn test_health_check() {
        let health = health_check();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.service, "bjj-study");
    }
}
