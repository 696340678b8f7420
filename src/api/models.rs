//! API data models

use bjj_core::NewVideo;
use serde::{Deserialize, Serialize};

/// Error body returned with every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Health check payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

/// Tags as clients send them: one string or a list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    One(String),
    Many(Vec<String>),
}

impl TagsInput {
    pub fn into_list(self) -> Vec<String> {
        match self {
            TagsInput::One(tag) => vec![tag],
            TagsInput::Many(tags) => tags,
        }
    }
}

/// Body of `POST /api/videos`.
///
/// Both the snake_case column names and the camelCase record names are
/// accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateVideoRequest {
    pub title: Option<String>,

    #[serde(alias = "youtube_url", alias = "sourceUrl")]
    pub source_url: Option<String>,

    pub position: Option<String>,

    pub tags: Option<TagsInput>,

    #[serde(alias = "startTime")]
    pub start_time: Option<String>,

    #[serde(alias = "endTime")]
    pub end_time: Option<String>,

    pub description: Option<String>,
}

impl From<CreateVideoRequest> for NewVideo {
    fn from(request: CreateVideoRequest) -> Self {
        NewVideo {
            title: request.title.unwrap_or_default(),
            source_url: request.source_url,
            position: request.position,
            tags: request.tags.map(TagsInput::into_list).unwrap_or_default(),
            start_time: request.start_time,
            end_time: request.end_time,
            description: request.description,
        }
    }
}

/// Query of `GET /api/videos/:id/related`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RelatedQuery {
    /// Lenient: anything that is not a positive integer falls back to the default
    pub limit: Option<String>,
}

impl RelatedQuery {
    pub fn limit_or(&self, default: usize) -> usize {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(default)
    }
}
