//! Catalog video records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::tags::{join_tags, tokenize_tags};
use crate::timestamp::{duration_seconds, parse_timestamp};
use crate::{CoreError, Result};

/// Timestamp given to clips created without explicit in/out points
pub const DEFAULT_TIMESTAMP: &str = "0:00";

/// A technique clip in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Stable identifier, assigned by the store and never reused
    pub id: u64,

    pub title: String,

    /// External link to the footage
    #[serde(default, alias = "youtube_url", deserialize_with = "empty_as_none")]
    pub source_url: Option<String>,

    /// Body position label ("Closed Guard", "Guard Pass", ...)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub position: Option<String>,

    /// Stored tag string, `", "`-joined
    #[serde(default, deserialize_with = "tags_from_string_or_list")]
    pub tags: String,

    #[serde(default = "default_timestamp", alias = "start_time")]
    pub start_time: String,

    #[serde(default = "default_timestamp", alias = "end_time")]
    pub end_time: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,

    #[serde(default = "Utc::now", alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl Video {
    /// Create a bare video with default timestamps and no tags
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            source_url: None,
            position: None,
            tags: String::new(),
            start_time: default_timestamp(),
            end_time: default_timestamp(),
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = non_empty(position.into());
        self
    }

    pub fn with_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.tags = join_tags(tags);
        self
    }

    pub fn with_times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = start.into();
        self.end_time = end.into();
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = non_empty(url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into());
        self
    }

    /// Individual tag tokens in insertion order
    pub fn tag_tokens(&self) -> Vec<&str> {
        tokenize_tags(&self.tags)
    }

    /// Signed clip length in seconds
    pub fn duration_seconds(&self) -> Result<i64> {
        duration_seconds(&self.start_time, &self.end_time)
    }
}

/// Draft of a video that has not been assigned an id yet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewVideo {
    pub title: String,
    pub source_url: Option<String>,
    pub position: Option<String>,
    pub tags: Vec<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub description: Option<String>,
}

impl NewVideo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.tags = tags.iter().map(|t| t.as_ref().to_string()).collect();
        self
    }

    pub fn with_times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = Some(start.into());
        self.end_time = Some(end.into());
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the draft can become a catalog record.
    ///
    /// The title must not be blank and any timestamp that was supplied must
    /// parse as `MM:SS`. Ordering of start and end is not checked.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::MissingTitle);
        }

        for time in [&self.start_time, &self.end_time].into_iter().flatten() {
            if !time.is_empty() {
                parse_timestamp(time)?;
            }
        }

        Ok(())
    }

    /// Validate and turn the draft into a record with the given id
    pub fn into_video(self, id: u64, created_at: DateTime<Utc>) -> Result<Video> {
        self.validate()?;

        Ok(Video {
            id,
            title: self.title.trim().to_string(),
            source_url: self.source_url.and_then(non_empty),
            position: self.position.and_then(non_empty),
            tags: join_tags(&self.tags),
            start_time: self.start_time.and_then(non_empty).unwrap_or_else(default_timestamp),
            end_time: self.end_time.and_then(non_empty).unwrap_or_else(default_timestamp),
            description: self.description.and_then(non_empty),
            created_at,
        })
    }
}

fn default_timestamp() -> String {
    DEFAULT_TIMESTAMP.to_string()
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(non_empty))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTags {
    Text(String),
    List(Vec<String>),
}

fn tags_from_string_or_list<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StoredTags>::deserialize(deserializer)? {
        Some(StoredTags::Text(text)) => text,
        Some(StoredTags::List(list)) => join_tags(&list),
        None => String::new(),
    })
}
