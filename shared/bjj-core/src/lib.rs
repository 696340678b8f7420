//! BJJ Core - Shared data structures for the technique clip catalog

pub mod tags;
pub mod timestamp;
pub mod video;

pub use tags::{join_tags, tokenize_tags};
pub use timestamp::{duration_seconds, format_timestamp, parse_timestamp};
pub use video::{NewVideo, Video};

/// Result type for BJJ Core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Error types for BJJ Core operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid timestamp (expected MM:SS): {0:?}")]
    InvalidTimestamp(String),

    #[error("Title is required")]
    MissingTitle,
}
