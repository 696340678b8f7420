//! BJJ Search - Clip filtering and related-clip ranking
//!
//! Both engines are pure functions over a catalog snapshot supplied by the
//! caller. They never touch storage and never mutate a `Video`.
//!
//! The two engines read the tag field differently: filtering matches query
//! tags as substrings of the stored tag string, while ranking compares exact
//! tag tokens.

pub mod criteria;
pub mod filter;
pub mod related;

pub use criteria::{parse_max_duration, FilterCriteria};
pub use filter::{filter, filter_refs};
pub use related::{rank_related, related_videos, score_candidate, RankedVideo, RelatedScore, RelatedTier, DEFAULT_RELATED_LIMIT};
