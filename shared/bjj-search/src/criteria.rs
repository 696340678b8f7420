//! Search criteria and query-string normalization

use serde::Serialize;

/// Query keys accepted by [`FilterCriteria::from_query_pairs`]
pub const TAGS_KEY: &str = "tags";
pub const POSITION_KEY: &str = "position";
pub const MAX_LENGTH_KEY: &str = "maxVideoLength";

/// Optional search constraints, combined with logical AND.
///
/// An absent constraint always passes. Only non-empty tags and positive
/// duration bounds are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    tags: Vec<String>,
    position: Option<String>,
    max_duration_seconds: Option<i64>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require any of these tags (substring match). Empty strings are dropped.
    pub fn with_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        for tag in tags {
            self.push_tag(tag.as_ref());
        }
        self
    }

    /// Require an exact position
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        let position = position.into();
        self.position = if position.is_empty() { None } else { Some(position) };
        self
    }

    /// Bound clip length in seconds. Non-positive bounds are ignored.
    pub fn with_max_duration(mut self, seconds: i64) -> Self {
        self.max_duration_seconds = if seconds > 0 { Some(seconds) } else { None };
        self
    }

    /// Build criteria from raw query-string pairs.
    ///
    /// `tags` (or `tags[]`) may repeat; every non-empty value is kept in
    /// order. The first non-empty `position` wins, as does the first
    /// `maxVideoLength` that parses to a positive number. Unknown keys are
    /// ignored and nothing here can fail.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut criteria = Self::new();

        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                TAGS_KEY | "tags[]" => criteria.push_tag(value),
                POSITION_KEY if criteria.position.is_none() && !value.is_empty() => {
                    criteria.position = Some(value.to_string());
                }
                MAX_LENGTH_KEY if criteria.max_duration_seconds.is_none() => {
                    criteria.max_duration_seconds = parse_max_duration(value);
                }
                _ => {}
            }
        }

        criteria
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    pub fn max_duration_seconds(&self) -> Option<i64> {
        self.max_duration_seconds
    }

    /// True when no constraint is set
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.position.is_none() && self.max_duration_seconds.is_none()
    }

    fn push_tag(&mut self, tag: &str) {
        if !tag.is_empty() {
            self.tags.push(tag.to_string());
        }
    }
}

/// Read a duration bound the way a lenient query-string parser would.
///
/// Leading whitespace and an optional sign are accepted, then the leading run
/// of digits is used and anything after it is ignored (`"20s"` is 20,
/// `"12.5"` is 12). No digits, a non-positive value, or overflow all give
/// `None`.
pub fn parse_max_duration(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let value: i64 = unsigned[..end].parse().ok()?;

    if negative || value == 0 {
        None
    } else {
        Some(value)
    }
}
