//! Catalog filtering

use bjj_core::Video;
use tracing::debug;

use crate::criteria::FilterCriteria;

impl FilterCriteria {
    /// Check one video against every constraint
    pub fn matches(&self, video: &Video) -> bool {
        self.matches_tags(video) && self.matches_position(video) && self.matches_duration(video)
    }

    /// Any requested tag appears somewhere in the stored tag string.
    ///
    /// This is a case-sensitive substring test, so "kimura" matches
    /// "kimura, armbar" and "arm" matches "armbar".
    pub fn matches_tags(&self, video: &Video) -> bool {
        self.tags().is_empty() || self.tags().iter().any(|tag| video.tags.contains(tag.as_str()))
    }

    /// Exact, case-sensitive position equality
    pub fn matches_position(&self, video: &Video) -> bool {
        match self.position() {
            Some(position) => video.position.as_deref() == Some(position),
            None => true,
        }
    }

    /// Clip length within the bound. Unparseable timestamps fail the bound.
    pub fn matches_duration(&self, video: &Video) -> bool {
        let Some(max) = self.max_duration_seconds() else {
            return true;
        };

        match video.duration_seconds() {
            Ok(duration) => duration <= max,
            Err(e) => {
                debug!("Excluding video {} from duration search: {}", video.id, e);
                false
            }
        }
    }
}

/// Filter a catalog, keeping catalog order
pub fn filter(catalog: &[Video], criteria: &FilterCriteria) -> Vec<Video> {
    if criteria.is_empty() {
        return catalog.to_vec();
    }

    filter_refs(catalog, criteria).into_iter().cloned().collect()
}

/// Borrowing variant of [`filter`]
pub fn filter_refs<'a>(catalog: &'a [Video], criteria: &FilterCriteria) -> Vec<&'a Video> {
    let matched: Vec<&Video> = catalog.iter().filter(|v| criteria.matches(v)).collect();

    debug!(
        "Filter kept {}/{} videos (tags: {:?}, position: {:?}, max duration: {:?})",
        matched.len(),
        catalog.len(),
        criteria.tags(),
        criteria.position(),
        criteria.max_duration_seconds()
    );

    matched
}
