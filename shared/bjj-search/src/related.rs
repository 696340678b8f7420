//! Related-clip ranking
//!
//! Candidates are grouped into tiers by which of the two similarity signals
//! they hit: the same position as the reference, and at least one tag token
//! in common. Both signals rank first, then tag overlap alone, then position
//! alone, then neither. Within a tier more shared tags rank first, then
//! catalog order. The limit is a hard cap, so clips that share nothing still
//! fill the remaining slots.

use std::collections::HashSet;

use bjj_core::Video;
use serde::Serialize;

/// Number of related clips returned when the caller does not say otherwise
pub const DEFAULT_RELATED_LIMIT: usize = 8;

/// Which similarity signals a candidate hits, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedTier {
    Neither,
    PositionOnly,
    TagsOnly,
    Both,
}

impl std::fmt::Display for RelatedTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RelatedTier::Neither => "neither",
            RelatedTier::PositionOnly => "position",
            RelatedTier::TagsOnly => "tags",
            RelatedTier::Both => "position+tags",
        };
        f.write_str(label)
    }
}

/// Similarity of one candidate to the reference video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelatedScore {
    /// Both positions are present and equal
    pub position_match: bool,

    /// Size of the tag token intersection
    pub shared_tags: usize,
}

impl RelatedScore {
    /// Tag overlap alone outranks a bare position match
    pub fn tier(&self) -> RelatedTier {
        match (self.position_match, self.shared_tags > 0) {
            (true, true) => RelatedTier::Both,
            (false, true) => RelatedTier::TagsOnly,
            (true, false) => RelatedTier::PositionOnly,
            (false, false) => RelatedTier::Neither,
        }
    }

    fn rank_key(&self) -> (RelatedTier, usize) {
        (self.tier(), self.shared_tags)
    }
}

/// A candidate with its score
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankedVideo<'a> {
    pub video: &'a Video,
    pub score: RelatedScore,
}

/// Score a single candidate against the reference
pub fn score_candidate(reference: &Video, candidate: &Video) -> RelatedScore {
    let reference_tags: HashSet<&str> = reference.tag_tokens().into_iter().collect();
    score_against(&reference_tags, reference.position.as_deref(), candidate)
}

/// Rank every video except the reference, best first
pub fn rank_related<'a>(catalog: &'a [Video], reference: &Video) -> Vec<RankedVideo<'a>> {
    let reference_tags: HashSet<&str> = reference.tag_tokens().into_iter().collect();
    let reference_position = reference.position.as_deref();

    let mut ranked: Vec<RankedVideo<'a>> = catalog
        .iter()
        .filter(|candidate| candidate.id != reference.id)
        .map(|candidate| RankedVideo {
            video: candidate,
            score: score_against(&reference_tags, reference_position, candidate),
        })
        .collect();

    // sort_by is stable: equal keys keep catalog order
    ranked.sort_by(|a, b| b.score.rank_key().cmp(&a.score.rank_key()));
    ranked
}

/// Up to `limit` videos most similar to `reference`, never including it
pub fn related_videos(catalog: &[Video], reference: &Video, limit: usize) -> Vec<Video> {
    rank_related(catalog, reference)
        .into_iter()
        .take(limit)
        .map(|ranked| ranked.video.clone())
        .collect()
}

fn score_against(reference_tags: &HashSet<&str>, reference_position: Option<&str>, candidate: &Video) -> RelatedScore {
    let position_match = match (reference_position, candidate.position.as_deref()) {
        (Some(reference), Some(position)) => reference == position,
        _ => false,
    };

    let shared_tags = candidate
        .tag_tokens()
        .into_iter()
        .filter(|token| reference_tags.contains(token))
        .count();

    RelatedScore {
        position_match,
        shared_tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        let both = RelatedScore { position_match: true, shared_tags: 1 };
        let position_only = RelatedScore { position_match: true, shared_tags: 0 };
        let tags_only = RelatedScore { position_match: false, shared_tags: 3 };
        let neither = RelatedScore { position_match: false, shared_tags: 0 };

        assert_eq!(both.tier(), RelatedTier::Both);
        assert_eq!(position_only.tier(), RelatedTier::PositionOnly);
        assert_eq!(tags_only.tier(), RelatedTier::TagsOnly);
        assert_eq!(neither.tier(), RelatedTier::Neither);
        assert!(both.tier() > tags_only.tier());
        assert!(tags_only.tier() > position_only.tier());
        assert!(position_only.tier() > neither.tier());
    }

    #[test]
    fn test_tag_overlap_outranks_position_only() {
        let reference = Video::new(1, "Ref").with_position("Mount").with_tags(&["armbar"]);
        let catalog = vec![
            Video::new(2, "Same position").with_position("Mount"),
            Video::new(3, "Same tag").with_position("Guard").with_tags(&["armbar"]),
        ];

        let ids: Vec<u64> = related_videos(&catalog, &reference, 8).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_tokens_not_substrings() {
        let reference = Video::new(1, "Ref").with_tags(&["armbar"]);
        let candidate = Video::new(2, "Cand").with_tags(&["arm", "armbar from mount"]);

        assert_eq!(score_candidate(&reference, &candidate).shared_tags, 0);
    }

    #[test]
    fn test_missing_positions_never_match() {
        let reference = Video::new(1, "Ref");
        let candidate = Video::new(2, "Cand");

        assert!(!score_candidate(&reference, &candidate).position_match);
    }

    #[test]
    fn test_reference_excluded_by_id() {
        let reference = Video::new(1, "Ref").with_position("Mount");
        let catalog = vec![reference.clone(), Video::new(2, "Other").with_position("Mount")];

        let related = related_videos(&catalog, &reference, DEFAULT_RELATED_LIMIT);

        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, 2);
    }

    #[test]
    fn test_more_shared_tags_rank_higher_within_tier() {
        let reference = Video::new(1, "Ref").with_tags(&["kimura", "armbar", "omoplata"]);
        let catalog = vec![
            Video::new(2, "One").with_tags(&["kimura"]),
            Video::new(3, "Two").with_tags(&["kimura", "armbar"]),
        ];

        let ids: Vec<u64> = related_videos(&catalog, &reference, 8).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_zero_limit() {
        let reference = Video::new(1, "Ref");
        let catalog = vec![Video::new(2, "Other")];
        assert!(related_videos(&catalog, &reference, 0).is_empty());
    }
}
