use bjj_core::Video;
use bjj_search::{
    filter, rank_related, related_videos, FilterCriteria, RelatedTier, DEFAULT_RELATED_LIMIT,
};

fn search_catalog() -> Vec<Video> {
    vec![
        Video::new(1, "Best Kimura Tutorial")
            .with_source_url("https://www.youtube.com/watch?v=abc123")
            .with_position("Guard")
            .with_tags(&["kimura"])
            .with_times("0:10", "1:10")
            .with_description("Kimura from guard"),
        Video::new(2, "Best Triangle Tutorial")
            .with_source_url("https://www.youtube.com/watch?v=m6V48jZq7vM&t=301s")
            .with_position("Triangle")
            .with_tags(&["jimenez"])
            .with_times("3:10", "3:20")
            .with_description("Triangle from closed guard"),
        Video::new(3, "Kimura Setup from Guard")
            .with_position("Closed Guard")
            .with_tags(&["kimura", "setup"])
            .with_times("0:00", "2:30"),
    ]
}

fn related_scenario() -> (Video, Vec<Video>) {
    let reference = Video::new(1, "Main")
        .with_source_url("https://youtube.com/watch?v=MAIN123")
        .with_position("Guard Pass")
        .with_tags(&["kimura", "armbar"])
        .with_times("0:00", "1:00");

    let candidates = [
        (2, "Guard Pass", vec!["kimura"]),
        (3, "Closed Guard", vec!["kimura"]),
        (4, "Guard Pass", vec!["x"]),
        (5, "Mount", vec!["kimura"]),
        (6, "Side Control", vec!["armbar"]),
        (7, "Guard Pass", vec![]),
        (8, "Guard Pass", vec!["kimura", "armbar"]),
        (9, "Closed Guard", vec!["x"]),
        (10, "Mount", vec!["armbar"]),
    ];

    let mut catalog = vec![reference.clone()];
    catalog.extend(candidates.into_iter().map(|(id, position, tags)| {
        Video::new(id, format!("Clip {id}"))
            .with_position(position)
            .with_tags(&tags)
    }));

    (reference, catalog)
}

fn ids(videos: &[Video]) -> Vec<u64> {
    videos.iter().map(|v| v.id).collect()
}

#[test]
fn test_no_criteria_returns_whole_catalog() {
    let catalog = search_catalog();
    let result = filter(&catalog, &FilterCriteria::new());

    assert_eq!(result, catalog);
}

#[test]
fn test_tag_filter_single_video() {
    let video = Video::new(1, "Combo").with_tags(&["kimura", "armbar"]);

    for (tags, expected) in [
        (vec!["kimura"], true),
        (vec!["bar"], true),
        (vec!["triangle", "ura, arm"], true),
        (vec!["triangle"], false),
        (vec!["KIMURA"], false),
    ] {
        let result = filter(&[video.clone()], &FilterCriteria::new().with_tags(&tags));
        assert_eq!(result.len() == 1, expected, "tags {tags:?}");
    }
}

#[test]
fn test_tag_filter_over_catalog() {
    let result = filter(&search_catalog(), &FilterCriteria::new().with_tags(&["kimura"]));
    assert_eq!(ids(&result), vec![1, 3]);
}

#[test]
fn test_position_filter_is_exact() {
    let result = filter(&search_catalog(), &FilterCriteria::new().with_position("Guard"));

    assert_eq!(ids(&result), vec![1]);
    assert!(result.iter().all(|v| v.position.as_deref() == Some("Guard")));
}

#[test]
fn test_max_duration_filter() {
    let result = filter(&search_catalog(), &FilterCriteria::new().with_max_duration(20));

    assert_eq!(ids(&result), vec![2]);
    assert_eq!(result[0].position.as_deref(), Some("Triangle"));
}

#[test]
fn test_malformed_length_behaves_as_absent() {
    let catalog = search_catalog();
    let criteria = FilterCriteria::from_query_pairs([("maxVideoLength", "abc")]);

    assert_eq!(filter(&catalog, &criteria), catalog);
}

#[test]
fn test_criteria_are_conjunctive() {
    let criteria = FilterCriteria::new()
        .with_tags(&["kimura"])
        .with_position("Closed Guard")
        .with_max_duration(200);

    assert_eq!(ids(&filter(&search_catalog(), &criteria)), vec![3]);

    let too_short = criteria.clone().with_max_duration(100);
    assert!(filter(&search_catalog(), &too_short).is_empty());
}

#[test]
fn test_bad_record_does_not_abort_search() {
    let mut catalog = search_catalog();
    catalog.insert(1, Video::new(9, "Broken").with_times("later", "1:00"));

    let result = filter(&catalog, &FilterCriteria::new().with_max_duration(300));
    assert_eq!(ids(&result), vec![1, 2, 3]);
}

#[test]
fn test_filter_is_idempotent() {
    let catalog = search_catalog();

    for criteria in [
        FilterCriteria::new(),
        FilterCriteria::new().with_tags(&["kimura"]),
        FilterCriteria::new().with_position("Triangle"),
        FilterCriteria::new().with_max_duration(90).with_tags(&["kimura", "jimenez"]),
    ] {
        let once = filter(&catalog, &criteria);
        let twice = filter(&once, &criteria);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_related_returns_limit_and_excludes_reference() {
    let (reference, catalog) = related_scenario();

    let related = related_videos(&catalog, &reference, DEFAULT_RELATED_LIMIT);

    assert_eq!(related.len(), 8);
    assert!(related.iter().all(|v| v.id != reference.id));
}

#[test]
fn test_related_ranking_order() {
    let (reference, catalog) = related_scenario();

    let related = related_videos(&catalog, &reference, DEFAULT_RELATED_LIMIT);

    // both signals, tags only, position only; the one matching neither is dropped
    assert_eq!(ids(&related), vec![8, 2, 3, 5, 6, 10, 4, 7]);
}

#[test]
fn test_related_tiers_are_ordered() {
    let (reference, catalog) = related_scenario();

    let ranked = rank_related(&catalog, &reference);
    let tiers: Vec<RelatedTier> = ranked.iter().map(|r| r.score.tier()).collect();

    assert_eq!(ranked.len(), 9);
    assert!(tiers.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(ranked.last().map(|r| r.video.id), Some(9));

    let position = |id: u64| ranked.iter().position(|r| r.video.id == id).unwrap();
    assert_eq!(ranked[0].score.tier(), RelatedTier::Both);
    assert!(position(2) < position(4), "both beats position only");
    assert!(position(4) < position(9), "position only beats neither");
}

#[test]
fn test_related_small_pool_returns_everything() {
    let (reference, catalog) = related_scenario();
    let small = &catalog[..4];

    let related = related_videos(small, &reference, DEFAULT_RELATED_LIMIT);

    assert_eq!(ids(&related), vec![2, 3, 4]);
}
