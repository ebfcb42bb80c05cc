use asf_enumeration::{build_stack, group_granules, GranuleRecord};
use chrono::{DateTime, Utc};

fn granule(platform: &str, orbit: u32, start_time: &str, scene_name: &str) -> GranuleRecord {
    GranuleRecord {
        platform: platform.to_string(),
        orbit,
        start_time: DateTime::parse_from_rfc3339(start_time)
            .unwrap()
            .with_timezone(&Utc),
        scene_name: scene_name.to_string(),
    }
}

/// Three repeat passes over one frame, two of them split into two
/// scenes, the way the search service actually delivers a frame
/// footprint straddling a scene boundary.
fn repeat_pass_granules() -> Vec<GranuleRecord> {
    vec![
        granule(
            "Sentinel-1A",
            59371,
            "2025-05-27T21:29:10Z",
            "S1A_IW_SLC__1SDV_20250527T212910_20250527T212937_059371_075E3A_1A2B",
        ),
        granule(
            "Sentinel-1A",
            59371,
            "2025-05-27T21:29:37Z",
            "S1A_IW_SLC__1SDV_20250527T212937_20250527T213004_059371_075E3A_3C4D",
        ),
        granule(
            "Sentinel-1A",
            59196,
            "2025-05-15T21:29:11Z",
            "S1A_IW_SLC__1SDV_20250515T212911_20250515T212938_059196_075711_5E6F",
        ),
        granule(
            "Sentinel-1B",
            48220,
            "2025-05-21T21:28:44Z",
            "S1B_IW_SLC__1SDV_20250521T212844_20250521T212911_048220_05CE01_7A8B",
        ),
        granule(
            "Sentinel-1B",
            48220,
            "2025-05-21T21:29:11Z",
            "S1B_IW_SLC__1SDV_20250521T212911_20250521T212938_048220_05CE01_9C0D",
        ),
    ]
}

#[test]
fn test_grouping_by_platform_and_orbit() {
    let groups = group_granules(repeat_pass_granules());

    assert_eq!(groups.len(), 3);

    let total: usize = groups.iter().map(|group| group.granules.len()).sum();
    assert_eq!(total, 5);

    for group in &groups {
        let first = &group.granules[0];
        assert!(group
            .granules
            .iter()
            .all(|g| g.platform == first.platform && g.orbit == first.orbit));
    }
}

#[test]
fn test_group_date_is_earliest_member_date() {
    let groups = group_granules(repeat_pass_granules());

    for group in &groups {
        let earliest = group
            .granules
            .iter()
            .map(|g| g.start_time.date_naive())
            .min()
            .unwrap();

        assert_eq!(group.date, earliest);
    }
}

#[test]
fn test_stack_is_sorted_ascending() {
    let stack = build_stack(repeat_pass_granules());

    assert_eq!(stack.len(), 3);
    for pair in stack.windows(2) {
        assert!(pair[0].date <= pair[1].date);
    }

    assert_eq!(stack[0].date.to_string(), "2025-05-15");
    assert_eq!(stack[2].date.to_string(), "2025-05-27");
}

#[test]
fn test_empty_search_result_yields_empty_stack() {
    assert!(group_granules(Vec::new()).is_empty());
    assert!(build_stack(Vec::new()).is_empty());
}
