use crate::types::{AcquisitionGroup, GranuleRecord};
use std::collections::BTreeMap;

/// Partition granules into acquisition groups keyed by
/// (platform, absolute orbit).
///
/// Granules from one pass share a platform and orbit number even when
/// the pass is delivered as several scenes. Each group's date is the
/// earliest acquisition start among its members. An empty input yields
/// an empty group list.
pub fn group_granules(granules: Vec<GranuleRecord>) -> Vec<AcquisitionGroup> {
    let mut groups: BTreeMap<(String, u32), Vec<GranuleRecord>> = BTreeMap::new();

    for granule in granules {
        let key = (granule.platform.clone(), granule.orbit);
        groups.entry(key).or_default().push(granule);
    }

    groups
        .into_values()
        .filter_map(|members| {
            let date = members
                .iter()
                .map(|granule| granule.start_time.date_naive())
                .min()?;

            Some(AcquisitionGroup {
                date,
                granules: members,
            })
        })
        .collect()
}

/// Group granules and order the groups into a date-ascending stack.
///
/// The sort is stable, so groups sharing a date keep the deterministic
/// (platform, orbit) order the grouping produced.
pub fn build_stack(granules: Vec<GranuleRecord>) -> Vec<AcquisitionGroup> {
    let mut stack = group_granules(granules);
    stack.sort_by_key(|group| group.date);
    stack
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn granule(platform: &str, orbit: u32, start_time: &str) -> GranuleRecord {
        GranuleRecord {
            platform: platform.to_string(),
            orbit,
            start_time: DateTime::parse_from_rfc3339(start_time)
                .unwrap()
                .with_timezone(&Utc),
            scene_name: format!("{}_IW_SLC__1SDV_{}_{}", platform, orbit, start_time),
        }
    }

    #[test]
    fn test_group_empty_input() {
        let groups = group_granules(Vec::new());

        assert!(groups.is_empty());
    }

    #[test]
    fn test_group_single_pass() {
        let granules = vec![
            granule("Sentinel-1A", 59371, "2025-05-27T21:29:10Z"),
            granule("Sentinel-1A", 59371, "2025-05-27T21:29:37Z"),
            granule("Sentinel-1A", 59371, "2025-05-27T21:30:04Z"),
        ];

        let groups = group_granules(granules);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].granules.len(), 3);
        assert_eq!(
            groups[0].date,
            chrono::NaiveDate::from_ymd_opt(2025, 5, 27).unwrap()
        );
    }

    #[test]
    fn test_group_splits_on_platform_and_orbit() {
        let granules = vec![
            granule("Sentinel-1A", 59371, "2025-05-27T21:29:10Z"),
            granule("Sentinel-1A", 59546, "2025-06-08T21:29:09Z"),
            granule("Sentinel-1B", 59371, "2025-05-27T21:29:12Z"),
        ];

        let groups = group_granules(granules);

        assert_eq!(groups.len(), 3);
        for group in &groups {
            assert_eq!(group.granules.len(), 1);
        }
    }

    #[test]
    fn test_group_date_is_minimum_start() {
        // A pass straddling midnight UTC takes the earlier calendar date
        let granules = vec![
            granule("Sentinel-1A", 59371, "2025-05-28T00:00:15Z"),
            granule("Sentinel-1A", 59371, "2025-05-27T23:59:48Z"),
        ];

        let groups = group_granules(granules);

        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].date,
            chrono::NaiveDate::from_ymd_opt(2025, 5, 27).unwrap()
        );
    }

    #[test]
    fn test_each_granule_lands_in_exactly_one_group() {
        let granules = vec![
            granule("Sentinel-1A", 59371, "2025-05-27T21:29:10Z"),
            granule("Sentinel-1A", 59371, "2025-05-27T21:29:37Z"),
            granule("Sentinel-1B", 48220, "2025-05-21T21:28:44Z"),
        ];

        let total: usize = group_granules(granules.clone())
            .iter()
            .map(|group| group.granules.len())
            .sum();

        assert_eq!(total, granules.len());
    }

    #[test]
    fn test_build_stack_sorted_by_date() {
        let granules = vec![
            granule("Sentinel-1A", 59546, "2025-06-08T21:29:09Z"),
            granule("Sentinel-1A", 59371, "2025-05-27T21:29:10Z"),
            granule("Sentinel-1B", 48220, "2025-05-21T21:28:44Z"),
            granule("Sentinel-1A", 59196, "2025-05-15T21:29:11Z"),
        ];

        let stack = build_stack(granules);

        assert_eq!(stack.len(), 4);
        for pair in stack.windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }
    }
}
