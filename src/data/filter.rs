use super::model::{LaunchDataset, SiteSelection};

// ---------------------------------------------------------------------------
// Filter criteria: the current dropdown + slider state
// ---------------------------------------------------------------------------

/// Transient per-interaction filter state, rebuilt from the UI controls on
/// every input change. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub site: SiteSelection,
    /// Payload range in kg, `(lo, hi)` with `lo <= hi` by slider construction.
    pub payload_range: (f64, f64),
}

impl FilterCriteria {
    pub fn new(site: SiteSelection, payload_range: (f64, f64)) -> Self {
        FilterCriteria {
            site,
            payload_range,
        }
    }
}

// ---------------------------------------------------------------------------
// Row filtering
// ---------------------------------------------------------------------------

/// Indices of records matching only the site restriction (pie-chart path).
pub fn site_indices(dataset: &LaunchDataset, site: &SiteSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| site.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of records matching the site restriction AND the payload range.
///
/// The range comparison is strictly exclusive on both ends: a record whose
/// payload equals either bound is dropped. Preserved historical behaviour;
/// do not relax to inclusive.
pub fn filtered_indices(dataset: &LaunchDataset, criteria: &FilterCriteria) -> Vec<usize> {
    let (lo, hi) = criteria.payload_range;
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            criteria.site.matches(r) && r.payload_kg > lo && r.payload_kg < hi
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchDataset, LaunchRecord};

    fn dataset() -> LaunchDataset {
        let rows = [
            ("A", 1, 500.0),
            ("A", 0, 1500.0),
            ("B", 1, 3000.0),
        ];
        LaunchDataset::from_records(
            rows.iter()
                .map(|&(site, outcome, payload_kg)| LaunchRecord {
                    site: site.to_string(),
                    outcome,
                    payload_kg,
                    booster_category: "FT".to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn all_sites_with_full_range_keeps_every_record() {
        let ds = dataset();
        let criteria = FilterCriteria::new(SiteSelection::All, (0.0, 10_000.0));
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 1, 2]);
    }

    #[test]
    fn site_restriction_keeps_only_matching_rows() {
        let ds = dataset();
        assert_eq!(site_indices(&ds, &SiteSelection::Site("A".into())), vec![0, 1]);
        assert_eq!(site_indices(&ds, &SiteSelection::Site("B".into())), vec![2]);
        assert_eq!(site_indices(&ds, &SiteSelection::All), vec![0, 1, 2]);
    }

    #[test]
    fn payload_bounds_are_strictly_exclusive() {
        let ds = dataset();
        // 500 sits exactly on the upper bound and must be excluded.
        let criteria = FilterCriteria::new(SiteSelection::Site("A".into()), (0.0, 500.0));
        assert!(filtered_indices(&ds, &criteria).is_empty());

        // 500 on the lower bound is excluded too; 1500 survives.
        let criteria = FilterCriteria::new(SiteSelection::Site("A".into()), (500.0, 2000.0));
        assert_eq!(filtered_indices(&ds, &criteria), vec![1]);
    }

    #[test]
    fn unknown_site_matches_nothing() {
        let ds = dataset();
        let criteria =
            FilterCriteria::new(SiteSelection::Site("NOWHERE".into()), (0.0, 10_000.0));
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn every_surviving_payload_is_inside_the_open_interval() {
        let ds = dataset();
        let (lo, hi) = (400.0, 3000.0);
        let criteria = FilterCriteria::new(SiteSelection::All, (lo, hi));
        for idx in filtered_indices(&ds, &criteria) {
            let p = ds.records[idx].payload_kg;
            assert!(p > lo && p < hi);
        }
    }
}
