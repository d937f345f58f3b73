use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::filter::{filtered_indices, site_indices, FilterCriteria};
use super::model::{LaunchDataset, SiteSelection};

// ---------------------------------------------------------------------------
// Chart specifications
// ---------------------------------------------------------------------------
//
// Plain values describing a chart, produced by the aggregators below and
// consumed by whichever renderer is in front of them. They carry no handles
// into the dataset and are safe to cache, compare, or serialize.

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// A pie chart: title plus slices in deterministic (sorted-key) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSpec {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieSpec {
    /// Sum of all slice values.
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// One scatter marker: `x`/`size`/`hover` all carry the payload mass and `y`
/// the outcome class, mirroring the chart's axis mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// Booster version category; the renderer maps it to a colour.
    pub color_key: String,
    pub hover: f64,
}

/// A scatter chart: axis labels plus one marker per surviving record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSpec {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

// ---------------------------------------------------------------------------
// Pie aggregator
// ---------------------------------------------------------------------------

/// Build the success pie chart for the current site selection.
///
/// * All sites: one slice per site, valued by that site's summed outcome
///   flags (= success count).
/// * Specific site: one slice per outcome class present, valued by the row
///   count for that class, labelled by the class value itself.
///
/// A selection naming no known site yields zero slices; that is rendered as
/// an empty chart, not treated as an error.
pub fn success_pie(dataset: &LaunchDataset, site: &SiteSelection) -> PieSpec {
    match site {
        SiteSelection::All => {
            let mut successes_by_site: BTreeMap<&str, u32> = BTreeMap::new();
            for r in &dataset.records {
                *successes_by_site.entry(r.site.as_str()).or_default() +=
                    u32::from(r.is_success());
            }
            PieSpec {
                title: "Total Successful Launches By Site".to_string(),
                slices: successes_by_site
                    .into_iter()
                    .map(|(site, successes)| PieSlice {
                        label: site.to_string(),
                        value: f64::from(successes),
                    })
                    .collect(),
            }
        }
        SiteSelection::Site(name) => {
            let mut counts_by_class: BTreeMap<u8, u32> = BTreeMap::new();
            for idx in site_indices(dataset, site) {
                *counts_by_class
                    .entry(dataset.records[idx].outcome)
                    .or_default() += 1;
            }
            PieSpec {
                title: format!("Total Successful Launches for {name}"),
                slices: counts_by_class
                    .into_iter()
                    .map(|(class, count)| PieSlice {
                        label: class.to_string(),
                        value: f64::from(count),
                    })
                    .collect(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter aggregator
// ---------------------------------------------------------------------------

/// Build the payload-vs-outcome scatter chart for the current criteria.
///
/// Applies the site restriction, then keeps only records with payload
/// strictly inside the selected range (both bounds exclusive), and emits one
/// marker per survivor.
pub fn payload_scatter(dataset: &LaunchDataset, criteria: &FilterCriteria) -> ScatterSpec {
    let points = filtered_indices(dataset, criteria)
        .into_iter()
        .map(|idx| {
            let r = &dataset.records[idx];
            ScatterPoint {
                x: r.payload_kg,
                y: f64::from(r.outcome),
                size: r.payload_kg,
                color_key: r.booster_category.clone(),
                hover: r.payload_kg,
            }
        })
        .collect();

    ScatterSpec {
        x_label: "Payload Mass (kg)".to_string(),
        y_label: "class".to_string(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn record(site: &str, outcome: u8, payload_kg: f64, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            outcome,
            payload_kg,
            booster_category: booster.to_string(),
        }
    }

    /// Two sites, three launches, one failure.
    fn example_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("A", 1, 500.0, "v1.0"),
            record("A", 0, 1500.0, "v1.1"),
            record("B", 1, 3000.0, "FT"),
        ])
    }

    #[test]
    fn all_sites_pie_sums_successes_per_site() {
        let ds = example_dataset();
        let pie = success_pie(&ds, &SiteSelection::All);
        assert_eq!(pie.title, "Total Successful Launches By Site");
        assert_eq!(
            pie.slices,
            vec![
                PieSlice { label: "A".to_string(), value: 1.0 },
                PieSlice { label: "B".to_string(), value: 1.0 },
            ]
        );
    }

    #[test]
    fn all_sites_total_equals_sum_of_per_site_success_sums() {
        let ds = example_dataset();
        let all = success_pie(&ds, &SiteSelection::All);
        let per_site_total: f64 = ds
            .sites
            .iter()
            .map(|s| {
                ds.records
                    .iter()
                    .filter(|r| r.site == *s)
                    .map(|r| f64::from(r.outcome))
                    .sum::<f64>()
            })
            .sum();
        assert_eq!(all.total(), per_site_total);
    }

    #[test]
    fn single_site_pie_counts_rows_per_class() {
        let ds = example_dataset();
        let pie = success_pie(&ds, &SiteSelection::Site("A".to_string()));
        assert_eq!(pie.title, "Total Successful Launches for A");
        assert_eq!(
            pie.slices,
            vec![
                PieSlice { label: "0".to_string(), value: 1.0 },
                PieSlice { label: "1".to_string(), value: 1.0 },
            ]
        );
        // Slice counts must sum to the site's record count.
        let site_rows = ds.records.iter().filter(|r| r.site == "A").count();
        assert_eq!(pie.total(), site_rows as f64);
    }

    #[test]
    fn unknown_site_yields_empty_pie() {
        let ds = example_dataset();
        let pie = success_pie(&ds, &SiteSelection::Site("NOWHERE".to_string()));
        assert!(pie.slices.is_empty());
        assert_eq!(pie.title, "Total Successful Launches for NOWHERE");
    }

    #[test]
    fn scatter_keeps_site_rows_inside_open_range() {
        let ds = example_dataset();
        let criteria =
            FilterCriteria::new(SiteSelection::Site("A".to_string()), (0.0, 2000.0));
        let scatter = payload_scatter(&ds, &criteria);
        assert_eq!(scatter.points.len(), 2);
        assert_eq!(scatter.points[0].x, 500.0);
        assert_eq!(scatter.points[0].y, 1.0);
        assert_eq!(scatter.points[0].color_key, "v1.0");
        assert_eq!(scatter.points[1].x, 1500.0);
        assert_eq!(scatter.points[1].y, 0.0);
    }

    #[test]
    fn scatter_range_bounds_are_exclusive() {
        let ds = example_dataset();
        // 500 is strictly inside (0, 1000); 1500 is not.
        let criteria =
            FilterCriteria::new(SiteSelection::Site("A".to_string()), (0.0, 1000.0));
        let scatter = payload_scatter(&ds, &criteria);
        assert_eq!(scatter.points.len(), 1);
        assert_eq!(scatter.points[0].x, 500.0);

        // Lower the upper bound onto 500 itself: nothing survives.
        let criteria =
            FilterCriteria::new(SiteSelection::Site("A".to_string()), (0.0, 500.0));
        assert!(payload_scatter(&ds, &criteria).points.is_empty());
    }

    #[test]
    fn scatter_marker_carries_payload_in_x_size_and_hover() {
        let ds = example_dataset();
        let criteria = FilterCriteria::new(SiteSelection::All, (0.0, 10_000.0));
        for p in payload_scatter(&ds, &criteria).points {
            assert_eq!(p.x, p.size);
            assert_eq!(p.x, p.hover);
            assert!(p.y == 0.0 || p.y == 1.0);
        }
    }

    #[test]
    fn default_range_with_all_sites_returns_every_record() {
        let ds = example_dataset();
        // The advertised full domain: the exclusive bounds still keep the
        // extreme records, so everything is returned.
        let criteria = FilterCriteria::new(SiteSelection::All, (0.0, 10_000.0));
        assert_eq!(payload_scatter(&ds, &criteria).points.len(), ds.len());
    }

    #[test]
    fn aggregators_are_idempotent() {
        let ds = example_dataset();
        let site = SiteSelection::Site("B".to_string());
        assert_eq!(success_pie(&ds, &site), success_pie(&ds, &site));

        let criteria = FilterCriteria::new(site, (100.0, 9000.0));
        assert_eq!(
            payload_scatter(&ds, &criteria),
            payload_scatter(&ds, &criteria)
        );
    }
}
