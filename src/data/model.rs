use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// UI-control contract constants
// ---------------------------------------------------------------------------

/// Sentinel dropdown value meaning "no site restriction".
pub const ALL_SITES: &str = "ALL";

/// Advertised payload-slider domain in kilograms, regardless of the data.
pub const PAYLOAD_DOMAIN_KG: (f64, f64) = (0.0, 10_000.0);

/// Fixed payload-slider step in kilograms.
pub const PAYLOAD_STEP_KG: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single historical launch (one row of the source table).
///
/// `outcome` is a binary flag: 1 = success, 0 = failure. Summing it over a
/// group of records therefore yields the group's success count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    /// Launch site name, e.g. "CCAFS LC-40".
    pub site: String,
    /// Binary outcome class: 0 = failure, 1 = success.
    pub outcome: u8,
    /// Payload mass in kilograms.
    pub payload_kg: f64,
    /// Booster version category, e.g. "FT" or "v1.1".
    pub booster_category: String,
}

impl LaunchRecord {
    pub fn is_success(&self) -> bool {
        self.outcome == 1
    }
}

// ---------------------------------------------------------------------------
// SiteSelection – parsed dropdown value
// ---------------------------------------------------------------------------

/// The site dropdown's current value: the all-sites sentinel or a named site.
///
/// A `Site` holding a name not present in the dataset matches nothing; the
/// aggregators render that as an empty chart rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSelection {
    All,
    Site(String),
}

impl SiteSelection {
    /// Parse a raw dropdown value ([`ALL_SITES`] or a site name).
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// The raw dropdown value this selection corresponds to.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(name) => name,
        }
    }

    /// Whether the given record passes this site restriction.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(name) => record.site == *name,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(name) => write!(f, "{name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteOption – (label, value) pair for the dropdown
// ---------------------------------------------------------------------------

/// One entry of the site dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table plus startup summaries
// ---------------------------------------------------------------------------

/// The full parsed table with summary values computed once at load time.
///
/// Read-only for the process lifetime; the aggregators borrow it and never
/// mutate it.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launch records (rows).
    pub records: Vec<LaunchRecord>,
    /// Sorted distinct launch-site names.
    pub sites: Vec<String>,
    /// Smallest observed payload mass (kg).
    pub payload_min: f64,
    /// Largest observed payload mass (kg).
    pub payload_max: f64,
}

impl LaunchDataset {
    /// Build the dataset and its summaries from loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites: Vec<String> = records
            .iter()
            .map(|r| r.site.clone())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        let mut payload_min = f64::INFINITY;
        let mut payload_max = f64::NEG_INFINITY;
        for r in &records {
            payload_min = payload_min.min(r.payload_kg);
            payload_max = payload_max.max(r.payload_kg);
        }
        // No records: fall back to the advertised domain so the sliders
        // still have a sane initial value.
        if records.is_empty() {
            payload_min = PAYLOAD_DOMAIN_KG.0;
            payload_max = PAYLOAD_DOMAIN_KG.1;
        }

        LaunchDataset {
            records,
            sites,
            payload_min,
            payload_max,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Dropdown option list: "All Sites" first, then one option per site.
    pub fn site_options(&self) -> Vec<SiteOption> {
        let mut options = vec![SiteOption {
            label: "All Sites".to_string(),
            value: ALL_SITES.to_string(),
        }];
        options.extend(self.sites.iter().map(|s| SiteOption {
            label: s.clone(),
            value: s.clone(),
        }));
        options
    }

    /// Initial slider range: the observed payload extremes.
    pub fn default_payload_range(&self) -> (f64, f64) {
        (self.payload_min, self.payload_max)
    }

    /// Sorted distinct booster version categories (for the colour map).
    pub fn booster_categories(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.booster_category.clone())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: &str, outcome: u8, payload_kg: f64) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            outcome,
            payload_kg,
            booster_category: "FT".to_string(),
        }
    }

    #[test]
    fn summaries_from_records() {
        let ds = LaunchDataset::from_records(vec![
            record("B", 1, 3000.0),
            record("A", 0, 1500.0),
            record("A", 1, 500.0),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(ds.payload_min, 500.0);
        assert_eq!(ds.payload_max, 3000.0);
        assert_eq!(ds.default_payload_range(), (500.0, 3000.0));
    }

    #[test]
    fn site_options_start_with_all_sites_sentinel() {
        let ds = LaunchDataset::from_records(vec![
            record("KSC LC-39A", 1, 4000.0),
            record("CCAFS LC-40", 0, 2000.0),
        ]);
        let options = ds.site_options();
        assert_eq!(options[0].label, "All Sites");
        assert_eq!(options[0].value, ALL_SITES);
        assert_eq!(options.len(), 3);
        assert_eq!(options[1].value, "CCAFS LC-40");
        assert_eq!(options[2].value, "KSC LC-39A");
    }

    #[test]
    fn empty_dataset_falls_back_to_advertised_domain() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert_eq!(ds.default_payload_range(), PAYLOAD_DOMAIN_KG);
        assert_eq!(ds.site_options().len(), 1);
    }

    #[test]
    fn site_selection_round_trips_through_raw_value() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        let sel = SiteSelection::from_value("VAFB SLC-4E");
        assert_eq!(sel, SiteSelection::Site("VAFB SLC-4E".to_string()));
        assert_eq!(sel.value(), "VAFB SLC-4E");
    }
}
