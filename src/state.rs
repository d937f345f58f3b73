use crate::color::ColorMap;
use crate::data::chart::{payload_scatter, success_pie, PieSpec, ScatterSpec};
use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::model::{LaunchDataset, SiteSelection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is read-only after construction; everything else is derived
/// from it plus the two input controls, and recomputed synchronously when an
/// input changes. A site change rebuilds both charts, a range change only the
/// scatter, matching what each chart actually depends on.
pub struct AppState {
    /// Loaded dataset (present from startup onwards).
    pub dataset: LaunchDataset,

    /// Current site dropdown selection.
    pub selected_site: SiteSelection,

    /// Current payload slider range in kg, `(lo, hi)`.
    pub payload_range: (f64, f64),

    /// Cached pie specification for the current selection.
    pub pie: PieSpec,

    /// Cached scatter specification for the current selection and range.
    pub scatter: ScatterSpec,

    /// Indices of records behind the current scatter (cached, for the table).
    pub visible_indices: Vec<usize>,

    /// Colour per booster version category.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the filtered-records table is expanded.
    pub show_table: bool,
}

impl AppState {
    /// Build the initial state from a freshly loaded dataset: all sites
    /// selected, slider spanning the observed payload extremes.
    pub fn new(dataset: LaunchDataset) -> Self {
        let selected_site = SiteSelection::All;
        let payload_range = dataset.default_payload_range();
        let color_map = ColorMap::new(&dataset.booster_categories());

        let criteria = FilterCriteria::new(selected_site.clone(), payload_range);
        let pie = success_pie(&dataset, &selected_site);
        let scatter = payload_scatter(&dataset, &criteria);
        let visible_indices = filtered_indices(&dataset, &criteria);

        AppState {
            dataset,
            selected_site,
            payload_range,
            pie,
            scatter,
            visible_indices,
            color_map,
            status_message: None,
            show_table: false,
        }
    }

    /// Current filter criteria as a plain value.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.selected_site.clone(), self.payload_range)
    }

    /// Swap in a replacement dataset (File ▸ Open…), resetting the controls.
    pub fn replace_dataset(&mut self, dataset: LaunchDataset) {
        *self = AppState::new(dataset);
    }

    /// Handle a dropdown change: rebuild pie and scatter.
    pub fn set_site(&mut self, selection: SiteSelection) {
        if self.selected_site == selection {
            return;
        }
        self.selected_site = selection;
        self.pie = success_pie(&self.dataset, &self.selected_site);
        self.rebuild_scatter();
    }

    /// Handle a slider change: the pie does not depend on the range, so only
    /// the scatter is rebuilt.
    pub fn set_payload_range(&mut self, range: (f64, f64)) {
        if self.payload_range == range {
            return;
        }
        self.payload_range = range;
        self.rebuild_scatter();
    }

    fn rebuild_scatter(&mut self) {
        let criteria = self.criteria();
        self.scatter = payload_scatter(&self.dataset, &criteria);
        self.visible_indices = filtered_indices(&self.dataset, &criteria);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn state() -> AppState {
        let records = vec![
            LaunchRecord {
                site: "A".to_string(),
                outcome: 1,
                payload_kg: 500.0,
                booster_category: "v1.0".to_string(),
            },
            LaunchRecord {
                site: "A".to_string(),
                outcome: 0,
                payload_kg: 1500.0,
                booster_category: "v1.1".to_string(),
            },
            LaunchRecord {
                site: "B".to_string(),
                outcome: 1,
                payload_kg: 3000.0,
                booster_category: "FT".to_string(),
            },
        ];
        AppState::new(LaunchDataset::from_records(records))
    }

    #[test]
    fn initial_state_shows_all_sites_over_observed_range() {
        let st = state();
        assert_eq!(st.selected_site, SiteSelection::All);
        assert_eq!(st.payload_range, (500.0, 3000.0));
        assert_eq!(st.pie.title, "Total Successful Launches By Site");
        // Default range bounds are exclusive, so the extreme records fall out.
        assert_eq!(st.scatter.points.len(), 1);
    }

    #[test]
    fn site_change_rebuilds_both_charts() {
        let mut st = state();
        st.set_payload_range((0.0, 10_000.0));
        st.set_site(SiteSelection::Site("A".to_string()));
        assert_eq!(st.pie.title, "Total Successful Launches for A");
        assert_eq!(st.scatter.points.len(), 2);
        assert_eq!(st.visible_indices, vec![0, 1]);
    }

    #[test]
    fn range_change_leaves_pie_untouched() {
        let mut st = state();
        let pie_before = st.pie.clone();
        st.set_payload_range((0.0, 1000.0));
        assert_eq!(st.pie, pie_before);
        assert_eq!(st.scatter.points.len(), 1);
        assert_eq!(st.visible_indices, vec![0]);
    }

    #[test]
    fn replacing_the_dataset_resets_the_controls() {
        let mut st = state();
        st.set_site(SiteSelection::Site("B".to_string()));
        st.replace_dataset(LaunchDataset::from_records(vec![LaunchRecord {
            site: "C".to_string(),
            outcome: 1,
            payload_kg: 700.0,
            booster_category: "B5".to_string(),
        }]));
        assert_eq!(st.selected_site, SiteSelection::All);
        assert_eq!(st.dataset.sites, vec!["C".to_string()]);
    }
}
