use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{SiteSelection, PAYLOAD_DOMAIN_KG, PAYLOAD_STEP_KG};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – input controls
// ---------------------------------------------------------------------------

/// Render the left control panel: site dropdown and payload range sliders.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Site dropdown ----
    ui.strong("Launch Site");
    let options = state.dataset.site_options();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(state.selected_site.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &options {
                let selected = state.selected_site.value() == option.value;
                if ui.selectable_label(selected, &option.label).clicked() {
                    state.set_site(SiteSelection::from_value(&option.value));
                }
            }
        });
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (kg)");
    let (dom_lo, dom_hi) = PAYLOAD_DOMAIN_KG;
    let (mut lo, mut hi) = state.payload_range;
    ui.add(
        egui::Slider::new(&mut lo, dom_lo..=dom_hi)
            .step_by(PAYLOAD_STEP_KG)
            .text("min"),
    );
    ui.add(
        egui::Slider::new(&mut hi, dom_lo..=dom_hi)
            .step_by(PAYLOAD_STEP_KG)
            .text("max"),
    );
    // The control contract guarantees min <= max.
    lo = lo.min(hi);
    state.set_payload_range((lo, hi));
    ui.separator();

    // ---- Booster colour legend ----
    ui.strong("Booster version category");
    for (label, color) in state.color_map.legend_entries() {
        ui.horizontal(|ui: &mut Ui| {
            let (swatch, painter) =
                ui.allocate_painter(egui::vec2(12.0, 12.0), egui::Sense::hover());
            painter.rect_filled(swatch.rect, 2, color);
            ui.label(label);
        });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in view",
            state.dataset.len(),
            state.visible_indices.len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.show_table, "Records table")
            .clicked()
        {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Filtered-records table
// ---------------------------------------------------------------------------

/// Table of the records behind the current scatter chart.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Launch Site");
            });
            header.col(|ui| {
                ui.strong("class");
            });
            header.col(|ui| {
                ui.strong("Payload Mass (kg)");
            });
            header.col(|ui| {
                ui.strong("Booster Version Category");
            });
        })
        .body(|mut body| {
            for &idx in &state.visible_indices {
                let r = &state.dataset.records[idx];
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&r.site);
                    });
                    row.col(|ui| {
                        ui.label(r.outcome.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}", r.payload_kg));
                    });
                    row.col(|ui| {
                        ui.label(&r.booster_category);
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Let the user pick a replacement dataset. A failed load keeps the current
/// dataset and surfaces the error in the top bar.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launch records across {} sites",
                    dataset.len(),
                    dataset.sites.len()
                );
                state.replace_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
