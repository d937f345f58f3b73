use std::f32::consts::TAU;

use eframe::egui::{pos2, vec2, Color32, Pos2, Sense, Shape, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, Points};

use crate::color::{generate_palette, ColorMap};
use crate::data::chart::{PieSpec, ScatterSpec};
use crate::data::model::PAYLOAD_DOMAIN_KG;

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

const PIE_HEIGHT: f32 = 260.0;

/// Render a pie specification as painted sectors plus a value legend.
pub fn pie_chart(ui: &mut Ui, spec: &PieSpec) {
    ui.heading(&spec.title);

    let total = spec.total();
    if spec.slices.is_empty() || total <= 0.0 {
        ui.label("No data for this selection.");
        return;
    }

    let colors = generate_palette(spec.slices.len());

    ui.horizontal(|ui: &mut Ui| {
        // ---- Sectors ----
        let (response, painter) =
            ui.allocate_painter(vec2(PIE_HEIGHT, PIE_HEIGHT), Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.5 - 4.0;

        // Start at 12 o'clock, sweep clockwise.
        let mut angle = -TAU / 4.0;
        for (slice, color) in spec.slices.iter().zip(colors.iter()) {
            let sweep = (slice.value / total) as f32 * TAU;
            if sweep <= 0.0 {
                continue;
            }
            painter.add(Shape::convex_polygon(
                sector_points(center, radius, angle, sweep),
                *color,
                Stroke::new(1.0, Color32::from_gray(40)),
            ));
            angle += sweep;
        }

        // ---- Legend ----
        ui.vertical(|ui: &mut Ui| {
            for (slice, color) in spec.slices.iter().zip(colors.iter()) {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, painter) =
                        ui.allocate_painter(vec2(12.0, 12.0), Sense::hover());
                    painter.rect_filled(swatch.rect, 2, *color);
                    let share = 100.0 * slice.value / total;
                    ui.label(format!("{}  {} ({share:.1}%)", slice.label, slice.value));
                });
            }
        });
    });
}

/// Points of one pie sector: the centre plus an arc sampled finely enough to
/// look round. A circle sector is convex, so `Shape::convex_polygon` applies.
fn sector_points(center: Pos2, radius: f32, start: f32, sweep: f32) -> Vec<Pos2> {
    let steps = ((sweep / 0.05).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let a = start + sweep * (i as f32 / steps as f32);
        points.push(pos2(
            center.x + radius * a.cos(),
            center.y + radius * a.sin(),
        ));
    }
    points
}

// ---------------------------------------------------------------------------
// Payload-vs-outcome scatter chart
// ---------------------------------------------------------------------------

const SCATTER_HEIGHT: f32 = 300.0;

/// Render a scatter specification: one circular marker per launch, radius
/// scaled from the marker's `size` field, coloured by booster category.
pub fn payload_scatter_plot(ui: &mut Ui, spec: &ScatterSpec, color_map: &ColorMap) {
    let x_label = spec.x_label.clone();

    Plot::new("payload_scatter")
        .height(SCATTER_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .include_y(-0.2)
        .include_y(1.2)
        .label_formatter(move |name, value| {
            if name.is_empty() {
                format!("{x_label}: {:.0}", value.x)
            } else {
                format!("{name}\n{x_label}: {:.0}", value.x)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for p in &spec.points {
                let color = color_map.color_for(&p.color_key);
                // Identical names collapse into one legend entry per category.
                let points = Points::new(vec![[p.x, p.y]])
                    .name(&p.color_key)
                    .color(color)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(marker_radius(p.size));

                plot_ui.points(points);
            }
        });
}

/// Marker radius in points, scaled linearly over the advertised payload
/// domain so heavy launches read as big dots.
fn marker_radius(size: f64) -> f32 {
    let (lo, hi) = PAYLOAD_DOMAIN_KG;
    let t = ((size - lo) / (hi - lo)).clamp(0.0, 1.0) as f32;
    2.0 + t * 8.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_covers_full_sweep() {
        let pts = sector_points(pos2(0.0, 0.0), 10.0, 0.0, TAU / 2.0);
        // centre + at least the two arc endpoints
        assert!(pts.len() >= 3);
        assert_eq!(pts[0], pos2(0.0, 0.0));
        let first = pts[1];
        let last = pts[pts.len() - 1];
        assert!((first.x - 10.0).abs() < 1e-3);
        assert!((last.x + 10.0).abs() < 1e-3);
    }

    #[test]
    fn marker_radius_scales_with_payload_and_clamps() {
        assert_eq!(marker_radius(0.0), 2.0);
        assert_eq!(marker_radius(10_000.0), 10.0);
        assert_eq!(marker_radius(20_000.0), 10.0);
        assert!(marker_radius(5000.0) > marker_radius(1000.0));
    }
}
