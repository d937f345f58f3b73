use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: booster version category → Color32
// ---------------------------------------------------------------------------

/// Maps each booster version category to a stable, distinct colour.
///
/// Categories are assigned hues in sorted order, so the same dataset always
/// produces the same colouring.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the sorted distinct category list.
    pub fn new(categories: &[String]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping = categories
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category; unknown categories get grey.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (category label → colour) for the scatter legend.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(label, color)| (label.clone(), *color))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_sized_and_distinct_for_small_n() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_category_maps_to_default() {
        let cm = ColorMap::new(&["FT".to_string(), "v1.0".to_string()]);
        assert_ne!(cm.color_for("FT"), cm.color_for("v1.0"));
        assert_eq!(cm.color_for("B5"), Color32::GRAY);
        assert_eq!(cm.legend_entries().len(), 2);
    }
}
