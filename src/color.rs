use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::InjuryCategory;

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

/// Fixed accent colour for an affected-party category.
pub fn category_color(category: InjuryCategory) -> Color32 {
    let palette = generate_palette(InjuryCategory::ALL.len());
    let idx = InjuryCategory::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or(0);
    palette[idx]
}

// ---------------------------------------------------------------------------
// Density ramp: cell count → colour
// ---------------------------------------------------------------------------

/// Map a normalised density (0.0 sparse .. 1.0 dense) to a blue→red ramp.
/// Stands in for the elevation scale of an extruded 3-D hex layer.
pub fn density_ramp(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let hue = 210.0 * (1.0 - t);
    let hsl = Hsl::new(hue, 0.8, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_entries() {
        assert!(generate_palette(0).is_empty());
        let palette = generate_palette(3);
        assert_eq!(palette.len(), 3);
        assert_ne!(palette[0], palette[1]);
        assert_ne!(palette[1], palette[2]);
    }

    #[test]
    fn categories_get_distinct_colors() {
        let colors: Vec<_> = InjuryCategory::ALL.iter().map(|&c| category_color(c)).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }

    #[test]
    fn ramp_ends_differ_and_out_of_range_input_clamps() {
        assert_ne!(density_ramp(0.0), density_ramp(1.0));
        assert_eq!(density_ramp(1.0), density_ramp(2.5));
        assert_eq!(density_ramp(0.0), density_ramp(-1.0));
    }
}
