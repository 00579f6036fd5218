use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::PlanetType;
use crate::data::scoring;

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
// Planet type → Color32
// ---------------------------------------------------------------------------

/// One colour per planet size class, stable across catalogs.
#[derive(Debug, Clone)]
pub struct TypeColors {
    mapping: BTreeMap<PlanetType, Color32>,
}

impl Default for TypeColors {
    fn default() -> Self {
        let mapping = PlanetType::ALL
            .into_iter()
            .zip(generate_palette(PlanetType::ALL.len()))
            .collect();
        TypeColors { mapping }
    }
}

impl TypeColors {
    pub fn color_for(&self, planet_type: PlanetType) -> Color32 {
        self.mapping
            .get(&planet_type)
            .copied()
            .unwrap_or(Color32::GRAY)
    }

    /// Legend entries (label → colour) in size order.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(t, c)| (t.to_string(), *c))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Habitability
// ---------------------------------------------------------------------------

pub const HABITABLE_COLOR: Color32 = Color32::from_rgb(76, 175, 80);
pub const NOT_HABITABLE_COLOR: Color32 = Color32::GRAY;

/// Green above the habitability threshold, grey otherwise.
pub fn score_color(score: u8) -> Color32 {
    if scoring::is_potentially_habitable(score) {
        HABITABLE_COLOR
    } else {
        NOT_HABITABLE_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct() {
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn every_type_has_a_color() {
        let colors = TypeColors::default();
        assert_eq!(colors.legend_entries().len(), PlanetType::ALL.len());
        assert_eq!(colors.legend_entries()[0].0, "Rocky (Earth-like)");
        for t in PlanetType::ALL {
            assert_ne!(colors.color_for(t), Color32::GRAY);
        }
    }

    #[test]
    fn threshold_colors() {
        assert_eq!(score_color(50), NOT_HABITABLE_COLOR);
        assert_eq!(score_color(51), HABITABLE_COLOR);
    }
}
