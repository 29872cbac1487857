use std::collections::{HashMap, HashSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

const SATURATION: f32 = 0.65;
const LIGHTNESS: f32 = 0.55;
/// First hue of every palette, a mid blue.
const START_HUE: f32 = 210.0;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (START_HUE + (i as f32 / n as f32) * 360.0) % 360.0;
            let rgb: Srgb = Hsl::new(hue, SATURATION, LIGHTNESS).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category value → Color32
// ---------------------------------------------------------------------------

/// Assigns each distinct category a colour, in first-seen order.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: HashMap<CellValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut seen: HashSet<&CellValue> = HashSet::new();
        let mut distinct: Vec<&CellValue> = Vec::new();
        for v in values {
            if seen.insert(v) {
                distinct.push(v);
            }
        }
        let palette = generate_palette(distinct.len());
        let mapping = distinct.into_iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given category.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| a != b));
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn repeated_categories_share_a_colour() {
        let values = [
            CellValue::Text("North".into()),
            CellValue::Text("South".into()),
            CellValue::Text("North".into()),
        ];
        let map = ColorMap::new(&values);

        assert_eq!(map.color_for(&values[0]), map.color_for(&values[2]));
        assert_ne!(map.color_for(&values[0]), map.color_for(&values[1]));
        assert_eq!(map.color_for(&CellValue::Text("East".into())), Color32::GRAY);
    }

    #[test]
    fn many_distinct_categories_get_mapped() {
        let values: Vec<CellValue> = (0..50_000)
            .map(|i| CellValue::Text(format!("label-{i}")))
            .collect();
        let map = ColorMap::new(&values);

        assert_ne!(map.color_for(&values[0]), Color32::GRAY);
        assert_ne!(map.color_for(&values[49_999]), Color32::GRAY);
        assert_eq!(map.mapping.len(), 50_000);
    }
}
