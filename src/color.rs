use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// Hue of the first series; later series are spaced evenly around the wheel.
const FIRST_HUE: f32 = 210.0;

/// `n` distinct line colours readable on the current plot background:
/// lighter on dark themes, darker on light ones.
pub fn generate_palette(n: usize, dark_mode: bool) -> Vec<Color32> {
    let lightness = if dark_mode { 0.65 } else { 0.40 };
    (0..n)
        .map(|i| {
            let hue = (FIRST_HUE + (i as f32 / n as f32) * 360.0) % 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.70, lightness).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luma(c: Color32) -> u32 {
        c.r() as u32 + c.g() as u32 + c.b() as u32
    }

    #[test]
    fn one_colour_per_series() {
        assert!(generate_palette(0, true).is_empty());
        let colours = generate_palette(3, true);
        assert_eq!(colours.len(), 3);
        assert_ne!(colours[0], colours[1]);
        assert_ne!(colours[1], colours[2]);
    }

    #[test]
    fn dark_theme_gets_lighter_lines() {
        let dark = generate_palette(2, true);
        let light = generate_palette(2, false);
        for (d, l) in dark.iter().zip(&light) {
            assert!(luma(*d) > luma(*l));
        }
    }
}
