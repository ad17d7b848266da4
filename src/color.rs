use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Fill of histogram bars.
pub const HISTOGRAM_FILL: Color32 = Color32::from_rgb(70, 130, 180);

// ---------------------------------------------------------------------------
// Category palette
// ---------------------------------------------------------------------------

/// `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.55, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Colour of every bar of a bar chart, by position.
pub fn bar_colors(bars: &[(String, usize)]) -> Vec<(String, Color32)> {
    bars.iter()
        .zip(generate_palette(bars.len()))
        .map(|((label, _), c)| (label.clone(), c))
        .collect()
}
