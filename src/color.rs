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
// Bucket colours for the pie charts
// ---------------------------------------------------------------------------

/// Grey level and opacity both keyed by the bucket value: bucket `v` is
/// `rgba(v, v, v, v / 100 * 255)`, clamped to the displayable range.
pub fn bucket_color(bucket: i64) -> Color32 {
    let level = bucket.clamp(0, 255) as u8;
    let alpha = (bucket as f64 / 100.0 * 255.0).clamp(0.0, 255.0) as u8;
    Color32::from_rgba_unmultiplied(level, level, level, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(3);
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }

    #[test]
    fn bucket_color_is_deterministic_grey_with_alpha() {
        assert_eq!(bucket_color(0), Color32::from_rgba_unmultiplied(0, 0, 0, 0));
        assert_eq!(bucket_color(40), Color32::from_rgba_unmultiplied(40, 40, 40, 102));
        assert_eq!(bucket_color(100), Color32::from_rgba_unmultiplied(100, 100, 100, 255));
        assert_eq!(bucket_color(120), Color32::from_rgba_unmultiplied(120, 120, 120, 255));
        assert_eq!(bucket_color(-5), bucket_color(0));
        assert_eq!(bucket_color(55), bucket_color(55));
    }
}
