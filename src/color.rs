use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

// ---------------------------------------------------------------------------
// Diverging colormap for correlation cells
// ---------------------------------------------------------------------------

/// Map a correlation coefficient in [-1, 1] onto a blue → white → red ramp.
///
/// Mixing happens in linear RGB so the midpoint stays a neutral light grey
/// instead of washing out.
pub fn correlation_color(r: f64) -> Color32 {
    let t = (r.clamp(-1.0, 1.0)) as f32;
    let mid = Srgb::new(0.92_f32, 0.92, 0.92).into_linear();
    let pole = if t < 0.0 {
        Srgb::new(0.23_f32, 0.30, 0.75).into_linear()
    } else {
        Srgb::new(0.71_f32, 0.02, 0.15).into_linear()
    };
    let rgb: Srgb<f32> = Srgb::from_linear(mid.mix(pole, t.abs()));
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Text colour that stays readable on the given cell background.
pub fn contrast_text(background: Color32) -> Color32 {
    let [r, g, b, _] = background.to_array();
    let luminance = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luminance > 140.0 {
        Color32::from_gray(20)
    } else {
        Color32::from_gray(235)
    }
}

// ---------------------------------------------------------------------------
// Plot accents
// ---------------------------------------------------------------------------

fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Fill colour for histogram bars.
pub fn histogram_fill() -> Color32 {
    hsl(207.0, 0.70, 0.55)
}

/// Stroke colour for the density overlay.
pub fn density_stroke() -> Color32 {
    hsl(27.0, 0.85, 0.50)
}

/// Banner colour for a successful prediction.
pub fn success() -> Color32 {
    hsl(145.0, 0.55, 0.40)
}
