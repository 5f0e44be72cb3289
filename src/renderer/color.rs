//! Colour conversion for draw commands
//!
//! Draw lists carry CSS-style colours (HSL triples or a few named colours).
//! The GPU path needs RGBA floats; the DOM text layer needs CSS strings.

use crate::sim::Color;

/// Convert HSL (degrees, percent, percent) to sRGB in `[0, 1]`
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(360.0) / 60.0;
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m]
}

/// sRGB colour as RGBA floats (alpha always 1)
pub fn to_rgba(color: Color) -> [f32; 4] {
    let [r, g, b] = match color {
        Color::Hsl { h, s, l } => hsl_to_rgb(h, s, l),
        Color::Black => [0.0, 0.0, 0.0],
        Color::White => [1.0, 1.0, 1.0],
        Color::Red => [1.0, 0.0, 0.0],
        Color::DarkBlue => [0.0, 0.0, 139.0 / 255.0],
    };
    [r, g, b, 1.0]
}

/// CSS colour string, as a canvas `fillStyle` would take it
pub fn to_css(color: Color) -> String {
    match color {
        Color::Hsl { h, s, l } => format!("hsl({h}, {s}%, {l}%)"),
        Color::Black => "black".to_string(),
        Color::White => "white".to_string(),
        Color::Red => "red".to_string(),
        Color::DarkBlue => "darkblue".to_string(),
    }
}

/// Decode one sRGB channel to linear light (for sRGB render targets)
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
