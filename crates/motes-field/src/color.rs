//! Colour blending for translucent strokes.

use ratatui::style::Color;

/// Blend `fg` over `bg` at the given opacity.
///
/// Terminals have no alpha channel, so a translucent line is drawn in the
/// colour it would have over the canvas background. Non-RGB colours cannot
/// be mixed and snap to whichever side dominates.
pub fn fade(fg: Color, bg: Color, opacity: f64) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            Color::Rgb(mix(fr, br, t), mix(fg_, bg_, t), mix(fb, bb, t))
        }
        _ if t >= 0.5 => fg,
        _ => bg,
    }
}

fn mix(fg: u8, bg: u8, t: f64) -> u8 {
    let value = f64::from(bg) + (f64::from(fg) - f64::from(bg)) * t;
    value.round().clamp(0.0, 255.0) as u8
}
