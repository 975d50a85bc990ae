//! Ratatui rendering of a recorded [`Scene`].

use motes_core::Palette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Line as CanvasLine, Points},
    },
};

use crate::color::fade;
use crate::scene::Scene;
use crate::surface::SurfaceDimensions;

/// Braille dots per terminal cell, horizontally and vertically.
const DOTS_PER_CELL: (f64, f64) = (2.0, 4.0);

/// Widget that paints a scene with Braille markers.
///
/// Surface coordinates grow downward; the canvas is flipped so that a
/// particle at `y = 0` appears on the top row.
#[derive(Debug, Clone, Copy)]
pub struct FieldCanvas<'a> {
    scene: &'a Scene,
    palette: Palette,
    dimensions: SurfaceDimensions,
}

impl<'a> FieldCanvas<'a> {
    pub fn new(scene: &'a Scene, palette: Palette, dimensions: SurfaceDimensions) -> Self {
        Self {
            scene,
            palette,
            dimensions,
        }
    }
}

impl Widget for FieldCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.dimensions.is_empty() {
            return;
        }

        let width = f64::from(self.dimensions.width);
        let height = f64::from(self.dimensions.height);
        let dot = (
            width / (f64::from(area.width) * DOTS_PER_CELL.0),
            height / (f64::from(area.height) * DOTS_PER_CELL.1),
        );
        let palette = self.palette;
        let scene = self.scene;

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(palette.background)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for (from, to, opacity) in scene.lines() {
                    ctx.draw(&CanvasLine::new(
                        from.0,
                        height - from.1,
                        to.0,
                        height - to.1,
                        fade(palette.primary, palette.background, opacity),
                    ));
                }
                // Particles sit above the links.
                ctx.layer();
                for (x, y, radius) in scene.circles() {
                    let coords = circle_dots(x, height - y, radius, dot);
                    ctx.draw(&Points {
                        coords: &coords,
                        color: palette.primary,
                    });
                }
            })
            .render(area, buf);
    }
}

/// Points that fill a circle on a grid of `dot`-sized steps.
///
/// The centre is always included, so a circle smaller than one dot still
/// shows up as a single dot.
pub fn circle_dots(cx: f64, cy: f64, radius: f64, dot: (f64, f64)) -> Vec<(f64, f64)> {
    let mut coords = vec![(cx, cy)];
    let (step_x, step_y) = dot;
    if step_x <= 0.0 || step_y <= 0.0 {
        return coords;
    }

    let reach_x = (radius / step_x).floor() as i64;
    let reach_y = (radius / step_y).floor() as i64;
    for j in -reach_y..=reach_y {
        for i in -reach_x..=reach_x {
            if i == 0 && j == 0 {
                continue;
            }
            let x = i as f64 * step_x;
            let y = j as f64 * step_y;
            if x.hypot(y) <= radius {
                coords.push((cx + x, cy + y));
            }
        }
    }
    coords
}
