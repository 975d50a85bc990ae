//! Recorded draw calls for one frame.

use crate::surface::Surface;

/// A single recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { x: f64, y: f64, radius: f64 },
    Line { from: (f64, f64), to: (f64, f64), opacity: f64 },
}

/// Display list that a [`FieldCanvas`](crate::FieldCanvas) paints.
///
/// The buffer is reused across frames; `clear` keeps its capacity.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn circles(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.shapes.iter().filter_map(|shape| match *shape {
            Shape::Circle { x, y, radius } => Some((x, y, radius)),
            Shape::Line { .. } => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64), f64)> + '_ {
        self.shapes.iter().filter_map(|shape| match *shape {
            Shape::Line { from, to, opacity } => Some((from, to, opacity)),
            Shape::Circle { .. } => None,
        })
    }
}

impl Surface for Scene {
    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.shapes.push(Shape::Circle { x, y, radius });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), opacity: f64) {
        self.shapes.push(Shape::Line {
            from,
            to,
            opacity: opacity.clamp(0.0, 1.0),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut scene = Scene::default();
        scene.fill_circle(1.0, 2.0, 3.0);
        scene.stroke_line((0.0, 0.0), (4.0, 4.0), 0.25);

        assert_eq!(scene.circles().collect::<Vec<_>>(), vec![(1.0, 2.0, 3.0)]);
        assert_eq!(
            scene.lines().collect::<Vec<_>>(),
            vec![((0.0, 0.0), (4.0, 4.0), 0.25)]
        );
    }

    #[test]
    fn test_clear_empties() {
        let mut scene = Scene::default();
        scene.fill_circle(1.0, 2.0, 3.0);
        scene.clear();
        assert!(scene.shapes().is_empty());
    }

    #[test]
    fn test_opacity_clamped() {
        let mut scene = Scene::default();
        scene.stroke_line((0.0, 0.0), (1.0, 1.0), 1.5);
        assert_eq!(scene.lines().next().map(|l| l.2), Some(1.0));
    }
}
