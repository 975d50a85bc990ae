//! Last known pointer position.

/// Pointer (mouse or touch) state owned by a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    position: Option<(f64, f64)>,
    influence_radius: f64,
}

impl PointerState {
    pub fn new(influence_radius: f64) -> Self {
        Self {
            position: None,
            influence_radius,
        }
    }

    /// Record a surface-local pointer position.
    pub fn track(&mut self, x: f64, y: f64) {
        self.position = Some((x, y));
    }

    /// Forget the pointer after it leaves the surface.
    pub fn clear(&mut self) {
        self.position = None;
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.position
    }

    pub fn influence_radius(&self) -> f64 {
        self.influence_radius
    }
}
