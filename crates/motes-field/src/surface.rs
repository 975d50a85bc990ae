//! Drawing surface geometry and the draw-call interface.

/// Size of the drawing surface in surface units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceDimensions {
    pub width: u32,
    pub height: u32,
}

impl SurfaceDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `(x, y)` lies inside the closed rectangle `[0, w] x [0, h]`.
    pub fn contains(self, x: f64, y: f64) -> bool {
        (0.0..=f64::from(self.width)).contains(&x) && (0.0..=f64::from(self.height)).contains(&y)
    }
}

/// Placement of the surface within the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceRect {
    /// Left edge in viewport units.
    pub x: u32,
    /// Top edge in viewport units.
    pub y: u32,
    pub dimensions: SurfaceDimensions,
}

impl SurfaceRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            dimensions: SurfaceDimensions::new(width, height),
        }
    }

    /// Translate a viewport position into surface-local coordinates.
    pub fn to_local(self, x: f64, y: f64) -> (f64, f64) {
        (x - f64::from(self.x), y - f64::from(self.y))
    }

    /// Whether a viewport position falls on the surface.
    pub fn contains(self, x: f64, y: f64) -> bool {
        let (lx, ly) = self.to_local(x, y);
        self.dimensions.contains(lx, ly)
    }
}

/// Target of the per-frame draw pass.
pub trait Surface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Draw a filled circle.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64);

    /// Draw a straight line with the given opacity in `[0, 1]`.
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), opacity: f64);
}
