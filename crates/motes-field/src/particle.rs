//! A single particle and its per-frame physics.

use rand::Rng;

use crate::params::FieldParams;
use crate::pointer::PointerState;
use crate::surface::SurfaceDimensions;

/// State for one particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Horizontal position in surface units.
    pub x: f64,
    /// Vertical position in surface units.
    pub y: f64,
    /// Horizontal velocity per frame.
    pub dx: f64,
    /// Vertical velocity per frame.
    pub dy: f64,
    /// Current (possibly swollen) radius.
    pub radius: f64,
    /// Resting radius.
    pub base_radius: f64,
}

impl Particle {
    pub fn new(x: f64, y: f64, dx: f64, dy: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            dx,
            dy,
            radius,
            base_radius: radius,
        }
    }

    /// Spawn a particle at a random position fully inside `dims`.
    pub fn spawn<R: Rng>(rng: &mut R, dims: SurfaceDimensions, params: &FieldParams) -> Self {
        let radius = sample(rng, params.min_radius, params.max_radius);
        let x = spawn_axis(rng, f64::from(dims.width), radius);
        let y = spawn_axis(rng, f64::from(dims.height), radius);
        let dx = sample(rng, -params.max_speed, params.max_speed);
        let dy = sample(rng, -params.max_speed, params.max_speed);
        Self::new(x, y, dx, dy, radius)
    }

    /// Reflect off any edge the particle touches, then move one step.
    ///
    /// The edge test runs on the current position, so a particle that has
    /// just crossed an edge turns around on the following update.
    pub fn advance(&mut self, dims: SurfaceDimensions) {
        let width = f64::from(dims.width);
        let height = f64::from(dims.height);

        self.dx = reflect(self.x, self.dx, self.radius, width);
        self.dy = reflect(self.y, self.dy, self.radius, height);

        self.x = (self.x + self.dx).clamp(0.0, width);
        self.y = (self.y + self.dy).clamp(0.0, height);
    }

    /// Grow toward the cap when the pointer is close, otherwise relax.
    pub fn respond(&mut self, pointer: &PointerState, params: &FieldParams) {
        let influenced = pointer
            .position()
            .is_some_and(|p| self.distance_to(p) < pointer.influence_radius());

        if influenced {
            let cap = self.base_radius * params.grow_cap;
            if self.radius < cap {
                self.radius = (self.radius + params.grow_step).min(cap);
            }
        } else if self.radius > self.base_radius {
            self.radius = (self.radius - params.shrink_step).max(self.base_radius);
        }
    }

    pub fn distance_to(&self, (px, py): (f64, f64)) -> f64 {
        (self.x - px).hypot(self.y - py)
    }
}

/// Velocity after bouncing off the edges of `[0, extent]`.
fn reflect(position: f64, velocity: f64, radius: f64, extent: f64) -> f64 {
    let low = position - radius < 0.0;
    let high = position + radius > extent;
    match (low, high) {
        // Wider than the surface: keep drifting and rely on the clamp.
        (true, true) => velocity,
        (true, false) => velocity.abs(),
        (false, true) => -velocity.abs(),
        (false, false) => velocity,
    }
}

/// Random coordinate in `[radius, extent - radius]`, or the centre when the
/// particle does not fit.
fn spawn_axis<R: Rng>(rng: &mut R, extent: f64, radius: f64) -> f64 {
    if extent > radius * 2.0 {
        sample(rng, radius, extent - radius)
    } else {
        extent / 2.0
    }
}

fn sample<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DIMS: SurfaceDimensions = SurfaceDimensions {
        width: 800,
        height: 600,
    };

    #[test]
    fn test_advance_moves_by_velocity() {
        let mut p = Particle::new(50.0, 50.0, -1.0, -1.0, 2.0);
        p.advance(DIMS);
        assert_eq!((p.x, p.y), (49.0, 49.0));
        assert_eq!((p.dx, p.dy), (-1.0, -1.0));
    }

    #[test]
    fn test_reflection_happens_on_following_update() {
        let mut p = Particle::new(50.0, 50.0, -1.0, -1.0, 49.5);
        p.advance(DIMS);
        assert_eq!((p.x, p.y), (49.0, 49.0));
        assert_eq!(p.dx, -1.0, "no flip while x - r >= 0");

        // 49 - 49.5 < 0, so this update flips and moves back out.
        p.advance(DIMS);
        assert_eq!(p.dx, 1.0);
        assert_eq!(p.dy, 1.0);
        assert_eq!((p.x, p.y), (50.0, 50.0));
    }

    #[test]
    fn test_reflects_off_far_edges() {
        let mut p = Particle::new(799.0, 599.0, 0.5, 0.5, 2.0);
        p.advance(DIMS);
        assert!(p.dx < 0.0);
        assert!(p.dy < 0.0);
        assert!(DIMS.contains(p.x, p.y));
    }

    #[test]
    fn test_grows_inside_influence_and_caps() {
        let params = FieldParams::default();
        let mut p = Particle::new(100.0, 100.0, 0.0, 0.0, 2.0);
        let mut pointer = PointerState::new(params.influence_radius);
        pointer.track(110.0, 100.0);

        p.respond(&pointer, &params);
        assert_eq!(p.radius, 2.5);

        for _ in 0..100 {
            p.respond(&pointer, &params);
        }
        assert_eq!(p.radius, 8.0);
    }

    #[test]
    fn test_relaxes_without_undershooting() {
        let params = FieldParams::default();
        let mut p = Particle::new(100.0, 100.0, 0.0, 0.0, 2.0);
        p.radius = 2.05;

        let pointer = PointerState::new(params.influence_radius);
        p.respond(&pointer, &params);
        assert_eq!(p.radius, 2.0);
        p.respond(&pointer, &params);
        assert_eq!(p.radius, 2.0);
    }

    #[test]
    fn test_far_pointer_relaxes() {
        let params = FieldParams::default();
        let mut p = Particle::new(0.0, 0.0, 0.0, 0.0, 2.0);
        p.radius = 5.0;
        let mut pointer = PointerState::new(params.influence_radius);
        pointer.track(500.0, 500.0);
        p.respond(&pointer, &params);
        assert!((p.radius - 4.9).abs() < 1e-9);
    }

    #[test]
    fn test_spawn_within_bounds() {
        let params = FieldParams::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, DIMS, &params);
            assert!(p.x - p.radius >= 0.0 && p.x + p.radius <= 800.0);
            assert!(p.y - p.radius >= 0.0 && p.y + p.radius <= 600.0);
            assert!((1.0..4.0).contains(&p.radius));
            assert!(p.dx.abs() <= 0.75 && p.dy.abs() <= 0.75);
            assert_eq!(p.radius, p.base_radius);
        }
    }

    #[test]
    fn test_spawn_centres_on_narrow_surface() {
        let params = FieldParams::default();
        let mut rng = StdRng::seed_from_u64(1);
        let p = Particle::spawn(&mut rng, SurfaceDimensions::new(1, 600), &params);
        assert_eq!(p.x, 0.5);
    }
}
