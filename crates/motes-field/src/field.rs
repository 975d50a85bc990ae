//! The particle collection and its per-frame pass.

use motes_core::MotionPreference;
use rand::Rng;

use crate::params::FieldParams;
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::surface::{Surface, SurfaceDimensions};

/// A line between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the first particle.
    pub a: usize,
    /// Index of the second particle, always greater than `a`.
    pub b: usize,
    /// Line opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Number of particles for a surface: one per `density` square units.
pub fn particle_count(dims: SurfaceDimensions, density: f64) -> usize {
    if dims.is_empty() || density <= 0.0 {
        return 0;
    }
    (dims.area() as f64 / density).floor() as usize
}

/// Every unordered pair closer than `threshold`, with its fade.
pub fn connections(particles: &[Particle], threshold: f64) -> Vec<Connection> {
    let mut links = Vec::new();
    for (a, pa) in particles.iter().enumerate() {
        for (offset, pb) in particles[a + 1..].iter().enumerate() {
            let distance = pa.distance_to((pb.x, pb.y));
            if distance < threshold {
                links.push(Connection {
                    a,
                    b: a + 1 + offset,
                    opacity: (1.0 - distance / threshold).clamp(0.0, 1.0),
                });
            }
        }
    }
    links
}

/// Particle field state.
#[derive(Debug)]
pub struct ParticleField<R> {
    params: FieldParams,
    dimensions: SurfaceDimensions,
    particles: Vec<Particle>,
    pointer: PointerState,
    motion: MotionPreference,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    /// Create an empty field. Call [`ParticleField::resize`] to populate it.
    pub fn new(params: FieldParams, motion: MotionPreference, rng: R) -> Self {
        Self {
            pointer: PointerState::new(params.influence_radius),
            params,
            dimensions: SurfaceDimensions::default(),
            particles: Vec::new(),
            motion,
            rng,
        }
    }

    /// Create a field with a fixed particle layout instead of a random one.
    ///
    /// Positions are clamped into `dimensions` and each radius is raised to
    /// at least its base radius. A later resize replaces the layout.
    pub fn with_particles(
        params: FieldParams,
        motion: MotionPreference,
        rng: R,
        dimensions: SurfaceDimensions,
        particles: impl IntoIterator<Item = Particle>,
    ) -> Self {
        let mut field = Self::new(params, motion, rng);
        field.dimensions = dimensions;
        let width = f64::from(dimensions.width);
        let height = f64::from(dimensions.height);
        field.particles = particles
            .into_iter()
            .map(|mut p| {
                p.x = p.x.clamp(0.0, width);
                p.y = p.y.clamp(0.0, height);
                p.radius = p.radius.max(p.base_radius);
                p
            })
            .collect();
        field
    }

    /// Adopt new surface dimensions and regenerate every particle.
    pub fn resize(&mut self, dimensions: SurfaceDimensions) {
        self.dimensions = dimensions;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        let count = particle_count(self.dimensions, self.params.density);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::spawn(&mut self.rng, self.dimensions, &self.params);
            self.particles.push(particle);
        }
        tracing::debug!(
            width = self.dimensions.width,
            height = self.dimensions.height,
            count,
            "regenerated particle field"
        );
    }

    /// Update pointer state with a surface-local position.
    pub fn track_pointer(&mut self, x: f64, y: f64) {
        self.pointer.track(x, y);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer.clear();
    }

    /// Run one frame: clear, update and draw each particle, then draw links.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear();

        let moving = !self.motion.is_reduced();
        for particle in &mut self.particles {
            update(particle, moving, self.dimensions, &self.pointer, &self.params);
            surface.fill_circle(particle.x, particle.y, particle.radius);
        }

        self.draw_links(surface);
    }

    /// Update every particle without drawing.
    pub fn step(&mut self) {
        let moving = !self.motion.is_reduced();
        for particle in &mut self.particles {
            update(particle, moving, self.dimensions, &self.pointer, &self.params);
        }
    }

    fn draw_links<S: Surface + ?Sized>(&self, surface: &mut S) {
        for link in connections(&self.particles, self.params.link_distance) {
            let a = &self.particles[link.a];
            let b = &self.particles[link.b];
            surface.stroke_line((a.x, a.y), (b.x, b.y), link.opacity);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn dimensions(&self) -> SurfaceDimensions {
        self.dimensions
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn set_motion(&mut self, motion: MotionPreference) {
        self.motion = motion;
    }
}

fn update(
    particle: &mut Particle,
    moving: bool,
    dimensions: SurfaceDimensions,
    pointer: &PointerState,
    params: &FieldParams,
) {
    if moving {
        particle.advance(dimensions);
    }
    particle.respond(pointer, params);
}
