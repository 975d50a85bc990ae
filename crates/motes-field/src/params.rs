//! Tunable constants for the particle field.

/// Physics and rendering constants.
///
/// Units are surface units per frame. No delta-time compensation is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Surface area that corresponds to one particle.
    pub density: f64,
    /// Smallest spawn radius (inclusive).
    pub min_radius: f64,
    /// Largest spawn radius (exclusive).
    pub max_radius: f64,
    /// Largest absolute velocity on either axis.
    pub max_speed: f64,
    /// Distance within which the pointer makes particles grow.
    pub influence_radius: f64,
    /// Growth cap, as a multiple of the base radius.
    pub grow_cap: f64,
    /// Radius added per frame while influenced.
    pub grow_step: f64,
    /// Radius removed per frame while relaxing.
    pub shrink_step: f64,
    /// Particles closer than this are joined by a line.
    pub link_distance: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            density: 10_000.0,
            min_radius: 1.0,
            max_radius: 4.0,
            max_speed: 0.75,
            influence_radius: 120.0,
            grow_cap: 4.0,
            grow_step: 0.5,
            shrink_step: 0.1,
            link_distance: 100.0,
        }
    }
}
