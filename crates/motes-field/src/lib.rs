//! Animated particle field.
//!
//! Particles drift across a rectangular surface and bounce off its edges.
//! Each one swells while the pointer is close. Particles that are near each
//! other are joined by lines that fade with distance.
//!
//! [`ParticleField`] holds the simulation state. [`FieldEffect`] drives its
//! lifecycle against a [`Host`] that owns input listeners and frame
//! scheduling. Each frame is drawn onto a [`Surface`]. [`Scene`] records the
//! draw calls and [`FieldCanvas`] renders them with ratatui.

mod canvas;
mod color;
mod effect;
mod field;
mod params;
mod particle;
mod pointer;
mod scene;
mod surface;

pub use canvas::{FieldCanvas, circle_dots};
pub use color::fade;
pub use effect::{FieldEffect, FrameHandle, Host, InputEvent, ListenerId, SIGNALS, Signal};
pub use field::{Connection, ParticleField, connections, particle_count};
pub use params::FieldParams;
pub use particle::Particle;
pub use pointer::PointerState;
pub use scene::{Scene, Shape};
pub use surface::{Surface, SurfaceDimensions, SurfaceRect};
