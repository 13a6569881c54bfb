//! Core types shared by the plexus crates.

mod params;
mod theme;

pub use params::{Attraction, FieldParams, ParticleColor, Profile};
pub use theme::{AnimationSpeed, ColorTheme};
