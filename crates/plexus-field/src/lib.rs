//! Animated particle network for plexus.
//!
//! A [`ParticleField`] holds a fixed set of drifting particles and the
//! proximity edges between them. An [`Animator`] drives a field frame by
//! frame onto a [`Surface`], asking a [`FrameScheduler`] for each next frame.
//! [`CanvasSurface`] renders to a terminal through ratatui, and
//! [`RecordingSurface`] with [`ManualStepper`] run the same loop headless.
//!
//! Click bursts and the pointer trail live in [`effects`].

mod animator;
mod canvas;
mod color;
mod edges;
pub mod effects;
mod field;
mod geometry;
mod particle;
mod scheduler;
mod surface;

pub use animator::{Animator, Phase};
pub use canvas::CanvasSurface;
pub use color::{Rgb, Rgba, hsl_to_rgb};
pub use edges::{Edge, connect};
pub use field::ParticleField;
pub use geometry::{Point, Size};
pub use particle::{Particle, wrap_axis};
pub use scheduler::{FrameClock, FrameScheduler, ManualStepper};
pub use surface::{DrawCall, Glow, RecordingSurface, Stroke, Surface};
