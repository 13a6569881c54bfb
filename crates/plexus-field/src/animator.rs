//! The drive loop tying a field to a surface and a scheduler.

use plexus_core::FieldParams;
use rand::Rng;

use crate::field::ParticleField;
use crate::geometry::Point;
use crate::scheduler::FrameScheduler;
use crate::surface::Surface;

/// Lifecycle of an [`Animator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, no frame requested yet.
    Idle,
    /// Frames are being requested; there is no way back to idle.
    Running,
}

/// A particle field rendering continuously onto its own surface.
#[derive(Debug)]
pub struct Animator<S> {
    field: ParticleField,
    surface: S,
    phase: Phase,
    frames: u64,
}

impl<S: Surface> Animator<S> {
    /// Build an idle animator, sizing the field from the surface.
    pub fn new<R: Rng + ?Sized>(surface: S, params: FieldParams, rng: &mut R) -> Self {
        let field = ParticleField::init(params, surface.size(), rng);
        Self {
            field,
            surface,
            phase: Phase::Idle,
            frames: 0,
        }
    }

    /// Build and start an animator if a surface is available.
    ///
    /// Without a surface nothing is initialized or scheduled.
    pub fn launch<R, F>(
        surface: Option<S>,
        params: FieldParams,
        rng: &mut R,
        scheduler: &mut F,
    ) -> Option<Self>
    where
        R: Rng + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        let Some(surface) = surface else {
            tracing::warn!("no drawing surface, particle field not started");
            return None;
        };
        let mut animator = Self::new(surface, params, rng);
        animator.start(scheduler);
        Some(animator)
    }

    /// Request the first frame. Does nothing if already running.
    pub fn start<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Running;
            scheduler.request_frame();
        }
    }

    /// Run one frame: update, draw, then ask for the next frame.
    pub fn animate<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) {
        if self.phase != Phase::Running {
            return;
        }
        self.field.update();
        self.field.draw(&mut self.surface);
        self.frames += 1;
        scheduler.request_frame();
    }

    /// Pick up the surface's current dimensions.
    pub fn resize(&mut self) {
        self.field.resize(self.surface.size());
    }

    pub fn pointer_moved(&mut self, position: Point) {
        self.field.set_pointer(position);
    }

    /// The pointer left the surface; stop pulling particles toward it.
    pub fn pointer_left(&mut self) {
        self.field.clear_pointer();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
