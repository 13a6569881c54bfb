//! The particle field simulation.

use plexus_core::{Attraction, FieldParams, ParticleColor};
use rand::Rng;

use crate::color::{Rgb, hsl_to_rgb};
use crate::edges::{self, Edge};
use crate::geometry::{Point, Size};
use crate::particle::Particle;
use crate::surface::{Glow, Stroke, Surface};

/// A fixed set of drifting particles joined by proximity edges.
#[derive(Debug, Clone)]
pub struct ParticleField {
    params: FieldParams,
    /// Bounds used by the wrap rule, updated on resize.
    bounds: Size,
    particles: Vec<Particle>,
    /// Edges for the current positions, rebuilt on every update.
    edges: Vec<Edge>,
    /// Last known pointer position, `None` until the pointer first moves.
    pointer: Option<Point>,
}

impl ParticleField {
    /// Spawn `params.count_of(bounds.width)` particles inside `bounds`.
    pub fn init<R: Rng + ?Sized>(params: FieldParams, bounds: Size, rng: &mut R) -> Self {
        let count = params.count_of(bounds.width);
        let particles = (0..count)
            .map(|_| Particle::spawn(rng, bounds, &params))
            .collect();
        tracing::debug!(
            count,
            width = bounds.width,
            height = bounds.height,
            "particle field initialized"
        );
        Self::from_particles(params, bounds, particles)
    }

    /// Build a field around existing particles.
    pub fn from_particles(params: FieldParams, bounds: Size, particles: Vec<Particle>) -> Self {
        let mut field = Self {
            params,
            bounds,
            particles,
            edges: Vec::new(),
            pointer: None,
        };
        field.rebuild_edges();
        field
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Store new surface bounds.
    ///
    /// Particles are left where they are; any now outside the bounds wrap on
    /// their next update.
    pub fn resize(&mut self, bounds: Size) {
        if bounds != self.bounds {
            tracing::debug!(width = bounds.width, height = bounds.height, "field resized");
            self.bounds = bounds;
        }
    }

    /// Record the pointer position for the next update.
    pub fn set_pointer(&mut self, position: Point) {
        self.pointer = Some(position);
    }

    /// Forget the pointer, e.g. when it leaves the surface.
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Advance the simulation by one tick.
    pub fn update(&mut self) {
        let attractor = self.params.attraction.zip(self.pointer);

        for particle in &mut self.particles {
            particle.advance(self.bounds);

            if let Some((attraction, pointer)) = attractor {
                attract(particle, pointer, &attraction);
            }

            if particle.speed() > self.params.speed_cap {
                particle.velocity.x *= self.params.damping;
                particle.velocity.y *= self.params.damping;
            }
        }

        self.rebuild_edges();
    }

    fn rebuild_edges(&mut self) {
        edges::connect(
            &self.particles,
            self.params.connection_distance,
            self.params.edge_opacity,
            &mut self.edges,
        );
    }

    /// Render edges, then particles on top of them.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();

        let (r, g, b) = self.params.edge_color;
        let edge_rgb = Rgb(r, g, b);
        for edge in &self.edges {
            surface.stroke_line(
                self.particles[edge.a].position,
                self.particles[edge.b].position,
                Stroke {
                    color: edge_rgb.alpha(edge.opacity),
                    width: self.params.edge_width,
                },
            );
        }

        for particle in &self.particles {
            let rgb = self.particle_rgb(particle);
            surface.fill_glow(
                particle.position,
                Glow {
                    color: rgb.alpha(particle.opacity),
                    radius: particle.radius,
                    fade_radius: particle.radius * self.params.glow_scale,
                },
            );
        }
    }

    fn particle_rgb(&self, particle: &Particle) -> Rgb {
        match (particle.hue, self.params.color) {
            (Some(hue), _) => hsl_to_rgb(hue, 1.0, 0.6),
            (None, ParticleColor::Fixed(r, g, b)) => Rgb(r, g, b),
            (None, ParticleColor::Hue { min, .. }) => hsl_to_rgb(min, 1.0, 0.6),
        }
    }
}

/// Nudge `particle` toward `pointer`, harder the closer it is.
fn attract(particle: &mut Particle, pointer: Point, attraction: &Attraction) {
    let offset = pointer - particle.position;
    let distance = offset.length();
    if distance < attraction.radius {
        let force = (attraction.radius - distance) / attraction.radius * attraction.strength;
        particle.velocity.x += offset.x * force * attraction.scale;
        particle.velocity.y += offset.y * force * attraction.scale;
    }
}
