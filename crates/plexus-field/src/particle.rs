//! A single drifting particle.

use plexus_core::{FieldParams, ParticleColor};
use rand::Rng;

use crate::geometry::{Point, Size};

/// State for one particle in the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Point,
    pub radius: f32,
    /// Peak alpha at the centre of the glow.
    pub opacity: f32,
    /// Hue in degrees, `None` for fixed-colour profiles.
    pub hue: Option<f32>,
}

impl Particle {
    /// A particle with the given position and velocity and neutral looks.
    pub fn new(position: Point, velocity: Point) -> Self {
        Self {
            position,
            velocity,
            radius: 1.0,
            opacity: 0.5,
            hue: None,
        }
    }

    /// Sample a particle uniformly inside `bounds`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Size, params: &FieldParams) -> Self {
        let mut position = Point::new(
            rng.random::<f32>() * bounds.width,
            rng.random::<f32>() * bounds.height,
        );
        // Rounding can land a sample exactly on the far edge.
        position.x = wrap_axis(position.x, bounds.width);
        position.y = wrap_axis(position.y, bounds.height);

        let v = params.max_velocity;
        let velocity = Point::new(sample(rng, -v, v), sample(rng, -v, v));
        let hue = match params.color {
            ParticleColor::Hue { min, max } => Some(sample(rng, min, max)),
            ParticleColor::Fixed(..) => None,
        };

        Self {
            position,
            velocity,
            radius: sample(rng, params.radius_range.0, params.radius_range.1),
            opacity: sample(rng, params.opacity_range.0, params.opacity_range.1),
            hue,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Move by one tick of velocity and wrap around the edges.
    pub fn advance(&mut self, bounds: Size) {
        self.position = self.position + self.velocity;
        self.position.x = wrap_axis(self.position.x, bounds.width);
        self.position.y = wrap_axis(self.position.y, bounds.height);
    }
}

/// Uniform sample in `[lo, hi)` that tolerates an empty range.
fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Hard wrap of one coordinate into `[0, bound)`.
///
/// Leaving through the low edge lands just inside the high edge, leaving
/// through the high edge lands on zero. This is not a modulo: a coordinate far
/// outside the range still snaps to one of the two edges.
pub fn wrap_axis(value: f32, bound: f32) -> f32 {
    if value < 0.0 {
        last_inside(bound)
    } else if value >= bound {
        0.0
    } else {
        value
    }
}

/// Largest coordinate strictly below `bound`, or zero for an empty axis.
fn last_inside(bound: f32) -> f32 {
    if bound > 0.0 {
        bound * (1.0 - f32::EPSILON)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_core::Profile;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_wrap_axis() {
        assert_eq!(wrap_axis(50.0, 100.0), 50.0);
        assert_eq!(wrap_axis(100.0, 100.0), 0.0);
        assert_eq!(wrap_axis(250.0, 100.0), 0.0);
        let low = wrap_axis(-0.1, 100.0);
        assert!(low < 100.0 && low > 99.99);
    }

    #[test]
    fn test_wrap_axis_empty_bound() {
        assert_eq!(wrap_axis(-1.0, 0.0), 0.0);
        assert_eq!(wrap_axis(3.0, 0.0), 0.0);
    }

    #[test]
    fn test_last_inside_is_strictly_below() {
        for bound in [1.0_f32, 3.0, 800.0, 1000.0, 1600.0, 1921.5, 65_535.0] {
            let x = last_inside(bound);
            assert!(x < bound, "{x} >= {bound}");
            assert!(bound - x < 0.01);
        }
    }

    #[test]
    fn test_spawn_respects_profile_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = Size::new(800.0, 600.0);
        let params = Profile::Background.params();

        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, bounds, &params);
            assert!(p.position.x >= 0.0 && p.position.x < 800.0);
            assert!(p.position.y >= 0.0 && p.position.y < 600.0);
            assert!(p.velocity.x.abs() <= 0.15);
            assert!(p.velocity.y.abs() <= 0.15);
            assert!(p.radius >= 0.5 && p.radius < 2.0);
            assert!(p.opacity >= 0.2 && p.opacity < 0.6);
            let hue = p.hue.unwrap();
            assert!((180.0..220.0).contains(&hue));
        }
    }

    #[test]
    fn test_spawn_fixed_color_has_no_hue() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = Particle::spawn(&mut rng, Size::new(10.0, 10.0), &Profile::Splash.params());
        assert!(p.hue.is_none());
    }

    #[test]
    fn test_spawn_on_flat_surface_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = Particle::spawn(&mut rng, Size::new(100.0, 0.0), &Profile::Splash.params());
        assert_eq!(p.position.y, 0.0);
    }

    #[test]
    fn test_advance_wraps_both_axes() {
        let bounds = Size::new(100.0, 50.0);
        let mut p = Particle::new(Point::new(99.9, 0.1), Point::new(0.2, -0.2));
        p.advance(bounds);
        assert_eq!(p.position.x, 0.0);
        assert!(p.position.y < 50.0 && p.position.y > 49.9);
    }
}
