//! Particle bursts (stateful, short-lived).

use std::f32::consts::TAU;

use rand::Rng;

use crate::color::Rgb;
use crate::geometry::Point;
use crate::surface::{Glow, Surface};

/// Cyan, violet and emerald.
pub const BURST_PALETTE: &[Rgb] = &[Rgb(0, 217, 255), Rgb(139, 92, 246), Rgb(16, 185, 129)];

/// Sparks per burst unless told otherwise.
pub const DEFAULT_SPARKS: usize = 20;

const GRAVITY: f32 = 0.1;
const DECAY: f32 = 0.02;

/// State for a single burst spark.
#[derive(Debug, Clone)]
pub struct Spark {
    pub position: Point,
    pub velocity: Point,
    pub radius: f32,
    pub color: Rgb,
    /// Remaining life, also used as opacity; starts at 1.
    pub life: f32,
}

/// A ring of sparks flung out from one point, falling under gravity.
#[derive(Debug, Clone)]
pub struct Burst {
    sparks: Vec<Spark>,
}

impl Burst {
    /// Spawn `count` sparks evenly spaced by angle around `origin`.
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        origin: Point,
        count: usize,
        palette: &[Rgb],
    ) -> Self {
        let sparks = (0..count)
            .map(|i| {
                let angle = TAU * i as f32 / count as f32;
                let speed = 2.0 + rng.random::<f32>() * 2.0;
                let color = if palette.is_empty() {
                    BURST_PALETTE[0]
                } else {
                    palette[rng.random_range(0..palette.len())]
                };
                Spark {
                    position: origin,
                    velocity: Point::new(angle.cos() * speed, angle.sin() * speed),
                    radius: 2.0 + rng.random::<f32>() * 2.0,
                    color,
                    life: 1.0,
                }
            })
            .collect();
        Self { sparks }
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    /// Move, pull down and fade every spark; drop the dead ones.
    pub fn tick(&mut self) {
        for spark in &mut self.sparks {
            spark.position = spark.position + spark.velocity;
            spark.velocity.y += GRAVITY;
            spark.life -= DECAY;
        }
        self.sparks.retain(|s| s.life > 0.0);
    }

    pub fn is_done(&self) -> bool {
        self.sparks.is_empty()
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for spark in &self.sparks {
            surface.fill_glow(
                spark.position,
                Glow {
                    color: spark.color.alpha(spark.life),
                    radius: spark.radius * 2.0,
                    fade_radius: spark.radius * 4.0,
                },
            );
        }
    }
}

/// All bursts currently in flight.
#[derive(Debug, Clone, Default)]
pub struct Bursts {
    active: Vec<Burst>,
}

impl Bursts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a default burst at `origin`.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, origin: Point) {
        self.active.push(Burst::new(rng, origin, DEFAULT_SPARKS, BURST_PALETTE));
    }

    pub fn tick(&mut self) {
        for burst in &mut self.active {
            burst.tick();
        }
        self.active.retain(|b| !b.is_done());
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for burst in &self.active {
            burst.draw(surface);
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    use crate::geometry::Size;
    use crate::surface::{DrawCall, RecordingSurface};

    #[test]
    fn test_sparks_spread_evenly() {
        let mut rng = StdRng::seed_from_u64(9);
        let burst = Burst::new(&mut rng, Point::new(50.0, 50.0), 4, BURST_PALETTE);

        let sparks = burst.sparks();
        assert_eq!(sparks.len(), 4);
        // First spark heads right, second straight down (surface y grows down).
        assert!(sparks[0].velocity.x > 0.0 && sparks[0].velocity.y.abs() < 1e-5);
        assert!(sparks[1].velocity.y > 0.0 && sparks[1].velocity.x.abs() < 1e-5);
        for s in sparks {
            let speed = s.velocity.length();
            assert!((2.0..4.0).contains(&speed));
            assert!((2.0..4.0).contains(&s.radius));
            assert!(BURST_PALETTE.contains(&s.color));
            assert_eq!(s.life, 1.0);
        }
    }

    #[test]
    fn test_gravity_and_decay() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut burst = Burst::new(&mut rng, Point::default(), 1, BURST_PALETTE);
        let vy = burst.sparks()[0].velocity.y;
        burst.tick();

        let spark = &burst.sparks()[0];
        assert!((spark.velocity.y - (vy + 0.1)).abs() < 1e-6);
        assert!((spark.life - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_burst_burns_out() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut bursts = Bursts::new();
        bursts.spawn(&mut rng, Point::new(100.0, 100.0));
        assert_eq!(bursts.len(), 1);

        for _ in 0..49 {
            bursts.tick();
        }
        assert!(!bursts.is_empty());
        bursts.tick();
        bursts.tick();
        assert!(bursts.is_empty());
    }

    #[test]
    fn test_draw_fades_with_life() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut burst = Burst::new(&mut rng, Point::default(), 3, BURST_PALETTE);
        for _ in 0..10 {
            burst.tick();
        }
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        burst.draw(&mut surface);

        assert_eq!(surface.calls().len(), 3);
        for call in surface.calls() {
            match call {
                DrawCall::Glow { glow, .. } => assert!((glow.color.alpha - 0.8).abs() < 1e-4),
                other => panic!("unexpected call {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let mut rng = StdRng::seed_from_u64(9);
        let burst = Burst::new(&mut rng, Point::default(), 2, &[]);
        assert!(burst.sparks().iter().all(|s| s.color == BURST_PALETTE[0]));
    }
}
