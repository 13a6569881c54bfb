//! Pointer trail with fading sparks.

use std::collections::VecDeque;

use rand::Rng;

use crate::color::Rgb;
use crate::geometry::Point;
use crate::surface::{Glow, Surface};

/// Pointer samples kept in the history.
pub const MAX_TRAIL: usize = 20;

/// Chance that a pointer move leaves a spark behind.
const SPARK_CHANCE: f64 = 0.1;
const SPARK_COLOR: Rgb = Rgb(0, 217, 255);
const SPARK_ALPHA: f32 = 0.6;
const SPARK_RADIUS: f32 = 1.5;
const SPARK_HALO: f32 = 10.0;
/// Time a spark stays at full strength.
const SPARK_HOLD_MS: u64 = 50;
/// Time a spark takes to fade and shrink away after the hold.
const SPARK_FADE_MS: u64 = 500;

/// One recorded pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Point,
    pub at_ms: u64,
}

/// Recent pointer positions and the sparks they left.
#[derive(Debug, Clone)]
pub struct CursorTrail {
    history: VecDeque<TrailPoint>,
    sparks: Vec<TrailPoint>,
    spark_chance: f64,
}

impl Default for CursorTrail {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorTrail {
    pub fn new() -> Self {
        Self::with_spark_chance(SPARK_CHANCE)
    }

    /// A trail whose moves emit sparks with the given probability.
    pub fn with_spark_chance(chance: f64) -> Self {
        Self {
            history: VecDeque::with_capacity(MAX_TRAIL + 1),
            sparks: Vec::new(),
            spark_chance: chance.clamp(0.0, 1.0),
        }
    }

    /// Record a pointer move at `now_ms`.
    pub fn record<R: Rng + ?Sized>(&mut self, rng: &mut R, position: Point, now_ms: u64) {
        let point = TrailPoint {
            position,
            at_ms: now_ms,
        };
        self.history.push_back(point);
        if self.history.len() > MAX_TRAIL {
            self.history.pop_front();
        }
        if rng.random_bool(self.spark_chance) {
            self.sparks.push(point);
        }
    }

    pub fn history(&self) -> impl Iterator<Item = &TrailPoint> {
        self.history.iter()
    }

    pub fn sparks(&self) -> &[TrailPoint] {
        &self.sparks
    }

    /// Drop sparks that have fully faded by `now_ms`.
    pub fn prune(&mut self, now_ms: u64) {
        self.sparks.retain(|s| now_ms.saturating_sub(s.at_ms) < SPARK_HOLD_MS + SPARK_FADE_MS);
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, now_ms: u64) {
        for spark in &self.sparks {
            let strength = spark_strength(now_ms.saturating_sub(spark.at_ms));
            if strength <= 0.0 {
                continue;
            }
            surface.fill_glow(
                spark.position,
                Glow {
                    color: SPARK_COLOR.alpha(SPARK_ALPHA * strength),
                    radius: (SPARK_RADIUS + SPARK_HALO / 2.0) * strength,
                    fade_radius: (SPARK_RADIUS + SPARK_HALO) * strength,
                },
            );
        }
    }
}

/// Scale of a spark `age_ms` after it was emitted, from 1 down to 0.
fn spark_strength(age_ms: u64) -> f32 {
    if age_ms <= SPARK_HOLD_MS {
        1.0
    } else {
        let t = (age_ms - SPARK_HOLD_MS) as f32 / SPARK_FADE_MS as f32;
        (1.0 - t).max(0.0)
    }
}
