//! Particle field profiles and their tuning parameters.

use serde::{Deserialize, Serialize};

/// Which particle field variant to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Sparse, pointer-reactive field behind the main screen.
    #[default]
    Background,
    /// Denser, brighter field on the splash screen.
    Splash,
}

impl Profile {
    /// Tuning parameters for this profile.
    pub fn params(self) -> FieldParams {
        match self {
            Profile::Background => FieldParams {
                max_count: 60,
                spacing: 25.0,
                max_velocity: 0.15,
                radius_range: (0.5, 2.0),
                opacity_range: (0.2, 0.6),
                color: ParticleColor::Hue {
                    min: 180.0,
                    max: 220.0,
                },
                connection_distance: 180.0,
                edge_opacity: 0.3,
                edge_width: 0.8,
                edge_color: (0, 190, 234),
                attraction: Some(Attraction::default()),
                speed_cap: 0.5,
                damping: 0.95,
                glow_scale: 3.0,
            },
            Profile::Splash => FieldParams {
                max_count: 80,
                spacing: 20.0,
                max_velocity: 0.25,
                radius_range: (1.0, 3.0),
                opacity_range: (0.3, 0.8),
                color: ParticleColor::Fixed(0, 217, 255),
                connection_distance: 150.0,
                edge_opacity: 0.4,
                edge_width: 1.0,
                edge_color: (0, 190, 234),
                attraction: None,
                speed_cap: 0.5,
                damping: 0.95,
                glow_scale: 3.0,
            },
        }
    }

    /// Short lowercase name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Profile::Background => "background",
            Profile::Splash => "splash",
        }
    }
}

/// Pull toward the pointer applied inside `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attraction {
    /// Distance beyond which the pointer has no effect.
    pub radius: f32,
    /// Force at zero distance, falling off linearly to zero at `radius`.
    pub strength: f32,
    /// Multiplier applied to the pointer offset when nudging velocity.
    pub scale: f32,
}

impl Default for Attraction {
    fn default() -> Self {
        Self {
            radius: 200.0,
            strength: 0.01,
            scale: 0.001,
        }
    }
}

/// How particles are tinted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleColor {
    /// Random hue in `[min, max)` at full saturation, 60% lightness.
    Hue { min: f32, max: f32 },
    /// One RGB colour for every particle.
    Fixed(u8, u8, u8),
}

/// Numbers that shape a particle field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Upper bound on the particle count.
    pub max_count: usize,
    /// Surface width consumed per particle.
    pub spacing: f32,
    /// Velocity components are sampled from `[-max_velocity, max_velocity)`.
    pub max_velocity: f32,
    pub radius_range: (f32, f32),
    pub opacity_range: (f32, f32),
    pub color: ParticleColor,
    /// Edges form between particles closer than this.
    pub connection_distance: f32,
    /// Opacity of an edge between two coincident particles.
    pub edge_opacity: f32,
    pub edge_width: f32,
    pub edge_color: (u8, u8, u8),
    pub attraction: Option<Attraction>,
    /// Speed above which velocity is damped.
    pub speed_cap: f32,
    pub damping: f32,
    /// Glow radius as a multiple of the particle radius.
    pub glow_scale: f32,
}

impl FieldParams {
    /// Number of particles to spawn on a surface of the given width.
    pub fn count_of(&self, width: f32) -> usize {
        // NaN and negative widths saturate to zero.
        ((width / self.spacing).floor() as usize).min(self.max_count)
    }

    /// Replace the pointer attraction, `None` disables it.
    pub fn with_attraction(mut self, attraction: Option<Attraction>) -> Self {
        self.attraction = attraction;
        self
    }
}

impl Default for FieldParams {
    fn default() -> Self {
        Profile::default().params()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_of_background() {
        let params = Profile::Background.params();
        assert_eq!(params.count_of(1000.0), 40);
        assert_eq!(params.count_of(24.0), 0);
        assert_eq!(params.count_of(25.0), 1);
        assert_eq!(params.count_of(10_000.0), 60);
    }

    #[test]
    fn test_count_of_splash() {
        let params = Profile::Splash.params();
        assert_eq!(params.count_of(1000.0), 50);
        assert_eq!(params.count_of(1600.0), 80);
        assert_eq!(params.count_of(5000.0), 80);
    }

    #[test]
    fn test_count_of_degenerate_widths() {
        let params = Profile::Background.params();
        assert_eq!(params.count_of(0.0), 0);
        assert_eq!(params.count_of(-100.0), 0);
        assert_eq!(params.count_of(f32::NAN), 0);
    }

    #[test]
    fn test_count_of_is_monotonic() {
        for profile in [Profile::Background, Profile::Splash] {
            let params = profile.params();
            let mut previous = 0;
            for w in 0..4000 {
                let n = params.count_of(w as f32);
                assert!(n >= previous);
                assert!(n <= params.max_count);
                previous = n;
            }
        }
    }

    #[test]
    fn test_only_background_attracts() {
        assert!(Profile::Background.params().attraction.is_some());
        assert!(Profile::Splash.params().attraction.is_none());
        let calm = Profile::Background.params().with_attraction(None);
        assert!(calm.attraction.is_none());
    }
}
