//! Animation speed and accent colour settings.

use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Frame rate of the drive loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Frames per second.
    pub fn fps(self) -> u32 {
        match self {
            AnimationSpeed::Slow => 20,
            AnimationSpeed::Medium => 30,
            AnimationSpeed::Fast => 60,
        }
    }

    /// Time between two frame ticks.
    pub fn frame_interval(self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps()))
    }

    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }
}

/// Accent colour for captions, counters and help text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Cyan,
    Violet,
    Emerald,
    White,
}

impl ColorTheme {
    /// Cycle to the next colour theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::Cyan => ColorTheme::Violet,
            ColorTheme::Violet => ColorTheme::Emerald,
            ColorTheme::Emerald => ColorTheme::White,
            ColorTheme::White => ColorTheme::Cyan,
        }
    }

    /// RGB components of the theme colour.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::Cyan => (0, 217, 255),
            ColorTheme::Violet => (139, 92, 246),
            ColorTheme::Emerald => (16, 185, 129),
            ColorTheme::White => (232, 245, 233),
        }
    }

    /// Convert theme to a ratatui colour.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }
}
