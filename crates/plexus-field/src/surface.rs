//! The drawing target the field renders onto.

use crate::color::Rgba;
use crate::geometry::{Point, Size};

/// How a line is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

/// A filled disc with a radial alpha gradient.
///
/// The disc covers `radius`; alpha falls linearly from `color.alpha` at the
/// centre to zero at `fade_radius`, which may lie outside the disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    pub radius: f32,
    pub fade_radius: f32,
}

impl Glow {
    /// Alpha at `distance` from the centre.
    pub fn alpha_at(&self, distance: f32) -> f32 {
        if distance > self.radius || self.fade_radius <= 0.0 {
            return 0.0;
        }
        (self.color.alpha * (1.0 - distance / self.fade_radius)).max(0.0)
    }
}

/// A raster target with 2D drawing primitives.
pub trait Surface {
    /// Current dimensions in surface space.
    fn size(&self) -> Size;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke);

    fn fill_glow(&mut self, center: Point, glow: Glow);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Line { from: Point, to: Point, stroke: Stroke },
    Glow { center: Point, glow: Glow },
}

/// A surface that only remembers what was drawn on it.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            calls: Vec::new(),
        }
    }

    /// Change the reported size, as a window resize would.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Every call since creation.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Calls since the most recent clear.
    pub fn frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .map_or(0, |i| i + 1);
        &self.calls[start..]
    }

    /// Number of clears seen, one per rendered frame.
    pub fn frames_drawn(&self) -> usize {
        self.calls.iter().filter(|c| **c == DrawCall::Clear).count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.calls.push(DrawCall::Line { from, to, stroke });
    }

    fn fill_glow(&mut self, center: Point, glow: Glow) {
        self.calls.push(DrawCall::Glow { center, glow });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_glow_alpha_profile() {
        let glow = Glow {
            color: Rgb(0, 217, 255).alpha(0.6),
            radius: 2.0,
            fade_radius: 6.0,
        };
        assert!((glow.alpha_at(0.0) - 0.6).abs() < 1e-6);
        assert!((glow.alpha_at(1.5) - 0.45).abs() < 1e-6);
        assert_eq!(glow.alpha_at(2.5), 0.0);
    }

    #[test]
    fn test_recording_frame_starts_after_last_clear() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        let glow = Glow {
            color: Rgb(1, 1, 1).alpha(1.0),
            radius: 1.0,
            fade_radius: 1.0,
        };
        surface.clear();
        surface.fill_glow(Point::new(1.0, 1.0), glow);
        surface.clear();
        surface.fill_glow(Point::new(2.0, 2.0), glow);

        assert_eq!(surface.frames_drawn(), 2);
        assert_eq!(
            surface.frame(),
            &[DrawCall::Glow {
                center: Point::new(2.0, 2.0),
                glow
            }]
        );
    }
}
