//! Terminal surface backed by a ratatui braille canvas.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Line as CanvasLine, Painter, Shape},
    },
};

use crate::color::{Rgb, Rgba};
use crate::geometry::{Point, Size};
use crate::surface::{DrawCall, Glow, Stroke, Surface};

/// Colours fainter than this are not drawn; they would only overwrite
/// brighter neighbours sharing the same cell.
const MIN_VISIBLE_ALPHA: f32 = 0.02;

/// Braille dots per terminal cell.
const DOTS_PER_CELL_X: f32 = 2.0;
const DOTS_PER_CELL_Y: f32 = 4.0;

/// A surface mapped onto a terminal area.
///
/// Each cell stands for `cell_width × cell_height` virtual pixels. Drawing
/// calls are kept as a display list and turned into a [`Canvas`] when the
/// surface is rendered as a widget.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    area: Rect,
    cell_width: u16,
    cell_height: u16,
    backdrop: Rgb,
    ops: Vec<DrawCall>,
}

impl CanvasSurface {
    /// Surface for `area`, or `None` if there is nothing to draw on.
    pub fn for_area(area: Rect, cell_width: u16, cell_height: u16, backdrop: Rgb) -> Option<Self> {
        if area.is_empty() || cell_width == 0 || cell_height == 0 {
            tracing::warn!(?area, cell_width, cell_height, "no drawable area");
            return None;
        }
        Some(Self {
            area,
            cell_width,
            cell_height,
            backdrop,
            ops: Vec::new(),
        })
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Move or resize the terminal area this surface covers.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn backdrop(&self) -> Rgb {
        self.backdrop
    }

    /// Convert a terminal cell to the surface point at its centre.
    ///
    /// Returns `None` for cells outside the area.
    pub fn cell_to_point(&self, column: u16, row: u16) -> Option<Point> {
        if !self.area.contains(Position::new(column, row)) {
            return None;
        }
        let cw = f32::from(self.cell_width);
        let ch = f32::from(self.cell_height);
        Some(Point::new(
            f32::from(column - self.area.x) * cw + cw / 2.0,
            f32::from(row - self.area.y) * ch + ch / 2.0,
        ))
    }

    fn dot_spacing(&self) -> (f64, f64) {
        (
            f64::from(f32::from(self.cell_width) / DOTS_PER_CELL_X),
            f64::from(f32::from(self.cell_height) / DOTS_PER_CELL_Y),
        )
    }

    fn visible(&self, color: Rgba) -> Option<ratatui::style::Color> {
        (color.alpha >= MIN_VISIBLE_ALPHA).then(|| color.over(self.backdrop).into())
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(
            f32::from(self.area.width) * f32::from(self.cell_width),
            f32::from(self.area.height) * f32::from(self.cell_height),
        )
    }

    fn clear(&mut self) {
        self.ops.clear();
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.ops.push(DrawCall::Line { from, to, stroke });
    }

    fn fill_glow(&mut self, center: Point, glow: Glow) {
        self.ops.push(DrawCall::Glow { center, glow });
    }
}

impl Widget for &CanvasSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // The terminal may have shrunk before the resize event arrives.
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        let size = self.size();
        let height = f64::from(size.height);
        // Canvas y grows upward, surface y grows downward.
        let flip = |y: f32| height - f64::from(y);
        let (step_x, step_y) = self.dot_spacing();

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(self.backdrop.into())
            .x_bounds([0.0, f64::from(size.width)])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for op in &self.ops {
                    match op {
                        DrawCall::Clear => {}
                        DrawCall::Line { from, to, stroke } => {
                            if let Some(color) = self.visible(stroke.color) {
                                ctx.draw(&CanvasLine::new(
                                    f64::from(from.x),
                                    flip(from.y),
                                    f64::from(to.x),
                                    flip(to.y),
                                    color,
                                ));
                            }
                        }
                        DrawCall::Glow { center, glow } => {
                            ctx.draw(&GlowShape {
                                x: f64::from(center.x),
                                y: flip(center.y),
                                glow: *glow,
                                backdrop: self.backdrop,
                                step_x,
                                step_y,
                            });
                        }
                    }
                }
            })
            .render(area, buf);
    }
}

/// A glow sampled at braille dot resolution.
struct GlowShape {
    x: f64,
    y: f64,
    glow: Glow,
    backdrop: Rgb,
    step_x: f64,
    step_y: f64,
}

impl Shape for GlowShape {
    fn draw(&self, painter: &mut Painter) {
        let radius = f64::from(self.glow.radius);
        let reach_x = (radius / self.step_x).floor() as i32;
        let reach_y = (radius / self.step_y).floor() as i32;

        // Outer dots first so the brighter centre wins a shared cell.
        let mut dots: Vec<(f64, f64, f32)> = Vec::new();
        for i in -reach_x..=reach_x {
            for j in -reach_y..=reach_y {
                let dx = f64::from(i) * self.step_x;
                let dy = f64::from(j) * self.step_y;
                let distance = dx.hypot(dy) as f32;
                if distance <= self.glow.radius {
                    dots.push((dx, dy, distance));
                }
            }
        }
        dots.sort_by(|a, b| b.2.total_cmp(&a.2));

        for (dx, dy, distance) in dots {
            // The centre always shows, however small the disc.
            let alpha = if distance == 0.0 {
                self.glow.color.alpha
            } else {
                self.glow.alpha_at(distance)
            };
            if alpha < MIN_VISIBLE_ALPHA {
                continue;
            }
            if let Some((px, py)) = painter.get_point(self.x + dx, self.y + dy) {
                let color = self.glow.color.rgb.alpha(alpha).over(self.backdrop);
                painter.paint(px, py, color.into());
            }
        }
    }
}
