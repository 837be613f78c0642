// surface.rs - conway::Surface that records egui shapes

use conway::{Color, Surface};
use egui::{Color32, Pos2, Rect, Shape, Stroke, vec2};

pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

pub fn from_color32(color: Color32) -> Color {
    Color::rgb(color.r(), color.g(), color.b())
}

/// Collects shapes in coordinates relative to the top-left of `canvas`.
/// Cells entirely outside the canvas are dropped.
pub struct ShapeSurface {
    canvas: Rect,
    shapes: Vec<Shape>,
}

impl ShapeSurface {
    pub fn new(canvas: Rect) -> Self {
        Self {
            canvas,
            shapes: Vec::new(),
        }
    }

    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }

    fn rect(&self, x: f32, y: f32, width: f32, height: f32) -> Option<Rect> {
        let rect = Rect::from_min_size(self.canvas.min + vec2(x, y), vec2(width, height));
        self.canvas.intersects(rect).then_some(rect)
    }
}

impl Surface for ShapeSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.shapes.clear();
        let rect = Rect::from_min_size(self.canvas.min, vec2(width, height));
        self.shapes.push(Shape::rect_filled(rect, 0.0, Color32::BLACK));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        if let Some(rect) = self.rect(x, y, width, height) {
            self.shapes
                .push(Shape::rect_filled(rect, 0.0, to_color32(color)));
        }
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        if let Some(rect) = self.rect(x, y, width, height) {
            self.shapes
                .push(Shape::rect_stroke(rect, 0.0, Stroke::new(0.5, to_color32(color))));
        }
    }
}

/// Last rendered frame, replayed while the simulation is unchanged.
pub struct CachedFrame {
    pub canvas: Rect,
    pub shapes: Vec<Shape>,
}

/// Surface-relative position of a screen point.
pub fn local(canvas: Rect, pos: Pos2) -> (f32, f32) {
    let offset = pos - canvas.min;
    (offset.x, offset.y)
}
