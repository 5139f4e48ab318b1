//! Canvas 2D backend (WASM only)

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, Font, Paint, Rect, Surface};

/// Draws straight onto an HTML canvas
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Grab the 2D context of a canvas. `None` if the browser refuses it.
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    fn set_paint(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::VerticalGradient {
                y0,
                y1,
                top,
                bottom,
            } => {
                let gradient = self
                    .ctx
                    .create_linear_gradient(0.0, *y0 as f64, 0.0, *y1 as f64);
                if gradient.add_color_stop(0.0, &top.to_css()).is_err()
                    || gradient.add_color_stop(1.0, &bottom.to_css()).is_err()
                {
                    log::warn!("Gradient rejected, falling back to solid fill");
                    self.ctx.set_fill_style_str(&top.to_css());
                    return;
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.set_paint(paint);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width as f64);
        self.ctx
            .stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, anchor: Vec2, font: Font, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(&font.to_css());
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(text, anchor.x as f64, anchor.y as f64);
    }
}
