//! 2D rendering module
//!
//! The scene is described as a list of shape commands against an abstract
//! [`Surface`]. The browser backend draws them straight onto a canvas 2D context;
//! tests record them into a [`DisplayList`] and inspect the result.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::draw_scene;

use glam::Vec2;

/// RGBA color, alpha in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from a packed `0xRRGGBB` value
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// CSS color string
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Fill style
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Top-to-bottom gradient between two y coordinates
    VerticalGradient {
        y0: f32,
        y1: f32,
        top: Color,
        bottom: Color,
    },
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// Axis-aligned rectangle (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Text font (always drawn horizontally centered on its anchor)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
}

impl Font {
    pub const fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub const fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }

    /// CSS font shorthand
    pub fn to_css(&self) -> String {
        if self.bold {
            format!("bold {}px Arial", self.size)
        } else {
            format!("{}px Arial", self.size)
        }
    }
}

/// An opaque drawing target
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn fill_text(&mut self, text: &str, anchor: Vec2, font: Font, color: Color);
}

/// One recorded drawing command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear { width: f32, height: f32 },
    FillRect { rect: Rect, paint: Paint },
    StrokeRect { rect: Rect, color: Color, line_width: f32 },
    FillCircle { center: Vec2, radius: f32, color: Color },
    FillPolygon { points: Vec<Vec2>, color: Color },
    FillText { text: String, anchor: Vec2, font: Font, color: Color },
}

/// Surface that records commands instead of drawing them
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub commands: Vec<DrawCmd>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for DisplayList {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCmd::Clear { width, height });
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCmd::FillRect {
            rect,
            paint: paint.clone(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        self.commands.push(DrawCmd::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCmd::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCmd::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_text(&mut self, text: &str, anchor: Vec2, font: Font, color: Color) {
        self.commands.push(DrawCmd::FillText {
            text: text.to_string(),
            anchor,
            font,
            color,
        });
    }
}
