//! Overlay drawing on preview frames.
//!
//! `Annotator` is a thin facade over a `Canvas`: it picks the colour, stroke
//! and font, and the canvas does the rasterising. Drawing mutates the canvas
//! in place. Nothing drawn here reaches any saved copy of the frame; take such
//! copies before annotating.

mod recording;

#[cfg(feature = "gui")]
mod mat;

use anyhow::Result;

use crate::geometry::{Point, Rect};

pub use recording::{DrawCall, RecordingCanvas};

/// Stroke width of bounding box outlines, in pixels.
pub const BOX_THICKNESS: i32 = 2;

/// Text rendering used for every label.
pub const LABEL_STYLE: TextStyle = TextStyle {
    font: Font::HersheyComplexSmall,
    scale: 1.0,
    thickness: 2,
};

/// RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(0xFF, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::RED
    }
}

impl From<[u8; 3]> for Color {
    fn from(value: [u8; 3]) -> Self {
        Color::rgb(value[0], value[1], value[2])
    }
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    HersheyComplexSmall,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub scale: f64,
    pub thickness: i32,
}

/// Raster surface the annotator draws on.
pub trait Canvas {
    /// Draw an unfilled rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: i32) -> Result<()>;

    /// Draw `text` with its top-left corner at `origin`.
    fn draw_text(&mut self, origin: Point, text: &str, style: TextStyle, color: Color)
        -> Result<()>;
}

/// Drawing facade with a fixed default colour.
#[derive(Clone, Copy, Debug, Default)]
pub struct Annotator {
    default_color: Color,
}

impl Annotator {
    pub fn new(default_color: Color) -> Self {
        Self { default_color }
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Outline `rect` with a 2 px stroke in `outline`, or the default colour.
    ///
    /// `fill` is accepted but never applied: boxes are always drawn hollow and
    /// do not cover what lies beneath them.
    pub fn bounding_box<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        rect: Rect,
        outline: Option<Color>,
        _fill: Option<Color>,
    ) -> Result<()> {
        let outline = outline.unwrap_or(self.default_color);
        canvas.stroke_rect(rect, outline, BOX_THICKNESS)
    }

    /// Draw `text` with its top-left corner at `location`.
    pub fn text<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        location: Point,
        text: &str,
        color: Option<Color>,
    ) -> Result<()> {
        let color = color.unwrap_or(self.default_color);
        canvas.draw_text(location, text, LABEL_STYLE, color)
    }
}
