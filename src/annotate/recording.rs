use anyhow::Result;

use super::{Canvas, Color, TextStyle};
use crate::geometry::{Point, Rect};

/// One primitive drawn on a `RecordingCanvas`.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Rect {
        rect: Rect,
        color: Color,
        thickness: i32,
    },
    Text {
        origin: Point,
        text: String,
        style: TextStyle,
        color: Color,
    },
}

/// Canvas that records draw calls instead of rasterising them.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                DrawCall::Rect { .. } => None,
            })
            .collect()
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Rect { rect, .. } => Some(*rect),
                DrawCall::Text { .. } => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: i32) -> Result<()> {
        self.calls.push(DrawCall::Rect {
            rect,
            color,
            thickness,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        origin: Point,
        text: &str,
        style: TextStyle,
        color: Color,
    ) -> Result<()> {
        self.calls.push(DrawCall::Text {
            origin,
            text: text.to_string(),
            style,
            color,
        });
        Ok(())
    }
}
