//! Pixel-space geometry for overlays.

use crate::detect::Detection;

/// Pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel rectangle given by opposite corners `(x1, y1)` and `(x2, y2)`.
///
/// `x1 <= x2` and `y1 <= y2` by convention only; nothing enforces it and
/// corners may lie outside the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

/// Map a detection's normalized box onto a `frame_width` × `frame_height`
/// frame.
///
/// Each coordinate is scaled and truncated toward zero. Values are not
/// clamped, so malformed boxes outside 0..1 land outside the frame.
pub fn to_screen_space(detection: &Detection, frame_width: u32, frame_height: u32) -> Rect {
    let bbox = &detection.bounding_box;
    let w = frame_width as f32;
    let h = frame_height as f32;
    Rect {
        x1: (bbox.x_min * w) as i32,
        y1: (bbox.y_min * h) as i32,
        x2: (bbox.x_max * w) as i32,
        y2: (bbox.y_max * h) as i32,
    }
}
