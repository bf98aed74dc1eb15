use anyhow::{Context, Result};
use opencv::core::{self as cv, Mat, Scalar};
use opencv::imgproc;

use super::{Canvas, Color, Font, TextStyle};
use crate::geometry::{Point, Rect};

// OpenCV frames are BGR.
fn scalar(color: Color) -> Scalar {
    Scalar::new(color.b as f64, color.g as f64, color.r as f64, 0.0)
}

fn point(p: Point) -> cv::Point {
    cv::Point::new(p.x, p.y)
}

fn font_face(font: Font) -> i32 {
    match font {
        Font::HersheyComplexSmall => imgproc::FONT_HERSHEY_COMPLEX_SMALL,
    }
}

impl Canvas for Mat {
    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: i32) -> Result<()> {
        imgproc::rectangle_points(
            self,
            point(rect.top_left()),
            point(rect.bottom_right()),
            scalar(color),
            thickness,
            imgproc::LINE_8,
            0,
        )
        .context("draw rectangle")
    }

    fn draw_text(
        &mut self,
        origin: Point,
        text: &str,
        style: TextStyle,
        color: Color,
    ) -> Result<()> {
        let face = font_face(style.font);
        let mut baseline = 0;
        let size = imgproc::get_text_size(text, face, style.scale, style.thickness, &mut baseline)
            .context("measure text")?;
        // put_text anchors at the baseline's left end. Shift down by the text
        // height so `origin` is the top-left corner, not the baseline.
        let anchor = cv::Point::new(origin.x, origin.y + size.height);
        imgproc::put_text(
            self,
            text,
            anchor,
            face,
            style.scale,
            scalar(color),
            style.thickness,
            imgproc::LINE_8,
            false,
        )
        .context("draw text")
    }
}
