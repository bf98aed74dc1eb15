//! Per-frame work of the preview loop.
//!
//! Capture and display stay with the caller. Given a captured RGB frame and a
//! canvas holding the same frame, `FramePipeline::process`:
//! 1. resizes the frame to the engine's input size
//! 2. runs detection and times it
//! 3. draws a box and a `"<label> <score>"` caption per detection
//! 4. draws the inference latency in the top-left corner

use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::annotate::{Annotator, Canvas};
use crate::detect::{detect_objects, Detection, InferenceEngine};
use crate::geometry::{to_screen_space, Point};
use crate::labels::LabelTable;

/// Where the latency overlay is drawn.
pub const LATENCY_ORIGIN: Point = Point { x: 5, y: 30 };

/// Resize a frame to the engine's input size with an antialiasing filter.
pub fn resize_for_model(frame: &RgbImage, width: u32, height: u32) -> RgbImage {
    if frame.dimensions() == (width, height) {
        return frame.clone();
    }
    imageops::resize(frame, width, height, FilterType::Lanczos3)
}

/// Caption drawn above each box.
pub fn caption(label: &str, score: f32) -> String {
    format!("{} {:.2}", label, score)
}

/// Draw every detection onto a `frame_width` × `frame_height` canvas.
///
/// Fails on a class id missing from `labels`.
pub fn annotate_objects<C: Canvas + ?Sized>(
    annotator: &Annotator,
    canvas: &mut C,
    detections: &[Detection],
    labels: &LabelTable,
    frame_width: u32,
    frame_height: u32,
) -> Result<()> {
    for detection in detections {
        let label = labels
            .get(detection.class_id)
            .ok_or_else(|| anyhow!("no label for class id {}", detection.class_id))?;
        let rect = to_screen_space(detection, frame_width, frame_height);
        annotator.bounding_box(canvas, rect, None, None)?;
        annotator.text(canvas, rect.top_left(), &caption(label, detection.score), None)?;
    }
    Ok(())
}

/// Result of processing one frame.
#[derive(Clone, Debug)]
pub struct FrameReport {
    pub detections: Vec<Detection>,
    pub inference: Duration,
}

impl FrameReport {
    pub fn inference_ms(&self) -> f64 {
        self.inference.as_secs_f64() * 1000.0
    }
}

/// Engine, labels and annotator bundled for the preview loop.
pub struct FramePipeline<E> {
    engine: E,
    labels: LabelTable,
    annotator: Annotator,
    threshold: f32,
}

impl<E: InferenceEngine> FramePipeline<E> {
    pub fn new(engine: E, labels: LabelTable, annotator: Annotator, threshold: f32) -> Self {
        Self {
            engine,
            labels,
            annotator,
            threshold,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Detect objects in `frame` and draw the results on `canvas`.
    ///
    /// `canvas` must show the same picture as `frame`; boxes are scaled to the
    /// frame's dimensions.
    pub fn process<C: Canvas + ?Sized>(
        &mut self,
        frame: &RgbImage,
        canvas: &mut C,
    ) -> Result<FrameReport> {
        let (input_width, input_height) = self.engine.input_size();
        let input = resize_for_model(frame, input_width, input_height);

        let start = Instant::now();
        let detections = detect_objects(&mut self.engine, &input, self.threshold)?;
        let report = FrameReport {
            detections,
            inference: start.elapsed(),
        };
        log::debug!(
            "{} detections in {:.1}ms",
            report.detections.len(),
            report.inference_ms()
        );

        annotate_objects(
            &self.annotator,
            canvas,
            &report.detections,
            &self.labels,
            frame.width(),
            frame.height(),
        )?;
        self.annotator.text(
            canvas,
            LATENCY_ORIGIN,
            &format!("{:.1}ms", report.inference_ms()),
            None,
        )?;

        Ok(report)
    }
}
