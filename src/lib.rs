//! Camera object detection with live overlays.
//!
//! Frames from a camera are resized to a detection model's input, run through
//! an inference engine, and annotated with boxes, class labels and the
//! per-frame inference latency.
//!
//! # Module Structure
//!
//! - `detect`: inference engine seam, output extraction, engines
//! - `geometry`: pixel rectangles and normalized → pixel mapping
//! - `annotate`: drawing facade over a `Canvas`
//! - `labels`: label file parsing
//! - `pipeline`: one preview-loop iteration over a captured frame
//! - `config`: file + environment settings
//! - `ingest`, `preview`: OpenCV camera and window (feature: gui)

pub mod annotate;
pub mod config;
pub mod detect;
pub mod geometry;
#[cfg(feature = "gui")]
pub mod ingest;
pub mod labels;
pub mod pipeline;
#[cfg(feature = "gui")]
pub mod preview;

pub use annotate::{Annotator, Canvas, Color, RecordingCanvas};
pub use config::DetectorConfig;
#[cfg(feature = "backend-tract")]
pub use detect::TractEngine;
pub use detect::{detect_objects, BoundingBox, Detection, InferenceEngine, ScriptedEngine};
pub use geometry::{to_screen_space, Point, Rect};
#[cfg(feature = "gui")]
pub use ingest::{CameraConfig, CameraSource};
pub use labels::LabelTable;
pub use pipeline::{annotate_objects, resize_for_model, FramePipeline, FrameReport};
#[cfg(feature = "gui")]
pub use preview::PreviewWindow;
