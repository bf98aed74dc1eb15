//! Frame sources.
//!
//! The camera source reads the default system camera through OpenCV
//! (feature: gui). Frames are held in memory only for the iteration that
//! captured them.

pub mod camera;

pub use camera::{CameraConfig, CameraSource, CameraStats, CapturedFrame};
