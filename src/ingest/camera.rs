//! OpenCV camera source.
//!
//! Opens a local capture device by index, requests the configured resolution,
//! and hands out each frame twice: the BGR `Mat` for drawing and display, and
//! an RGB copy for inference.

use anyhow::{anyhow, Context, Result};
use image::RgbImage;
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::{imgproc, videoio};

use crate::config::CameraSettings;

/// Configuration for a camera source.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    /// Capture device index; 0 is the system default camera.
    pub index: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: 640,
            height: 480,
        }
    }
}

impl From<&CameraSettings> for CameraConfig {
    fn from(settings: &CameraSettings) -> Self {
        Self {
            index: settings.index,
            width: settings.width,
            height: settings.height,
        }
    }
}

/// One captured frame in both layouts.
pub struct CapturedFrame {
    /// Native BGR frame; overlays are drawn here.
    pub bgr: Mat,
    /// RGB copy taken before any overlay.
    pub rgb: RgbImage,
}

/// Statistics for a camera source.
#[derive(Clone, Debug)]
pub struct CameraStats {
    pub frames_captured: u64,
    pub index: i32,
}

pub struct CameraSource {
    config: CameraConfig,
    capture: Option<videoio::VideoCapture>,
    frame_count: u64,
    active_width: u32,
    active_height: u32,
}

impl CameraSource {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            active_width: config.width,
            active_height: config.height,
            config,
            capture: None,
            frame_count: 0,
        }
    }

    /// Open the device and request the configured resolution.
    pub fn connect(&mut self) -> Result<()> {
        let mut capture = videoio::VideoCapture::new(self.config.index, videoio::CAP_ANY)
            .with_context(|| format!("open camera {}", self.config.index))?;
        if !capture.is_opened().context("query camera state")? {
            return Err(anyhow!("camera device {} not found", self.config.index));
        }

        for (prop, value) in [
            (videoio::CAP_PROP_FRAME_WIDTH, self.config.width),
            (videoio::CAP_PROP_FRAME_HEIGHT, self.config.height),
        ] {
            if !capture.set(prop, value as f64).unwrap_or(false) {
                log::warn!(
                    "CameraSource: camera {} rejected capture property {}={}",
                    self.config.index,
                    prop,
                    value
                );
            }
        }

        self.active_width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        self.active_height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
        self.capture = Some(capture);

        log::info!(
            "CameraSource: connected to camera {} ({}x{})",
            self.config.index,
            self.active_width,
            self.active_height
        );
        Ok(())
    }

    /// Block until the next frame arrives.
    pub fn next_frame(&mut self) -> Result<CapturedFrame> {
        let capture = self.capture.as_mut().context("camera not connected")?;
        let mut bgr = Mat::default();
        let grabbed = capture.read(&mut bgr).context("capture camera frame")?;
        if !grabbed || bgr.empty() {
            return Err(anyhow!("camera {} returned no frame", self.config.index));
        }
        self.frame_count += 1;

        let rgb = to_rgb_image(&bgr)?;
        Ok(CapturedFrame { bgr, rgb })
    }

    /// Resolution the device actually delivers.
    pub fn resolution(&self) -> (u32, u32) {
        (self.active_width, self.active_height)
    }

    pub fn stats(&self) -> CameraStats {
        CameraStats {
            frames_captured: self.frame_count,
            index: self.config.index,
        }
    }
}

fn to_rgb_image(bgr: &Mat) -> Result<RgbImage> {
    let mut rgb = Mat::default();
    imgproc::cvt_color_def(bgr, &mut rgb, imgproc::COLOR_BGR2RGB).context("convert BGR to RGB")?;
    let width = rgb.cols() as u32;
    let height = rgb.rows() as u32;
    let data = rgb.data_bytes().context("read RGB pixels")?.to_vec();
    RgbImage::from_raw(width, height, data)
        .ok_or_else(|| anyhow!("RGB buffer does not match {}x{}", width, height))
}
