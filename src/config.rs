use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;

use crate::annotate::Color;

pub const DEFAULT_THRESHOLD: f32 = 0.4;
const DEFAULT_CAMERA_INDEX: i32 = 0;
const DEFAULT_CAMERA_WIDTH: u32 = 640;
const DEFAULT_CAMERA_HEIGHT: u32 = 480;
const DEFAULT_MODEL_INPUT_WIDTH: u32 = 300;
const DEFAULT_MODEL_INPUT_HEIGHT: u32 = 300;
const DEFAULT_WINDOW_TITLE: &str = "detectObjects";

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DetectorConfigFile {
    threshold: Option<f32>,
    camera: Option<CameraConfigFile>,
    model: Option<ModelConfigFile>,
    display: Option<DisplayConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct CameraConfigFile {
    index: Option<i32>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ModelConfigFile {
    input_width: Option<u32>,
    input_height: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DisplayConfigFile {
    window_title: Option<String>,
    default_color: Option<[u8; 3]>,
}

/// Runtime settings for the detection preview.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub threshold: f32,
    pub camera: CameraSettings,
    pub model: ModelSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone)]
pub struct CameraSettings {
    pub index: i32,
    pub width: u32,
    pub height: u32,
}

/// Model input size used when the graph leaves height or width symbolic.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub input_width: u32,
    pub input_height: u32,
}

#[derive(Debug, Clone)]
pub struct DisplaySettings {
    pub window_title: String,
    pub default_color: Color,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::from_file(DetectorConfigFile::default())
    }
}

impl DetectorConfig {
    /// Load settings from the file named by `DETECT_CONFIG` (if set), then
    /// apply environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("DETECT_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) if !path.trim().is_empty() => Some(read_config_file(Path::new(path))?),
            _ => None,
        };
        Self::finish(file_cfg.unwrap_or_default())
    }

    /// Load settings from an explicit file, then apply environment overrides.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::finish(read_config_file(path)?)
    }

    /// Replace the confidence threshold, re-checking its range.
    pub fn with_threshold(mut self, threshold: f32) -> Result<Self> {
        self.threshold = threshold;
        self.validate()?;
        Ok(self)
    }

    fn finish(file: DetectorConfigFile) -> Result<Self> {
        let mut cfg = Self::from_file(file);
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: DetectorConfigFile) -> Self {
        let camera = file.camera.unwrap_or_default();
        let model = file.model.unwrap_or_default();
        let display = file.display.unwrap_or_default();
        Self {
            threshold: file.threshold.unwrap_or(DEFAULT_THRESHOLD),
            camera: CameraSettings {
                index: camera.index.unwrap_or(DEFAULT_CAMERA_INDEX),
                width: camera.width.unwrap_or(DEFAULT_CAMERA_WIDTH),
                height: camera.height.unwrap_or(DEFAULT_CAMERA_HEIGHT),
            },
            model: ModelSettings {
                input_width: model.input_width.unwrap_or(DEFAULT_MODEL_INPUT_WIDTH),
                input_height: model.input_height.unwrap_or(DEFAULT_MODEL_INPUT_HEIGHT),
            },
            display: DisplaySettings {
                window_title: display
                    .window_title
                    .unwrap_or_else(|| DEFAULT_WINDOW_TITLE.to_string()),
                default_color: display.default_color.map(Color::from).unwrap_or_default(),
            },
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(threshold) = std::env::var("DETECT_THRESHOLD") {
            if !threshold.trim().is_empty() {
                self.threshold = threshold
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("DETECT_THRESHOLD must be a number between 0 and 1"))?;
            }
        }
        if let Ok(index) = std::env::var("DETECT_CAMERA_INDEX") {
            if !index.trim().is_empty() {
                self.camera.index = index
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("DETECT_CAMERA_INDEX must be an integer"))?;
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(anyhow!(
                "threshold must be between 0 and 1, got {}",
                self.threshold
            ));
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(anyhow!("camera resolution must be non-zero"));
        }
        if self.model.input_width == 0 || self.model.input_height == 0 {
            return Err(anyhow!("model input size must be non-zero"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<DetectorConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_setup() {
        let cfg = DetectorConfig::default();
        assert_eq!(cfg.threshold, 0.4);
        assert_eq!(cfg.camera.index, 0);
        assert_eq!((cfg.camera.width, cfg.camera.height), (640, 480));
        assert_eq!(cfg.display.window_title, "detectObjects");
        assert_eq!(cfg.display.default_color, Color::RED);
    }

    #[test]
    fn threshold_override_is_range_checked() -> Result<()> {
        let cfg = DetectorConfig::default().with_threshold(0.75)?;
        assert_eq!(cfg.threshold, 0.75);
        assert!(DetectorConfig::default().with_threshold(1.5).is_err());
        assert!(DetectorConfig::default().with_threshold(-0.1).is_err());
        assert!(DetectorConfig::default().with_threshold(f32::NAN).is_err());
        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed: std::result::Result<DetectorConfigFile, _> =
            serde_json::from_str(r#"{ "treshold": 0.5 }"#);
        assert!(parsed.is_err());
    }
}
