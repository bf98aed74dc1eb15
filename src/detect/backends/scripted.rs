use anyhow::{anyhow, Result};
use image::RgbImage;

use crate::detect::engine::InferenceEngine;

/// Engine that replays canned outputs. Used for tests and dry runs.
///
/// Outputs are laid out in the usual four slots: flattened boxes, classes,
/// scores, and a single-element count.
pub struct ScriptedEngine {
    width: u32,
    height: u32,
    outputs: Vec<Vec<f32>>,
    last_input: Option<RgbImage>,
    invocations: u64,
}

impl ScriptedEngine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            outputs: vec![Vec::new(), Vec::new(), Vec::new(), vec![0.0]],
            last_input: None,
            invocations: 0,
        }
    }

    /// Replace the replayed outputs.
    pub fn with_outputs(
        mut self,
        boxes: Vec<f32>,
        classes: Vec<f32>,
        scores: Vec<f32>,
        count: f32,
    ) -> Self {
        self.outputs = vec![boxes, classes, scores, vec![count]];
        self
    }

    /// The image most recently written with `set_input`.
    pub fn last_input(&self) -> Option<&RgbImage> {
        self.last_input.as_ref()
    }

    pub fn invocations(&self) -> u64 {
        self.invocations
    }
}

impl InferenceEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn input_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_input(&mut self, image: &RgbImage) -> Result<()> {
        if image.dimensions() != (self.width, self.height) {
            return Err(anyhow!(
                "input {}x{} does not match engine input {}x{}",
                image.width(),
                image.height(),
                self.width,
                self.height
            ));
        }
        self.last_input = Some(image.clone());
        Ok(())
    }

    fn invoke(&mut self) -> Result<()> {
        if self.last_input.is_none() {
            return Err(anyhow!("invoke called before set_input"));
        }
        self.invocations += 1;
        Ok(())
    }

    fn output(&self, index: usize) -> Result<&[f32]> {
        self.outputs
            .get(index)
            .map(Vec::as_slice)
            .ok_or_else(|| anyhow!("engine has no output at index {}", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_engine_tracks_input_and_invocations() -> Result<()> {
        let mut engine = ScriptedEngine::new(2, 2).with_outputs(vec![], vec![], vec![], 0.0);

        assert!(engine.invoke().is_err());

        engine.set_input(&RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3])))?;
        engine.invoke()?;
        engine.invoke()?;

        assert_eq!(engine.invocations(), 2);
        assert_eq!(engine.last_input().map(|img| img.get_pixel(1, 1).0), Some([1, 2, 3]));
        assert_eq!(engine.output(3)?, &[0.0]);
        assert!(engine.output(4).is_err());
        Ok(())
    }
}
