#![cfg(feature = "backend-tract")]

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use image::RgbImage;
use tract_onnx::prelude::*;
use tract_onnx::tract_hir::infer::Factoid;
use tract_onnx::tract_hir::internal::DimLike;

use super::input_size::{declared_input_size, resolve_input_size, InputSizeSource};
use crate::detect::engine::InferenceEngine;

// One entry per axis; `None` where the graph leaves the axis symbolic.
fn input_dims(fact: &InferenceFact) -> Vec<Option<usize>> {
    fact.shape
        .dims()
        .map(|dim| dim.concretize().and_then(|dim| dim.to_usize().ok()))
        .collect()
}

/// Tract-based engine for ONNX detection models.
///
/// The model is loaded from a local file and fed `uint8` NHWC input of shape
/// `[1, height, width, 3]`, the layout quantized SSD detectors expect. Every
/// output is cast to `f32` and flattened after each run.
pub struct TractEngine {
    model: TypedSimplePlan<TypedModel>,
    width: u32,
    height: u32,
    input: Option<Tensor>,
    outputs: Vec<Vec<f32>>,
}

impl TractEngine {
    /// Load an ONNX model from disk and prepare it for inference.
    ///
    /// The input size is read from the model's declared input. `fallback_width`
    /// and `fallback_height` apply only when the graph leaves height or width
    /// symbolic.
    pub fn new<P: AsRef<Path>>(
        model_path: P,
        fallback_width: u32,
        fallback_height: u32,
    ) -> Result<Self> {
        let model_path = model_path.as_ref();
        if !model_path.is_file() {
            return Err(anyhow!("model file not found: {}", model_path.display()));
        }
        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .with_context(|| format!("failed to load ONNX model from {}", model_path.display()))?;

        let input_fact = model.input_fact(0).context("model declares no input")?;
        let declared = declared_input_size(&input_dims(input_fact));
        let ((width, height), source) =
            resolve_input_size(declared, (fallback_width, fallback_height));
        match source {
            InputSizeSource::Model => {
                log::info!("TractEngine: model declares {}x{} input", width, height)
            }
            InputSizeSource::Fallback => log::info!(
                "TractEngine: model input size is symbolic, using configured {}x{}",
                width,
                height
            ),
        }

        let model = model
            .with_input_fact(
                0,
                InferenceFact::dt_shape(
                    u8::datum_type(),
                    tvec!(1, height as usize, width as usize, 3),
                ),
            )
            .context("failed to set input fact")?
            .into_optimized()
            .context("failed to optimize ONNX model")?
            .into_runnable()
            .context("failed to build runnable ONNX model")?;

        log::info!(
            "TractEngine: loaded {} ({}x{} input)",
            model_path.display(),
            width,
            height
        );

        Ok(Self {
            model,
            width,
            height,
            input: None,
            outputs: Vec::new(),
        })
    }

    fn build_input(&self, image: &RgbImage) -> Result<Tensor> {
        let (width, height) = image.dimensions();
        if width != self.width || height != self.height {
            return Err(anyhow!(
                "frame size {}x{} does not match model input {}x{}",
                width,
                height,
                self.width,
                self.height
            ));
        }

        let input = tract_ndarray::Array4::from_shape_vec(
            (1, height as usize, width as usize, 3),
            image.as_raw().clone(),
        )
        .context("RGB buffer does not fit model input shape")?;

        Ok(input.into_tensor())
    }
}

impl InferenceEngine for TractEngine {
    fn name(&self) -> &'static str {
        "tract"
    }

    fn input_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_input(&mut self, image: &RgbImage) -> Result<()> {
        self.input = Some(self.build_input(image)?);
        Ok(())
    }

    fn invoke(&mut self) -> Result<()> {
        let input = self
            .input
            .take()
            .ok_or_else(|| anyhow!("invoke called before set_input"))?;
        let results = self
            .model
            .run(tvec!(input.into()))
            .context("ONNX inference failed")?;

        self.outputs = results
            .iter()
            .map(|value| -> Result<Vec<f32>> {
                let values = value
                    .cast_to::<f32>()
                    .context("model output could not be cast to f32")?;
                Ok(values.as_slice::<f32>()?.to_vec())
            })
            .collect::<Result<_>>()?;
        Ok(())
    }

    fn output(&self, index: usize) -> Result<&[f32]> {
        self.outputs
            .get(index)
            .map(Vec::as_slice)
            .ok_or_else(|| anyhow!("model produced no output at index {}", index))
    }
}
