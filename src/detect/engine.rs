use anyhow::Result;
use image::RgbImage;

/// Output slot holding the flattened N×4 normalized boxes.
pub const OUTPUT_BOXES: usize = 0;
/// Output slot holding the N class ids (as floats).
pub const OUTPUT_CLASSES: usize = 1;
/// Output slot holding the N confidence scores.
pub const OUTPUT_SCORES: usize = 2;
/// Output slot holding the scalar detection count.
pub const OUTPUT_COUNT: usize = 3;

/// Inference engine seam.
///
/// Mirrors the interpreter contract detection models ship with: one RGB input
/// of a fixed size, a blocking `invoke`, and numbered output buffers read back
/// after the call. Detection models following the SSD post-processing
/// convention place boxes, classes, scores and count at slots 0..=3.
pub trait InferenceEngine {
    /// Engine identifier.
    fn name(&self) -> &'static str;

    /// Declared input size as `(width, height)`.
    fn input_size(&self) -> (u32, u32);

    /// Copy an image into the input buffer.
    ///
    /// The image must already be `input_size()`; engines reject anything else.
    fn set_input(&mut self, image: &RgbImage) -> Result<()>;

    /// Run the model synchronously. No timeout, no cancellation.
    fn invoke(&mut self) -> Result<()>;

    /// Output buffer at `index`, squeezed to a flat slice of `f32`.
    fn output(&self, index: usize) -> Result<&[f32]>;
}

impl<E: InferenceEngine + ?Sized> InferenceEngine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn input_size(&self) -> (u32, u32) {
        (**self).input_size()
    }

    fn set_input(&mut self, image: &RgbImage) -> Result<()> {
        (**self).set_input(image)
    }

    fn invoke(&mut self) -> Result<()> {
        (**self).invoke()
    }

    fn output(&self, index: usize) -> Result<&[f32]> {
        (**self).output(index)
    }
}
