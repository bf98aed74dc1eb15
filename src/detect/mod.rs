mod backends;
mod engine;
mod extract;
mod result;

pub use backends::{declared_input_size, resolve_input_size, InputSizeSource, ScriptedEngine};
#[cfg(feature = "backend-tract")]
pub use backends::TractEngine;
pub use engine::{
    InferenceEngine, OUTPUT_BOXES, OUTPUT_CLASSES, OUTPUT_COUNT, OUTPUT_SCORES,
};
pub use extract::detect_objects;
pub use result::{BoundingBox, Detection};
