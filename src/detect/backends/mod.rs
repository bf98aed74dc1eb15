pub mod input_size;
pub mod scripted;

#[cfg(feature = "backend-tract")]
pub mod tract;

pub use input_size::{declared_input_size, resolve_input_size, InputSizeSource};
pub use scripted::ScriptedEngine;

#[cfg(feature = "backend-tract")]
pub use tract::TractEngine;
