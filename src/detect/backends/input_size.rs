/// Where an engine's input size came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSizeSource {
    /// Concrete height and width declared by the model graph.
    Model,
    /// Configured size, used when the graph leaves height or width symbolic.
    Fallback,
}

/// Height and width of an NHWC `[batch, height, width, channels]` input, as
/// `(width, height)`.
///
/// `dims` holds one entry per axis, `None` for symbolic axes. Returns `None`
/// unless the input has rank 4 and both spatial axes are concrete and non-zero.
pub fn declared_input_size(dims: &[Option<usize>]) -> Option<(u32, u32)> {
    match dims {
        [_, Some(height), Some(width), _] if *height > 0 && *width > 0 => {
            let width = u32::try_from(*width).ok()?;
            let height = u32::try_from(*height).ok()?;
            Some((width, height))
        }
        _ => None,
    }
}

/// Prefer the model's declared `(width, height)` over the configured one.
pub fn resolve_input_size(
    declared: Option<(u32, u32)>,
    fallback: (u32, u32),
) -> ((u32, u32), InputSizeSource) {
    match declared {
        Some(size) => (size, InputSizeSource::Model),
        None => (fallback, InputSizeSource::Fallback),
    }
}
