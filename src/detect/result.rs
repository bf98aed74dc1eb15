/// Box corners in normalized 0..1 coordinates, in the engine's native
/// `(y_min, x_min, y_max, x_max)` order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub y_min: f32,
    pub x_min: f32,
    pub y_max: f32,
    pub x_max: f32,
}

impl BoundingBox {
    pub fn new(y_min: f32, x_min: f32, y_max: f32, x_max: f32) -> Self {
        Self {
            y_min,
            x_min,
            y_max,
            x_max,
        }
    }

    /// Build from one row of the engine's flattened N×4 box output.
    pub(crate) fn from_row(row: &[f32]) -> Self {
        Self::new(row[0], row[1], row[2], row[3])
    }
}

/// One object reported by the engine and kept by the confidence filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub bounding_box: BoundingBox,
    /// Index into the label table.
    pub class_id: u32,
    /// Confidence in 0..1.
    pub score: f32,
}
