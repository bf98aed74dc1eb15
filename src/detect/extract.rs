use anyhow::{anyhow, Context, Result};
use image::RgbImage;

use super::engine::{
    InferenceEngine, OUTPUT_BOXES, OUTPUT_CLASSES, OUTPUT_COUNT, OUTPUT_SCORES,
};
use super::result::{BoundingBox, Detection};

/// Run the engine on a pre-sized image and keep every slot scoring at least
/// `threshold`.
///
/// Only the first `count` slots are read; engines that pad their outputs
/// report the real count at slot 3. Results keep the engine's order.
pub fn detect_objects<E>(
    engine: &mut E,
    image: &RgbImage,
    threshold: f32,
) -> Result<Vec<Detection>>
where
    E: InferenceEngine + ?Sized,
{
    engine
        .set_input(image)
        .with_context(|| format!("{}: failed to set input tensor", engine.name()))?;
    engine
        .invoke()
        .with_context(|| format!("{}: inference failed", engine.name()))?;

    let boxes = engine.output(OUTPUT_BOXES)?;
    let classes = engine.output(OUTPUT_CLASSES)?;
    let scores = engine.output(OUTPUT_SCORES)?;
    let count = read_count(engine.output(OUTPUT_COUNT)?)?;

    if count > scores.len() || count > classes.len() || count.saturating_mul(4) > boxes.len() {
        return Err(anyhow!(
            "{}: engine reported {} detections but produced {} boxes, {} classes, {} scores",
            engine.name(),
            count,
            boxes.len() / 4,
            classes.len(),
            scores.len()
        ));
    }

    let detections = (0..count)
        .filter(|&i| scores[i] >= threshold)
        .map(|i| Detection {
            bounding_box: BoundingBox::from_row(&boxes[i * 4..i * 4 + 4]),
            class_id: classes[i] as u32,
            score: scores[i],
        })
        .collect();

    Ok(detections)
}

fn read_count(values: &[f32]) -> Result<usize> {
    let raw = values
        .first()
        .ok_or_else(|| anyhow!("detection count output is empty"))?;
    // Saturating cast: NaN and negatives become 0.
    Ok(*raw as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::backends::ScriptedEngine;

    fn frame() -> RgbImage {
        RgbImage::new(4, 4)
    }

    fn engine(scores: Vec<f32>, count: f32) -> ScriptedEngine {
        let n = scores.len();
        let boxes = (0..n)
            .flat_map(|i| {
                let o = i as f32 * 0.1;
                [o, o, o + 0.5, o + 0.5]
            })
            .collect();
        let classes = (0..n).map(|i| i as f32).collect();
        ScriptedEngine::new(4, 4).with_outputs(boxes, classes, scores, count)
    }

    #[test]
    fn keeps_slots_at_or_above_threshold_in_engine_order() -> Result<()> {
        let mut engine = engine(vec![0.9, 0.2, 0.6], 3.0);

        let detections = detect_objects(&mut engine, &frame(), 0.5)?;

        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].class_id, 0);
        assert_eq!(detections[1].class_id, 2);
        assert_eq!(detections[1].score, 0.6);
        let o = 2.0_f32 * 0.1;
        assert_eq!(
            detections[1].bounding_box,
            BoundingBox::new(o, o, o + 0.5, o + 0.5)
        );
        Ok(())
    }

    #[test]
    fn threshold_is_inclusive() -> Result<()> {
        let mut engine = engine(vec![0.4, 0.39], 2.0);
        let detections = detect_objects(&mut engine, &frame(), 0.4)?;
        assert_eq!(detections.len(), 1);
        Ok(())
    }

    #[test]
    fn ignores_padding_beyond_reported_count() -> Result<()> {
        let mut engine = engine(vec![0.9, 0.8, 0.95, 0.99], 2.0);
        let detections = detect_objects(&mut engine, &frame(), 0.0)?;
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[1].class_id, 1);
        Ok(())
    }

    #[test]
    fn zero_threshold_returns_every_counted_slot() -> Result<()> {
        let mut engine = engine(vec![0.0, 0.01, 0.5], 3.0);
        assert_eq!(detect_objects(&mut engine, &frame(), 0.0)?.len(), 3);
        Ok(())
    }

    #[test]
    fn higher_threshold_yields_subset() -> Result<()> {
        let scores = vec![0.05, 0.3, 0.45, 0.7, 0.7, 0.99, 0.12];
        let thresholds = [0.0, 0.1, 0.3, 0.45, 0.5, 0.7, 0.99, 1.0];
        for pair in thresholds.windows(2) {
            let mut lo_engine = engine(scores.clone(), 7.0);
            let mut hi_engine = engine(scores.clone(), 7.0);
            let lo = detect_objects(&mut lo_engine, &frame(), pair[0])?;
            let hi = detect_objects(&mut hi_engine, &frame(), pair[1])?;
            assert!(hi.len() <= lo.len());
            for detection in &hi {
                assert!(lo.contains(detection), "{:?} missing at {}", detection, pair[0]);
            }
        }
        Ok(())
    }

    #[test]
    fn count_beyond_outputs_fails() {
        let mut engine = engine(vec![0.9, 0.8], 5.0);
        let err = detect_objects(&mut engine, &frame(), 0.5).unwrap_err();
        assert!(err.to_string().contains("reported 5 detections"));
    }

    #[test]
    fn negative_count_yields_nothing() -> Result<()> {
        let mut engine = engine(vec![0.9], -1.0);
        assert!(detect_objects(&mut engine, &frame(), 0.0)?.is_empty());
        Ok(())
    }

    #[test]
    fn wrong_input_size_is_rejected() {
        let mut engine = engine(vec![0.9], 1.0);
        let err = detect_objects(&mut engine, &RgbImage::new(8, 8), 0.5).unwrap_err();
        assert!(format!("{:#}", err).contains("does not match"));
    }
}
