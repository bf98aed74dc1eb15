//! detect_camera - live object detection on the default camera
//!
//! Each loop iteration:
//! 1. Captures a frame (blocking)
//! 2. Runs the detection model on a resized RGB copy (blocking)
//! 3. Draws boxes, labels and inference latency onto the frame
//! 4. Shows the frame and checks for `q`

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use camera_detect::{
    Annotator, CameraConfig, CameraSource, DetectorConfig, FramePipeline, InferenceEngine,
    LabelTable, PreviewWindow, TractEngine,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// File path of the detection model.
    #[arg(long)]
    model: PathBuf,
    /// File path of the labels file.
    #[arg(long)]
    labels: PathBuf,
    /// Score threshold for detected objects [default: 0.4].
    #[arg(long)]
    threshold: Option<f32>,
    /// JSON settings file for camera, model input and display.
    #[arg(long, env = "DETECT_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = match args.config.as_deref() {
        Some(path) => DetectorConfig::from_path(path)?,
        None => DetectorConfig::load()?,
    };
    if let Some(threshold) = args.threshold {
        cfg = cfg.with_threshold(threshold)?;
    }

    let labels = LabelTable::load(&args.labels)?;
    log::info!("loaded {} labels from {}", labels.len(), args.labels.display());

    let engine = TractEngine::new(&args.model, cfg.model.input_width, cfg.model.input_height)
        .context("model load failed")?;
    let (input_width, input_height) = engine.input_size();
    log::info!(
        "engine {} ready ({}x{} input)",
        engine.name(),
        input_width,
        input_height
    );

    let mut camera = CameraSource::new(CameraConfig::from(&cfg.camera));
    camera.connect()?;
    let (width, height) = camera.resolution();
    log::info!("camera {} streaming at {}x{}", cfg.camera.index, width, height);

    let window = PreviewWindow::open(&cfg.display.window_title)?;
    let annotator = Annotator::new(cfg.display.default_color);
    log::debug!("default annotation color {:?}", annotator.default_color());
    let mut pipeline = FramePipeline::new(engine, labels, annotator, cfg.threshold);
    log::info!("reporting detections scoring at least {}", pipeline.threshold());

    loop {
        let mut frame = camera.next_frame()?;
        pipeline.process(&frame.rgb, &mut frame.bgr)?;
        window.show(&frame.bgr)?;
        if window.quit_requested()? {
            break;
        }
    }

    let stats = camera.stats();
    log::info!("camera {} stopped after {} frames", stats.index, stats.frames_captured);
    Ok(())
}
