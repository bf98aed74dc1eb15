use std::sync::Mutex;

use tempfile::NamedTempFile;

use camera_detect::{Color, DetectorConfig};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in ["DETECT_CONFIG", "DETECT_THRESHOLD", "DETECT_CAMERA_INDEX"] {
        std::env::remove_var(key);
    }
}

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp config");
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");
    file
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let file = write_config(
        r#"{
            "threshold": 0.6,
            "camera": { "index": 1, "width": 1280, "height": 720 },
            "model": { "input_width": 320, "input_height": 320 },
            "display": { "window_title": "preview", "default_color": [0, 255, 0] }
        }"#,
    );

    std::env::set_var("DETECT_CONFIG", file.path());
    std::env::set_var("DETECT_CAMERA_INDEX", "2");

    let cfg = DetectorConfig::load().expect("load config");

    assert_eq!(cfg.threshold, 0.6);
    assert_eq!(cfg.camera.index, 2);
    assert_eq!(cfg.camera.width, 1280);
    assert_eq!(cfg.camera.height, 720);
    assert_eq!(cfg.model.input_width, 320);
    assert_eq!(cfg.model.input_height, 320);
    assert_eq!(cfg.display.window_title, "preview");
    assert_eq!(cfg.display.default_color, Color::rgb(0, 255, 0));

    clear_env();
}

#[test]
fn defaults_apply_without_config_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = DetectorConfig::load().expect("load config");

    assert_eq!(cfg.threshold, 0.4);
    assert_eq!(cfg.camera.index, 0);
    assert_eq!((cfg.camera.width, cfg.camera.height), (640, 480));
    assert_eq!((cfg.model.input_width, cfg.model.input_height), (300, 300));
}

#[test]
fn env_threshold_overrides_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let file = write_config(r#"{ "threshold": 0.2 }"#);
    std::env::set_var("DETECT_THRESHOLD", "0.9");

    let cfg = DetectorConfig::from_path(file.path()).expect("load config");
    assert_eq!(cfg.threshold, 0.9);

    clear_env();
}

#[test]
fn rejects_out_of_range_threshold() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let file = write_config(r#"{ "threshold": 1.2 }"#);
    let err = DetectorConfig::from_path(file.path()).expect_err("threshold above 1");
    assert!(err.to_string().contains("threshold"), "{}", err);

    std::env::set_var("DETECT_THRESHOLD", "high");
    let err = DetectorConfig::load().expect_err("non-numeric threshold");
    assert!(err.to_string().contains("DETECT_THRESHOLD"), "{}", err);

    clear_env();
}

#[test]
fn malformed_file_names_the_path() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let file = write_config("{ not json");
    let err = DetectorConfig::from_path(file.path()).expect_err("malformed config");
    assert!(
        err.to_string().contains(&file.path().display().to_string()),
        "{}",
        err
    );
}
