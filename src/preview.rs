//! Live preview window.

use anyhow::{Context, Result};
use opencv::core::Mat;
use opencv::highgui;

const QUIT_KEY: i32 = b'q' as i32;

pub struct PreviewWindow {
    title: String,
}

impl PreviewWindow {
    pub fn open(title: &str) -> Result<Self> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE)
            .with_context(|| format!("open preview window {}", title))?;
        Ok(Self {
            title: title.to_string(),
        })
    }

    pub fn show(&self, frame: &Mat) -> Result<()> {
        highgui::imshow(&self.title, frame).context("display frame")
    }

    /// Poll the keyboard for 1 ms. True once `q` is pressed.
    pub fn quit_requested(&self) -> Result<bool> {
        let key = highgui::wait_key(1).context("poll keyboard")?;
        Ok(key >= 0 && key & 0xFF == QUIT_KEY)
    }
}

impl Drop for PreviewWindow {
    fn drop(&mut self) {
        if let Err(err) = highgui::destroy_window(&self.title) {
            log::warn!("PreviewWindow: failed to close {}: {}", self.title, err);
        }
    }
}
