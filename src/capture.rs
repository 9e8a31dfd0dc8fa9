//! Screen captures named after the active configuration label.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CaptureError;

/// Directory captures go to unless the host picks another.
pub const DEFAULT_CAPTURE_DIR: &str = "captures";

/// Turn a label into a safe file stem.
pub fn file_stem(label: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "capture".to_string()
    } else {
        stem
    }
}

/// First free `<stem>.<n>.png` path in `dir`.
pub fn capture_path(dir: &Path, label: &str) -> PathBuf {
    let stem = file_stem(label);
    let mut index = 0u32;
    loop {
        let candidate = dir.join(format!("{}.{}.png", stem, index));
        if !candidate.exists() {
            return candidate;
        }
        index += 1;
    }
}

/// Write an RGBA8 frame to a fresh PNG under `dir`.
pub fn save_capture(
    dir: &Path,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> Result<PathBuf, CaptureError> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(CaptureError::BadBuffer {
            expected,
            found: rgba.len(),
        });
    }

    fs::create_dir_all(dir)?;
    let path = capture_path(dir, label);
    image::save_buffer(&path, rgba, width, height, image::ExtendedColorType::Rgba8)?;
    log::info!("Saved capture {}", path.display());
    Ok(path)
}
