//! Viewport captures taken through the window screenshot command.

use std::sync::Arc;

use eframe::egui;

/// A capture requested by key, waiting for its screenshot.
///
/// The backend reads the frame back asynchronously, so the image can arrive
/// several frames after the request.
#[derive(Debug, Default)]
pub struct PendingCapture {
    file_stem: Option<String>,
}

impl PendingCapture {
    pub fn request(&mut self, file_stem: String) {
        self.file_stem = Some(file_stem);
    }

    pub fn is_pending(&self) -> bool {
        self.file_stem.is_some()
    }

    /// Hand out the stem once a screenshot is available; keep waiting otherwise.
    pub fn complete<T>(&mut self, screenshot: Option<T>) -> Option<(String, T)> {
        let image = screenshot?;
        let stem = self.file_stem.take()?;
        Some((stem, image))
    }
}

/// First screenshot delivered this frame, if any.
pub fn screenshot_event(ctx: &egui::Context) -> Option<Arc<egui::ColorImage>> {
    ctx.input(|i| {
        i.events.iter().find_map(|e| match e {
            egui::Event::Screenshot { image, .. } => Some(image.clone()),
            _ => None,
        })
    })
}

/// Crop a window screenshot to `rect` and flatten it to RGBA8.
pub fn crop_rgba(
    image: &egui::ColorImage,
    rect: egui::Rect,
    pixels_per_point: f32,
) -> (u32, u32, Vec<u8>) {
    let region = image.region(&rect, Some(pixels_per_point));
    let rgba = region.pixels.iter().flat_map(|c| c.to_array()).collect();
    (region.size[0] as u32, region.size[1] as u32, rgba)
}
