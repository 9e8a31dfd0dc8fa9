//! UI modules for the editor

mod camera_panel;
mod presets;
mod settings_panel;

pub use camera_panel::render_camera_panel;
pub use presets::{Preset, PRESETS};
pub use settings_panel::render_settings_panel;
