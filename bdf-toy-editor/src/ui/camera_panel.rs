//! UI panel for camera controls

use bdf_toy::{CameraControl, OrbitCamera};
use eframe::egui;

/// Render the camera panel. Returns true if "Reset camera" was clicked.
pub fn render_camera_panel(ui: &mut egui::Ui, camera: &mut OrbitCamera) -> bool {
    let reset = ui.button("Reset camera").clicked();

    let eye = camera.position();
    ui.label(format!("Eye: ({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z));
    ui.label(format!(
        "Target: ({:.2}, {:.2}, {:.2})",
        camera.target.x, camera.target.y, camera.target.z
    ));

    let mut fov = camera.fovy_radians.to_degrees();
    if ui
        .add(egui::Slider::new(&mut fov, 20.0..=100.0).text("FOV").suffix("°"))
        .changed()
    {
        camera.fovy_radians = fov.to_radians();
    }

    ui.label(
        egui::RichText::new("Arrow keys or middle-drag to orbit")
            .small()
            .weak(),
    );

    reset
}
