//! Render viewport: routes egui input to the toy and shows what the shader
//! receives.

use bdf_toy::input::{KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, PointerEvent};
use bdf_toy::{UniformBlocks, UniformValue};
use eframe::egui;
use glam::Vec2;

/// Input gathered from one egui frame.
#[derive(Debug, Default)]
pub struct ViewportInput {
    pub pointer: Vec<PointerEvent>,
    pub keys: Vec<KeyEvent>,
}

pub fn mouse_button(button: egui::PointerButton) -> Option<MouseButton> {
    match button {
        egui::PointerButton::Primary => Some(MouseButton::Left),
        egui::PointerButton::Secondary => Some(MouseButton::Right),
        egui::PointerButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

pub fn key_code(key: egui::Key) -> Option<KeyCode> {
    let code = match key {
        egui::Key::C => KeyCode::C,
        egui::Key::Escape => KeyCode::Escape,
        egui::Key::ArrowUp => KeyCode::Up,
        egui::Key::ArrowDown => KeyCode::Down,
        egui::Key::ArrowLeft => KeyCode::Left,
        egui::Key::ArrowRight => KeyCode::Right,
        _ => return None,
    };
    Some(code)
}

pub fn modifiers(m: egui::Modifiers) -> Modifiers {
    Modifiers {
        ctrl: m.ctrl || m.mac_cmd,
        shift: m.shift,
        alt: m.alt,
    }
}

/// Position relative to the viewport's top-left corner, in physical pixels.
pub fn to_pixels(pos: egui::Pos2, rect: egui::Rect, pixels_per_point: f32) -> Vec2 {
    let local = pos - rect.min;
    Vec2::new(local.x, local.y) * pixels_per_point
}

/// Translate this frame's egui events for a viewport occupying `rect`.
///
/// Presses only count inside the viewport; moves and releases are kept
/// everywhere so a drag can leave it. Keys are skipped while a widget has
/// keyboard focus.
///
/// The backend turns Ctrl+C (Cmd+C) into `Event::Copy` without a key press,
/// so that event is mapped back to a ctrl+C press.
pub fn collect_input(ctx: &egui::Context, rect: egui::Rect) -> ViewportInput {
    let ppp = ctx.pixels_per_point();
    let wants_keys = ctx.wants_keyboard_input();
    let mut out = ViewportInput::default();

    ctx.input(|i| {
        for event in &i.events {
            match event {
                egui::Event::PointerMoved(pos) => out.pointer.push(PointerEvent::Move {
                    position: to_pixels(*pos, rect, ppp),
                }),
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    let Some(button) = mouse_button(*button) else {
                        continue;
                    };
                    let position = to_pixels(*pos, rect, ppp);
                    if *pressed && rect.contains(*pos) {
                        out.pointer.push(PointerEvent::ButtonDown { button, position });
                    } else if !*pressed {
                        out.pointer.push(PointerEvent::ButtonUp { button, position });
                    }
                }
                egui::Event::Copy if !wants_keys => {
                    out.keys.push(KeyEvent::pressed(KeyCode::C).with_ctrl());
                }
                egui::Event::Key {
                    key,
                    pressed,
                    repeat: false,
                    modifiers: m,
                    ..
                } if !wants_keys => {
                    if let Some(key) = key_code(*key) {
                        out.keys.push(KeyEvent {
                            kind: if *pressed {
                                KeyEventKind::Pressed
                            } else {
                                KeyEventKind::Released
                            },
                            key,
                            modifiers: modifiers(*m),
                        });
                    }
                }
                _ => {}
            }
        }
    });

    out
}

fn fmt_uniform(value: &UniformValue) -> String {
    match value {
        UniformValue::F32(v) => format!("{:.3}", v),
        UniformValue::Vec2(v) => format!("({:.1}, {:.1})", v.x, v.y),
        UniformValue::Vec3(v) => format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z),
        UniformValue::Vec4(v) => format!("({:.1}, {:.1}, {:.1}, {:.1})", v.x, v.y, v.z, v.w),
        UniformValue::Mat4(_) => "mat4".to_string(),
    }
}

/// Draw the viewport contents: the active label, the uniforms pushed this
/// frame, and the define block the shader is compiled with.
///
/// Returns the rect the viewport occupies, for the next frame's input.
pub fn render_viewport(
    ui: &mut egui::Ui,
    label: &str,
    uniforms: &UniformBlocks,
    header: &str,
    generation: u64,
) -> egui::Rect {
    let rect = ui.available_rect_before_wrap();
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_rgb(97, 133, 26));

    ui.monospace(label);
    ui.separator();

    egui::Grid::new("uniforms").striped(true).show(ui, |ui| {
        for (block, name) in [
            ("ToyCB", "iResolution"),
            ("ToyCB", "iTime"),
            ("ToyCB", "iMouse"),
            ("Camera", "camEye"),
        ] {
            ui.monospace(format!("{}.{}", block, name));
            match uniforms.get(block, name) {
                Some(value) => ui.monospace(fmt_uniform(value)),
                None => ui.weak("-"),
            };
            ui.end_row();
        }
    });

    ui.separator();
    ui.label(
        egui::RichText::new(format!("Define generation {}", generation))
            .small()
            .weak(),
    );
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.monospace(header);
    });

    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_viewport_relative_pixels() {
        let rect = egui::Rect::from_min_size(egui::pos2(200.0, 50.0), egui::vec2(400.0, 300.0));
        let px = to_pixels(egui::pos2(250.0, 150.0), rect, 2.0);
        assert_eq!(px, Vec2::new(100.0, 200.0));
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(mouse_button(egui::PointerButton::Primary), Some(MouseButton::Left));
        assert_eq!(mouse_button(egui::PointerButton::Secondary), Some(MouseButton::Right));
        assert_eq!(mouse_button(egui::PointerButton::Extra1), None);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_code(egui::Key::C), Some(KeyCode::C));
        assert_eq!(key_code(egui::Key::Escape), Some(KeyCode::Escape));
        assert_eq!(key_code(egui::Key::F1), None);
        assert_eq!(key_code(egui::Key::Q), None);
    }

    fn collect_from(events: Vec<egui::Event>) -> ViewportInput {
        let ctx = egui::Context::default();
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(400.0, 300.0));
        let raw = egui::RawInput {
            events,
            ..Default::default()
        };
        let mut out = ViewportInput::default();
        let _ = ctx.run(raw, |ctx| {
            out = collect_input(ctx, rect);
        });
        out
    }

    #[test]
    fn test_copy_event_becomes_ctrl_c() {
        let input = collect_from(vec![egui::Event::Copy]);
        assert_eq!(input.keys, vec![KeyEvent::pressed(KeyCode::C).with_ctrl()]);
    }

    #[test]
    fn test_plain_c_press_has_no_ctrl() {
        let input = collect_from(vec![egui::Event::Key {
            key: egui::Key::C,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }]);
        assert_eq!(input.keys, vec![KeyEvent::pressed(KeyCode::C)]);
    }

    #[test]
    fn test_command_counts_as_ctrl() {
        let m = modifiers(egui::Modifiers {
            mac_cmd: true,
            ..Default::default()
        });
        assert!(m.ctrl);
    }
}
