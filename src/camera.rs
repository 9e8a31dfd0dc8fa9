//! Camera collaborator.
//!
//! The core never owns camera math; it only tells the camera where to look
//! when a scene is selected. [`OrbitCamera`] is the stock implementation.

use glam::{Mat4, Vec3};

use crate::config::Scene;
use crate::input::{KeyCode, KeyEvent, KeyEventKind, MouseButton, PointerEvent};

/// Camera pose requested by the core.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraHint {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraHint {
    /// Pose used when a session starts.
    pub const INITIAL: CameraHint = CameraHint {
        position: Vec3::new(0.0, 2.0, -4.0),
        target: Vec3::new(0.0, 1.0, 0.0),
    };

    /// Pose of the "Reset camera" button; also the single-primitive scene pose.
    pub const RESET: CameraHint = CameraHint {
        position: Vec3::new(2.0, 1.25, 1.5),
        target: Vec3::ZERO,
    };

    /// Pose applied when `scene` is selected.
    pub fn for_scene(scene: Scene) -> CameraHint {
        match scene {
            Scene::Blobs => CameraHint {
                position: Vec3::new(0.0, 3.5, 7.0),
                target: Vec3::new(0.0, 2.2, 0.0),
            },
            Scene::Primitives => CameraHint {
                position: Vec3::new(6.0, 3.0, 4.0),
                target: Vec3::new(0.0, 0.0, 0.5),
            },
            _ => CameraHint::RESET,
        }
    }

    /// Apply this pose to a camera.
    pub fn apply(&self, camera: &mut impl CameraControl) {
        camera.set_target(self.target);
        camera.set_position(self.position);
    }
}

/// Interface the host's camera exposes to the core.
pub trait CameraControl {
    fn set_position(&mut self, position: Vec3);
    fn set_target(&mut self, target: Vec3);
    fn set_aspect_ratio(&mut self, aspect: f32);
    /// Advance controller state; called once per rendered frame.
    fn begin_frame(&mut self);
    fn position(&self) -> Vec3;
    fn inv_view_proj(&self) -> Mat4;

    /// Returns true if the camera consumed the key.
    fn handle_key(&mut self, _event: &KeyEvent) -> bool {
        false
    }

    /// Returns true if the camera consumed the pointer event.
    fn handle_pointer(&mut self, _event: &PointerEvent) -> bool {
        false
    }
}

const ORBIT_KEY_STEP: f32 = 0.05;
const ORBIT_DRAG_SCALE: f32 = 0.005;
const MAX_PITCH: f32 = 1.54;

/// Orbit camera around a target point.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Last pointer position while the middle button is held.
    drag_from: Option<glam::Vec2>,
    /// Yaw/pitch accumulated since the last frame.
    pending: glam::Vec2,
}

impl OrbitCamera {
    /// Create a new camera with default positioning.
    pub fn new() -> Self {
        let mut camera = Self {
            yaw: 0.0,
            pitch: 0.3,
            distance: 3.0,
            target: Vec3::ZERO,
            aspect: 16.0 / 9.0,
            fovy_radians: 45.0_f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
            drag_from: None,
            pending: glam::Vec2::ZERO,
        };
        CameraHint::INITIAL.apply(&mut camera);
        camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Rotate around the target.
    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.pending.x += d_yaw;
        self.pending.y += d_pitch;
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraControl for OrbitCamera {
    /// Keeps the target and re-derives yaw, pitch and distance.
    fn set_position(&mut self, position: Vec3) {
        let offset = position - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }
        self.distance = distance;
        self.pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        self.yaw = offset.x.atan2(offset.z);
    }

    /// Keeps the eye position and re-aims at the new target.
    fn set_target(&mut self, target: Vec3) {
        let eye = self.position();
        self.target = target;
        self.set_position(eye);
    }

    fn set_aspect_ratio(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    fn begin_frame(&mut self) {
        self.yaw += self.pending.x;
        self.pitch = (self.pitch + self.pending.y).clamp(-MAX_PITCH, MAX_PITCH);
        self.pending = glam::Vec2::ZERO;
    }

    fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    fn inv_view_proj(&self) -> Mat4 {
        (self.projection_matrix() * self.view_matrix()).inverse()
    }

    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if event.kind != KeyEventKind::Pressed {
            return false;
        }
        match event.key {
            KeyCode::Left => self.orbit(-ORBIT_KEY_STEP, 0.0),
            KeyCode::Right => self.orbit(ORBIT_KEY_STEP, 0.0),
            KeyCode::Up => self.orbit(0.0, ORBIT_KEY_STEP),
            KeyCode::Down => self.orbit(0.0, -ORBIT_KEY_STEP),
            _ => return false,
        }
        true
    }

    fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        match *event {
            PointerEvent::ButtonDown { button: MouseButton::Middle, position } => {
                self.drag_from = Some(position);
                true
            }
            PointerEvent::ButtonUp { button: MouseButton::Middle, .. } => {
                self.drag_from = None;
                true
            }
            PointerEvent::Move { position } => match self.drag_from {
                Some(from) => {
                    let delta = (position - from) * ORBIT_DRAG_SCALE;
                    self.orbit(-delta.x, delta.y);
                    self.drag_from = Some(position);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_new_camera_starts_at_initial_pose() {
        let camera = OrbitCamera::new();
        assert!(approx(camera.position(), CameraHint::INITIAL.position));
        assert!(approx(camera.target, CameraHint::INITIAL.target));
    }

    #[test]
    fn test_hint_places_camera_exactly() {
        let mut camera = OrbitCamera::new();
        let hint = CameraHint::for_scene(Scene::Primitives);
        hint.apply(&mut camera);
        assert!(approx(camera.position(), hint.position));
        assert!(approx(camera.target, hint.target));
    }

    #[test]
    fn test_orbit_applies_on_begin_frame() {
        let mut camera = OrbitCamera::new();
        let before = camera.position();
        let press = KeyEvent::pressed(KeyCode::Left);
        assert!(camera.handle_key(&press));
        assert!(approx(camera.position(), before));
        camera.begin_frame();
        assert!(!approx(camera.position(), before));
    }

    #[test]
    fn test_inverse_view_proj_unprojects_target_direction() {
        let camera = OrbitCamera::new();
        let inv = camera.inv_view_proj();
        let near = inv.project_point3(Vec3::new(0.0, 0.0, 0.0));
        let far = inv.project_point3(Vec3::new(0.0, 0.0, 1.0));
        let ray = (far - near).normalize();
        let to_target = (camera.target - camera.position()).normalize();
        assert!(ray.dot(to_target) > 0.999);
    }

    #[test]
    fn test_left_drag_is_not_consumed() {
        let mut camera = OrbitCamera::new();
        let down = PointerEvent::ButtonDown {
            button: MouseButton::Left,
            position: glam::Vec2::ZERO,
        };
        assert!(!camera.handle_pointer(&down));
    }
}
