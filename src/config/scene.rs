//! Scene selection and the per-scene payload.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Scene primitive rendered by the full-screen pass.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Scene {
    /// Metaball field. Allows every tracer, never casts shadows.
    Blobs,
    /// Gallery of primitives on a ground plane.
    #[default]
    Primitives,
    Sphere,
    Box,
    Cylinder,
    Torus,
    /// Box primitive with a movable probe position.
    Test,
}

impl Scene {
    pub const ALL: [Scene; 7] = [
        Scene::Blobs,
        Scene::Primitives,
        Scene::Sphere,
        Scene::Box,
        Scene::Cylinder,
        Scene::Torus,
        Scene::Test,
    ];

    /// Radio-button label, also the suffix of the `sd*`/`bd*` scene functions.
    pub fn label(&self) -> &'static str {
        match self {
            Scene::Blobs => "Blobs",
            Scene::Primitives => "Primitives",
            Scene::Sphere => "Sphere",
            Scene::Box => "Box",
            Scene::Cylinder => "Cylinder",
            Scene::Torus => "Torus",
            Scene::Test => "Test",
        }
    }

    /// Single repeatable primitive scenes expose repetition and the ground plane.
    pub fn is_repeatable(&self) -> bool {
        matches!(
            self,
            Scene::Sphere | Scene::Box | Scene::Cylinder | Scene::Torus | Scene::Test
        )
    }

    /// Primary march bounds `(max_iter, max_dist)` applied when switching to this scene.
    ///
    /// Blobs sit close to the camera and use a short-range profile; every other
    /// scene uses the long-range one.
    pub fn march_profile(&self) -> (i32, f32) {
        match self {
            Scene::Blobs => (150, 60.0),
            _ => (256, 500.0),
        }
    }

    /// Apply the primitive-size defaults this scene resets on selection.
    pub(crate) fn apply_payload_defaults(&self, data: &mut Vec3) {
        match self {
            Scene::Sphere => data.y = 0.7,
            Scene::Box | Scene::Test => *data = Vec3::new(0.4, 0.5, 0.6),
            Scene::Cylinder => {
                data.x = 0.6;
                data.y = 0.6;
            }
            Scene::Torus => {
                data.x = 0.9;
                data.y = 0.3;
            }
            Scene::Blobs | Scene::Primitives => {}
        }
    }
}

/// Scene selection together with every scene's payload.
///
/// Payload fields belong to one scene but are retained across switches.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SceneConfig {
    pub kind: Scene,
    /// Blob iso-surface threshold.
    pub threshold: f32,
    pub blob_radius: f32,
    /// Primitive sizes: sphere radius in `y`, box extents, cylinder/torus radii in `xy`.
    pub primitive_data: Vec3,
    pub test_pos: Vec3,
    pub repeat_count: IVec3,
    pub repeat_dist: Vec3,
    pub show_plane: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            kind: Scene::Primitives,
            threshold: 0.5,
            blob_radius: 4.0,
            primitive_data: Vec3::ONE,
            test_pos: Vec3::ZERO,
            repeat_count: IVec3::new(1000, 0, 1000),
            repeat_dist: Vec3::splat(4.0),
            show_plane: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_blobs_uses_short_range() {
        assert_eq!(Scene::Blobs.march_profile(), (150, 60.0));
        for scene in Scene::ALL.iter().filter(|s| **s != Scene::Blobs) {
            assert_eq!(scene.march_profile(), (256, 500.0), "{:?}", scene);
        }
    }

    #[test]
    fn test_payload_defaults_keep_unowned_components() {
        let mut data = Vec3::new(2.0, 3.0, 4.0);
        Scene::Torus.apply_payload_defaults(&mut data);
        assert_eq!(data, Vec3::new(0.9, 0.3, 4.0));

        let mut data = Vec3::new(2.0, 3.0, 4.0);
        Scene::Sphere.apply_payload_defaults(&mut data);
        assert_eq!(data, Vec3::new(2.0, 0.7, 4.0));

        let mut data = Vec3::new(2.0, 3.0, 4.0);
        Scene::Primitives.apply_payload_defaults(&mut data);
        assert_eq!(data, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_repeatable_scenes() {
        assert!(!Scene::Blobs.is_repeatable());
        assert!(!Scene::Primitives.is_repeatable());
        assert!(Scene::Sphere.is_repeatable());
        assert!(Scene::Test.is_repeatable());
    }
}
