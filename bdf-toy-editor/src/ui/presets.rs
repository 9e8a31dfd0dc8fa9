//! Built-in starting configurations

use bdf_toy::{
    Coloring, ColoringConfig, PrimaryMarch, Scene, SceneConfig, Shadow, StepColoring, ToyConfig,
    Tracer,
};
use glam::{IVec3, Vec3};

pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub config: fn() -> ToyConfig,
}

pub static PRESETS: &[Preset] = &[
    Preset {
        name: "Blob field",
        description: "Metaball blobs traced with bounding distances",
        config: || ToyConfig {
            scene: SceneConfig {
                kind: Scene::Blobs,
                threshold: 0.5,
                blob_radius: 4.0,
                ..Default::default()
            },
            tracer: Tracer::BdfTrace,
            primary: PrimaryMarch {
                max_iter: 150,
                max_dist: 60.0,
                ..Default::default()
            },
            shadow: Shadow::NoShadow,
            ..Default::default()
        },
    },
    Preset {
        name: "Primitive gallery",
        description: "Every primitive side by side, the startup scene",
        config: ToyConfig::default,
    },
    Preset {
        name: "Repeated spheres",
        description: "Step-count heat map over an infinite sphere grid",
        config: || ToyConfig {
            coloring: ColoringConfig {
                mode: Coloring::StepSize,
                step_fn: StepColoring::Four,
                ..Default::default()
            },
            scene: SceneConfig {
                kind: Scene::Sphere,
                primitive_data: Vec3::new(1.0, 0.7, 1.0),
                repeat_count: IVec3::new(1000, 0, 1000),
                repeat_dist: Vec3::splat(2.0),
                ..Default::default()
            },
            tracer: Tracer::SdfTrace,
            primary: PrimaryMarch {
                max_iter: 256,
                max_dist: 500.0,
                ..Default::default()
            },
            shadow: Shadow::NoShadow,
            ..Default::default()
        },
    },
    Preset {
        name: "Box field",
        description: "Repeated boxes traced with bounding distances",
        config: || ToyConfig {
            scene: SceneConfig {
                kind: Scene::Box,
                primitive_data: Vec3::new(0.4, 0.5, 0.6),
                repeat_dist: Vec3::splat(3.0),
                ..Default::default()
            },
            tracer: Tracer::BdfTrace,
            primary: PrimaryMarch {
                max_iter: 256,
                max_dist: 500.0,
                ..Default::default()
            },
            shadow: Shadow::BdfTrace,
            ..Default::default()
        },
    },
    Preset {
        name: "Torus shadows",
        description: "Shadow-ray step counts on a single torus",
        config: || ToyConfig {
            coloring: ColoringConfig {
                mode: Coloring::ShadowStep,
                step_fn: StepColoring::Hsv,
                ..Default::default()
            },
            scene: SceneConfig {
                kind: Scene::Torus,
                primitive_data: Vec3::new(0.9, 0.3, 1.0),
                repeat_count: IVec3::ZERO,
                ..Default::default()
            },
            tracer: Tracer::SdfTrace,
            primary: PrimaryMarch {
                max_iter: 256,
                max_dist: 500.0,
                ..Default::default()
            },
            shadow: Shadow::SdfTrace,
            ..Default::default()
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_already_consistent() {
        for preset in PRESETS {
            let config = (preset.config)();
            assert_eq!(config.normalized(), config, "{}", preset.name);
        }
    }
}
