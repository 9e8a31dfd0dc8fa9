//! Configuration types for the raymarching toy.
//!
//! [`ToyConfig`] holds every user-editable field in one struct. It is edited
//! through the UI or the [registry](crate::registry), corrected by the
//! [resolver](crate::resolve), and serialized to JSON for save/load.

mod coloring;
mod scene;
mod tracing;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

pub use coloring::{Coloring, ColoringConfig, StepColoring};
pub use scene::{Scene, SceneConfig};
pub use tracing::{Shadow, Tracer};

/// Primary ray bounds and the segment tracing tolerances.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PrimaryMarch {
    pub max_iter: i32,
    pub max_dist: f32,
    /// Only read by segment and reference sphere tracing.
    pub march_epsilon: f32,
    /// Only read by segment tracing.
    pub kappa_factor: f32,
}

impl Default for PrimaryMarch {
    fn default() -> Self {
        Self {
            max_iter: 512,
            max_dist: 500.0,
            march_epsilon: 0.1,
            kappa_factor: 2.0,
        }
    }
}

/// Shadow ray bounds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SecondaryMarch {
    pub max_iter: i32,
    pub max_dist: f32,
    pub epsilon: f32,
    pub min_dist: f32,
    /// Offset along the surface normal for shadow ray origins.
    pub normal_offset: f32,
}

impl Default for SecondaryMarch {
    fn default() -> Self {
        Self {
            max_iter: 256,
            max_dist: 100.0,
            epsilon: 0.001,
            min_dist: 0.01,
            normal_offset: 0.01,
        }
    }
}

/// Complete render configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ToyConfig {
    #[serde(default)]
    pub coloring: ColoringConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    pub tracer: Tracer,
    #[serde(default)]
    pub primary: PrimaryMarch,
    pub shadow: Shadow,
    #[serde(default)]
    pub secondary: SecondaryMarch,
}

impl ToyConfig {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    ///
    /// The result is normalized, so a hand-edited file cannot reach the
    /// renderer with a contradictory selection.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and normalize a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ToyConfig = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Run the resolver with no pending edits, clamping ranges first.
    pub fn normalized(&self) -> Self {
        let mut clamped = self.clone();
        clamped.clamp_ranges();
        crate::resolve::resolve(&clamped, clamped.clone()).config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_startup_state() {
        let config = ToyConfig::default();
        assert_eq!(config.scene.kind, Scene::Primitives);
        assert_eq!(config.tracer, Tracer::SdfTrace);
        assert_eq!(config.shadow, Shadow::SdfTrace);
        assert_eq!(config.coloring.mode, Coloring::Default);
        assert_eq!(config.primary.max_iter, 512);
        assert_eq!(config.secondary.max_iter, 256);
    }

    #[test]
    fn test_default_is_already_normalized() {
        let config = ToyConfig::default();
        assert_eq!(config.normalized(), config);
    }

    #[test]
    fn test_json_roundtrip_normalizes() {
        let mut config = ToyConfig::default();
        config.scene.kind = Scene::Blobs;
        config.shadow = Shadow::BdfTrace;
        config.primary.max_iter = 5000;

        let json = serde_json::to_string(&config).unwrap();
        let loaded = ToyConfig::from_json(&json).unwrap();

        assert_eq!(loaded.shadow, Shadow::NoShadow);
        assert_eq!(loaded.primary.max_iter, 1024);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let loaded = ToyConfig::from_json(r#"{ "tracer": "BdfTrace", "shadow": "BdfTrace" }"#).unwrap();
        assert_eq!(loaded.tracer, Tracer::BdfTrace);
        assert_eq!(loaded.shadow, Shadow::BdfTrace);
        assert_eq!(loaded.scene, SceneConfig::default());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            ToyConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
