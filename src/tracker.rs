//! Change detection between reconciliation cycles.

use crate::config::ToyConfig;
use crate::emitter::ShaderDefines;
use crate::registry::Field;

/// The last configuration that reached the renderer, with the defines it
/// produced.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSnapshot {
    pub config: ToyConfig,
    pub defines: ShaderDefines,
}

/// Fields that differ from the last snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet(Vec<Field>);

impl ChangeSet {
    /// Every field, used when nothing has been emitted yet.
    pub fn all() -> Self {
        Self(Field::ALL.to_vec())
    }

    pub fn is_dirty(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains(&field)
    }

    pub fn fields(&self) -> &[Field] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Structural diff of a config against the last emitted snapshot.
pub struct ChangeTracker;

impl ChangeTracker {
    pub fn diff(snapshot: Option<&ParameterSnapshot>, config: &ToyConfig) -> ChangeSet {
        let Some(snapshot) = snapshot else {
            return ChangeSet::all();
        };
        let changed: Vec<Field> = Field::ALL
            .iter()
            .copied()
            .filter(|&field| snapshot.config.get(field) != config.get(field))
            .collect();
        if !changed.is_empty() {
            log::debug!(
                "dirty fields: {}",
                changed.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
            );
        }
        ChangeSet(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scene;

    fn snapshot_of(config: &ToyConfig) -> ParameterSnapshot {
        ParameterSnapshot {
            config: config.clone(),
            defines: ShaderDefines::default(),
        }
    }

    #[test]
    fn test_first_cycle_is_dirty() {
        let changes = ChangeTracker::diff(None, &ToyConfig::default());
        assert!(changes.is_dirty());
        assert_eq!(changes.len(), Field::ALL.len());
    }

    #[test]
    fn test_identical_config_is_clean() {
        let config = ToyConfig::default();
        let snapshot = snapshot_of(&config);
        assert!(!ChangeTracker::diff(Some(&snapshot), &config).is_dirty());
    }

    #[test]
    fn test_reports_exactly_the_changed_fields() {
        let config = ToyConfig::default();
        let snapshot = snapshot_of(&config);

        let mut edited = config.clone();
        edited.scene.kind = Scene::Torus;
        edited.secondary.normal_offset = 0.02;

        let changes = ChangeTracker::diff(Some(&snapshot), &edited);
        assert_eq!(changes.fields(), &[Field::Scene, Field::SecondaryNormalOffset]);
    }

    #[test]
    fn test_vector_component_change_is_detected() {
        let config = ToyConfig::default();
        let snapshot = snapshot_of(&config);
        let mut edited = config.clone();
        edited.coloring.colors[3].z = 0.0;
        assert!(ChangeTracker::diff(Some(&snapshot), &edited).contains(Field::ColorD));
    }
}
