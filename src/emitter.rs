//! Shader-definition emission.
//!
//! Once a cycle's config is consistent, the [`ParameterEmitter`] serializes it
//! into named preprocessor definitions and hands them to the rendering
//! collaborator through a [`DefineSink`]. It also builds the label shown in
//! the UI, copied to the clipboard, and used to name captures.
//!
//! # Keys
//!
//! | Group | Keys |
//! |-------|------|
//! | Coloring (optional) | `V_COLORING`, `V_COLORING_FUNC`, `V_COLOR_A`..`V_COLOR_D` |
//! | Selection | `SCENE_SDF`, `SCENE_BDF`, `TRACE`, `SHADOW` |
//! | Primary rays | `PRIMARY_MAXITER`, `PRIMARY_MAXDIST` |
//! | Shadow rays | `SECONDARY_MAXITER`, `SECONDARY_MAXDIST`, `SECONDARY_MINDIST`, `SECONDARY_EPSILON`, `SECONDARY_NOFFSET` |
//! | Scene payload | `S_THRESHOLD`, `S_BLOB_RADIUS`, `S_MARCH_EPSILON`, `S_KAPPA_FACTOR` |
//! | Primitives | `P_REPEAT_X_NUM`, `P_REPEAT_Y_NUM`, `P_REPEAT_Z_NUM`, `P_REPEAT_DIST`, `P_PRIMITIVE_DATA`, `P_TEST_POS`, `P_PLANE_ON` |
//!
//! # Value Formats
//!
//! - integers: decimal, `256`
//! - floats: shortest round-trip text that always has a `.`, `500.0`
//! - vectors: `vec3(1.0,0.5,0.0)`
//! - booleans: `1` or `0`
//!
//! # Atomicity
//!
//! The full bundle is built before the sink sees any of it, and the sink gets
//! exactly one [`apply_defines`](DefineSink::apply_defines) call. The stored
//! snapshot only advances when that call succeeds, so a rejected bundle is
//! retried on the next cycle.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::config::ToyConfig;
use crate::error::DefineError;
use crate::tracker::{ChangeSet, ChangeTracker, ParameterSnapshot};

/// Ordered list of unique `(key, value)` definitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShaderDefines {
    entries: Vec<(String, String)>,
}

impl ShaderDefines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, replacing the value if the key is already present.
    pub fn define(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Which optional key groups are emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    /// Emit the `V_COLOR*` keys. Shaders built without the coloring
    /// subsystem leave this off.
    pub coloring: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { coloring: true }
    }
}

/// Format a float the way the shader preprocessor expects it.
pub fn fmt_float(v: f32) -> String {
    let s = v.to_string();
    if s.contains('.') || !v.is_finite() {
        s
    } else {
        format!("{}.0", s)
    }
}

/// Format a vector as a `vec3(x,y,z)` constructor.
pub fn fmt_vec3(v: Vec3) -> String {
    format!("vec3({},{},{})", fmt_float(v.x), fmt_float(v.y), fmt_float(v.z))
}

fn fmt_bool(v: bool) -> &'static str {
    if v {
        "1"
    } else {
        "0"
    }
}

/// Build the complete definition bundle for `config`.
pub fn build_defines(config: &ToyConfig, options: EmitOptions) -> ShaderDefines {
    let mut d = ShaderDefines::new();

    if options.coloring {
        let coloring = &config.coloring;
        d.define("V_COLORING", coloring.mode.code().to_string());
        d.define("V_COLORING_FUNC", format!("itershade{}", coloring.step_fn.label()));
        d.define("V_COLOR_A", fmt_vec3(coloring.colors[0]));
        d.define("V_COLOR_B", fmt_vec3(coloring.colors[1]));
        d.define("V_COLOR_C", fmt_vec3(coloring.colors[2]));
        d.define("V_COLOR_D", fmt_vec3(coloring.colors[3]));
    }

    let scene = &config.scene;
    d.define("SCENE_SDF", format!("sd{}", scene.kind.label()));
    d.define("SCENE_BDF", format!("bd{}", scene.kind.label()));
    d.define("TRACE", config.tracer.label());
    d.define("SHADOW", config.shadow.label());

    d.define("PRIMARY_MAXITER", config.primary.max_iter.to_string());
    d.define("PRIMARY_MAXDIST", fmt_float(config.primary.max_dist));

    let secondary = &config.secondary;
    d.define("SECONDARY_MAXITER", secondary.max_iter.to_string());
    d.define("SECONDARY_MAXDIST", fmt_float(secondary.max_dist));
    d.define("SECONDARY_MINDIST", fmt_float(secondary.min_dist));
    d.define("SECONDARY_EPSILON", fmt_float(secondary.epsilon));
    d.define("SECONDARY_NOFFSET", fmt_float(secondary.normal_offset));

    d.define("S_THRESHOLD", fmt_float(scene.threshold));
    d.define("S_BLOB_RADIUS", fmt_float(scene.blob_radius));
    d.define("S_MARCH_EPSILON", fmt_float(config.primary.march_epsilon));
    d.define("S_KAPPA_FACTOR", fmt_float(config.primary.kappa_factor));

    d.define("P_REPEAT_X_NUM", scene.repeat_count.x.to_string());
    d.define("P_REPEAT_Y_NUM", scene.repeat_count.y.to_string());
    d.define("P_REPEAT_Z_NUM", scene.repeat_count.z.to_string());
    d.define("P_REPEAT_DIST", fmt_vec3(scene.repeat_dist));
    d.define("P_PRIMITIVE_DATA", fmt_vec3(scene.primitive_data));
    d.define("P_TEST_POS", fmt_vec3(scene.test_pos));
    d.define("P_PLANE_ON", fmt_bool(scene.show_plane));

    d
}

/// Human-readable summary of the active configuration.
///
/// ```text
/// scStepsize_4_Primitives__sdf_trace__shadow-no_shadow__step-512
/// ```
pub fn label(config: &ToyConfig) -> String {
    let mode = config.coloring.mode;
    let step = if mode.is_step_map() {
        config.coloring.step_fn.label()
    } else {
        ""
    };
    format!(
        "sc{}_{}_{}__{}__shadow-{}__step-{}",
        mode.label(),
        step,
        config.scene.kind.label(),
        config.tracer.label(),
        config.shadow.label(),
        config.primary.max_iter
    )
}

/// Receiver of definition bundles, usually the shader program owner.
pub trait DefineSink {
    /// Replace the active definitions with `defines` as one unit.
    fn apply_defines(&mut self, defines: &ShaderDefines) -> Result<(), DefineError>;
}

/// Outcome of [`ParameterEmitter::emit_if_dirty`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Emission {
    /// Nothing differed from the snapshot.
    Clean,
    /// A new bundle was accepted by the sink.
    Emitted(ChangeSet),
}

impl Emission {
    pub fn emitted(&self) -> bool {
        matches!(self, Emission::Emitted(_))
    }
}

/// Owns the last emitted snapshot and the current label.
#[derive(Clone, Debug, Default)]
pub struct ParameterEmitter {
    snapshot: Option<ParameterSnapshot>,
    label: String,
    options: EmitOptions,
}

impl ParameterEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self {
            snapshot: None,
            label: String::new(),
            options,
        }
    }

    pub fn snapshot(&self) -> Option<&ParameterSnapshot> {
        self.snapshot.as_ref()
    }

    /// Label of the last emitted config; empty before the first emission.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> EmitOptions {
        self.options
    }

    /// Push `config` to `sink` if it differs from the snapshot.
    pub fn emit_if_dirty(
        &mut self,
        config: &ToyConfig,
        sink: &mut impl DefineSink,
    ) -> Result<Emission, DefineError> {
        let changes = ChangeTracker::diff(self.snapshot.as_ref(), config);
        if !changes.is_dirty() {
            return Ok(Emission::Clean);
        }

        let defines = build_defines(config, self.options);
        if let Err(e) = sink.apply_defines(&defines) {
            log::warn!("{}", e);
            return Err(e);
        }

        self.label = label(config);
        self.snapshot = Some(ParameterSnapshot {
            config: config.clone(),
            defines,
        });
        log::info!("Emitted {} changed field(s): {}", changes.len(), self.label);
        Ok(Emission::Emitted(changes))
    }

    /// Forget the snapshot so the next cycle emits every definition.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }
}

/// In-memory [`DefineSink`] that tracks when a shader relink is pending.
#[derive(Clone, Debug, Default)]
pub struct DefineSet {
    defines: BTreeMap<String, String>,
    generation: u64,
    compiled_generation: u64,
}

impl DefineSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.defines.get(key).map(String::as_str)
    }

    /// Bumped each time an applied bundle changes any value.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn needs_recompile(&self) -> bool {
        self.generation != self.compiled_generation
    }

    pub fn mark_compiled(&mut self) {
        self.compiled_generation = self.generation;
    }

    /// `#define` block to prepend to a shader source.
    pub fn header(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.defines {
            out.push_str("#define ");
            out.push_str(key);
            out.push(' ');
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}

impl DefineSink for DefineSet {
    fn apply_defines(&mut self, defines: &ShaderDefines) -> Result<(), DefineError> {
        let mut changed = false;
        for (key, value) in defines.iter() {
            if key.is_empty() || key.contains(char::is_whitespace) {
                return Err(DefineError::new(format!("invalid define name '{}'", key)));
            }
            if self.defines.get(key).map(String::as_str) != Some(value) {
                changed = true;
            }
        }
        if !changed {
            return Ok(());
        }
        for (key, value) in defines.iter() {
            self.defines.insert(key.to_string(), value.to_string());
        }
        self.generation += 1;
        Ok(())
    }
}
