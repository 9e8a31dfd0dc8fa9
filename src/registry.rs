//! Typed, range-checked access to every configurable field.
//!
//! The registry gives UI toolkits, presets and tests one uniform way to read
//! and write [`ToyConfig`] by field id. Numeric writes clamp into the
//! documented range instead of failing. The [change tracker](crate::tracker)
//! walks [`Field::ALL`] to diff two configs.

use glam::{IVec3, Vec3};

use crate::config::{Coloring, Scene, Shadow, StepColoring, ToyConfig, Tracer};
use crate::error::RegistryError;

/// Identifier of a single configurable field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Coloring,
    StepColoring,
    ColorA,
    ColorB,
    ColorC,
    ColorD,
    Scene,
    Threshold,
    BlobRadius,
    PrimitiveData,
    TestPos,
    RepeatCount,
    RepeatDist,
    ShowPlane,
    Tracer,
    PrimaryMaxIter,
    PrimaryMaxDist,
    MarchEpsilon,
    KappaFactor,
    Shadow,
    SecondaryMaxIter,
    SecondaryMaxDist,
    SecondaryEpsilon,
    SecondaryMinDist,
    SecondaryNormalOffset,
}

/// Bounds of a numeric field. Vector fields apply it per component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Range {
    Float { min: f32, max: f32 },
    Int { min: i32, max: i32 },
}

const UNIT: Range = Range::Float { min: 0.0, max: 1.0 };
const TOLERANCE: Range = Range::Float { min: 1e-15, max: 1.0 };
const ITERATIONS: Range = Range::Int { min: 1, max: 1024 };
const DISTANCE: Range = Range::Float { min: 1.0, max: 1024.0 };
const PRIMITIVE: Range = Range::Float { min: 0.0, max: 8.0 };

impl Field {
    pub const ALL: [Field; 25] = [
        Field::Coloring,
        Field::StepColoring,
        Field::ColorA,
        Field::ColorB,
        Field::ColorC,
        Field::ColorD,
        Field::Scene,
        Field::Threshold,
        Field::BlobRadius,
        Field::PrimitiveData,
        Field::TestPos,
        Field::RepeatCount,
        Field::RepeatDist,
        Field::ShowPlane,
        Field::Tracer,
        Field::PrimaryMaxIter,
        Field::PrimaryMaxDist,
        Field::MarchEpsilon,
        Field::KappaFactor,
        Field::Shadow,
        Field::SecondaryMaxIter,
        Field::SecondaryMaxDist,
        Field::SecondaryEpsilon,
        Field::SecondaryMinDist,
        Field::SecondaryNormalOffset,
    ];

    /// Stable field name, matching the define or slider label where one exists.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Coloring => "V_COLORING",
            Field::StepColoring => "V_COLORING_FUNC",
            Field::ColorA => "V_COLOR_A",
            Field::ColorB => "V_COLOR_B",
            Field::ColorC => "V_COLOR_C",
            Field::ColorD => "V_COLOR_D",
            Field::Scene => "SCENE",
            Field::Threshold => "S_THRESHOLD",
            Field::BlobRadius => "S_BLOB_RADIUS",
            Field::PrimitiveData => "P_PRIMITIVE_DATA",
            Field::TestPos => "P_TEST_POS",
            Field::RepeatCount => "P_REPEAT_NUM",
            Field::RepeatDist => "P_REPEAT_DIST",
            Field::ShowPlane => "P_PLANE_ON",
            Field::Tracer => "TRACE",
            Field::PrimaryMaxIter => "PRIMARY_MAXITER",
            Field::PrimaryMaxDist => "PRIMARY_MAXDIST",
            Field::MarchEpsilon => "S_MARCH_EPSILON",
            Field::KappaFactor => "S_KAPPA_FACTOR",
            Field::Shadow => "SHADOW",
            Field::SecondaryMaxIter => "SECONDARY_MAXITER",
            Field::SecondaryMaxDist => "SECONDARY_MAXDIST",
            Field::SecondaryEpsilon => "SECONDARY_EPSILON",
            Field::SecondaryMinDist => "SECONDARY_MINDIST",
            Field::SecondaryNormalOffset => "SECONDARY_NOFFSET",
        }
    }

    /// Look a field up by its [`name`](Field::name).
    pub fn from_name(name: &str) -> Result<Field, RegistryError> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name() == name)
            .ok_or_else(|| RegistryError::UnknownField(name.to_string()))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Field::Coloring => ValueKind::Coloring,
            Field::StepColoring => ValueKind::StepColoring,
            Field::Scene => ValueKind::Scene,
            Field::Tracer => ValueKind::Tracer,
            Field::Shadow => ValueKind::Shadow,
            Field::ShowPlane => ValueKind::Bool,
            Field::PrimaryMaxIter | Field::SecondaryMaxIter => ValueKind::Int,
            Field::RepeatCount => ValueKind::IVec3,
            Field::ColorA
            | Field::ColorB
            | Field::ColorC
            | Field::ColorD
            | Field::PrimitiveData
            | Field::TestPos
            | Field::RepeatDist => ValueKind::Vec3,
            Field::Threshold
            | Field::BlobRadius
            | Field::PrimaryMaxDist
            | Field::MarchEpsilon
            | Field::KappaFactor
            | Field::SecondaryMaxDist
            | Field::SecondaryEpsilon
            | Field::SecondaryMinDist
            | Field::SecondaryNormalOffset => ValueKind::Float,
        }
    }

    /// Documented range for numeric fields.
    pub fn range(&self) -> Option<Range> {
        match self {
            Field::ColorA | Field::ColorB | Field::ColorC | Field::ColorD => Some(UNIT),
            Field::Threshold => Some(UNIT),
            Field::BlobRadius | Field::PrimitiveData | Field::TestPos => Some(PRIMITIVE),
            // Defaults ship with 1000 repetitions on x and z.
            Field::RepeatCount => Some(Range::Int { min: 0, max: 1000 }),
            Field::RepeatDist => Some(Range::Float { min: 0.0, max: 25.0 }),
            Field::PrimaryMaxIter | Field::SecondaryMaxIter => Some(ITERATIONS),
            Field::PrimaryMaxDist | Field::SecondaryMaxDist => Some(DISTANCE),
            Field::MarchEpsilon => Some(TOLERANCE),
            Field::KappaFactor => Some(Range::Float { min: 1e-15, max: 5.0 }),
            Field::SecondaryEpsilon | Field::SecondaryMinDist | Field::SecondaryNormalOffset => {
                Some(TOLERANCE)
            }
            Field::Coloring
            | Field::StepColoring
            | Field::Scene
            | Field::Tracer
            | Field::Shadow
            | Field::ShowPlane => None,
        }
    }
}

/// Declared type of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Vec3,
    IVec3,
    Scene,
    Tracer,
    Shadow,
    Coloring,
    StepColoring,
}

/// A field value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec3(Vec3),
    IVec3(IVec3),
    Scene(Scene),
    Tracer(Tracer),
    Shadow(Shadow),
    Coloring(Coloring),
    StepColoring(StepColoring),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::IVec3(_) => ValueKind::IVec3,
            Value::Scene(_) => ValueKind::Scene,
            Value::Tracer(_) => ValueKind::Tracer,
            Value::Shadow(_) => ValueKind::Shadow,
            Value::Coloring(_) => ValueKind::Coloring,
            Value::StepColoring(_) => ValueKind::StepColoring,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Value::Vec3(v)
    }
}

impl From<IVec3> for Value {
    fn from(v: IVec3) -> Self {
        Value::IVec3(v)
    }
}

impl From<Scene> for Value {
    fn from(v: Scene) -> Self {
        Value::Scene(v)
    }
}

impl From<Tracer> for Value {
    fn from(v: Tracer) -> Self {
        Value::Tracer(v)
    }
}

impl From<Shadow> for Value {
    fn from(v: Shadow) -> Self {
        Value::Shadow(v)
    }
}

impl From<Coloring> for Value {
    fn from(v: Coloring) -> Self {
        Value::Coloring(v)
    }
}

impl From<StepColoring> for Value {
    fn from(v: StepColoring) -> Self {
        Value::StepColoring(v)
    }
}

/// Clamp `v` into `range`; NaN keeps `current`.
fn clamp_f32(v: f32, current: f32, range: Option<Range>) -> f32 {
    if v.is_nan() {
        log::warn!("Ignoring NaN field value");
        return current;
    }
    match range {
        Some(Range::Float { min, max }) => v.clamp(min, max),
        _ => v,
    }
}

fn clamp_vec3(v: Vec3, current: Vec3, range: Option<Range>) -> Vec3 {
    Vec3::new(
        clamp_f32(v.x, current.x, range),
        clamp_f32(v.y, current.y, range),
        clamp_f32(v.z, current.z, range),
    )
}

fn clamp_i32(v: i32, range: Option<Range>) -> i32 {
    match range {
        Some(Range::Int { min, max }) => v.clamp(min, max),
        _ => v,
    }
}

impl ToyConfig {
    /// Read a field.
    pub fn get(&self, field: Field) -> Value {
        match field {
            Field::Coloring => Value::Coloring(self.coloring.mode),
            Field::StepColoring => Value::StepColoring(self.coloring.step_fn),
            Field::ColorA => Value::Vec3(self.coloring.colors[0]),
            Field::ColorB => Value::Vec3(self.coloring.colors[1]),
            Field::ColorC => Value::Vec3(self.coloring.colors[2]),
            Field::ColorD => Value::Vec3(self.coloring.colors[3]),
            Field::Scene => Value::Scene(self.scene.kind),
            Field::Threshold => Value::Float(self.scene.threshold),
            Field::BlobRadius => Value::Float(self.scene.blob_radius),
            Field::PrimitiveData => Value::Vec3(self.scene.primitive_data),
            Field::TestPos => Value::Vec3(self.scene.test_pos),
            Field::RepeatCount => Value::IVec3(self.scene.repeat_count),
            Field::RepeatDist => Value::Vec3(self.scene.repeat_dist),
            Field::ShowPlane => Value::Bool(self.scene.show_plane),
            Field::Tracer => Value::Tracer(self.tracer),
            Field::PrimaryMaxIter => Value::Int(self.primary.max_iter),
            Field::PrimaryMaxDist => Value::Float(self.primary.max_dist),
            Field::MarchEpsilon => Value::Float(self.primary.march_epsilon),
            Field::KappaFactor => Value::Float(self.primary.kappa_factor),
            Field::Shadow => Value::Shadow(self.shadow),
            Field::SecondaryMaxIter => Value::Int(self.secondary.max_iter),
            Field::SecondaryMaxDist => Value::Float(self.secondary.max_dist),
            Field::SecondaryEpsilon => Value::Float(self.secondary.epsilon),
            Field::SecondaryMinDist => Value::Float(self.secondary.min_dist),
            Field::SecondaryNormalOffset => Value::Float(self.secondary.normal_offset),
        }
    }

    /// Write a field, clamping numeric values into the field's range.
    ///
    /// Only a value of the wrong type is rejected. Nothing is emitted here;
    /// the change becomes visible on the next reconciliation cycle.
    pub fn set(&mut self, field: Field, value: impl Into<Value>) -> Result<(), RegistryError> {
        let value = value.into();
        let range = field.range();
        let mismatch = || RegistryError::TypeMismatch {
            field,
            expected: field.kind(),
            found: value.kind(),
        };

        match (field, value) {
            (Field::Coloring, Value::Coloring(v)) => self.coloring.mode = v,
            (Field::StepColoring, Value::StepColoring(v)) => self.coloring.step_fn = v,
            (Field::ColorA, Value::Vec3(v)) => self.set_color(0, v, range),
            (Field::ColorB, Value::Vec3(v)) => self.set_color(1, v, range),
            (Field::ColorC, Value::Vec3(v)) => self.set_color(2, v, range),
            (Field::ColorD, Value::Vec3(v)) => self.set_color(3, v, range),
            (Field::Scene, Value::Scene(v)) => self.scene.kind = v,
            (Field::Threshold, Value::Float(v)) => {
                self.scene.threshold = clamp_f32(v, self.scene.threshold, range)
            }
            (Field::BlobRadius, Value::Float(v)) => {
                self.scene.blob_radius = clamp_f32(v, self.scene.blob_radius, range)
            }
            (Field::PrimitiveData, Value::Vec3(v)) => {
                self.scene.primitive_data = clamp_vec3(v, self.scene.primitive_data, range)
            }
            (Field::TestPos, Value::Vec3(v)) => {
                self.scene.test_pos = clamp_vec3(v, self.scene.test_pos, range)
            }
            (Field::RepeatCount, Value::IVec3(v)) => {
                self.scene.repeat_count = IVec3::new(
                    clamp_i32(v.x, range),
                    clamp_i32(v.y, range),
                    clamp_i32(v.z, range),
                )
            }
            (Field::RepeatDist, Value::Vec3(v)) => {
                self.scene.repeat_dist = clamp_vec3(v, self.scene.repeat_dist, range)
            }
            (Field::ShowPlane, Value::Bool(v)) => self.scene.show_plane = v,
            (Field::Tracer, Value::Tracer(v)) => self.tracer = v,
            (Field::PrimaryMaxIter, Value::Int(v)) => self.primary.max_iter = clamp_i32(v, range),
            (Field::PrimaryMaxDist, Value::Float(v)) => {
                self.primary.max_dist = clamp_f32(v, self.primary.max_dist, range)
            }
            (Field::MarchEpsilon, Value::Float(v)) => {
                self.primary.march_epsilon = clamp_f32(v, self.primary.march_epsilon, range)
            }
            (Field::KappaFactor, Value::Float(v)) => {
                self.primary.kappa_factor = clamp_f32(v, self.primary.kappa_factor, range)
            }
            (Field::Shadow, Value::Shadow(v)) => self.shadow = v,
            (Field::SecondaryMaxIter, Value::Int(v)) => {
                self.secondary.max_iter = clamp_i32(v, range)
            }
            (Field::SecondaryMaxDist, Value::Float(v)) => {
                self.secondary.max_dist = clamp_f32(v, self.secondary.max_dist, range)
            }
            (Field::SecondaryEpsilon, Value::Float(v)) => {
                self.secondary.epsilon = clamp_f32(v, self.secondary.epsilon, range)
            }
            (Field::SecondaryMinDist, Value::Float(v)) => {
                self.secondary.min_dist = clamp_f32(v, self.secondary.min_dist, range)
            }
            (Field::SecondaryNormalOffset, Value::Float(v)) => {
                self.secondary.normal_offset = clamp_f32(v, self.secondary.normal_offset, range)
            }
            _ => return Err(mismatch()),
        }
        Ok(())
    }

    fn set_color(&mut self, index: usize, v: Vec3, range: Option<Range>) {
        self.coloring.colors[index] = clamp_vec3(v, self.coloring.colors[index], range);
    }

    /// Re-apply every numeric field through [`set`](ToyConfig::set) so all
    /// values sit inside their documented ranges.
    pub fn clamp_ranges(&mut self) {
        for field in Field::ALL {
            if field.range().is_some() {
                let value = self.get(field);
                // Same field, same kind: cannot mismatch.
                let _ = self.set(field, value);
            }
        }
    }
}
