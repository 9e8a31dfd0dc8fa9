//! # bdf-toy - SDF/BDF raymarching configurator
//!
//! The interactive core of a fragment-shader raymarcher that compares signed
//! distance fields (SDF) with bounding distance fields (BDF). The shader does
//! the marching; this crate owns what the user can change and makes sure the
//! shader only ever sees a consistent combination of it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bdf_toy::prelude::*;
//!
//! let mut app = ToyApp::new(DefineSet::new(), OrbitCamera::new());
//! app.on_load()?;
//!
//! // Each UI frame: let the user edit, then reconcile.
//! app.on_gui_render(|config| config.scene.kind = Scene::Blobs)?;
//! assert_eq!(app.config().shadow, Shadow::NoShadow);
//!
//! // Each rendered frame: push time, pointer and camera.
//! let mut uniforms = UniformBlocks::new();
//! app.on_frame_render(&mut uniforms, Vec2::new(1280.0, 720.0));
//! ```
//!
//! ## Core Concepts
//!
//! ### One cycle
//!
//! Every UI update runs the same pipeline:
//!
//! 1. the user edits a copy of [`ToyConfig`]
//! 2. [`resolve`] corrects cross-field conflicts in a fixed rule order
//! 3. [`ChangeTracker`] diffs the result against the last emitted snapshot
//! 4. if anything changed, [`ParameterEmitter`] sends the full define bundle
//!    to the renderer and updates the label
//!
//! Pointer input is separate and runs once per rendered frame through
//! [`InputAdapter`].
//!
//! ### Invariants
//!
//! | Rule | Guarantee |
//! |------|-----------|
//! | Blobs | the blob scene never has shadows |
//! | Tracer | outside the blob scene only SDF and BDF tracing are used |
//! | Shadow | an enabled shadow traces with the primary tracer's family |
//! | Ranges | every numeric field stays inside its documented range |
//!
//! ### Collaborators
//!
//! The renderer and camera are reached only through traits:
//! [`DefineSink`] receives define bundles, [`UniformSink`] receives per-frame
//! values, and [`CameraControl`] takes pose hints and input.

pub mod app;
pub mod camera;
pub mod capture;
pub mod config;
pub mod emitter;
pub mod error;
pub mod input;
pub mod registry;
pub mod resolve;
pub mod time;
pub mod tracker;
pub mod uniforms;

pub use app::{Cycle, HostAction, HotReload, KeyResponse, ToyApp};
pub use bytemuck;
pub use camera::{CameraControl, CameraHint, OrbitCamera};
pub use config::{
    Coloring, ColoringConfig, PrimaryMarch, Scene, SceneConfig, SecondaryMarch, Shadow,
    StepColoring, ToyConfig, Tracer,
};
pub use emitter::{DefineSet, DefineSink, EmitOptions, Emission, ParameterEmitter, ShaderDefines};
pub use error::{CaptureError, ConfigError, DefineError, RegistryError};
pub use glam::{Vec2, Vec3, Vec4};
pub use input::{InputAdapter, KeyCode, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use registry::{Field, Range, Value, ValueKind};
pub use resolve::{resolve, Resolution, Rule};
pub use time::Clock;
pub use tracker::{ChangeSet, ChangeTracker, ParameterSnapshot};
pub use uniforms::{UniformBlock, UniformBlocks, UniformSink, UniformValue};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use bdf_toy::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{HostAction, HotReload, KeyResponse, ToyApp};
    pub use crate::camera::{CameraControl, CameraHint, OrbitCamera};
    pub use crate::config::{Coloring, Scene, Shadow, StepColoring, ToyConfig, Tracer};
    pub use crate::emitter::{DefineSet, DefineSink, ShaderDefines};
    pub use crate::input::{KeyCode, KeyEvent, MouseButton, PointerEvent};
    pub use crate::registry::{Field, Value};
    pub use crate::uniforms::{UniformBlocks, UniformSink, UniformValue};
    pub use crate::{Vec2, Vec3, Vec4};
}
