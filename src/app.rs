//! Host driver.
//!
//! [`ToyApp`] wires the reconciliation pipeline to a windowing host. The host
//! forwards its lifecycle callbacks and events here; the app owns the config,
//! the emitter and the pointer state, and talks to the renderer only through
//! the [`DefineSink`] and [`UniformSink`] traits.
//!
//! # Frame Order
//!
//! 1. input events ([`on_mouse_event`](ToyApp::on_mouse_event),
//!    [`on_key_event`](ToyApp::on_key_event))
//! 2. one UI cycle ([`on_gui_render`](ToyApp::on_gui_render))
//! 3. per-frame uniforms ([`on_frame_render`](ToyApp::on_frame_render))

use glam::Vec2;

use crate::camera::{CameraControl, CameraHint};
use crate::capture;
use crate::config::ToyConfig;
use crate::emitter::{DefineSink, EmitOptions, Emission, ParameterEmitter, ShaderDefines};
use crate::error::DefineError;
use crate::input::{InputAdapter, KeyCode, KeyEvent, KeyEventKind, PointerEvent};
use crate::resolve::{resolve, Rule};
use crate::time::Clock;
use crate::uniforms::{UniformSink, UniformValue, CAMERA_BLOCK, TOY_BLOCK};

/// Summary of one UI cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct Cycle {
    /// Resolver rules that changed the edited config.
    pub fired: Vec<Rule>,
    /// Camera pose applied this cycle, if the scene changed.
    pub camera: Option<CameraHint>,
    pub emission: Emission,
}

/// Something the host has to do in response to a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostAction {
    /// Put the label on the system clipboard.
    CopyLabel(String),
    /// Save the next frame as an image named after the label.
    Capture { file_stem: String },
}

/// Result of [`ToyApp::on_key_event`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyResponse {
    /// The host must not apply its own handling, such as quitting on Escape.
    pub consumed: bool,
    pub action: Option<HostAction>,
}

impl KeyResponse {
    fn ignored() -> Self {
        Self::default()
    }

    fn consumed() -> Self {
        Self {
            consumed: true,
            action: None,
        }
    }

    fn action(action: HostAction) -> Self {
        Self {
            consumed: true,
            action: Some(action),
        }
    }
}

/// What the host reloaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HotReload {
    /// The shader program was recompiled from source and lost its defines.
    Program,
    /// Textures or other assets; defines are unaffected.
    Assets,
}

/// The configurator core as seen by a host.
pub struct ToyApp<D: DefineSink, C: CameraControl> {
    config: ToyConfig,
    emitter: ParameterEmitter,
    input: InputAdapter,
    camera: C,
    clock: Clock,
    sink: D,
}

impl<D: DefineSink, C: CameraControl> ToyApp<D, C> {
    pub fn new(sink: D, camera: C) -> Self {
        Self::with_options(sink, camera, EmitOptions::default())
    }

    pub fn with_options(sink: D, camera: C, options: EmitOptions) -> Self {
        Self {
            config: ToyConfig::default(),
            emitter: ParameterEmitter::new(options),
            input: InputAdapter::new(),
            camera,
            clock: Clock::new(),
            sink,
        }
    }

    /// Place the camera at its starting pose and emit the first bundle.
    pub fn on_load(&mut self) -> Result<Cycle, DefineError> {
        CameraHint::INITIAL.apply(&mut self.camera);
        self.camera.begin_frame();
        log::info!("Loaded with {}", crate::emitter::label(&self.config));
        self.on_gui_render(|_| {})
    }

    /// Run one reconciliation cycle around the user's edits.
    ///
    /// On a sink error the corrected config is kept and the emission is
    /// retried on the next cycle.
    pub fn on_gui_render(
        &mut self,
        edit: impl FnOnce(&mut ToyConfig),
    ) -> Result<Cycle, DefineError> {
        let mut edited = self.config.clone();
        edit(&mut edited);

        let resolution = resolve(&self.config, edited);
        if let Some(hint) = resolution.camera {
            hint.apply(&mut self.camera);
        }
        self.config = resolution.config;

        let emission = self.emitter.emit_if_dirty(&self.config, &mut self.sink)?;
        Ok(Cycle {
            fired: resolution.fired,
            camera: resolution.camera,
            emission,
        })
    }

    /// Replace the whole config, e.g. from a file or a preset.
    ///
    /// The config is normalized rather than resolved against the current
    /// one, so its primary bounds survive a scene switch. The camera moves to
    /// the new scene's pose.
    pub fn load_config(&mut self, config: &ToyConfig) -> Result<Cycle, DefineError> {
        self.config = config.normalized();
        let hint = CameraHint::for_scene(self.config.scene.kind);
        hint.apply(&mut self.camera);
        let emission = self.emitter.emit_if_dirty(&self.config, &mut self.sink)?;
        Ok(Cycle {
            fired: Vec::new(),
            camera: Some(hint),
            emission,
        })
    }

    pub fn reset_camera(&mut self) {
        CameraHint::RESET.apply(&mut self.camera);
    }

    /// Push the per-frame uniforms. Runs every frame, dirty or not.
    pub fn on_frame_render(&mut self, uniforms: &mut impl UniformSink, resolution: Vec2) {
        self.camera.begin_frame();

        let time = self.clock.tick();
        let mouse = self.input.frame();
        uniforms.set_uniform(TOY_BLOCK, "iResolution", UniformValue::Vec2(resolution));
        uniforms.set_uniform(TOY_BLOCK, "iTime", UniformValue::F32(time));
        uniforms.set_uniform(TOY_BLOCK, "iMouse", UniformValue::Vec4(mouse));

        uniforms.set_uniform(CAMERA_BLOCK, "camEye", UniformValue::Vec3(self.camera.position()));
        uniforms.set_uniform(
            CAMERA_BLOCK,
            "camInvViewProj",
            UniformValue::Mat4(self.camera.inv_view_proj()),
        );
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.set_aspect_ratio(width as f32 / height as f32);
    }

    pub fn on_key_event(&mut self, event: &KeyEvent) -> KeyResponse {
        if self.camera.handle_key(event) {
            return KeyResponse::consumed();
        }
        if event.kind == KeyEventKind::Released {
            return KeyResponse::ignored();
        }

        match event.key {
            KeyCode::Escape => KeyResponse::consumed(),
            KeyCode::C if event.modifiers.ctrl => {
                KeyResponse::action(HostAction::CopyLabel(self.emitter.label().to_string()))
            }
            KeyCode::C => KeyResponse::action(HostAction::Capture {
                file_stem: capture::file_stem(self.emitter.label()),
            }),
            _ => KeyResponse::ignored(),
        }
    }

    /// Forward a pointer event. Never consumes it, so host UI still sees it.
    pub fn on_mouse_event(&mut self, event: &PointerEvent) -> bool {
        self.camera.handle_pointer(event);
        self.input.handle_pointer(event);
        false
    }

    pub fn on_hot_reload(&mut self, reloaded: HotReload) {
        match reloaded {
            HotReload::Program => {
                log::info!("Shader program reloaded, re-emitting defines");
                self.emitter.invalidate();
            }
            HotReload::Assets => log::debug!("Assets reloaded"),
        }
    }

    pub fn on_shutdown(&mut self) {
        log::info!(
            "Shutting down after {} frames with {}",
            self.clock.frame(),
            self.emitter.label()
        );
    }

    pub fn config(&self) -> &ToyConfig {
        &self.config
    }

    /// Label of the last emitted config.
    pub fn label(&self) -> &str {
        self.emitter.label()
    }

    /// Defines of the last emitted config.
    pub fn defines(&self) -> Option<&ShaderDefines> {
        self.emitter.snapshot().map(|s| &s.defines)
    }

    /// True when the config has edits the renderer has not seen yet.
    pub fn is_dirty(&self) -> bool {
        crate::tracker::ChangeTracker::diff(self.emitter.snapshot(), &self.config).is_dirty()
    }

    pub fn input(&self) -> &InputAdapter {
        &self.input
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut D {
        &mut self.sink
    }
}
