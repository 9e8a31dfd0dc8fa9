//! Cross-field consistency rules.
//!
//! [`resolve`] takes the config as it was at the start of the UI cycle and
//! the config after the user's edits, and returns a corrected config. "Changed
//! this cycle" always means "differs from `previous`", so the function is pure
//! and can be replayed. Rules run in the order of [`Rule`]:
//!
//! 1. [`Rule::ColoringFreeze`]: segment tracing coloring restores scene,
//!    tracer and shadow and skips rules 2 to 6.
//! 2. [`Rule::SceneChange`]: scene profile, payload defaults, camera hint and
//!    tracer remap.
//! 3. [`Rule::BlobsNoShadow`]
//! 4. [`Rule::StepSizeNoShadow`]
//! 5. [`Rule::TracerMirror`]: a tracer change re-derives an enabled shadow.
//! 6. [`Rule::ShadowStepMirror`]: switching to shadow step coloring enables
//!    the mirrored shadow. Not applied on the blob scene.
//! 7. [`Rule::InvariantClamp`]: always runs and is a no-op on consistent input.
//!
//! The output is a fixed point: `resolve(&r, r.clone()).config == r`.

use crate::camera::CameraHint;
use crate::config::{Coloring, Scene, Shadow, ToyConfig};

/// A consistency rule, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    ColoringFreeze,
    SceneChange,
    BlobsNoShadow,
    StepSizeNoShadow,
    TracerMirror,
    ShadowStepMirror,
    InvariantClamp,
}

/// Output of one resolver pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Corrected configuration.
    pub config: ToyConfig,
    /// Camera pose the camera collaborator should take, set on scene changes.
    pub camera: Option<CameraHint>,
    /// Rules that modified the config or produced a hint, in order.
    pub fired: Vec<Rule>,
}

impl Resolution {
    pub fn fired(&self, rule: Rule) -> bool {
        self.fired.contains(&rule)
    }
}

/// Correct `edited` against the last reconciled config `previous`.
pub fn resolve(previous: &ToyConfig, edited: ToyConfig) -> Resolution {
    let mut out = Resolution {
        config: edited,
        camera: None,
        fired: Vec::new(),
    };

    if out.config.coloring.mode == Coloring::SegmentTracing {
        freeze_selections(previous, &mut out);
    } else {
        apply_scene_change(previous, &mut out);
        apply_shadow_rules(previous, &mut out);
    }
    clamp_invariants(&mut out);

    for rule in &out.fired {
        log::debug!("resolver rule fired: {:?}", rule);
    }
    out
}

/// Rule 1. Scene, tracer and shadow are not editable while the reference
/// renderer is shown.
fn freeze_selections(previous: &ToyConfig, out: &mut Resolution) {
    let cfg = &mut out.config;
    if cfg.scene.kind != previous.scene.kind
        || cfg.tracer != previous.tracer
        || cfg.shadow != previous.shadow
    {
        cfg.scene.kind = previous.scene.kind;
        cfg.tracer = previous.tracer;
        cfg.shadow = previous.shadow;
        out.fired.push(Rule::ColoringFreeze);
    }
}

/// Rule 2.
fn apply_scene_change(previous: &ToyConfig, out: &mut Resolution) {
    let cfg = &mut out.config;
    let scene = cfg.scene.kind;
    if scene == previous.scene.kind {
        return;
    }

    let (max_iter, max_dist) = scene.march_profile();
    cfg.primary.max_iter = max_iter;
    cfg.primary.max_dist = max_dist;
    scene.apply_payload_defaults(&mut cfg.scene.primitive_data);
    cfg.tracer = cfg.tracer.to_distance_field();

    // Leaving the blob scene turns shadows back on.
    if previous.scene.kind == Scene::Blobs && scene != Scene::Blobs {
        cfg.shadow = Shadow::mirroring(cfg.tracer);
    }

    out.camera = Some(CameraHint::for_scene(scene));
    out.fired.push(Rule::SceneChange);
}

/// Rules 3 to 6.
fn apply_shadow_rules(previous: &ToyConfig, out: &mut Resolution) {
    let cfg = &mut out.config;
    let blobs = cfg.scene.kind == Scene::Blobs;

    if blobs {
        if cfg.shadow != Shadow::NoShadow {
            cfg.shadow = Shadow::NoShadow;
            out.fired.push(Rule::BlobsNoShadow);
        }
    } else if cfg.coloring.mode == Coloring::StepSize && cfg.shadow != Shadow::NoShadow {
        cfg.shadow = Shadow::NoShadow;
        out.fired.push(Rule::StepSizeNoShadow);
    }

    if cfg.tracer != previous.tracer && cfg.shadow.is_enabled() {
        let mirrored = Shadow::mirroring(cfg.tracer);
        if cfg.shadow != mirrored {
            cfg.shadow = mirrored;
            out.fired.push(Rule::TracerMirror);
        }
    }

    let to_shadow_step = cfg.coloring.mode == Coloring::ShadowStep
        && previous.coloring.mode != Coloring::ShadowStep;
    if to_shadow_step && !blobs {
        let mirrored = Shadow::mirroring(cfg.tracer);
        if cfg.shadow != mirrored {
            cfg.shadow = mirrored;
            out.fired.push(Rule::ShadowStepMirror);
        }
    }
}

/// Rule 7. Structural invariants that hold in every reachable state.
fn clamp_invariants(out: &mut Resolution) {
    let cfg = &mut out.config;
    let before = (cfg.tracer, cfg.shadow);

    if cfg.scene.kind == Scene::Blobs {
        cfg.shadow = Shadow::NoShadow;
    } else {
        cfg.tracer = cfg.tracer.to_distance_field();
    }
    if cfg.shadow.is_enabled() {
        cfg.shadow = Shadow::mirroring(cfg.tracer);
    }

    if before != (cfg.tracer, cfg.shadow) {
        out.fired.push(Rule::InvariantClamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tracer;

    fn edit(previous: &ToyConfig, f: impl FnOnce(&mut ToyConfig)) -> Resolution {
        let mut edited = previous.clone();
        f(&mut edited);
        resolve(previous, edited)
    }

    #[test]
    fn test_no_edit_is_a_no_op() {
        let config = ToyConfig::default();
        let r = resolve(&config, config.clone());
        assert_eq!(r.config, config);
        assert!(r.fired.is_empty());
        assert!(r.camera.is_none());
    }

    #[test]
    fn test_scene_change_emits_camera_hint() {
        let r = edit(&ToyConfig::default(), |c| c.scene.kind = Scene::Torus);
        assert_eq!(r.camera, Some(CameraHint::for_scene(Scene::Torus)));
        assert_eq!(r.config.scene.primitive_data.x, 0.9);
        assert_eq!(r.config.scene.primitive_data.y, 0.3);
        assert!(r.fired(Rule::SceneChange));
    }

    #[test]
    fn test_leaving_blobs_restores_long_range_and_shadows() {
        let mut blobs = ToyConfig::default();
        blobs.scene.kind = Scene::Blobs;
        blobs.tracer = Tracer::SegmentTrace;
        blobs.shadow = Shadow::NoShadow;

        let r = edit(&blobs, |c| c.scene.kind = Scene::Box);
        assert_eq!(r.config.tracer, Tracer::BdfTrace);
        assert_eq!(r.config.shadow, Shadow::BdfTrace);
        assert_eq!(r.config.primary.max_iter, 256);
        assert_eq!(r.config.primary.max_dist, 500.0);
    }

    #[test]
    fn test_leaving_blobs_in_step_size_keeps_shadows_off() {
        let mut blobs = ToyConfig::default();
        blobs.scene.kind = Scene::Blobs;
        blobs.shadow = Shadow::NoShadow;
        blobs.coloring.mode = Coloring::StepSize;

        let r = edit(&blobs, |c| c.scene.kind = Scene::Sphere);
        assert_eq!(r.config.shadow, Shadow::NoShadow);
    }

    #[test]
    fn test_tracer_change_with_shadow_off_keeps_it_off() {
        let mut config = ToyConfig::default();
        config.shadow = Shadow::NoShadow;
        let r = edit(&config, |c| c.tracer = Tracer::BdfTrace);
        assert_eq!(r.config.shadow, Shadow::NoShadow);
    }

    #[test]
    fn test_segment_tracing_freezes_selection_edits() {
        let mut config = ToyConfig::default();
        config.coloring.mode = Coloring::SegmentTracing;
        let r = edit(&config, |c| {
            c.scene.kind = Scene::Blobs;
            c.tracer = Tracer::BdfTrace;
            c.primary.max_iter = 100;
        });
        assert_eq!(r.config.scene.kind, Scene::Primitives);
        assert_eq!(r.config.tracer, Tracer::SdfTrace);
        // Numeric fields stay editable.
        assert_eq!(r.config.primary.max_iter, 100);
        assert!(r.fired(Rule::ColoringFreeze));
        assert!(r.camera.is_none());
    }

    #[test]
    fn test_shadow_step_does_not_enable_shadows_on_blobs() {
        let mut blobs = ToyConfig::default();
        blobs.scene.kind = Scene::Blobs;
        blobs.shadow = Shadow::NoShadow;
        let r = edit(&blobs, |c| c.coloring.mode = Coloring::ShadowStep);
        assert_eq!(r.config.shadow, Shadow::NoShadow);
    }

    #[test]
    fn test_clamp_repairs_contradictory_input() {
        let mut bad = ToyConfig::default();
        bad.tracer = Tracer::TheirSphereTrace;
        bad.shadow = Shadow::BdfTrace;
        let r = resolve(&bad, bad.clone());
        assert_eq!(r.config.tracer, Tracer::SdfTrace);
        assert_eq!(r.config.shadow, Shadow::SdfTrace);
        assert!(r.fired(Rule::InvariantClamp));
    }
}
