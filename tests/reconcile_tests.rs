//! Integration tests for the reconciliation pipeline.
//!
//! These drive `resolve`, the change tracker and the emitter together the way
//! a host does, and check the cross-field invariants on randomized input.

use bdf_toy::{
    resolve, ChangeTracker, Coloring, DefineSet, EmitOptions, Field, ParameterEmitter,
    ParameterSnapshot, Rule, Scene, Shadow, StepColoring, ToyConfig, Tracer,
};
use glam::{IVec3, Vec3};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn edit(previous: &ToyConfig, f: impl FnOnce(&mut ToyConfig)) -> ToyConfig {
    let mut edited = previous.clone();
    f(&mut edited);
    resolve(previous, edited).config
}

fn assert_consistent(config: &ToyConfig) {
    if config.scene.kind == Scene::Blobs {
        assert_eq!(config.shadow, Shadow::NoShadow, "blobs with shadows: {:?}", config);
    } else {
        assert!(
            config.tracer.is_distance_field(),
            "{:?} outside blobs",
            config.tracer
        );
    }
    if config.shadow.is_enabled() {
        assert_eq!(config.shadow, Shadow::mirroring(config.tracer), "{:?}", config);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_switch_to_blobs_disables_shadows() {
    let start = ToyConfig::default();
    assert_eq!(start.scene.kind, Scene::Primitives);
    assert_eq!(start.tracer, Tracer::SdfTrace);
    assert_eq!(start.shadow, Shadow::SdfTrace);

    let r = resolve(&start, {
        let mut c = start.clone();
        c.scene.kind = Scene::Blobs;
        c
    });

    assert_eq!(r.config.shadow, Shadow::NoShadow);
    assert_eq!(r.config.tracer, Tracer::SdfTrace);
    assert_eq!(r.config.primary.max_dist, 60.0);
    assert_eq!(r.config.primary.max_iter, 150);
    assert!(r.fired(Rule::SceneChange));
    assert!(r.fired(Rule::BlobsNoShadow));
}

#[test]
fn test_switch_to_blobs_remaps_reference_tracer() {
    let mut start = ToyConfig::default();
    start.tracer = Tracer::TheirSphereTrace;

    let out = edit(&start, |c| c.scene.kind = Scene::Blobs);
    assert_eq!(out.tracer, Tracer::SdfTrace);

    start.tracer = Tracer::SegmentTrace;
    let out = edit(&start, |c| c.scene.kind = Scene::Blobs);
    assert_eq!(out.tracer, Tracer::BdfTrace);
}

#[test]
fn test_shadow_step_coloring_enables_mirrored_shadow() {
    let mut start = ToyConfig::default();
    start.tracer = Tracer::BdfTrace;
    start.shadow = Shadow::NoShadow;

    let r = resolve(&start, {
        let mut c = start.clone();
        c.coloring.mode = Coloring::ShadowStep;
        c
    });

    assert_eq!(r.config.shadow, Shadow::BdfTrace);
    assert!(r.fired(Rule::ShadowStepMirror));
}

#[test]
fn test_step_size_coloring_disables_shadows() {
    let start = ToyConfig::default();
    let out = edit(&start, |c| c.coloring.mode = Coloring::StepSize);
    assert_eq!(out.shadow, Shadow::NoShadow);
}

#[test]
fn test_tracer_change_rederives_enabled_shadow() {
    let start = ToyConfig::default();
    let out = edit(&start, |c| c.tracer = Tracer::BdfTrace);
    assert_eq!(out.shadow, Shadow::BdfTrace);

    let out = edit(&out, |c| c.tracer = Tracer::SdfTrace);
    assert_eq!(out.shadow, Shadow::SdfTrace);
}

#[test]
fn test_scene_switch_keeps_other_payload() {
    let mut start = ToyConfig::default();
    start.scene.repeat_dist = Vec3::new(2.0, 3.0, 4.0);
    start.scene.threshold = 0.25;

    let out = edit(&start, |c| c.scene.kind = Scene::Torus);
    assert_eq!(out.scene.repeat_dist, Vec3::new(2.0, 3.0, 4.0));
    assert_eq!(out.scene.threshold, 0.25);
}

// ============================================================================
// Every scene transition
// ============================================================================

#[test]
fn test_every_scene_transition_is_consistent() {
    for &from in &Scene::ALL {
        for &tracer in &Tracer::ALL {
            let mut start = ToyConfig::default();
            start.scene.kind = from;
            start.tracer = tracer;
            let start = start.normalized();

            for &to in &Scene::ALL {
                let r = resolve(&start, {
                    let mut c = start.clone();
                    c.scene.kind = to;
                    c
                });
                assert_consistent(&r.config);

                if from == to {
                    assert!(r.camera.is_none());
                    assert_eq!(r.config, start);
                } else {
                    let (max_iter, max_dist) = to.march_profile();
                    assert_eq!(r.config.primary.max_iter, max_iter);
                    assert_eq!(r.config.primary.max_dist, max_dist);
                    assert!(r.camera.is_some(), "{:?} -> {:?}", from, to);
                    assert!(r.config.tracer.is_distance_field());
                }
            }
        }
    }
}

#[test]
fn test_every_coloring_transition_is_consistent() {
    for &scene in &Scene::ALL {
        for &from in &Coloring::ALL {
            let mut start = ToyConfig::default();
            start.scene.kind = scene;
            start.coloring.mode = from;
            let start = start.normalized();

            for &to in &Coloring::ALL {
                let out = edit(&start, |c| c.coloring.mode = to);
                assert_consistent(&out);
                assert_eq!(out.coloring.mode, to);
            }
        }
    }
}

#[test]
fn test_every_tracer_and_shadow_edit() {
    for &scene in &Scene::ALL {
        for &coloring in &Coloring::ALL {
            for &from in &Tracer::ALL {
                let mut start = ToyConfig::default();
                start.scene.kind = scene;
                start.coloring.mode = coloring;
                start.tracer = from;
                let start = start.normalized();

                for &tracer in &Tracer::ALL {
                    for &shadow in &Shadow::ALL {
                        let case = (scene, coloring, start.tracer, tracer, shadow);
                        let r = resolve(&start, {
                            let mut c = start.clone();
                            c.tracer = tracer;
                            c.shadow = shadow;
                            c
                        });
                        let out = &r.config;
                        assert_consistent(out);

                        if coloring == Coloring::SegmentTracing {
                            assert_eq!((out.tracer, out.shadow), (start.tracer, start.shadow), "{:?}", case);
                            continue;
                        }

                        let expected_tracer = if scene == Scene::Blobs {
                            tracer
                        } else {
                            tracer.to_distance_field()
                        };
                        assert_eq!(out.tracer, expected_tracer, "{:?}", case);

                        let shadows_off = scene == Scene::Blobs || coloring == Coloring::StepSize;
                        let expected_shadow = if shadows_off || !shadow.is_enabled() {
                            Shadow::NoShadow
                        } else {
                            Shadow::mirroring(expected_tracer)
                        };
                        assert_eq!(out.shadow, expected_shadow, "{:?}", case);

                        let mismatched = shadow.is_enabled() && shadow != Shadow::mirroring(tracer);
                        if !shadows_off && tracer.is_distance_field() && mismatched {
                            if tracer != start.tracer {
                                assert!(r.fired(Rule::TracerMirror), "{:?}", case);
                            } else {
                                assert!(!r.fired(Rule::TracerMirror), "{:?}", case);
                                assert!(r.fired(Rule::InvariantClamp), "{:?}", case);
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Randomized properties
// ============================================================================

fn random_config(rng: &mut StdRng) -> ToyConfig {
    let mut c = ToyConfig::default();
    c.coloring.mode = *Coloring::ALL.choose(rng).unwrap();
    c.coloring.step_fn = *StepColoring::ALL.choose(rng).unwrap();
    for color in &mut c.coloring.colors {
        *color = Vec3::new(rng.gen(), rng.gen(), rng.gen());
    }
    c.scene.kind = *Scene::ALL.choose(rng).unwrap();
    c.scene.threshold = rng.gen_range(0.0..=1.0);
    c.scene.primitive_data = Vec3::new(
        rng.gen_range(0.0..=8.0),
        rng.gen_range(0.0..=8.0),
        rng.gen_range(0.0..=8.0),
    );
    c.scene.repeat_count = IVec3::new(
        rng.gen_range(0..=1000),
        rng.gen_range(0..=1000),
        rng.gen_range(0..=1000),
    );
    c.scene.show_plane = rng.gen();
    c.tracer = *Tracer::ALL.choose(rng).unwrap();
    c.shadow = *Shadow::ALL.choose(rng).unwrap();
    c.primary.max_iter = rng.gen_range(1..=1024);
    c.primary.max_dist = rng.gen_range(1.0..=1024.0);
    c.secondary.max_iter = rng.gen_range(1..=1024);
    c
}

/// Apply a handful of random single-field edits, as a UI frame might.
fn random_edit(rng: &mut StdRng, previous: &ToyConfig) -> ToyConfig {
    let mut edited = previous.clone();
    let donor = random_config(rng);
    for _ in 0..rng.gen_range(1..=3) {
        let field = *Field::ALL.choose(rng).unwrap();
        edited.set(field, donor.get(field)).unwrap();
    }
    edited
}

#[test]
fn test_resolver_output_is_always_consistent() {
    let mut rng = StdRng::seed_from_u64(0x5df);
    for _ in 0..2000 {
        let previous = random_config(&mut rng).normalized();
        let edited = random_edit(&mut rng, &previous);
        let out = resolve(&previous, edited).config;
        assert_consistent(&out);
    }
}

#[test]
fn test_resolver_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(0xbdf);
    for _ in 0..2000 {
        let previous = random_config(&mut rng).normalized();
        let edited = random_edit(&mut rng, &previous);
        let once = resolve(&previous, edited).config;
        let twice = resolve(&once, once.clone());
        assert_eq!(twice.config, once);
        assert!(twice.fired.is_empty(), "{:?}", twice.fired);
    }
}

#[test]
fn test_contradictory_input_is_repaired() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let raw = random_config(&mut rng);
        assert_consistent(&raw.normalized());
    }
}

#[test]
fn test_dirty_iff_config_changed() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let a = random_config(&mut rng);
        let b = if rng.gen_bool(0.5) {
            a.clone()
        } else {
            random_edit(&mut rng, &a)
        };
        let snapshot = ParameterSnapshot {
            config: a.clone(),
            defines: Default::default(),
        };
        let changes = ChangeTracker::diff(Some(&snapshot), &b);
        assert_eq!(changes.is_dirty(), a != b);
    }
}

#[test]
fn test_emission_follows_resolved_config() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut emitter = ParameterEmitter::new(EmitOptions::default());
    let mut sink = DefineSet::new();
    let mut config = ToyConfig::default();

    for _ in 0..200 {
        let edited = random_edit(&mut rng, &config);
        config = resolve(&config, edited).config;
        emitter.emit_if_dirty(&config, &mut sink).unwrap();

        assert_eq!(sink.get("TRACE"), Some(config.tracer.label()));
        assert_eq!(sink.get("SHADOW"), Some(config.shadow.label()));
        let scene_sdf = format!("sd{}", config.scene.kind.label());
        assert_eq!(sink.get("SCENE_SDF"), Some(scene_sdf.as_str()));
        assert_eq!(emitter.label(), bdf_toy::emitter::label(&config));
    }
}
