//! UI panel for the render settings

use std::ops::RangeInclusive;

use bdf_toy::{Coloring, Field, Range, Scene, Shadow, StepColoring, ToyConfig, Tracer};
use eframe::egui;
use glam::Vec3;

fn float_range(field: Field) -> RangeInclusive<f32> {
    match field.range() {
        Some(Range::Float { min, max }) => min..=max,
        _ => 0.0..=1.0,
    }
}

fn int_range(field: Field) -> RangeInclusive<i32> {
    match field.range() {
        Some(Range::Int { min, max }) => min..=max,
        _ => 0..=1,
    }
}

fn float_slider(ui: &mut egui::Ui, value: &mut f32, field: Field, text: &str) -> bool {
    ui.add(egui::Slider::new(value, float_range(field)).text(text))
        .changed()
}

/// Tolerances span many orders of magnitude.
fn tolerance_slider(ui: &mut egui::Ui, value: &mut f32, field: Field) -> bool {
    ui.add(
        egui::Slider::new(value, float_range(field))
            .text(field.name())
            .logarithmic(true)
            .custom_formatter(|v, _| format!("{:.4}", v)),
    )
    .changed()
}

fn vec3_sliders(ui: &mut egui::Ui, value: &mut Vec3, field: Field, text: &str, components: usize) -> bool {
    let range = float_range(field);
    let mut changed = false;
    ui.horizontal(|ui| {
        for c in 0..components {
            changed |= ui
                .add(egui::DragValue::new(&mut value[c]).range(range.clone()).speed(0.01))
                .changed();
        }
        ui.label(text);
    });
    changed
}

fn color_edit(ui: &mut egui::Ui, color: &mut Vec3, text: &str) -> bool {
    let mut rgb = color.to_array();
    let mut changed = false;
    ui.horizontal(|ui| {
        changed = ui.color_edit_button_rgb(&mut rgb).changed();
        ui.label(text);
    });
    if changed {
        *color = Vec3::from_array(rgb);
    }
    changed
}

/// Render the settings panel. Returns true if anything was edited.
///
/// The panel only offers choices the resolver would keep; the resolver
/// still has the final word.
pub fn render_settings_panel(ui: &mut egui::Ui, config: &mut ToyConfig) -> bool {
    let mut changed = false;

    changed |= render_coloring(ui, config);

    if config.coloring.mode == Coloring::SegmentTracing {
        ui.label(
            egui::RichText::new("Scene and tracer are fixed while showing segment tracing")
                .small()
                .weak(),
        );
        return changed;
    }

    ui.separator();
    changed |= render_scene(ui, config);
    ui.separator();
    changed |= render_trace(ui, config);
    ui.separator();
    changed |= render_shadow(ui, config);

    changed
}

fn render_coloring(ui: &mut egui::Ui, config: &mut ToyConfig) -> bool {
    let mut changed = false;
    let coloring = &mut config.coloring;

    ui.heading("Image");
    for mode in Coloring::ALL {
        changed |= ui.radio_value(&mut coloring.mode, mode, mode.label()).changed();
    }

    if coloring.mode.is_step_map() {
        ui.add_space(4.0);
        ui.label("Step coloring:");
        let mut step_idx = coloring.step_fn.to_index();
        if egui::ComboBox::from_label("Function")
            .selected_text(coloring.step_fn.label())
            .show_index(ui, &mut step_idx, StepColoring::ALL.len(), |i| {
                StepColoring::ALL[i].label()
            })
            .changed()
        {
            coloring.step_fn = StepColoring::ALL[step_idx];
            changed = true;
        }

        let names = ["Color A", "Color B", "Color C", "Color D"];
        for i in 0..coloring.step_fn.palette_len() {
            changed |= color_edit(ui, &mut coloring.colors[i], names[i]);
        }
    }

    changed
}

fn render_scene(ui: &mut egui::Ui, config: &mut ToyConfig) -> bool {
    let mut changed = false;
    let scene = &mut config.scene;

    ui.heading("Scene");
    ui.horizontal_wrapped(|ui| {
        for kind in Scene::ALL {
            changed |= ui.radio_value(&mut scene.kind, kind, kind.label()).changed();
        }
    });

    match scene.kind {
        Scene::Blobs => {
            changed |= float_slider(ui, &mut scene.threshold, Field::Threshold, "S_THRESHOLD");
            changed |= float_slider(ui, &mut scene.blob_radius, Field::BlobRadius, "S_BLOB_RADIUS");
        }
        Scene::Primitives => {}
        Scene::Sphere => {
            changed |= float_slider(ui, &mut scene.primitive_data.y, Field::PrimitiveData, "Radius");
        }
        Scene::Box => {
            changed |= vec3_sliders(ui, &mut scene.primitive_data, Field::PrimitiveData, "Size", 3);
        }
        Scene::Cylinder => {
            changed |= vec3_sliders(ui, &mut scene.primitive_data, Field::PrimitiveData, "R and h", 2);
        }
        Scene::Torus => {
            changed |= vec3_sliders(ui, &mut scene.primitive_data, Field::PrimitiveData, "R and r", 2);
        }
        Scene::Test => {
            changed |= vec3_sliders(ui, &mut scene.primitive_data, Field::PrimitiveData, "Size", 3);
            changed |= vec3_sliders(ui, &mut scene.test_pos, Field::TestPos, "TestPos", 3);
        }
    }

    if scene.kind.is_repeatable() {
        let range = int_range(Field::RepeatCount);
        ui.horizontal(|ui| {
            for c in 0..3 {
                changed |= ui
                    .add(egui::DragValue::new(&mut scene.repeat_count[c]).range(range.clone()))
                    .changed();
            }
            ui.label("Repetition");
        });
        changed |= vec3_sliders(ui, &mut scene.repeat_dist, Field::RepeatDist, "Distance", 3);
        changed |= ui.checkbox(&mut scene.show_plane, "Show ground plane").changed();
    }

    changed
}

fn render_trace(ui: &mut egui::Ui, config: &mut ToyConfig) -> bool {
    let mut changed = false;

    ui.heading("Trace");
    let choices: &[Tracer] = if config.scene.kind == Scene::Blobs {
        &Tracer::ALL
    } else {
        &Tracer::DISTANCE_FIELD
    };
    ui.horizontal_wrapped(|ui| {
        for &tracer in choices {
            changed |= ui.radio_value(&mut config.tracer, tracer, tracer.label()).changed();
        }
    });

    let primary = &mut config.primary;
    changed |= ui
        .add(
            egui::Slider::new(&mut primary.max_iter, int_range(Field::PrimaryMaxIter))
                .text("PRIMARY_MAXITER"),
        )
        .changed();
    changed |= float_slider(ui, &mut primary.max_dist, Field::PrimaryMaxDist, "PRIMARY_MAXDIST");
    if config.tracer.uses_march_epsilon() {
        changed |= tolerance_slider(ui, &mut primary.march_epsilon, Field::MarchEpsilon);
    }
    if config.tracer.uses_kappa_factor() {
        changed |= float_slider(ui, &mut primary.kappa_factor, Field::KappaFactor, "S_KAPPA_FACTOR");
    }

    changed
}

fn render_shadow(ui: &mut egui::Ui, config: &mut ToyConfig) -> bool {
    let mut changed = false;

    if config.scene.kind == Scene::Blobs || config.coloring.mode == Coloring::StepSize {
        ui.label(egui::RichText::new("No shadows in this mode").small().weak());
        return false;
    }

    ui.heading("Shadow");
    let mirrored = Shadow::mirroring(config.tracer);
    ui.horizontal(|ui| {
        changed |= ui.radio_value(&mut config.shadow, mirrored, mirrored.label()).changed();
        changed |= ui
            .radio_value(&mut config.shadow, Shadow::NoShadow, Shadow::NoShadow.label())
            .changed();
    });

    if config.shadow.is_enabled() {
        let secondary = &mut config.secondary;
        changed |= ui
            .add(
                egui::Slider::new(&mut secondary.max_iter, int_range(Field::SecondaryMaxIter))
                    .text("SECONDARY_MAXITER"),
            )
            .changed();
        changed |= float_slider(ui, &mut secondary.max_dist, Field::SecondaryMaxDist, "SECONDARY_MAXDIST");
        changed |= tolerance_slider(ui, &mut secondary.min_dist, Field::SecondaryMinDist);
        changed |= tolerance_slider(ui, &mut secondary.epsilon, Field::SecondaryEpsilon);
        changed |= tolerance_slider(ui, &mut secondary.normal_offset, Field::SecondaryNormalOffset);
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_panel(config: &mut ToyConfig) -> bool {
        let ctx = egui::Context::default();
        let mut changed = false;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                changed = render_settings_panel(ui, config);
            });
        });
        changed
    }

    #[test]
    fn test_untouched_panel_reports_no_change() {
        for scene in Scene::ALL {
            let mut config = ToyConfig::default();
            config.scene.kind = scene;
            let config = config.normalized();

            let mut shown = config.clone();
            assert!(!run_panel(&mut shown), "{:?}", scene);
            assert_eq!(shown, config);
        }
    }

    #[test]
    fn test_segment_tracing_panel_reports_no_change() {
        let mut config = ToyConfig::default();
        config.coloring.mode = Coloring::SegmentTracing;
        let config = config.normalized();

        let mut shown = config.clone();
        assert!(!run_panel(&mut shown));
        assert_eq!(shown, config);
    }
}
