//! Image coloring: what the fragment shader visualizes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Output visualization mode.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Coloring {
    #[default]
    Default,
    /// Heat map of primary step counts.
    StepSize,
    /// Heat map of shadow step counts.
    ShadowStep,
    /// The segment tracing paper's reference renderer; locks scene and tracer choices.
    SegmentTracing,
}

impl Coloring {
    pub const ALL: [Coloring; 4] = [
        Coloring::Default,
        Coloring::StepSize,
        Coloring::ShadowStep,
        Coloring::SegmentTracing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Coloring::Default => "Default",
            Coloring::StepSize => "Stepsize",
            Coloring::ShadowStep => "Shadow stepsize",
            Coloring::SegmentTracing => "Original Segment Tracing",
        }
    }

    /// Value of the `V_COLORING` define.
    pub fn code(&self) -> u32 {
        match self {
            Coloring::Default => 0,
            Coloring::StepSize => 1,
            Coloring::ShadowStep => 2,
            Coloring::SegmentTracing => 3,
        }
    }

    /// Whether a step-count heat map is shown.
    pub fn is_step_map(&self) -> bool {
        matches!(self, Coloring::StepSize | Coloring::ShadowStep)
    }
}

/// Heat map function for the step-count visualizations.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StepColoring {
    Old,
    Hsv,
    Two,
    Three,
    #[default]
    Four,
}

impl StepColoring {
    pub const ALL: [StepColoring; 5] = [
        StepColoring::Old,
        StepColoring::Hsv,
        StepColoring::Two,
        StepColoring::Three,
        StepColoring::Four,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StepColoring::Old => "Old",
            StepColoring::Hsv => "HSV",
            StepColoring::Two => "2",
            StepColoring::Three => "3",
            StepColoring::Four => "4",
        }
    }

    pub fn to_index(&self) -> usize {
        match self {
            StepColoring::Old => 0,
            StepColoring::Hsv => 1,
            StepColoring::Two => 2,
            StepColoring::Three => 3,
            StepColoring::Four => 4,
        }
    }

    /// Number of palette colors (A, B, ...) the function reads.
    pub fn palette_len(&self) -> usize {
        match self {
            StepColoring::Old | StepColoring::Hsv => 0,
            StepColoring::Two => 2,
            StepColoring::Three => 3,
            StepColoring::Four => 4,
        }
    }
}

fn rgb8(r: u8, g: u8, b: u8) -> Vec3 {
    Vec3::new(r as f32, g as f32, b as f32) / 255.0
}

/// Coloring mode plus the heat map palette.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ColoringConfig {
    pub mode: Coloring,
    pub step_fn: StepColoring,
    /// Palette colors A..D.
    pub colors: [Vec3; 4],
}

impl Default for ColoringConfig {
    fn default() -> Self {
        Self {
            mode: Coloring::Default,
            step_fn: StepColoring::Four,
            colors: [
                rgb8(93, 127, 232),
                rgb8(92, 236, 220),
                rgb8(241, 222, 100),
                rgb8(220, 94, 75),
            ],
        }
    }
}
