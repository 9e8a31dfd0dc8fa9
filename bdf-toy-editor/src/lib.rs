//! bdf-toy editor - interactive front-end for the raymarching toy
//!
//! This crate provides:
//! - Settings and camera panels editing a [`bdf_toy::ToyConfig`]
//! - Built-in presets
//! - Viewport captures that wait for the asynchronous screenshot
//! - A viewport that routes egui input to the toy and shows the uniforms
//!   and defines the shader receives

pub mod screenshot;
pub mod ui;
pub mod viewport;

pub use ui::{Preset, PRESETS};
