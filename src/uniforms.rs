//! Per-frame uniforms.
//!
//! Every rendered frame the host driver pushes the Shadertoy-style inputs
//! (`ToyCB`) and the camera (`Camera`) through a [`UniformSink`]. These values
//! change every frame, so they never go through the define path.
//!
//! [`UniformBlocks`] is the stock sink: it keeps named blocks and lays each
//! one out with std140 rules, ready for a buffer upload.
//!
//! # Example
//!
//! ```ignore
//! let mut blocks = UniformBlocks::new();
//! app.on_frame_render(&mut blocks, Vec2::new(1280.0, 720.0));
//! queue.write_buffer(&toy_buffer, 0, &blocks.block("ToyCB").unwrap().to_bytes());
//! ```

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::collections::HashMap;

/// Name of the Shadertoy input block.
pub const TOY_BLOCK: &str = "ToyCB";
/// Name of the camera block.
pub const CAMERA_BLOCK: &str = "Camera";

/// Supported uniform value types.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    F32(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

impl UniformValue {
    /// std140 base alignment in bytes.
    pub fn alignment(&self) -> usize {
        match self {
            UniformValue::F32(_) => 4,
            UniformValue::Vec2(_) => 8,
            UniformValue::Vec3(_) | UniformValue::Vec4(_) | UniformValue::Mat4(_) => 16,
        }
    }

    /// Get the byte size of this value (without trailing padding).
    pub fn byte_size(&self) -> usize {
        match self {
            UniformValue::F32(_) => 4,
            UniformValue::Vec2(_) => 8,
            UniformValue::Vec3(_) => 12, // 12 bytes, aligned to 16
            UniformValue::Vec4(_) => 16,
            UniformValue::Mat4(_) => 64,
        }
    }

    /// Write this value to a byte buffer.
    pub fn write_bytes(&self, buf: &mut Vec<u8>) {
        match self {
            UniformValue::F32(v) => buf.extend_from_slice(&v.to_le_bytes()),
            UniformValue::Vec2(v) => buf.extend_from_slice(bytemuck::bytes_of(&v.to_array())),
            // A following scalar may pack into the trailing 4 bytes.
            UniformValue::Vec3(v) => buf.extend_from_slice(bytemuck::bytes_of(&v.to_array())),
            UniformValue::Vec4(v) => buf.extend_from_slice(bytemuck::bytes_of(&v.to_array())),
            // Column-major, matching glam.
            UniformValue::Mat4(m) => buf.extend_from_slice(bytemuck::bytes_of(&m.to_cols_array())),
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::F32(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        UniformValue::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        UniformValue::Vec4(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        UniformValue::Mat4(v)
    }
}

/// Receiver of per-frame uniform values.
pub trait UniformSink {
    fn set_uniform(&mut self, block: &str, name: &str, value: UniformValue);
}

/// One named uniform block with members in first-set order.
#[derive(Clone, Debug, Default)]
pub struct UniformBlock {
    values: Vec<(String, UniformValue)>,
    indices: HashMap<String, usize>,
}

impl UniformBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update a member.
    pub fn set<V: Into<UniformValue>>(&mut self, name: &str, value: V) {
        let value = value.into();
        if let Some(&idx) = self.indices.get(name) {
            self.values[idx].1 = value;
        } else {
            let idx = self.values.len();
            self.values.push((name.to_string(), value));
            self.indices.insert(name.to_string(), idx);
        }
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.indices.get(name).map(|&idx| &self.values[idx].1)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Serialize all members with std140 alignment, padded to 16 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for (_, value) in &self.values {
            let align = value.alignment();
            while buf.len() % align != 0 {
                buf.push(0);
            }
            value.write_bytes(&mut buf);
        }
        while buf.len() % 16 != 0 {
            buf.push(0);
        }
        buf
    }
}

/// Named uniform blocks; the stock [`UniformSink`].
#[derive(Clone, Debug, Default)]
pub struct UniformBlocks {
    blocks: HashMap<String, UniformBlock>,
}

impl UniformBlocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self, name: &str) -> Option<&UniformBlock> {
        self.blocks.get(name)
    }

    pub fn get(&self, block: &str, name: &str) -> Option<&UniformValue> {
        self.blocks.get(block).and_then(|b| b.get(name))
    }
}

impl UniformSink for UniformBlocks {
    fn set_uniform(&mut self, block: &str, name: &str, value: UniformValue) {
        self.blocks.entry(block.to_string()).or_default().set(name, value);
    }
}

/// GPU layout of the `ToyCB` block.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct ToyUniforms {
    pub i_resolution: [f32; 2],
    pub i_time: f32,
    pub _pad: f32,
    pub i_mouse: [f32; 4],
}

impl ToyUniforms {
    pub fn new(resolution: Vec2, time: f32, mouse: Vec4) -> Self {
        Self {
            i_resolution: resolution.to_array(),
            i_time: time,
            _pad: 0.0,
            i_mouse: mouse.to_array(),
        }
    }
}

/// GPU layout of the `Camera` block.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniforms {
    pub cam_eye: [f32; 3],
    pub _pad: f32,
    pub cam_inv_view_proj: [[f32; 4]; 4],
}

impl CameraUniforms {
    pub fn new(eye: Vec3, inv_view_proj: Mat4) -> Self {
        Self {
            cam_eye: eye.to_array(),
            _pad: 0.0,
            cam_inv_view_proj: inv_view_proj.to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toy_block_matches_pod_layout() {
        let resolution = Vec2::new(1280.0, 720.0);
        let mouse = Vec4::new(10.0, 20.0, -10.0, -20.0);

        let mut block = UniformBlock::new();
        block.set("iResolution", resolution);
        block.set("iTime", 1.5f32);
        block.set("iMouse", mouse);

        let pod = ToyUniforms::new(resolution, 1.5, mouse);
        assert_eq!(block.to_bytes(), bytemuck::bytes_of(&pod));
    }

    #[test]
    fn test_camera_block_matches_pod_layout() {
        let eye = Vec3::new(0.0, 2.0, -4.0);
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));

        let mut block = UniformBlock::new();
        block.set("camEye", eye);
        block.set("camInvViewProj", m);

        let pod = CameraUniforms::new(eye, m);
        assert_eq!(block.to_bytes().len(), 80);
        assert_eq!(block.to_bytes(), bytemuck::bytes_of(&pod));
    }

    #[test]
    fn test_update_keeps_member_order() {
        let mut block = UniformBlock::new();
        block.set("a", 1.0f32);
        block.set("b", 2.0f32);
        block.set("a", 3.0f32);
        let names: Vec<&str> = block.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(block.get("a"), Some(&UniformValue::F32(3.0)));
    }

    #[test]
    fn test_sink_creates_blocks_on_demand() {
        let mut blocks = UniformBlocks::new();
        blocks.set_uniform(TOY_BLOCK, "iTime", UniformValue::F32(0.5));
        assert_eq!(blocks.get(TOY_BLOCK, "iTime"), Some(&UniformValue::F32(0.5)));
        assert!(blocks.block(CAMERA_BLOCK).is_none());
    }
}
