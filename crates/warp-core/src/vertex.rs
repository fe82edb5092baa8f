use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// One mesh vertex as read by the vertex-fetch stage.
///
/// Layout follows the 16-byte 3-vector / 8-byte 2-vector alignment rule, so the
/// record is 32 bytes:
///
/// ```text
/// offset  0  position   [f32; 3]
/// offset 12  _pad0      f32
/// offset 16  tex_coord  [f32; 2]
/// offset 24  _pad1      [f32; 2]
/// ```
///
/// `repr(C)` + `bytemuck` lets a `&[Vertex]` be uploaded as `&[u8]` without a copy.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub _pad0: f32,
    /// Normalised (u, v). Out-of-range values are left to the sampler's address mode.
    pub tex_coord: [f32; 2],
    pub _pad1: [f32; 2],
}

pub const VERTEX_SIZE: usize = 32;
pub const POSITION_OFFSET: usize = 0;
pub const TEX_COORD_OFFSET: usize = 16;

const _: () = assert!(size_of::<Vertex>() == VERTEX_SIZE);
const _: () = assert!(offset_of!(Vertex, position) == POSITION_OFFSET);
const _: () = assert!(offset_of!(Vertex, tex_coord) == TEX_COORD_OFFSET);

impl Vertex {
    pub fn new(position: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position: position.to_array(),
            _pad0: 0.0,
            tex_coord: tex_coord.to_array(),
            _pad1: [0.0; 2],
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position.to_array();
    }

    pub fn tex_coord(&self) -> Vec2 {
        Vec2::from_array(self.tex_coord)
    }
}

/// Byte view of a vertex sequence, ready for a vertex-buffer upload.
pub fn vertex_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
