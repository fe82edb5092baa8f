use warp_core::constants::{FrameConstants, FRAME_CONSTANTS_SIZE};
use warp_core::vertex::{Vertex, POSITION_OFFSET, TEX_COORD_OFFSET, VERTEX_SIZE};
use wgpu::{BindGroupLayout, Device};

/// WGSL declarations matching the host-side records. Shader modules prepend
/// this so both sides agree on the layout.
///
/// `FrameConstants` is bound at group 0, binding 0 and is visible to both the
/// vertex stage (`mvp`) and the fragment stage (effect values).
pub const BINDINGS_WGSL: &str = r#"
struct FrameConstants {
    mvp:             mat4x4<f32>,
    effects_enabled: i32,
    brightness:      f32,
    contrast:        f32,
    saturation:      f32,
    posterize:       f32,
};

struct VertexIn {
    @location(0) position:  vec3<f32>,
    @location(1) tex_coord: vec2<f32>,
};

@group(0) @binding(0) var<uniform> frame: FrameConstants;
"#;

pub const POSITION_LOCATION: u32 = 0;
pub const TEX_COORD_LOCATION: u32 = 1;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        offset: POSITION_OFFSET as wgpu::BufferAddress,
        shader_location: POSITION_LOCATION,
        format: wgpu::VertexFormat::Float32x3,
    },
    wgpu::VertexAttribute {
        offset: TEX_COORD_OFFSET as wgpu::BufferAddress,
        shader_location: TEX_COORD_LOCATION,
        format: wgpu::VertexFormat::Float32x2,
    },
];

/// Vertex-fetch description for a buffer of [`Vertex`]: 32-byte stride,
/// padding after each attribute is skipped.
pub const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: VERTEX_SIZE as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &VERTEX_ATTRIBUTES,
};

const _: () = assert!(std::mem::size_of::<Vertex>() == VERTEX_SIZE);

pub fn frame_constants_layout_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(FRAME_CONSTANTS_SIZE as u64),
        },
        count: None,
    }
}

pub fn frame_constants_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("frame_constants_bgl"),
        entries: &[frame_constants_layout_entry()],
    })
}

const _: () = assert!(std::mem::size_of::<FrameConstants>() == FRAME_CONSTANTS_SIZE);
