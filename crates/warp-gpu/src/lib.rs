//! wgpu side of the textured-mesh contract: vertex-fetch layout, the
//! per-frame constant ring and mesh buffer upload.

pub mod constant_ring;
pub mod context;
pub mod error;
pub mod layout;
pub mod mesh_buffers;

pub use constant_ring::{ConstantRing, RingCursor, DEFAULT_FRAMES_IN_FLIGHT};
pub use context::GpuContext;
pub use error::GpuError;
pub use layout::{frame_constants_layout, BINDINGS_WGSL, VERTEX_LAYOUT};
pub use mesh_buffers::MeshBuffers;
