//! Host-side half of the textured-mesh rendering contract: the vertex and
//! per-draw constant layouts the shader stage reads, a CPU reference of its
//! color adjustment, and the geometry that feeds it.

pub mod camera;
pub mod constants;
pub mod effects;
pub mod error;
pub mod mesh;
pub mod presets;
pub mod sim;
pub mod vertex;

pub use camera::Camera;
pub use constants::FrameConstants;
pub use effects::{apply_effects, EffectParams};
pub use error::MeshError;
pub use mesh::{GridMesh, MeshConfig};
pub use presets::EffectPreset;
pub use sim::{MeshSim, SimConfig};
pub use vertex::Vertex;
