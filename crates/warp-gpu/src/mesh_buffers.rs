use warp_core::mesh::GridMesh;
use warp_core::vertex::{vertex_bytes, Vertex};
use wgpu::util::DeviceExt;
use wgpu::{Buffer, Device, Queue};

use crate::error::GpuError;

/// GPU copies of a mesh's vertex and index data.
pub struct MeshBuffers {
    pub vertex_buf: Buffer,
    pub index_buf: Buffer,
    vertex_count: usize,
    index_count: u32,
}

impl MeshBuffers {
    pub fn new(device: &Device, vertices: &[Vertex], indices: &[u16]) -> Self {
        let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: vertex_bytes(vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_indices"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        log::debug!("mesh buffers: {} vertices, {} indices", vertices.len(), indices.len());
        Self {
            vertex_buf,
            index_buf,
            vertex_count: vertices.len(),
            index_count: indices.len() as u32,
        }
    }

    pub fn upload(device: &Device, mesh: &GridMesh) -> Self {
        Self::new(device, mesh.vertices(), mesh.indices())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Overwrite vertex data in place, e.g. after a simulation step. The
    /// vertex count is fixed at creation.
    pub fn update_vertices(&self, queue: &Queue, vertices: &[Vertex]) -> Result<(), GpuError> {
        if vertices.len() != self.vertex_count {
            return Err(GpuError::VertexCountMismatch {
                expected: self.vertex_count,
                got: vertices.len(),
            });
        }
        queue.write_buffer(&self.vertex_buf, 0, vertex_bytes(vertices));
        Ok(())
    }

    /// Bind both buffers at slot 0 and record one indexed draw.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buf.slice(..));
        pass.set_index_buffer(self.index_buf.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
