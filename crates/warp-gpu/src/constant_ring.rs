use warp_core::constants::FrameConstants;
use wgpu::{BindGroup, BindGroupLayout, Buffer, Device, Queue};

/// Frames the host may record ahead of the GPU before reusing a constant buffer.
pub const DEFAULT_FRAMES_IN_FLIGHT: usize = 3;

/// Round-robin slot index into a fixed set of per-frame resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingCursor {
    len: usize,
    current: usize,
}

impl RingCursor {
    /// A ring always has at least one slot.
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a ring is built with at least one slot.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Return the current slot and move to the next one.
    pub fn advance(&mut self) -> usize {
        let slot = self.current;
        self.current = (self.current + 1) % self.len;
        slot
    }
}

/// One uniform buffer (and bind group) per in-flight frame, so writing this
/// frame's `FrameConstants` never touches a buffer the GPU may still be reading.
pub struct ConstantRing {
    buffers: Vec<Buffer>,
    bind_groups: Vec<BindGroup>,
    cursor: RingCursor,
}

impl ConstantRing {
    pub fn new(device: &Device, layout: &BindGroupLayout, frames_in_flight: usize) -> Self {
        let cursor = RingCursor::new(frames_in_flight);
        let mut buffers = Vec::with_capacity(cursor.len());
        let mut bind_groups = Vec::with_capacity(cursor.len());

        for i in 0..cursor.len() {
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("frame_constants_{i}")),
                size: std::mem::size_of::<FrameConstants>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("frame_constants_bg_{i}")),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            buffers.push(buffer);
            bind_groups.push(bind_group);
        }

        log::debug!("constant ring: {} slots", cursor.len());
        Self {
            buffers,
            bind_groups,
            cursor,
        }
    }

    pub fn frames_in_flight(&self) -> usize {
        self.cursor.len()
    }

    /// Upload `constants` into the next free slot and return the bind group to
    /// use for this frame's draw.
    pub fn write(&mut self, queue: &Queue, constants: &FrameConstants) -> &BindGroup {
        let slot = self.cursor.advance();
        queue.write_buffer(&self.buffers[slot], 0, bytemuck::bytes_of(constants));
        &self.bind_groups[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_after_len() {
        let mut c = RingCursor::new(DEFAULT_FRAMES_IN_FLIGHT);
        let slots: Vec<_> = (0..7).map(|_| c.advance()).collect();
        assert_eq!(slots, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn zero_length_ring_has_one_slot() {
        let mut c = RingCursor::new(0);
        assert_eq!(c.len(), 1);
        assert!(!c.is_empty());
        assert_eq!(c.advance(), 0);
        assert_eq!(c.advance(), 0);
    }

    #[test]
    fn consecutive_frames_never_share_a_slot() {
        let mut c = RingCursor::new(2);
        let mut prev = c.advance();
        for _ in 0..10 {
            let next = c.advance();
            assert_ne!(prev, next);
            prev = next;
        }
    }
}
