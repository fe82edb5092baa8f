use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::effects::EffectParams;

/// All per-draw data uploaded to the GPU as a single uniform buffer.
/// Must match the `FrameConstants` struct the shader stage declares:
///
/// ```text
/// offset  0  mvp              mat4x4<f32>  (column-major)
/// offset 64  effects_enabled  i32          (0 / 1)
/// offset 68  brightness       f32
/// offset 72  contrast         f32
/// offset 76  saturation       f32
/// offset 80  posterize        f32
/// offset 84  _pad             [f32; 3]     (struct size rounds up to 16)
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameConstants {
    pub mvp: [[f32; 4]; 4],
    pub effects_enabled: i32,
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub posterize: f32,
    pub _pad: [f32; 3],
}

pub const FRAME_CONSTANTS_SIZE: usize = 96;

const _: () = assert!(size_of::<FrameConstants>() == FRAME_CONSTANTS_SIZE);
const _: () = assert!(FRAME_CONSTANTS_SIZE % 16 == 0);
const _: () = assert!(offset_of!(FrameConstants, mvp) == 0);
const _: () = assert!(offset_of!(FrameConstants, effects_enabled) == 64);
const _: () = assert!(offset_of!(FrameConstants, brightness) == 68);
const _: () = assert!(offset_of!(FrameConstants, contrast) == 72);
const _: () = assert!(offset_of!(FrameConstants, saturation) == 76);
const _: () = assert!(offset_of!(FrameConstants, posterize) == 80);

impl Default for FrameConstants {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, &EffectParams::default())
    }
}

impl FrameConstants {
    pub fn new(mvp: Mat4, effects: &EffectParams) -> Self {
        let mut constants = Self {
            mvp: mvp.to_cols_array_2d(),
            effects_enabled: 0,
            brightness: 0.0,
            contrast: 0.0,
            saturation: 0.0,
            posterize: 0.0,
            _pad: [0.0; 3],
        };
        constants.set_effects(effects);
        constants
    }

    pub fn mvp(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.mvp)
    }

    pub fn set_mvp(&mut self, mvp: Mat4) {
        self.mvp = mvp.to_cols_array_2d();
    }

    pub fn effects(&self) -> EffectParams {
        EffectParams {
            enabled: self.effects_enabled != 0,
            brightness: self.brightness,
            contrast: self.contrast,
            saturation: self.saturation,
            posterize: self.posterize,
        }
    }

    pub fn set_effects(&mut self, effects: &EffectParams) {
        self.effects_enabled = i32::from(effects.enabled);
        self.brightness = effects.brightness;
        self.contrast = effects.contrast;
        self.saturation = effects.saturation;
        self.posterize = effects.posterize;
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
