use glam::{Mat4, Vec3};

use crate::constants::FrameConstants;
use crate::effects::EffectParams;

/// Fixed perspective camera looking down +z at the unit mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Model translation applied before projection.
    pub translation: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y_degrees: 65.0,
            near: 0.1,
            far: 300.0,
            // centre the [0,1] mesh on the axis, just in front of the eye
            translation: Vec3::new(-0.5, -0.5, 0.75),
        }
    }
}

impl Camera {
    /// `aspect` is width / height.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_lh(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn mvp(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * Mat4::from_translation(self.translation)
    }

    /// The record to upload for one draw at the given viewport size.
    pub fn frame_constants(
        &self,
        width: u32,
        height: u32,
        effects: &EffectParams,
    ) -> FrameConstants {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        FrameConstants::new(self.mvp(aspect), effects)
    }
}
