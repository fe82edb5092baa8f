//! CPU reference for the post-process color adjustment.
//!
//! The fragment stage applies the same math to each sampled texel. Stages run
//! in a fixed order, brightness → contrast → saturation → posterize, and only
//! when `enabled` is set. Alpha is never touched. No clamping happens here;
//! the render target's format does that.

use glam::{Vec3, Vec4};

/// Rec.601 luma weights.
pub const LUMA_WEIGHTS: Vec3 = Vec3::new(0.299, 0.587, 0.114);

/// Contrast pivots around mid-gray.
pub const MID_GRAY: f32 = 0.5;

/// The five effect values carried by `FrameConstants`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParams {
    pub enabled: bool,
    /// Added to every channel. 0 = no change.
    pub brightness: f32,
    /// Scale of the distance from mid-gray. 1 = no change.
    pub contrast: f32,
    /// 0 = fully gray, 1 = no change, >1 oversaturates.
    pub saturation: f32,
    /// Levels per channel. Values ≤ 1 disable quantization.
    pub posterize: f32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl EffectParams {
    /// Leaves every color unchanged, effects switched off.
    pub const IDENTITY: Self = Self {
        enabled: false,
        brightness: 0.0,
        contrast: 1.0,
        saturation: 1.0,
        posterize: 0.0,
    };

    pub const BRIGHTNESS_RANGE: (f32, f32) = (-1.0, 1.0);
    pub const CONTRAST_RANGE: (f32, f32) = (0.0, 3.0);
    pub const SATURATION_RANGE: (f32, f32) = (0.0, 2.0);
    pub const POSTERIZE_RANGE: (f32, f32) = (0.0, 16.0);

    /// Map four `[0, 1]` slider positions onto the parameter ranges.
    /// Slider values outside `[0, 1]` are clamped.
    pub fn from_sliders(
        enabled: bool,
        brightness: f32,
        contrast: f32,
        saturation: f32,
        posterize: f32,
    ) -> Self {
        Self {
            enabled,
            brightness: map_slider(brightness, Self::BRIGHTNESS_RANGE),
            contrast: map_slider(contrast, Self::CONTRAST_RANGE),
            saturation: map_slider(saturation, Self::SATURATION_RANGE),
            posterize: map_slider(posterize, Self::POSTERIZE_RANGE).floor(),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn posterize_active(&self) -> bool {
        self.posterize > 1.0
    }
}

fn map_slider(t: f32, (min, max): (f32, f32)) -> f32 {
    min + t.clamp(0.0, 1.0) * (max - min)
}

pub fn luminance(rgb: Vec3) -> f32 {
    rgb.dot(LUMA_WEIGHTS)
}

pub fn brightness(rgb: Vec3, amount: f32) -> Vec3 {
    rgb + Vec3::splat(amount)
}

pub fn contrast(rgb: Vec3, amount: f32) -> Vec3 {
    (rgb - Vec3::splat(MID_GRAY)) * amount + Vec3::splat(MID_GRAY)
}

pub fn saturation(rgb: Vec3, amount: f32) -> Vec3 {
    Vec3::splat(luminance(rgb)).lerp(rgb, amount)
}

pub fn posterize(rgb: Vec3, levels: f32) -> Vec3 {
    if levels > 1.0 {
        (rgb * levels).floor() / levels
    } else {
        rgb
    }
}

/// Run the full adjustment chain on one RGBA color.
pub fn apply_effects(color: Vec4, params: &EffectParams) -> Vec4 {
    if !params.enabled {
        return color;
    }
    let mut rgb = color.truncate();
    rgb = brightness(rgb, params.brightness);
    rgb = contrast(rgb, params.contrast);
    rgb = saturation(rgb, params.saturation);
    rgb = posterize(rgb, params.posterize);
    rgb.extend(color.w)
}
