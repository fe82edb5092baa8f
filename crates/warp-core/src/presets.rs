use crate::effects::EffectParams;

/// Named effect settings selectable from the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectPreset {
    Identity,
    Punchy,
    Grayscale,
    Poster,
    Washed,
}

impl EffectPreset {
    pub const ALL: [EffectPreset; 5] = [
        EffectPreset::Identity,
        EffectPreset::Punchy,
        EffectPreset::Grayscale,
        EffectPreset::Poster,
        EffectPreset::Washed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EffectPreset::Identity => "Identity",
            EffectPreset::Punchy => "Punchy",
            EffectPreset::Grayscale => "Grayscale",
            EffectPreset::Poster => "Poster",
            EffectPreset::Washed => "Washed",
        }
    }

    /// Effect values for the preset. Every preset except `Identity` is enabled.
    pub fn params(self) -> EffectParams {
        match self {
            EffectPreset::Identity => EffectParams::IDENTITY,
            EffectPreset::Punchy => EffectParams {
                enabled: true,
                brightness: 0.05,
                contrast: 1.4,
                saturation: 1.5,
                posterize: 0.0,
            },
            EffectPreset::Grayscale => EffectParams {
                enabled: true,
                saturation: 0.0,
                ..EffectParams::IDENTITY
            },
            EffectPreset::Poster => EffectParams {
                enabled: true,
                contrast: 1.2,
                posterize: 4.0,
                ..EffectParams::IDENTITY
            },
            EffectPreset::Washed => EffectParams {
                enabled: true,
                brightness: 0.15,
                contrast: 0.6,
                saturation: 0.4,
                posterize: 0.0,
            },
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}
