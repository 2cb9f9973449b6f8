use serde::{Deserialize, Serialize};

/// How RGB collapses into a single gray channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrayscaleMethod {
    /// Mean of R, G and B.
    Average,
    /// `max(B - (R + G) / 3, 0)`; isolates blue-tinted plate print.
    BlueChannel,
    /// Weighted sum, weights chosen by [`BlueEmphasis`].
    #[default]
    Luminosity,
}

/// Blue weighting preset for [`GrayscaleMethod::Luminosity`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlueEmphasis {
    /// Equal weights.
    Zero,
    #[default]
    Normal,
    High,
    VeryHigh,
}

impl BlueEmphasis {
    /// `[r, g, b]` weights, summing to 1.
    pub fn weights(self) -> [f32; 3] {
        match self {
            BlueEmphasis::Zero => [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
            BlueEmphasis::Normal => [0.299, 0.587, 0.114],
            BlueEmphasis::High => [0.25, 0.45, 0.30],
            BlueEmphasis::VeryHigh => [0.15, 0.30, 0.55],
        }
    }
}

/// Contrast stretch selection.
///
/// `Adaptive` derives the multipliers per pixel from a 5x5 neighbourhood;
/// the other presets apply fixed `(dark, light)` multipliers everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContrastLevel {
    #[default]
    Adaptive,
    Low,
    Normal,
    High,
    VeryHigh,
}

impl ContrastLevel {
    /// Fixed `(dark, light)` multipliers, `None` for the adaptive mode.
    pub fn global_multipliers(self) -> Option<(f32, f32)> {
        match self {
            ContrastLevel::Adaptive => None,
            ContrastLevel::Low => Some((0.9, 1.1)),
            ContrastLevel::Normal => Some((0.8, 1.2)),
            ContrastLevel::High => Some((0.7, 1.3)),
            ContrastLevel::VeryHigh => Some((0.6, 1.4)),
        }
    }
}

/// Side length of the morphological structuring element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum KernelSize {
    #[default]
    K3,
    K5,
    K7,
}

impl KernelSize {
    #[inline]
    pub fn side(self) -> usize {
        match self {
            KernelSize::K3 => 3,
            KernelSize::K5 => 5,
            KernelSize::K7 => 7,
        }
    }

    #[inline]
    pub fn radius(self) -> usize {
        self.side() / 2
    }
}

impl TryFrom<u8> for KernelSize {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            3 => Ok(KernelSize::K3),
            5 => Ok(KernelSize::K5),
            7 => Ok(KernelSize::K7),
            other => Err(format!("kernel size must be 3, 5 or 7 (got {other})")),
        }
    }
}

impl From<KernelSize> for u8 {
    fn from(k: KernelSize) -> u8 {
        k.side() as u8
    }
}

fn default_true() -> bool {
    true
}

fn default_invert_threshold() -> u8 {
    128
}

fn default_unsharp_amount() -> f32 {
    1.5
}

fn default_unsharp_threshold() -> u8 {
    10
}

fn default_binarize_low() -> u8 {
    75
}

fn default_binarize_high() -> u8 {
    180
}

/// Configuration for [`crate::preprocess`].
///
/// Every field has a serde default so partially filled settings blobs load
/// cleanly; `PreprocessConfig::default()` equals the empty JSON object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    #[serde(default)]
    pub grayscale: GrayscaleMethod,
    #[serde(default)]
    pub blue_emphasis: BlueEmphasis,
    #[serde(default)]
    pub contrast: ContrastLevel,
    #[serde(default)]
    pub kernel_size: KernelSize,

    /// Invert frames whose mean luminance is below `invert_threshold`
    /// (light print on a dark plate).
    #[serde(default = "default_true")]
    pub invert_light_text: bool,
    /// Invert frames whose mean luminance is above `invert_threshold`.
    #[serde(default)]
    pub invert_dark_text: bool,
    #[serde(default = "default_true")]
    pub pre_sharpen: bool,
    #[serde(default)]
    pub unsharp_mask: bool,
    #[serde(default = "default_true")]
    pub noise_reduction: bool,

    #[serde(default = "default_invert_threshold")]
    pub invert_threshold: u8,
    /// Gain applied to blur differences that clear `unsharp_threshold`.
    #[serde(default = "default_unsharp_amount")]
    pub unsharp_amount: f32,
    #[serde(default = "default_unsharp_threshold")]
    pub unsharp_threshold: u8,
    /// Values strictly below this become 0.
    #[serde(default = "default_binarize_low")]
    pub binarize_low: u8,
    /// Values strictly above this become 255.
    #[serde(default = "default_binarize_high")]
    pub binarize_high: u8,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            grayscale: GrayscaleMethod::default(),
            blue_emphasis: BlueEmphasis::default(),
            contrast: ContrastLevel::default(),
            kernel_size: KernelSize::default(),
            invert_light_text: true,
            invert_dark_text: false,
            pre_sharpen: true,
            unsharp_mask: false,
            noise_reduction: true,
            invert_threshold: default_invert_threshold(),
            unsharp_amount: default_unsharp_amount(),
            unsharp_threshold: default_unsharp_threshold(),
            binarize_low: default_binarize_low(),
            binarize_high: default_binarize_high(),
        }
    }
}
