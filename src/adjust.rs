//! Per-image adjustments: brightness/contrast remap and quarter-turn rotation.
//!
//! Brightness and contrast combine into a single per-channel affine remap,
//! evaluated once into a 256-entry lookup table and applied to every color
//! channel (alpha untouched). Rotation is a lossless geometric transform in
//! 90° steps — no resampling, no cropping; the source center maps to the
//! destination center.

use image::{Rgba, RgbaImage, imageops};

/// Rotation in clockwise 90° steps (the cyclic subgroup C4).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// No rotation.
    #[default]
    None,
    /// 90° clockwise.
    Cw90,
    /// 180°.
    Cw180,
    /// 270° clockwise (90° counter-clockwise).
    Cw270,
}

impl Rotation {
    /// Create from degrees. Any multiple of 90 is accepted and wrapped
    /// modulo 360 (so `-90` → `Cw270`, `450` → `Cw90`); other values
    /// return `None`.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Self::None),
            90 => Some(Self::Cw90),
            180 => Some(Self::Cw180),
            270 => Some(Self::Cw270),
            _ => None,
        }
    }

    /// Degrees clockwise, in `{0, 90, 180, 270}`.
    pub const fn degrees(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Cw90 => 90,
            Self::Cw180 => 180,
            Self::Cw270 => 270,
        }
    }

    /// One more 90° clockwise step. Interactive callers apply successive
    /// deltas; composition wraps modulo 360.
    pub const fn rotated_cw(self) -> Self {
        match self {
            Self::None => Self::Cw90,
            Self::Cw90 => Self::Cw180,
            Self::Cw180 => Self::Cw270,
            Self::Cw270 => Self::None,
        }
    }

    /// One 90° counter-clockwise step.
    pub const fn rotated_ccw(self) -> Self {
        match self {
            Self::None => Self::Cw270,
            Self::Cw90 => Self::None,
            Self::Cw180 => Self::Cw90,
            Self::Cw270 => Self::Cw180,
        }
    }

    /// Whether this rotation swaps output width and height.
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Cw90 | Self::Cw270)
    }
}

/// Per-image adjustment settings, consumed once per render call.
///
/// Brightness and contrast are −100..=100 at the UI surface, 0 meaning
/// "no change". The engine does not reject out-of-range values; output
/// is clamped to 0..=255 regardless.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AdjustmentSettings {
    /// Brightness, −100 (fully subtracted) to 100 (doubled).
    pub brightness: i32,
    /// Contrast around the channel midpoint, −100 to 100.
    pub contrast: i32,
    /// Clockwise rotation in 90° steps.
    pub rotation: Rotation,
}

impl AdjustmentSettings {
    /// Whether these settings leave the image pixel-identical.
    pub fn is_identity(&self) -> bool {
        self.brightness == 0 && self.contrast == 0 && self.rotation == Rotation::None
    }
}

/// Apply brightness/contrast and rotation, producing a new image.
///
/// The per-channel remap is
/// `out = clamp(((in − 128) · c/100 + 128) · b/100)` with
/// `b = brightness + 100` and `c = contrast + 100` — contrast scales
/// around the midpoint 128 first, then brightness scales multiplicatively,
/// then the result clamps to 0..=255 (rounded to nearest). Alpha passes
/// through unchanged.
///
/// Output dimensions swap for 90°/270° rotations. Identity settings
/// return an exact copy.
pub fn adjust(image: &RgbaImage, settings: &AdjustmentSettings) -> RgbaImage {
    let remapped = if settings.brightness == 0 && settings.contrast == 0 {
        image.clone()
    } else {
        let lut = channel_lut(settings.brightness, settings.contrast);
        let mut out = image.clone();
        for Rgba([r, g, b, _]) in out.pixels_mut() {
            *r = lut[*r as usize];
            *g = lut[*g as usize];
            *b = lut[*b as usize];
        }
        out
    };

    match settings.rotation {
        Rotation::None => remapped,
        Rotation::Cw90 => imageops::rotate90(&remapped),
        Rotation::Cw180 => imageops::rotate180(&remapped),
        Rotation::Cw270 => imageops::rotate270(&remapped),
    }
}

/// Evaluate the brightness/contrast remap for all 256 channel values.
fn channel_lut(brightness: i32, contrast: i32) -> [u8; 256] {
    let b = (brightness + 100) as f32 / 100.0;
    let c = (contrast + 100) as f32 / 100.0;
    let mut lut = [0u8; 256];
    for (v, slot) in lut.iter_mut().enumerate() {
        let adjusted = ((v as f32 - 128.0) * c + 128.0) * b;
        *slot = adjusted.round().clamp(0.0, 255.0) as u8;
    }
    lut
}
