// ============================================================================
// SHIFT INVERT FILTER — contrast-preserving colour inversion
// ============================================================================
//
// Per-pixel transform in normalized [0,1] space:
//
//   m     = 1 + white_bias
//   shift = white_bias + a - min(r,g,b) - max(r,g,b)
//   out   = ((shift + r) / m, (shift + g) / m, (shift + b) / m, a)
//
// Values outside [0,1] are accepted and run through the same arithmetic
// without clamping. Clamping only happens when quantizing back to 8 bits.
// ============================================================================

use std::fmt;

/// Default contrast bias. Lower values produce a harsher inversion.
pub const DEFAULT_WHITE_BIAS: f32 = 0.08;

/// One RGBA pixel with normalized float components.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Pixel {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Pixel {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray with all three colour channels set to `v`.
    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v, 1.0)
    }

    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Self::new(
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
            px[3] as f32 / 255.0,
        )
    }

    /// Quantize back to 8 bits. Out-of-range components saturate.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }
}

#[inline]
fn quantize(c: f32) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Error returned when constructing a filter with an unusable bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterError {
    /// `white_bias` must be finite and greater than -1 so the divisor stays positive.
    InvalidWhiteBias(f32),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidWhiteBias(v) => {
                write!(f, "invalid white bias {}: must be finite and > -1", v)
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Stateless colour inversion filter.
///
/// The only configuration is `white_bias`; applying the filter never mutates
/// it, so a single instance can be shared freely across threads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorInversionFilter {
    white_bias: f32,
}

impl Default for ColorInversionFilter {
    fn default() -> Self {
        Self { white_bias: DEFAULT_WHITE_BIAS }
    }
}

impl ColorInversionFilter {
    pub fn new(white_bias: f32) -> Result<Self, FilterError> {
        if !white_bias.is_finite() || white_bias <= -1.0 {
            return Err(FilterError::InvalidWhiteBias(white_bias));
        }
        Ok(Self { white_bias })
    }

    pub fn white_bias(&self) -> f32 {
        self.white_bias
    }

    /// Transform a single pixel. Alpha is returned untouched.
    #[inline]
    pub fn apply(&self, px: Pixel) -> Pixel {
        let (r, g, b, a) = self.apply_rgba(px.r, px.g, px.b, px.a);
        Pixel { r, g, b, a }
    }

    /// Tuple form of [`apply`](Self::apply), convenient inside pixel loops.
    #[inline]
    pub fn apply_rgba(&self, r: f32, g: f32, b: f32, a: f32) -> (f32, f32, f32, f32) {
        let m = 1.0 + self.white_bias;
        let lo = r.min(g.min(b));
        let hi = r.max(g.max(b));
        let shift = self.white_bias + a - lo - hi;
        ((shift + r) / m, (shift + g) / m, (shift + b) / m, a)
    }

    /// 8-bit form: normalize, transform, quantize. The alpha byte is copied
    /// through as-is.
    #[inline]
    pub fn apply_rgba8(&self, px: [u8; 4]) -> [u8; 4] {
        let mut out = self.apply(Pixel::from_rgba8(px)).to_rgba8();
        out[3] = px[3];
        out
    }
}
