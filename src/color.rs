//! Color model
//!
//! HSL to RGBA conversion shared by every shape generator.

/// Alpha assigned by [`hsl_to_rgba`] unless the caller overrides it
pub const DEFAULT_ALPHA: u8 = 220;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Alpha multiplied by `factor` (clamped to [0, 1])
    #[inline]
    pub fn faded(self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)) as u8;
        self.with_alpha(a)
    }
}

/// HSL to RGBA color conversion
/// h: degrees (any value, wrapped into [0, 360)), s: 0-1, l: 0-1
pub fn hsl_to_rgba(h: f32, s: f32, l: f32) -> Rgba {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r1, g1, b1) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgba::new(
        to_channel(r1 + m),
        to_channel(g1 + m),
        to_channel(b1 + m),
        DEFAULT_ALPHA,
    )
}

#[inline]
fn to_channel(v: f32) -> u8 {
    (v * 255.0).clamp(0.0, 255.0) as u8
}
