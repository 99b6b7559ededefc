#![forbid(unsafe_code)]

//! Color spaces and the conversions between them.
//!
//! All conversions route through [`Rgba`] (gamma-encoded sRGB, channels
//! nominally in `0.0..=1.0`). Channels are kept unclamped while a color is
//! in flight so that out-of-gamut OKLCH values survive a round trip; they
//! are clamped only when serialized.
//!
//! # Hue
//!
//! Achromatic colors have no hue. [`Hsl::h`] and [`Oklch::h`] are `None`
//! for them and every formatter prints a missing hue as `0`.
//!
//! # OKLab
//!
//! The OKLab matrices are the reference ones from Björn Ottosson's
//! definition, applied to linear-light sRGB.

/// Chroma below this is treated as achromatic in OKLCH.
const ACHROMATIC_CHROMA: f64 = 1e-6;
/// Channel spread below this is treated as achromatic in HSL.
const ACHROMATIC_DELTA: f64 = 1e-9;

/// Gamma-encoded sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub alpha: f64,
}

/// HSL color. `s` and `l` are fractions in `0.0..=1.0`, `h` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsl {
    pub h: Option<f64>,
    pub s: f64,
    pub l: f64,
    pub alpha: f64,
}

/// OKLCH color. `l` is in `0.0..=1.0`, `c` is unbounded, `h` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: Option<f64>,
    pub alpha: f64,
}

impl Rgba {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Self { r, g, b, alpha }
    }

    /// Opaque color from 8-bit channels.
    #[must_use]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Clamp every channel into gamut.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(
            clamp_unit(self.r),
            clamp_unit(self.g),
            clamp_unit(self.b),
            clamp_unit(self.alpha),
        )
    }

    /// 8-bit channels, clamped and rounded.
    #[must_use]
    pub fn to_u8(self) -> (u8, u8, u8) {
        (to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }

    /// Linear-light channels.
    #[must_use]
    pub fn to_linear(self) -> [f64; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }

    #[must_use]
    pub fn from_linear(linear: [f64; 3], alpha: f64) -> Self {
        Self::new(
            linear_to_srgb(linear[0]),
            linear_to_srgb(linear[1]),
            linear_to_srgb(linear[2]),
            alpha,
        )
    }

    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let Self { r, g, b, alpha } = self;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        if delta < ACHROMATIC_DELTA {
            return Hsl {
                h: None,
                s: 0.0,
                l,
                alpha,
            };
        }

        let s = delta / (1.0 - (max + min - 1.0).abs());
        let sector = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Hsl {
            h: Some(sector * 60.0),
            s,
            l,
            alpha,
        }
    }

    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        let [r, g, b] = self.to_linear();

        let l = 0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b;
        let m = 0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b;
        let s = 0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b;

        let (l, m, s) = (l.cbrt(), m.cbrt(), s.cbrt());

        let lightness = 0.210_454_255_3 * l + 0.793_617_785 * m - 0.004_072_046_8 * s;
        let a = 1.977_998_495_1 * l - 2.428_592_205 * m + 0.450_593_709_9 * s;
        let bb = 0.025_904_037_1 * l + 0.782_771_766_2 * m - 0.808_675_766 * s;

        let chroma = a.hypot(bb);
        let hue = if chroma < ACHROMATIC_CHROMA {
            None
        } else {
            Some(normalize_hue(bb.atan2(a).to_degrees()))
        };

        Oklch {
            l: lightness,
            c: if hue.is_none() { 0.0 } else { chroma },
            h: hue,
            alpha: self.alpha,
        }
    }
}

impl Hsl {
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let h = normalize_hue(self.h.unwrap_or(0.0)) / 360.0;
        let Self { s, l, alpha, .. } = self;

        if s == 0.0 {
            return Rgba::new(l, l, l, alpha);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgba::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
            alpha,
        )
    }
}

impl Oklch {
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let hue = self.h.unwrap_or(0.0).to_radians();
        let a = self.c * hue.cos();
        let b = self.c * hue.sin();

        let l = self.l + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
        let m = self.l - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
        let s = self.l - 0.089_484_177_5 * a - 1.291_485_548 * b;

        let (l, m, s) = (l * l * l, m * m * m, s * s * s);

        let linear = [
            4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s,
            -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s,
            -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701 * s,
        ];

        Rgba::from_linear(linear, self.alpha)
    }
}

impl From<Hsl> for Rgba {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgba()
    }
}

impl From<Oklch> for Rgba {
    fn from(oklch: Oklch) -> Self {
        oklch.to_rgba()
    }
}

/// Wrap a hue in degrees into `[0, 360)`. Non-finite hues map to `0`.
#[must_use]
pub fn normalize_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let wrapped = hue % 360.0;
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    // -1e-14 % 360 + 360 rounds to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// sRGB transfer function, sign-preserving for out-of-gamut channels.
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    let abs = c.abs();
    if abs <= 0.040_45 {
        c / 12.92
    } else {
        c.signum() * ((abs + 0.055) / 1.055).powf(2.4)
    }
}

#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    let abs = c.abs();
    if abs > 0.003_130_8 {
        c.signum() * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
    } else {
        c * 12.92
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn to_byte(value: f64) -> u8 {
    (clamp_unit(value) * 255.0).round() as u8
}
