//! CIELAB coordinates and perceptual color difference.
//!
//! sRGB decoding and the sRGB → XYZ → CIELAB (D65) mapping come from the
//! `palette` crate. CIEDE2000 is computed here on the plain [`Lab`] triple.
//!
//! # References
//!
//! - CIE 15:2004, "Colorimetry"
//! - Sharma, Wu & Dalal (2005), "The CIEDE2000 Color-Difference Formula:
//!   Implementation Notes, Supplementary Test Data, and Mathematical
//!   Observations"

use std::f64::consts::PI;

use palette::encoding::{self, FromLinear, IntoLinear};
use palette::white_point::D65;
use palette::{FromColor, LinSrgb, Srgb};

use super::rgb::Color;

/// Linear-light value of an 8-bit sRGB channel, in `[0, 1]`.
#[inline]
pub fn srgb_to_linear(channel: u8) -> f64 {
    <encoding::Srgb as IntoLinear<f64, u8>>::into_linear(channel)
}

/// Re-encodes a linear-light value to an 8-bit sRGB channel.
///
/// Out-of-gamut inputs clamp to `0` or `255`.
pub fn linear_to_srgb(value: f64) -> u8 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    if value >= 1.0 {
        return 255;
    }
    let encoded = <encoding::Srgb as FromLinear<f64, f64>>::from_linear(value);
    (encoded * 255.0).round().clamp(0.0, 255.0) as u8
}

/// A point in CIELAB space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// CIE76 difference: Euclidean distance in Lab.
    pub fn delta_e76(&self, other: &Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }

    /// CIEDE2000 difference with unit parametric factors.
    pub fn delta_e2000(&self, other: &Lab) -> f64 {
        let (l1, a1, b1) = (self.l, self.a, self.b);
        let (l2, a2, b2) = (other.l, other.a, other.b);

        let c1 = a1.hypot(b1);
        let c2 = a2.hypot(b2);
        let c_bar7 = ((c1 + c2) / 2.0).powi(7);
        let g = 0.5 * (1.0 - (c_bar7 / (c_bar7 + 25f64.powi(7))).sqrt());

        let a1p = a1 * (1.0 + g);
        let a2p = a2 * (1.0 + g);
        let c1p = a1p.hypot(b1);
        let c2p = a2p.hypot(b2);
        let h1p = hue_angle(b1, a1p);
        let h2p = hue_angle(b2, a2p);

        let chroma_product = c1p * c2p;

        let dl = l2 - l1;
        let dc = c2p - c1p;
        let dh = if chroma_product == 0.0 {
            0.0
        } else {
            let d = h2p - h1p;
            if d > PI {
                d - 2.0 * PI
            } else if d < -PI {
                d + 2.0 * PI
            } else {
                d
            }
        };
        let dh_big = 2.0 * chroma_product.sqrt() * (dh / 2.0).sin();

        let l_bar = (l1 + l2) / 2.0;
        let c_bar_p = (c1p + c2p) / 2.0;
        let h_bar_p = if chroma_product == 0.0 {
            h1p + h2p
        } else if (h1p - h2p).abs() <= PI {
            (h1p + h2p) / 2.0
        } else if h1p + h2p < 2.0 * PI {
            (h1p + h2p + 2.0 * PI) / 2.0
        } else {
            (h1p + h2p - 2.0 * PI) / 2.0
        };

        let t = 1.0 - 0.17 * (h_bar_p - 30f64.to_radians()).cos()
            + 0.24 * (2.0 * h_bar_p).cos()
            + 0.32 * (3.0 * h_bar_p + 6f64.to_radians()).cos()
            - 0.20 * (4.0 * h_bar_p - 63f64.to_radians()).cos();

        let l50 = (l_bar - 50.0).powi(2);
        let sl = 1.0 + 0.015 * l50 / (20.0 + l50).sqrt();
        let sc = 1.0 + 0.045 * c_bar_p;
        let sh = 1.0 + 0.015 * c_bar_p * t;

        let c_bar_p7 = c_bar_p.powi(7);
        let rc = 2.0 * (c_bar_p7 / (c_bar_p7 + 25f64.powi(7))).sqrt();
        let d_theta = 30f64.to_radians()
            * (-((h_bar_p.to_degrees() - 275.0) / 25.0).powi(2)).exp();
        let rt = -rc * (2.0 * d_theta).sin();

        let tl = dl / sl;
        let tc = dc / sc;
        let th = dh_big / sh;
        (tl * tl + tc * tc + th * th + rt * tc * th).max(0.0).sqrt()
    }
}

/// Hue angle in radians, normalized to `[0, 2π)`.
#[inline]
fn hue_angle(b: f64, a_prime: f64) -> f64 {
    if b == 0.0 && a_prime == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a_prime);
    if h < 0.0 {
        h + 2.0 * PI
    } else {
        h
    }
}

impl From<Color> for Lab {
    fn from(color: Color) -> Self {
        let linear: LinSrgb<f64> = Srgb::new(color.r, color.g, color.b).into_linear();
        let lab = palette::Lab::<D65, f64>::from_color(linear);
        Lab::new(lab.l, lab.a, lab.b)
    }
}

impl Color {
    /// Perceptual coordinates of this color.
    pub fn to_lab(&self) -> Lab {
        Lab::from(*self)
    }
}

/// Color-difference formula used by the cost terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceMetric {
    /// CIEDE2000.
    #[default]
    Ciede2000,
    /// Euclidean distance in Lab (CIE76). Cheaper, less uniform.
    Cie76,
}

impl DistanceMetric {
    #[inline]
    pub fn between(self, a: &Lab, b: &Lab) -> f64 {
        match self {
            DistanceMetric::Ciede2000 => a.delta_e2000(b),
            DistanceMetric::Cie76 => a.delta_e76(b),
        }
    }
}

/// Perceptual distance between two sRGB colors.
pub fn perceptual_distance(a: Color, b: Color, metric: DistanceMetric) -> f64 {
    metric.between(&a.to_lab(), &b.to_lab())
}
