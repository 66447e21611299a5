//! Color-vision-deficiency simulation.
//!
//! Dichromacy is simulated with the Brettel, Viénot & Mollon (1997) model in
//! the form popularized by Viénot et al. (1999): the linear-RGB cube is split
//! by a plane through the neutral axis, and each half is projected with its
//! own 3×3 matrix onto the reduced color gamut of the dichromat.
//!
//! Anomalous trichromacy (protanomaly etc.) is approximated by blending the
//! full simulation with the input color in linear light.

use super::lab::{linear_to_srgb, srgb_to_linear};
use super::rgb::Color;

/// Severity used for the anomalous-trichromacy [`Vision`] variants.
pub const ANOMALY_SEVERITY: f64 = 0.6;

/// The three dichromatic color-vision deficiencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Deficiency {
    /// Missing L cones (red-blind).
    Protanopia,
    /// Missing M cones (green-blind).
    Deuteranopia,
    /// Missing S cones (blue-blind).
    Tritanopia,
}

impl Deficiency {
    pub const ALL: [Deficiency; 3] = [
        Deficiency::Protanopia,
        Deficiency::Deuteranopia,
        Deficiency::Tritanopia,
    ];

    fn params(self) -> &'static BrettelParams {
        match self {
            Deficiency::Protanopia => &PROTAN,
            Deficiency::Deuteranopia => &DEUTAN,
            Deficiency::Tritanopia => &TRITAN,
        }
    }
}

struct BrettelParams {
    first_half: [[f64; 3]; 3],
    second_half: [[f64; 3]; 3],
    separation_normal: [f64; 3],
}

const PROTAN: BrettelParams = BrettelParams {
    first_half: [
        [0.14510, 1.20165, -0.34675],
        [0.10447, 0.85316, 0.04237],
        [0.00429, -0.00603, 1.00174],
    ],
    second_half: [
        [0.14115, 1.16782, -0.30897],
        [0.10495, 0.85730, 0.03776],
        [0.00431, -0.00586, 1.00155],
    ],
    separation_normal: [0.00048, 0.00416, -0.00464],
};

const DEUTAN: BrettelParams = BrettelParams {
    first_half: [
        [0.36198, 0.86755, -0.22953],
        [0.26099, 0.64512, 0.09389],
        [-0.01975, 0.02686, 0.99289],
    ],
    second_half: [
        [0.37009, 0.88540, -0.25549],
        [0.25767, 0.63782, 0.10451],
        [-0.01950, 0.02741, 0.99209],
    ],
    separation_normal: [-0.00293, -0.00645, 0.00938],
};

const TRITAN: BrettelParams = BrettelParams {
    first_half: [
        [1.01354, 0.14268, -0.15622],
        [-0.01181, 0.87561, 0.13619],
        [0.07707, 0.81208, 0.11085],
    ],
    second_half: [
        [0.93337, 0.19999, -0.13336],
        [0.05809, 0.82565, 0.11626],
        [-0.37923, 1.13825, 0.24098],
    ],
    separation_normal: [0.03960, -0.02831, -0.01129],
};

#[inline]
fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Appearance of `color` to a dichromat with the given deficiency.
pub fn simulate(color: Color, deficiency: Deficiency) -> Color {
    simulate_with_severity(color, deficiency, 1.0)
}

/// Like [`simulate`], blended toward normal vision by `1 - severity`.
///
/// `severity` is clamped to `[0, 1]`; 0 returns the input unchanged.
pub fn simulate_with_severity(color: Color, deficiency: Deficiency, severity: f64) -> Color {
    let severity = severity.clamp(0.0, 1.0);
    if severity == 0.0 {
        return color;
    }

    let rgb = color.channels().map(srgb_to_linear);
    let params = deficiency.params();
    let matrix = if dot(&rgb, &params.separation_normal) >= 0.0 {
        &params.first_half
    } else {
        &params.second_half
    };

    let out: [u8; 3] = std::array::from_fn(|i| {
        let simulated = dot(&matrix[i], &rgb);
        linear_to_srgb(simulated * severity + rgb[i] * (1.0 - severity))
    });
    Color::from(out)
}

/// Achromatic vision: blends toward Rec.601 luma by `severity`.
pub fn monochrome(color: Color, severity: f64) -> Color {
    let severity = severity.clamp(0.0, 1.0);
    let [r, g, b] = color.channels().map(f64::from);
    let luma = (0.299 * r + 0.587 * g + 0.114 * b).round();
    let mix = |c: f64| (luma * severity + c * (1.0 - severity)).round().clamp(0.0, 255.0) as u8;
    Color::new(mix(r), mix(g), mix(b))
}

/// A viewing condition for previewing a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vision {
    #[default]
    Normal,
    Protanopia,
    Protanomaly,
    Deuteranopia,
    Deuteranomaly,
    Tritanopia,
    Tritanomaly,
    Achromatopsia,
    Achromatomaly,
}

impl Vision {
    pub const ALL: [Vision; 9] = [
        Vision::Normal,
        Vision::Protanopia,
        Vision::Protanomaly,
        Vision::Deuteranopia,
        Vision::Deuteranomaly,
        Vision::Tritanopia,
        Vision::Tritanomaly,
        Vision::Achromatopsia,
        Vision::Achromatomaly,
    ];

    pub fn apply(self, color: Color) -> Color {
        use Deficiency::*;
        match self {
            Vision::Normal => color,
            Vision::Protanopia => simulate(color, Protanopia),
            Vision::Protanomaly => simulate_with_severity(color, Protanopia, ANOMALY_SEVERITY),
            Vision::Deuteranopia => simulate(color, Deuteranopia),
            Vision::Deuteranomaly => {
                simulate_with_severity(color, Deuteranopia, ANOMALY_SEVERITY)
            }
            Vision::Tritanopia => simulate(color, Tritanopia),
            Vision::Tritanomaly => simulate_with_severity(color, Tritanopia, ANOMALY_SEVERITY),
            Vision::Achromatopsia => monochrome(color, 1.0),
            Vision::Achromatomaly => monochrome(color, ANOMALY_SEVERITY),
        }
    }

    /// Applies this condition to every color, preserving order.
    pub fn apply_all(self, colors: &[Color]) -> Vec<Color> {
        colors.iter().map(|&c| self.apply(c)).collect()
    }
}

impl std::fmt::Display for Vision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Vision::Normal => "Normal",
            Vision::Protanopia => "Protanopia",
            Vision::Protanomaly => "Protanomaly",
            Vision::Deuteranopia => "Deuteranopia",
            Vision::Deuteranomaly => "Deuteranomaly",
            Vision::Tritanopia => "Tritanopia",
            Vision::Tritanomaly => "Tritanomaly",
            Vision::Achromatopsia => "Achromatopsia",
            Vision::Achromatomaly => "Achromatomaly",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{perceptual_distance, DistanceMetric};
    use proptest::prelude::*;

    #[test]
    fn test_grays_stay_near_gray() {
        for v in [0u8, 64, 128, 200, 255] {
            let gray = Color::new(v, v, v);
            for d in Deficiency::ALL {
                let out = simulate(gray, d);
                let [r, g, b] = out.channels().map(i32::from);
                let spread = r.max(g).max(b) - r.min(g).min(b);
                assert!(spread <= 3, "{d:?} moved gray {v} to {out}");
            }
        }
    }

    #[test]
    fn test_zero_severity_is_identity() {
        let c = Color::new(0xED, 0x68, 0x04);
        for d in Deficiency::ALL {
            assert_eq!(simulate_with_severity(c, d, 0.0), c);
        }
        assert_eq!(monochrome(c, 0.0), c);
    }

    #[test]
    fn test_red_green_confusion() {
        // Red and green are far apart normally but collapse for protans and deutans.
        let red = Color::new(200, 40, 40);
        let green = Color::new(60, 140, 40);
        let normal = perceptual_distance(red, green, DistanceMetric::Ciede2000);
        for d in [Deficiency::Protanopia, Deficiency::Deuteranopia] {
            let simulated = perceptual_distance(
                simulate(red, d),
                simulate(green, d),
                DistanceMetric::Ciede2000,
            );
            assert!(
                simulated < normal / 2.0,
                "{d:?}: {simulated} not much below {normal}"
            );
        }
    }

    #[test]
    fn test_monochrome_is_gray() {
        let out = monochrome(Color::new(0x99, 0x66, 0xFF), 1.0);
        assert_eq!(out.r, out.g);
        assert_eq!(out.g, out.b);
    }

    #[test]
    fn test_vision_apply_all_preserves_order() {
        let colors = [Color::BLACK, Color::new(255, 0, 0), Color::WHITE];
        let out = Vision::Protanopia.apply_all(&colors);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1], simulate(colors[1], Deficiency::Protanopia));
        assert_eq!(Vision::Normal.apply_all(&colors), colors.to_vec());
    }

    proptest! {
        #[test]
        fn prop_simulation_is_deterministic(r: u8, g: u8, b: u8, s in 0.0f64..=1.0) {
            let c = Color::new(r, g, b);
            for d in Deficiency::ALL {
                prop_assert_eq!(simulate_with_severity(c, d, s), simulate_with_severity(c, d, s));
            }
        }
    }
}
