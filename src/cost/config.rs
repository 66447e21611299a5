//! Cost weights and term options.

use crate::color::DistanceMetric;
use crate::error::ConfigError;

/// Coefficients for the six cost terms.
///
/// Weights are not clamped: zero disables a term and a negative weight
/// inverts it (a negative `energy` pulls colors together).
///
/// # Examples
///
/// ```
/// use u_palette::cost::Weights;
///
/// let w = Weights::default().with_target(0.0).with_tritanopia(1.0);
/// assert_eq!(w.energy, 1.0);
/// assert_eq!(w.target, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weights {
    /// Mutual separation in normal vision.
    pub energy: f64,
    /// Evenness of the pairwise distances.
    pub range: f64,
    /// Closeness to the target colors.
    pub target: f64,
    pub protanopia: f64,
    pub deuteranopia: f64,
    pub tritanopia: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            energy: 1.0,
            range: 1.0,
            target: 1.0,
            protanopia: 0.33,
            deuteranopia: 0.33,
            tritanopia: 0.33,
        }
    }
}

impl Weights {
    /// All terms disabled.
    pub const fn zero() -> Self {
        Self {
            energy: 0.0,
            range: 0.0,
            target: 0.0,
            protanopia: 0.0,
            deuteranopia: 0.0,
            tritanopia: 0.0,
        }
    }

    pub const fn only_energy(weight: f64) -> Self {
        Self {
            energy: weight,
            ..Self::zero()
        }
    }

    pub const fn only_target(weight: f64) -> Self {
        Self {
            target: weight,
            ..Self::zero()
        }
    }

    pub fn with_energy(mut self, w: f64) -> Self {
        self.energy = w;
        self
    }

    pub fn with_range(mut self, w: f64) -> Self {
        self.range = w;
        self
    }

    pub fn with_target(mut self, w: f64) -> Self {
        self.target = w;
        self
    }

    pub fn with_protanopia(mut self, w: f64) -> Self {
        self.protanopia = w;
        self
    }

    pub fn with_deuteranopia(mut self, w: f64) -> Self {
        self.deuteranopia = w;
        self
    }

    pub fn with_tritanopia(mut self, w: f64) -> Self {
        self.tritanopia = w;
        self
    }

    /// Rejects NaN and infinite weights. Sign is not checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("energy", self.energy),
            ("range", self.range),
            ("target", self.target),
            ("protanopia", self.protanopia),
            ("deuteranopia", self.deuteranopia),
            ("tritanopia", self.tritanopia),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWeight { name, value });
            }
        }
        Ok(())
    }
}

/// Repulsive potential over pairwise distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnergyPotential {
    /// Mean of `100 / (1 + d)`. Near pairs dominate, so no two colors can
    /// collapse onto each other.
    #[default]
    Inverse,
    /// `100 - mean(d)`. Rewards average separation only.
    Linear,
}

impl EnergyPotential {
    /// Potential of a set of pairwise distances. An empty set scores as if
    /// every distance were zero.
    pub fn evaluate(self, distances: &[f64]) -> f64 {
        match self {
            EnergyPotential::Inverse => {
                if distances.is_empty() {
                    return 100.0;
                }
                mean(distances.iter().map(|d| 100.0 / (1.0 + d)))
            }
            EnergyPotential::Linear => {
                if distances.is_empty() {
                    return 100.0;
                }
                100.0 - mean(distances.iter().copied())
            }
        }
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    values.sum::<f64>() / n as f64
}

/// How palette colors are paired with target colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetMatching {
    /// `palette[i]` is compared with `targets[i]`.
    #[default]
    ByIndex,
    /// Each palette color is compared with its closest target.
    Nearest,
}

/// Options shared by all cost terms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostOptions {
    pub metric: DistanceMetric,
    pub potential: EnergyPotential,
    pub matching: TargetMatching,
}

impl CostOptions {
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_potential(mut self, potential: EnergyPotential) -> Self {
        self.potential = potential;
        self
    }

    pub fn with_matching(mut self, matching: TargetMatching) -> Self {
        self.matching = matching;
        self
    }
}
