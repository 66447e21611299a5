//! Generator configuration.
//!
//! [`GeneratorConfig`] bundles everything a generation run needs: palette
//! size, cost weights and options, the annealing schedule, move sizes, and
//! the number of independent restarts.

use super::perturbation::Perturbation;
use crate::cost::{CostOptions, Weights};
use crate::error::ConfigError;
use crate::sa::SaConfig;

/// Configuration for [`PaletteGenerator`](super::PaletteGenerator).
///
/// # Defaults
///
/// ```
/// use u_palette::palette::GeneratorConfig;
///
/// let config = GeneratorConfig::default();
/// assert_eq!(config.palette_size, 8);
/// assert_eq!(config.restarts, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_palette::cost::Weights;
/// use u_palette::palette::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_palette_size(5)
///     .with_weights(Weights::only_energy(1.0))
///     .with_schedule(1.0, 0.01, 0.01)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Number of colors to produce.
    pub palette_size: usize,

    pub weights: Weights,

    pub cost: CostOptions,

    pub annealing: SaConfig,

    pub perturbation: Perturbation,

    /// Independent runs; the lowest-cost palette wins.
    ///
    /// Run `k` uses seed `annealing.seed + k`.
    pub restarts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            palette_size: 8,
            weights: Weights::default(),
            cost: CostOptions::default(),
            annealing: SaConfig::default(),
            perturbation: Perturbation::default(),
            restarts: 1,
        }
    }
}

impl GeneratorConfig {
    pub fn with_palette_size(mut self, n: usize) -> Self {
        self.palette_size = n;
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_cost_options(mut self, options: CostOptions) -> Self {
        self.cost = options;
        self
    }

    pub fn with_annealing(mut self, annealing: SaConfig) -> Self {
        self.annealing = annealing;
        self
    }

    /// Geometric schedule: start at `temperature`, multiply by
    /// `1 - cooling_rate` per step, stop at `cutoff`.
    pub fn with_schedule(mut self, temperature: f64, cooling_rate: f64, cutoff: f64) -> Self {
        self.annealing = self
            .annealing
            .with_initial_temperature(temperature)
            .with_cooling_rate(cooling_rate)
            .with_cutoff(cutoff);
        self
    }

    pub fn with_perturbation(mut self, perturbation: Perturbation) -> Self {
        self.perturbation = perturbation;
        self
    }

    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.annealing.seed = Some(seed);
        self
    }

    /// Validates every section. Targets are checked separately at
    /// generation time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette_size == 0 {
            return Err(ConfigError::EmptyPalette);
        }
        self.weights.validate()?;
        self.annealing.validate()?;
        self.perturbation.validate()?;
        if self.restarts == 0 {
            return Err(ConfigError::ZeroRestarts);
        }
        Ok(())
    }
}
