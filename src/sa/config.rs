//! Annealing configuration and cooling schedules.

use crate::error::ConfigError;

/// Cooling schedule for temperature reduction.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric cooling: `T_{k+1} = (1 - rate) * T_k`.
    ///
    /// Typical `rate`: 0.001–0.05.
    Geometric {
        /// Fraction of the temperature removed per step, in (0, 1).
        rate: f64,
    },

    /// Linear cooling from the initial temperature to the cutoff over
    /// `max_iterations / iterations_per_temperature` steps (1000 steps when
    /// no budget is set).
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// One proposal per temperature step.
    LundyMees {
        /// Typically `(T_0 - T_min) / (max_iter * T_0 * T_min)`.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { rate: 0.01 }
    }
}

/// Configuration for a simulated annealing run.
///
/// # Examples
///
/// ```
/// use u_palette::sa::{CoolingSchedule, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(1000.0)
///     .with_cutoff(1e-4)
///     .with_cooling(CoolingSchedule::Geometric { rate: 0.01 })
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Starting temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// The run converges once the temperature is at or below this value.
    pub cutoff: f64,

    pub cooling: CoolingSchedule,

    /// Proposals evaluated at each temperature level.
    ///
    /// Ignored by `LundyMees` (always 1).
    pub iterations_per_temperature: usize,

    /// Hard budget on total proposals. 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cutoff: 1e-4,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 1,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cutoff(mut self, t: f64) -> Self {
        self.cutoff = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    /// Shorthand for `with_cooling(CoolingSchedule::Geometric { rate })`.
    pub fn with_cooling_rate(self, rate: f64) -> Self {
        self.with_cooling(CoolingSchedule::Geometric { rate })
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t0 = self.initial_temperature;
        if !(t0.is_finite() && t0 > 0.0) {
            return Err(ConfigError::InvalidTemperature(t0));
        }
        if !(self.cutoff.is_finite() && self.cutoff >= 0.0) {
            return Err(ConfigError::InvalidCutoff(self.cutoff));
        }
        if self.cutoff >= t0 {
            return Err(ConfigError::CutoffNotBelowTemperature {
                cutoff: self.cutoff,
                temperature: t0,
            });
        }
        if self.iterations_per_temperature == 0 {
            return Err(ConfigError::ZeroIterationsPerTemperature);
        }
        match self.cooling {
            // The first step must actually lower the temperature.
            CoolingSchedule::Geometric { rate } => {
                if !(rate > 0.0 && rate < 1.0) || t0 * (1.0 - rate) >= t0 {
                    return Err(ConfigError::InvalidCoolingRate(rate));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if !(beta.is_finite() && beta > 0.0) || t0 / (1.0 + beta * t0) >= t0 {
                    return Err(ConfigError::InvalidBeta(beta));
                }
            }
            CoolingSchedule::Linear => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert_eq!(config.initial_temperature, 1000.0);
        assert_eq!(config.cutoff, 1e-4);
        assert_eq!(config.cooling, CoolingSchedule::Geometric { rate: 0.01 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_cutoff_is_valid() {
        assert!(SaConfig::default().with_cutoff(0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        for t in [-1.0, 0.0, f64::INFINITY, f64::NAN] {
            let config = SaConfig::default().with_initial_temperature(t);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidTemperature(_))
            ));
        }
    }

    #[test]
    fn test_validate_cutoff_not_below_temperature() {
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_cutoff(1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CutoffNotBelowTemperature { .. })
        ));
    }

    #[test]
    fn test_validate_negative_cutoff() {
        let config = SaConfig::default().with_cutoff(-0.1);
        assert_eq!(config.validate(), Err(ConfigError::InvalidCutoff(-0.1)));
    }

    #[test]
    fn test_validate_bad_rate() {
        for rate in [0.0, 1.0, 1.5, f64::NAN] {
            let config = SaConfig::default().with_cooling_rate(rate);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidCoolingRate(_))
            ));
        }
    }

    #[test]
    fn test_validate_rate_too_small_to_cool() {
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_cutoff(0.01)
            .with_cooling_rate(1e-17);
        assert_eq!(config.validate(), Err(ConfigError::InvalidCoolingRate(1e-17)));

        let config = config.with_cooling_rate(1e-15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_beta() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::LundyMees { beta: -1.0 });
        assert_eq!(config.validate(), Err(ConfigError::InvalidBeta(-1.0)));

        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_cutoff(0.01)
            .with_cooling(CoolingSchedule::LundyMees { beta: 1e-30 });
        assert_eq!(config.validate(), Err(ConfigError::InvalidBeta(1e-30)));
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = SaConfig::default().with_iterations_per_temperature(0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroIterationsPerTemperature)
        );
    }
}
