//! Temperature-scaled palette moves.

use rand::Rng;

use crate::color::Color;
use crate::error::ConfigError;

/// Step-size bounds for a single-channel move.
///
/// Both bounds are fractions of the channel range (255). The amplitude at
/// temperature `T` is `max(min_step, max_step * T / T0)`, so moves start
/// coarse and end fine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Perturbation {
    pub max_step: f64,
    pub min_step: f64,
}

impl Default for Perturbation {
    fn default() -> Self {
        Self {
            max_step: 0.1,
            min_step: 0.005,
        }
    }
}

impl Perturbation {
    pub fn with_max_step(mut self, step: f64) -> Self {
        self.max_step = step;
        self
    }

    pub fn with_min_step(mut self, step: f64) -> Self {
        self.min_step = step;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = self.min_step > 0.0 && self.min_step <= self.max_step && self.max_step <= 1.0;
        if !ok {
            return Err(ConfigError::InvalidStep {
                min_step: self.min_step,
                max_step: self.max_step,
            });
        }
        Ok(())
    }

    /// Largest displacement, in channel units, at `temperature`.
    pub fn amplitude(&self, temperature: f64, initial_temperature: f64) -> f64 {
        let ratio = (temperature / initial_temperature).clamp(0.0, 1.0);
        (self.max_step * ratio).max(self.min_step) * 255.0
    }

    /// Copy of `palette` with one channel of one color displaced.
    ///
    /// The result saturates into `0..=255`; length and order are unchanged.
    /// An empty palette comes back empty.
    pub fn apply<R: Rng>(
        &self,
        palette: &[Color],
        temperature: f64,
        initial_temperature: f64,
        rng: &mut R,
    ) -> Vec<Color> {
        if palette.is_empty() {
            return Vec::new();
        }
        let index = rng.random_range(0..palette.len());
        let channel = rng.random_range(0..3);
        let amplitude = self.amplitude(temperature, initial_temperature);
        let delta = rng.random_range(-amplitude..=amplitude);

        let old = palette[index].channels()[channel];
        let moved = (f64::from(old) + delta).round().clamp(0.0, 255.0) as u8;

        let mut next = palette.to_vec();
        next[index] = palette[index].with_channel(channel, moved);
        next
    }
}
