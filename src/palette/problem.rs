//! The palette as an annealing problem.

use rand::Rng;

use super::perturbation::Perturbation;
use crate::color::Color;
use crate::cost::PaletteCost;
use crate::error::ConfigError;
use crate::sa::SaProblem;

/// Palette search space: `palette_size` colors scored by a [`PaletteCost`].
///
/// Starts from the seed colors when given, otherwise from uniformly random
/// colors.
#[derive(Debug, Clone)]
pub struct PaletteProblem {
    palette_size: usize,
    seed_colors: Option<Vec<Color>>,
    cost: PaletteCost,
    perturbation: Perturbation,
    initial_temperature: f64,
}

impl PaletteProblem {
    /// `initial_temperature` must match the annealing config so move sizes
    /// scale from `perturbation.max_step` down to `perturbation.min_step`.
    ///
    /// Fails with [`ConfigError::EmptyPalette`] when `palette_size` is 0.
    pub fn new(
        palette_size: usize,
        cost: PaletteCost,
        perturbation: Perturbation,
        initial_temperature: f64,
    ) -> Result<Self, ConfigError> {
        if palette_size == 0 {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self {
            palette_size,
            seed_colors: None,
            cost,
            perturbation,
            initial_temperature,
        })
    }

    /// Starts the search from `colors` instead of a random palette.
    ///
    /// Fails with [`ConfigError::EmptyTargets`] when `colors` is empty.
    pub fn with_seed_colors(mut self, colors: Vec<Color>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyTargets);
        }
        self.palette_size = colors.len();
        self.seed_colors = Some(colors);
        Ok(self)
    }

    pub fn palette_size(&self) -> usize {
        self.palette_size
    }

    pub fn cost_function(&self) -> &PaletteCost {
        &self.cost
    }
}

impl SaProblem for PaletteProblem {
    type Solution = Vec<Color>;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<Color> {
        match &self.seed_colors {
            Some(colors) => colors.clone(),
            None => (0..self.palette_size).map(|_| Color::random(rng)).collect(),
        }
    }

    fn cost(&self, palette: &Vec<Color>) -> f64 {
        self.cost.evaluate(palette)
    }

    fn neighbor<R: Rng>(&self, palette: &Vec<Color>, temperature: f64, rng: &mut R) -> Vec<Color> {
        self.perturbation
            .apply(palette, temperature, self.initial_temperature, rng)
    }
}
