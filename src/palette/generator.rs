//! Palette generation entry points.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::GeneratorConfig;
use super::problem::PaletteProblem;
use crate::color::Color;
use crate::cost::{CostBreakdown, PaletteCost, Weights};
use crate::error::{ConfigError, Result};
use crate::sa::{SaResult, SaRunner, Termination};

/// A finished palette and how it was reached.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedPalette {
    /// Best palette found, in the same order as the starting palette.
    pub colors: Vec<Color>,
    pub cost: f64,
    /// Cost of the starting palette of the winning run.
    pub initial_cost: f64,
    pub breakdown: CostBreakdown,
    /// Proposals evaluated across all restarts.
    pub iterations: usize,
    pub termination: Termination,
    /// Index of the winning restart.
    pub restart: usize,
}

impl GeneratedPalette {
    /// `#RRGGBB` strings in palette order.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(Color::to_hex).collect()
    }
}

/// Builds palettes by annealing a [`PaletteProblem`].
///
/// # Examples
///
/// ```
/// use u_palette::cost::Weights;
/// use u_palette::palette::{GeneratorConfig, PaletteGenerator};
///
/// let config = GeneratorConfig::default()
///     .with_palette_size(3)
///     .with_weights(Weights::only_energy(1.0))
///     .with_schedule(1.0, 0.05, 0.01)
///     .with_seed(1);
/// let palette = PaletteGenerator::new(config).generate(None).unwrap();
/// assert_eq!(palette.to_hex().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteGenerator {
    config: GeneratorConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl PaletteGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Stops runs cooperatively once `flag` is set; the best palette so far
    /// is still returned.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a palette, seeding each restart from `annealing.seed`.
    ///
    /// `targets`, when given, are hex strings: they seed the starting
    /// palette and feed the target term. Their count must equal
    /// `palette_size`.
    pub fn generate(&self, targets: Option<&[&str]>) -> Result<GeneratedPalette> {
        let problem = self.prepare(targets)?;
        let base_seed = self.config.annealing.seed.unwrap_or_else(rand::random);

        tracing::debug!(
            palette_size = self.config.palette_size,
            restarts = self.config.restarts,
            base_seed,
            "generating palette"
        );

        let run = |k: usize| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(k as u64));
            self.run_once(&problem, &mut rng)
        };

        #[cfg(feature = "parallel")]
        let results = (0..self.config.restarts)
            .into_par_iter()
            .map(run)
            .collect::<std::result::Result<Vec<_>, ConfigError>>()?;

        #[cfg(not(feature = "parallel"))]
        let results = (0..self.config.restarts)
            .map(run)
            .collect::<std::result::Result<Vec<_>, ConfigError>>()?;

        self.finish(&problem, results)
    }

    /// Like [`generate`](Self::generate) but draws every random number
    /// from `rng`; restarts run one after another on the same stream.
    pub fn generate_with_rng<R: Rng>(
        &self,
        targets: Option<&[&str]>,
        rng: &mut R,
    ) -> Result<GeneratedPalette> {
        let problem = self.prepare(targets)?;
        let results = (0..self.config.restarts)
            .map(|_| self.run_once(&problem, rng))
            .collect::<std::result::Result<Vec<_>, ConfigError>>()?;
        self.finish(&problem, results)
    }

    /// Validates the configuration and targets and builds the problem.
    ///
    /// Every error is raised here, before the first annealing step.
    fn prepare(&self, targets: Option<&[&str]>) -> Result<PaletteProblem> {
        let config = &self.config;
        config.validate()?;

        let targets = targets
            .map(|hex| {
                hex.iter()
                    .map(|s| Color::from_hex(s))
                    .collect::<std::result::Result<Vec<_>, _>>()
            })
            .transpose()?;

        let mut cost = PaletteCost::new(config.weights).with_options(config.cost);
        let mut problem_targets = None;
        if let Some(colors) = targets {
            if colors.is_empty() {
                return Err(ConfigError::EmptyTargets.into());
            }
            if colors.len() != config.palette_size {
                return Err(ConfigError::TargetLengthMismatch {
                    expected: config.palette_size,
                    actual: colors.len(),
                }
                .into());
            }
            cost = cost.with_targets(colors.clone());
            problem_targets = Some(colors);
        }

        let problem = PaletteProblem::new(
            config.palette_size,
            cost,
            config.perturbation,
            config.annealing.initial_temperature,
        )?;
        Ok(match problem_targets {
            Some(colors) => problem.with_seed_colors(colors)?,
            None => problem,
        })
    }

    fn run_once<R: Rng>(
        &self,
        problem: &PaletteProblem,
        rng: &mut R,
    ) -> std::result::Result<SaResult<Vec<Color>>, ConfigError> {
        SaRunner::run_with_rng(problem, &self.config.annealing, rng, self.cancel.as_deref())
    }

    fn finish(
        &self,
        problem: &PaletteProblem,
        results: Vec<SaResult<Vec<Color>>>,
    ) -> Result<GeneratedPalette> {
        let iterations: usize = results.iter().map(|r| r.iterations).sum();

        // Ties keep the earliest restart.
        let (restart, winner) = results
            .into_iter()
            .enumerate()
            .reduce(|best, next| if next.1.best_cost < best.1.best_cost { next } else { best })
            .ok_or(ConfigError::ZeroRestarts)?;

        let breakdown = problem.cost_function().breakdown(&winner.best);

        tracing::debug!(
            restart,
            cost = winner.best_cost,
            initial_cost = winner.initial_cost,
            iterations,
            "palette generated"
        );

        Ok(GeneratedPalette {
            colors: winner.best,
            cost: winner.best_cost,
            initial_cost: winner.initial_cost,
            breakdown,
            iterations,
            termination: winner.termination,
            restart,
        })
    }
}

/// Generates `palette_size` colors and returns them as `#RRGGBB` strings.
///
/// Uses a geometric schedule from `temperature` down to `cutoff`, cooling
/// by `cooling_rate` per step, with default cost options and move sizes.
///
/// # Errors
///
/// - [`PaletteError::Format`](crate::PaletteError::Format) if a target is
///   not a 6-digit hex color.
/// - [`PaletteError::Config`](crate::PaletteError::Config) for a zero
///   palette size, a target count different from `palette_size`, or an
///   invalid schedule.
///
/// # Examples
///
/// ```
/// use u_palette::cost::Weights;
///
/// let colors = u_palette::generate(
///     Some(&["#000000", "#FFFFFF"]),
///     2,
///     Weights::only_target(1.0),
///     1.0,
///     0.01,
///     0.01,
/// )
/// .unwrap();
/// assert_eq!(colors.len(), 2);
/// ```
pub fn generate(
    target_colors: Option<&[&str]>,
    palette_size: usize,
    weights: Weights,
    temperature: f64,
    cooling_rate: f64,
    cutoff: f64,
) -> Result<Vec<String>> {
    let config = GeneratorConfig::default()
        .with_palette_size(palette_size)
        .with_weights(weights)
        .with_schedule(temperature, cooling_rate, cutoff);
    Ok(PaletteGenerator::new(config).generate(target_colors)?.to_hex())
}

/// [`generate`] with a fixed seed, for reproducible output.
pub fn generate_seeded(
    target_colors: Option<&[&str]>,
    palette_size: usize,
    weights: Weights,
    temperature: f64,
    cooling_rate: f64,
    cutoff: f64,
    seed: u64,
) -> Result<Vec<String>> {
    let config = GeneratorConfig::default()
        .with_palette_size(palette_size)
        .with_weights(weights)
        .with_schedule(temperature, cooling_rate, cutoff)
        .with_seed(seed);
    Ok(PaletteGenerator::new(config).generate(target_colors)?.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{perceptual_distance, DistanceMetric};
    use crate::error::{FormatError, PaletteError};
    use pretty_assertions::assert_eq;

    fn is_hex(s: &str) -> bool {
        s.len() == 7 && s.starts_with('#') && s[1..].bytes().all(|b| b.is_ascii_hexdigit())
    }

    fn min_pairwise(colors: &[Color]) -> f64 {
        let mut min = f64::INFINITY;
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                min = min.min(perceptual_distance(
                    colors[i],
                    colors[j],
                    DistanceMetric::Ciede2000,
                ));
            }
        }
        min
    }

    #[test]
    fn test_returns_palette_size_hex_strings() {
        let colors =
            generate_seeded(None, 4, Weights::default(), 1.0, 0.05, 0.01, 9).unwrap();
        assert_eq!(colors.len(), 4);
        assert!(colors.iter().all(|c| is_hex(c)), "{colors:?}");
    }

    #[test]
    fn test_target_only_never_worse_than_start() {
        let config = GeneratorConfig::default()
            .with_palette_size(2)
            .with_weights(Weights::only_target(1.0))
            .with_schedule(1.0, 0.01, 0.01)
            .with_seed(5);
        let result = PaletteGenerator::new(config)
            .generate(Some(&["#000000", "#FFFFFF"]))
            .unwrap();

        assert!(result.cost <= result.initial_cost);
        assert_eq!(result.initial_cost, 0.0);
        assert_eq!(result.to_hex(), vec!["#000000", "#FFFFFF"]);
        assert_eq!(result.termination, Termination::Converged);
    }

    #[test]
    fn test_target_only_pulls_random_start_toward_targets() {
        // Start far from the targets by seeding with their complements.
        let config = GeneratorConfig::default()
            .with_palette_size(2)
            .with_weights(Weights::only_target(1.0))
            .with_schedule(1.0, 0.002, 0.01)
            .with_seed(5);
        let targets = vec![Color::new(0x20, 0x40, 0xC0), Color::new(0xE0, 0xA0, 0x10)];
        let start = vec![Color::new(0xDF, 0xBF, 0x3F), Color::new(0x1F, 0x5F, 0xEF)];

        let cost = PaletteCost::new(config.weights).with_targets(targets.clone());
        let problem = PaletteProblem::new(2, cost, config.perturbation, 1.0)
            .and_then(|p| p.with_seed_colors(start))
            .unwrap();
        let result = SaRunner::run(&problem, &config.annealing).unwrap();

        assert!(
            result.best_cost < result.initial_cost * 0.5,
            "{} -> {}",
            result.initial_cost,
            result.best_cost
        );
    }

    #[test]
    fn test_energy_spreads_colors_better_than_random() {
        let trials = 8;
        let mut optimized = 0.0;
        let mut random = 0.0;
        for seed in 0..trials {
            let config = GeneratorConfig::default()
                .with_palette_size(5)
                .with_weights(Weights::only_energy(1.0))
                .with_schedule(0.1, 0.003, 1e-4)
                .with_seed(seed);
            let result = PaletteGenerator::new(config).generate(None).unwrap();
            optimized += min_pairwise(&result.colors);

            let mut rng = StdRng::seed_from_u64(1000 + seed);
            let baseline: Vec<Color> = (0..5).map(|_| Color::random(&mut rng)).collect();
            random += min_pairwise(&baseline);
        }
        assert!(
            optimized > random,
            "mean min distance {} vs random {}",
            optimized / trials as f64,
            random / trials as f64
        );
    }

    #[test]
    fn test_malformed_target_is_format_error() {
        let err = generate(Some(&["#ZZZZZZ"]), 1, Weights::default(), 1.0, 0.01, 0.01);
        assert!(matches!(
            err,
            Err(PaletteError::Format(FormatError::InvalidDigit { .. }))
        ));
    }

    #[test]
    fn test_format_error_before_length_check() {
        let err = generate(Some(&["#ZZZZZZ"]), 5, Weights::default(), 1.0, 0.01, 0.01);
        assert!(matches!(err, Err(PaletteError::Format(_))));
    }

    #[test]
    fn test_config_errors() {
        let err = generate(None, 0, Weights::default(), 1.0, 0.01, 0.01);
        assert_eq!(err, Err(PaletteError::from(ConfigError::EmptyPalette)));

        let err = generate(Some(&["#000000"]), 2, Weights::default(), 1.0, 0.01, 0.01);
        assert_eq!(
            err,
            Err(PaletteError::from(ConfigError::TargetLengthMismatch {
                expected: 2,
                actual: 1
            }))
        );

        let err = generate(Some(&[]), 2, Weights::default(), 1.0, 0.01, 0.01);
        assert_eq!(err, Err(PaletteError::from(ConfigError::EmptyTargets)));

        let err = generate(None, 2, Weights::default(), 1.0, 1.5, 0.01);
        assert_eq!(err, Err(PaletteError::from(ConfigError::InvalidCoolingRate(1.5))));
    }

    #[test]
    fn test_same_seed_same_palette() {
        let a = generate_seeded(None, 3, Weights::default(), 1.0, 0.05, 0.01, 77).unwrap();
        let b = generate_seeded(None, 3, Weights::default(), 1.0, 0.05, 0.01, 77).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_restarts_pick_the_best_run() {
        let base = GeneratorConfig::default()
            .with_palette_size(3)
            .with_schedule(1.0, 0.05, 0.01)
            .with_seed(21);

        let single = PaletteGenerator::new(base.clone()).generate(None).unwrap();
        let multi = PaletteGenerator::new(base.with_restarts(4))
            .generate(None)
            .unwrap();

        assert!(multi.cost <= single.cost);
        assert!(multi.restart < 4);
        assert!(multi.iterations > single.iterations);
    }

    #[test]
    fn test_generate_with_rng_is_reproducible() {
        let config = GeneratorConfig::default()
            .with_palette_size(3)
            .with_schedule(1.0, 0.05, 0.01)
            .with_restarts(2);
        let generator = PaletteGenerator::new(config);

        let a = generator
            .generate_with_rng(None, &mut StdRng::seed_from_u64(8))
            .unwrap();
        let b = generator
            .generate_with_rng(None, &mut StdRng::seed_from_u64(8))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.breakdown.total, a.cost);
    }

    #[test]
    fn test_restarts_match_one_seeded_run_per_index() {
        // Holds for both the sequential and the `parallel` restart paths.
        let base = GeneratorConfig::default()
            .with_palette_size(3)
            .with_schedule(1.0, 0.05, 0.01)
            .with_seed(40);
        let multi = PaletteGenerator::new(base.clone().with_restarts(3))
            .generate(None)
            .unwrap();

        let runs: Vec<GeneratedPalette> = (0..3u64)
            .map(|k| {
                PaletteGenerator::new(base.clone())
                    .generate_with_rng(None, &mut StdRng::seed_from_u64(40 + k))
                    .unwrap()
            })
            .collect();
        let expected = runs
            .iter()
            .enumerate()
            .reduce(|best, next| if next.1.cost < best.1.cost { next } else { best })
            .unwrap();

        assert_eq!(multi.restart, expected.0);
        assert_eq!(multi.colors, expected.1.colors);
        assert_eq!(multi.cost, expected.1.cost);
        assert_eq!(
            multi.iterations,
            runs.iter().map(|r| r.iterations).sum::<usize>()
        );
    }

    #[test]
    fn test_prepare_carries_config_into_cost() {
        let weights = Weights::default().with_range(0.0);
        let config = GeneratorConfig::default()
            .with_palette_size(2)
            .with_weights(weights);
        let generator = PaletteGenerator::new(config);

        let problem = generator.prepare(Some(&["#000000", "#FFFFFF"])).unwrap();
        assert_eq!(problem.palette_size(), 2);
        assert_eq!(problem.cost_function().weights(), &weights);
        assert_eq!(problem.cost_function().options(), &generator.config().cost);
        assert!(problem.cost_function().has_targets());

        let problem = generator.prepare(None).unwrap();
        assert!(!problem.cost_function().has_targets());
    }

    #[test]
    fn test_cancelled_generation_returns_start() {
        let config = GeneratorConfig::default()
            .with_palette_size(2)
            .with_seed(3);
        let flag = Arc::new(AtomicBool::new(true));
        let result = PaletteGenerator::new(config)
            .with_cancel_flag(flag)
            .generate(Some(&["#102030", "#405060"]))
            .unwrap();

        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.to_hex(), vec!["#102030", "#405060"]);
        assert_eq!(result.iterations, 0);
    }
}
