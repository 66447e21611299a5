//! SA execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{CoolingSchedule, SaConfig};
use super::types::{SaProblem, SearchState};
use crate::error::ConfigError;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Temperature reached the cutoff.
    Converged,
    /// Cooling no longer lowered the temperature at floating-point
    /// resolution before the cutoff was reached (e.g. a cutoff of 0).
    Stalled,
    /// `max_iterations` was exhausted.
    IterationLimit,
    /// The cancel flag was raised.
    Cancelled,
}

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Cost of the initial solution.
    pub initial_cost: f64,

    /// The current solution when the run stopped. May be worse than `best`.
    pub final_solution: S,

    pub final_cost: f64,

    /// Total number of proposals evaluated.
    pub iterations: usize,

    /// Number of times the schedule cooled.
    pub temperature_steps: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    pub termination: Termination,

    /// Best cost sampled at regular intervals. Non-increasing.
    pub cost_history: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with an RNG seeded from `config.seed`.
    pub fn run<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
    ) -> Result<SaResult<P::Solution>, ConfigError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs SA with an optional cancellation token.
    pub fn run_with_cancel<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<P::Solution>, ConfigError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        Self::run_with_rng(problem, config, &mut rng, cancel.as_deref())
    }

    /// Runs SA drawing every random number from `rng`.
    ///
    /// `config.seed` is ignored. The cancel flag is polled once per
    /// temperature step.
    pub fn run_with_rng<P: SaProblem, R: Rng>(
        problem: &P,
        config: &SaConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<SaResult<P::Solution>, ConfigError> {
        config.validate()?;

        let initial = problem.initial_solution(rng);
        let initial_cost = problem.cost(&initial);
        let mut state = SearchState::new(initial, initial_cost);

        let mut temperature = config.initial_temperature;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut step = 0usize;

        let linear_max_steps = compute_linear_steps(config);
        let inner_iters = match config.cooling {
            CoolingSchedule::LundyMees { .. } => 1,
            _ => config.iterations_per_temperature,
        };
        let budget_exhausted =
            |n: usize| config.max_iterations > 0 && n >= config.max_iterations;

        let history_interval = 100.max(config.iterations_per_temperature);
        let mut cost_history = vec![initial_cost];

        tracing::debug!(
            initial_cost,
            initial_temperature = config.initial_temperature,
            cutoff = config.cutoff,
            "annealing started"
        );

        let termination = loop {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                break Termination::Cancelled;
            }

            for _ in 0..inner_iters {
                if budget_exhausted(total_iterations) {
                    break;
                }

                let candidate = problem.neighbor(&state.current, temperature, rng);
                let candidate_cost = problem.cost(&candidate);
                let delta = candidate_cost - state.current_cost;

                // Metropolis acceptance criterion
                let accept = if delta < 0.0 {
                    improving_moves += 1;
                    true
                } else {
                    let probability = (-delta / temperature).exp();
                    rng.random::<f64>() < probability
                };

                if accept {
                    state = state.accept(candidate, candidate_cost);
                    accepted_moves += 1;
                }

                total_iterations += 1;

                if total_iterations.is_multiple_of(history_interval) {
                    cost_history.push(state.best_cost);
                    tracing::trace!(
                        iteration = total_iterations,
                        temperature,
                        best_cost = state.best_cost,
                        "annealing progress"
                    );
                }
            }

            let next = cool(temperature, config, step, linear_max_steps);
            step += 1;
            if next >= temperature {
                break Termination::Stalled;
            }
            temperature = next;

            if temperature <= config.cutoff {
                break Termination::Converged;
            }
            if budget_exhausted(total_iterations) {
                break Termination::IterationLimit;
            }
        };

        if cost_history
            .last()
            .is_none_or(|&last| (last - state.best_cost).abs() > 1e-15)
        {
            cost_history.push(state.best_cost);
        }

        tracing::debug!(
            best_cost = state.best_cost,
            iterations = total_iterations,
            accepted_moves,
            ?termination,
            "annealing finished"
        );

        Ok(SaResult {
            best: state.best,
            best_cost: state.best_cost,
            initial_cost,
            final_solution: state.current,
            final_cost: state.current_cost,
            iterations: total_iterations,
            temperature_steps: step,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            termination,
            cost_history,
        })
    }
}

/// Apply the cooling schedule to compute the next temperature.
fn cool(temperature: f64, config: &SaConfig, step: usize, linear_max_steps: usize) -> f64 {
    match config.cooling {
        CoolingSchedule::Geometric { rate } => temperature * (1.0 - rate),

        CoolingSchedule::Linear => {
            let t = config.initial_temperature
                - (step + 1) as f64 * (config.initial_temperature - config.cutoff)
                    / linear_max_steps as f64;
            t.max(config.cutoff)
        }

        CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
    }
}

/// Number of temperature steps for linear cooling.
fn compute_linear_steps(config: &SaConfig) -> usize {
    if config.max_iterations > 0 {
        (config.max_iterations / config.iterations_per_temperature).max(1)
    } else {
        1000
    }
}
