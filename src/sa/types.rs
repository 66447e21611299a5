//! Core trait and search state for simulated annealing.

use rand::Rng;

/// Defines a simulated annealing problem.
///
/// The implementor supplies neighbor generation and cost evaluation; the
/// runner handles temperature, acceptance, and cooling.
///
/// SA minimizes the cost function. For maximization, negate the cost.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_palette::sa::SaProblem;
///
/// /// Find the byte closest to 200.
/// struct Closest;
///
/// impl SaProblem for Closest {
///     type Solution = u8;
///
///     fn initial_solution<R: Rng>(&self, rng: &mut R) -> u8 {
///         rng.random()
///     }
///
///     fn cost(&self, x: &u8) -> f64 {
///         (f64::from(*x) - 200.0).abs()
///     }
///
///     fn neighbor<R: Rng>(&self, x: &u8, _temperature: f64, rng: &mut R) -> u8 {
///         if rng.random::<bool>() { x.saturating_add(1) } else { x.saturating_sub(1) }
///     }
/// }
/// ```
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates the starting solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Cost of a solution. Lower is better. Must be deterministic.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Generates a neighbor of `solution`.
    ///
    /// `temperature` is the current temperature; implementations may use it
    /// to take larger steps while hot and smaller ones as the run cools.
    /// The neighborhood must be connected.
    fn neighbor<R: Rng>(
        &self,
        solution: &Self::Solution,
        temperature: f64,
        rng: &mut R,
    ) -> Self::Solution;
}

/// Current and best-so-far solution of a run.
///
/// Each accepted move produces a new state; the best solution is only
/// replaced on strict improvement.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState<S> {
    pub current: S,
    pub current_cost: f64,
    pub best: S,
    pub best_cost: f64,
}

impl<S: Clone> SearchState<S> {
    pub fn new(solution: S, cost: f64) -> Self {
        Self {
            best: solution.clone(),
            best_cost: cost,
            current: solution,
            current_cost: cost,
        }
    }

    /// State after moving to `candidate`.
    pub fn accept(self, candidate: S, cost: f64) -> Self {
        if cost < self.best_cost {
            Self::new(candidate, cost)
        } else {
            Self {
                current: candidate,
                current_cost: cost,
                ..self
            }
        }
    }
}
