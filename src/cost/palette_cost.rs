//! Weighted palette cost.

use crate::color::{Color, Deficiency, Lab};

use super::config::{CostOptions, Weights};
use super::terms::{deficiency_term, energy_term, pairwise_distances, range_term, target_term};

/// Unweighted value of every term plus the weighted total.
///
/// Terms with a zero weight are reported as `0.0` because they are never
/// computed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    pub energy: f64,
    pub range: f64,
    pub target: f64,
    pub protanopia: f64,
    pub deuteranopia: f64,
    pub tritanopia: f64,
    pub total: f64,
}

/// Scores a palette; lower is better.
///
/// The cost is a pure function of the palette, weights, options and
/// targets.
///
/// # Examples
///
/// ```
/// use u_palette::color::Color;
/// use u_palette::cost::{PaletteCost, Weights};
///
/// let targets = vec![Color::BLACK, Color::WHITE];
/// let cost = PaletteCost::new(Weights::only_target(1.0)).with_targets(targets.clone());
/// assert_eq!(cost.evaluate(&targets), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteCost {
    weights: Weights,
    options: CostOptions,
    targets: Option<Vec<Lab>>,
}

impl PaletteCost {
    pub fn new(weights: Weights) -> Self {
        Self {
            weights,
            options: CostOptions::default(),
            targets: None,
        }
    }

    pub fn with_options(mut self, options: CostOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_targets(mut self, targets: Vec<Color>) -> Self {
        self.targets = Some(targets.iter().map(Color::to_lab).collect());
        self
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn options(&self) -> &CostOptions {
        &self.options
    }

    pub fn has_targets(&self) -> bool {
        self.targets.is_some()
    }

    /// Weighted sum of all enabled terms.
    pub fn evaluate(&self, palette: &[Color]) -> f64 {
        self.breakdown(palette).total
    }

    /// Evaluates every enabled term.
    pub fn breakdown(&self, palette: &[Color]) -> CostBreakdown {
        let w = &self.weights;
        let metric = self.options.metric;
        let potential = self.options.potential;
        let mut out = CostBreakdown::default();

        let labs: Vec<Lab> = palette.iter().map(Color::to_lab).collect();

        if w.energy != 0.0 || w.range != 0.0 {
            let distances = pairwise_distances(&labs, metric);
            if w.energy != 0.0 {
                out.energy = energy_term(&distances, potential);
            }
            if w.range != 0.0 {
                out.range = range_term(&distances);
            }
        }

        if w.target != 0.0 {
            if let Some(targets) = &self.targets {
                out.target = target_term(&labs, targets, metric, self.options.matching);
            }
        }

        for (deficiency, weight, slot) in [
            (Deficiency::Protanopia, w.protanopia, &mut out.protanopia),
            (Deficiency::Deuteranopia, w.deuteranopia, &mut out.deuteranopia),
            (Deficiency::Tritanopia, w.tritanopia, &mut out.tritanopia),
        ] {
            if weight != 0.0 {
                *slot = deficiency_term(palette, deficiency, metric, potential);
            }
        }

        // Fixed summation order.
        out.total = w.energy * out.energy
            + w.range * out.range
            + w.target * out.target
            + w.protanopia * out.protanopia
            + w.deuteranopia * out.deuteranopia
            + w.tritanopia * out.tritanopia;
        out
    }
}
