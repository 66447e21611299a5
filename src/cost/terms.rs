//! The individual cost terms.
//!
//! Each term is unweighted here; [`PaletteCost`](super::PaletteCost) applies
//! the weights. Pairs are always visited as `(i, j)` with `i < j` in
//! ascending order so sums are reproducible bit for bit.

use crate::color::{simulate, Color, Deficiency, DistanceMetric, Lab};

use super::config::{EnergyPotential, TargetMatching};

/// Distances of every unordered pair, in `(0,1), (0,2), .., (n-2,n-1)` order.
pub fn pairwise_distances(labs: &[Lab], metric: DistanceMetric) -> Vec<f64> {
    let n = labs.len();
    let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            out.push(metric.between(&labs[i], &labs[j]));
        }
    }
    out
}

/// Repulsive energy of a palette. Lower means more separated.
pub fn energy_term(distances: &[f64], potential: EnergyPotential) -> f64 {
    potential.evaluate(distances)
}

/// Spread between the closest and farthest pair.
///
/// Zero when all pairs are equidistant or there are fewer than two pairs.
pub fn range_term(distances: &[f64]) -> f64 {
    if distances.len() < 2 {
        return 0.0;
    }
    let (min, max) = distances
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| {
            (lo.min(d), hi.max(d))
        });
    max - min
}

/// Summed distance from the palette to its targets.
///
/// With [`TargetMatching::ByIndex`] only the common prefix is compared.
pub fn target_term(
    palette: &[Lab],
    targets: &[Lab],
    metric: DistanceMetric,
    matching: TargetMatching,
) -> f64 {
    match matching {
        TargetMatching::ByIndex => palette
            .iter()
            .zip(targets)
            .map(|(p, t)| metric.between(p, t))
            .sum(),
        TargetMatching::Nearest => {
            if targets.is_empty() {
                return 0.0;
            }
            palette
                .iter()
                .map(|p| {
                    targets
                        .iter()
                        .map(|t| metric.between(p, t))
                        .fold(f64::INFINITY, f64::min)
                })
                .sum()
        }
    }
}

/// Energy of the palette as seen with the given deficiency.
pub fn deficiency_term(
    palette: &[Color],
    deficiency: Deficiency,
    metric: DistanceMetric,
    potential: EnergyPotential,
) -> f64 {
    let labs: Vec<Lab> = palette
        .iter()
        .map(|&c| simulate(c, deficiency).to_lab())
        .collect();
    energy_term(&pairwise_distances(&labs, metric), potential)
}
