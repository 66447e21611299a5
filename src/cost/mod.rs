//! Palette cost function.
//!
//! A weighted sum of independent terms, each built on perceptual distance:
//!
//! | Term | Measures |
//! |------|----------|
//! | energy | repulsive potential over all color pairs |
//! | range | max − min pairwise distance (uneven spacing) |
//! | target | distance to the caller's target colors |
//! | protanopia / deuteranopia / tritanopia | energy after simulating the deficiency |

mod config;
mod palette_cost;
mod terms;

pub use config::{CostOptions, EnergyPotential, TargetMatching, Weights};
pub use palette_cost::{CostBreakdown, PaletteCost};
pub use terms::{deficiency_term, energy_term, pairwise_distances, range_term, target_term};
