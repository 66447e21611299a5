//! Palette generation.
//!
//! [`PaletteGenerator`] validates the configuration and targets, builds a
//! [`PaletteProblem`], and drives it with the annealing runner. The free
//! functions [`generate`] and [`generate_seeded`] cover the common case of
//! hex strings in, hex strings out.

mod config;
mod generator;
mod perturbation;
mod problem;

pub use config::GeneratorConfig;
pub use generator::{generate, generate_seeded, GeneratedPalette, PaletteGenerator};
pub use perturbation::Perturbation;
pub use problem::PaletteProblem;
