//! Accessible color palette generation by simulated annealing.
//!
//! Produces a fixed-size set of colors that are mutually distinguishable,
//! evenly spread in perceptual space, optionally close to caller-supplied
//! target colors, and still distinguishable under protanopia, deuteranopia
//! and tritanopia.
//!
//! - **Color**: 8-bit sRGB, `#RRGGBB` encoding, CIELAB coordinates, and
//!   CIEDE2000 distance.
//! - **Vision simulation**: Brettel–Viénot–Mollon dichromacy simulation
//!   plus anomalous-trichromacy and achromatopsia previews.
//! - **Cost**: weighted sum of energy, range, target, and three
//!   deficiency terms.
//! - **Simulated Annealing (SA)**: generic single-solution search with
//!   Metropolis acceptance and pluggable cooling schedules.
//! - **Palette**: the problem definition and the generator entry points.
//!
//! # Quick start
//!
//! ```
//! use u_palette::cost::Weights;
//!
//! let colors = u_palette::generate_seeded(
//!     Some(&["#9966FF", "#0055BC", "#00A1C2"]),
//!     3,
//!     Weights::default(),
//!     1.0,
//!     0.05,
//!     0.01,
//!     42,
//! )
//! .unwrap();
//! assert_eq!(colors.len(), 3);
//! ```
//!
//! # Randomness
//!
//! Every entry point either takes an explicit `R: Rng` or seeds a
//! `StdRng` from the configured seed, so runs are reproducible.

pub mod color;
pub mod cost;
pub mod error;
pub mod palette;
pub mod sa;

pub use error::{ConfigError, FormatError, PaletteError, Result};
pub use palette::{generate, generate_seeded};
