//! Error types.
//!
//! Two families of failure reach the caller: malformed color strings
//! ([`FormatError`]) and invalid run parameters ([`ConfigError`]). Both are
//! raised before any optimization work begins; a run that starts always
//! completes its schedule.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PaletteError>;

/// Top-level error returned by palette generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    #[error("invalid color: {0}")]
    Format(#[from] FormatError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// A hexadecimal color string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Wrong number of digits after stripping the optional `#`.
    #[error("expected 6 hex digits in {input:?}, found {len}")]
    InvalidLength { input: String, len: usize },

    /// A character outside `[0-9a-fA-F]`.
    #[error("invalid hex digit in {input:?}")]
    InvalidDigit { input: String },
}

/// Invalid generation or annealing parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("palette_size must be positive")]
    EmptyPalette,

    #[error("expected {expected} target colors, got {actual}")]
    TargetLengthMismatch { expected: usize, actual: usize },

    #[error("target color set is empty")]
    EmptyTargets,

    #[error("initial temperature must be positive and finite, got {0}")]
    InvalidTemperature(f64),

    #[error("cutoff must be non-negative and finite, got {0}")]
    InvalidCutoff(f64),

    #[error("cutoff {cutoff} must be below the initial temperature {temperature}")]
    CutoffNotBelowTemperature { cutoff: f64, temperature: f64 },

    #[error("cooling rate must be in (0, 1) and lower the initial temperature, got {0}")]
    InvalidCoolingRate(f64),

    #[error("lundy-mees beta must be positive and lower the initial temperature, got {0}")]
    InvalidBeta(f64),

    #[error("iterations_per_temperature must be positive")]
    ZeroIterationsPerTemperature,

    #[error("restarts must be positive")]
    ZeroRestarts,

    #[error("perturbation steps must satisfy 0 < min_step <= max_step <= 1, got min {min_step}, max {max_step}")]
    InvalidStep { min_step: f64, max_step: f64 },

    #[error("weight `{name}` must be finite, got {value}")]
    NonFiniteWeight { name: &'static str, value: f64 },
}
