//! Color representation, perceptual coordinates, and vision simulation.
//!
//! - [`Color`]: 8-bit sRGB with a canonical `#RRGGBB` encoding.
//! - [`Lab`]: CIELAB coordinates for perceptual distance
//!   ([`DistanceMetric::Ciede2000`] by default).
//! - [`simulate`]: appearance under protanopia, deuteranopia, or tritanopia.

mod cvd;
mod lab;
mod rgb;

pub use cvd::{
    monochrome, simulate, simulate_with_severity, Deficiency, Vision, ANOMALY_SEVERITY,
};
pub use lab::{linear_to_srgb, perceptual_distance, srgb_to_linear, DistanceMetric, Lab};
pub use rgb::Color;
