//! Physical parameters for the simulation
//!
//! `Parameters` holds the values the force law needs:
//! - gravitational constant `G` (SI by default, injectable for tests),
//! - `min_r2`, the squared separation below which a pair exerts no force

/// Newton's gravitational constant in SI units
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;

/// Pairs closer than this (squared, m^2) contribute zero force
pub const MIN_SEPARATION_SQUARED: f64 = 1e-5;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub min_r2: f64, // degenerate-distance clamp
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: GRAVITATIONAL_CONSTANT,
            min_r2: MIN_SEPARATION_SQUARED,
        }
    }
}
