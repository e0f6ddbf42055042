//! Error type shared by the simulation core

use std::fmt;

/// Precondition failures raised by body construction, insertion and stepping
///
/// Numerical degeneracy between two bodies is not an error: the force clamp
/// in [`crate::simulation::forces`] handles it locally
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Mass must be finite and strictly positive
    InvalidMass(f64),
    /// Radius must be finite and strictly positive
    InvalidRadius(f64),
    /// Time increment must be finite and strictly positive
    InvalidTimeStep(f64),
    /// Faster/slower multiplier must be finite and greater than one
    InvalidSpeedFactor(f64),
    /// Orbital velocity requested at zero distance from the reference body
    CoincidentWithReference,
    /// Orbital velocity requested while the registry is empty
    NoReferenceBody,
    /// Color name not present in the palette
    UnknownColor(String),
    /// A vector field in a scenario file did not hold exactly two components
    BadVector { field: &'static str, len: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidMass(m) => write!(f, "mass must be positive and finite, got {m}"),
            SimError::InvalidRadius(r) => write!(f, "radius must be positive and finite, got {r}"),
            SimError::InvalidTimeStep(dt) => write!(f, "time step must be positive and finite, got {dt}"),
            SimError::InvalidSpeedFactor(k) => write!(f, "speed factor must be greater than 1, got {k}"),
            SimError::CoincidentWithReference => {
                write!(f, "cannot compute orbital velocity at zero distance from the reference body")
            }
            SimError::NoReferenceBody => write!(f, "no reference body to orbit, the system is empty"),
            SimError::UnknownColor(name) => write!(f, "unknown color `{name}`"),
            SimError::BadVector { field, len } => {
                write!(f, "`{field}` must have exactly 2 components, got {len}")
            }
        }
    }
}

impl std::error::Error for SimError {}
