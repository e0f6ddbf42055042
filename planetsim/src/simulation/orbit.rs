//! Circular-orbit initial conditions for newly inserted bodies

use crate::simulation::error::SimError;
use crate::simulation::states::{Body, NVec2, System};

/// Velocity that puts a massless body at `position` on a circular orbit
/// around `reference`, ignoring every other body
///
/// Speed is `sqrt(G M / d)`; direction is the radius vector rotated by +90
/// degrees, i.e. `(-v dy/d, v dx/d)`.
#[allow(non_snake_case)]
pub fn circular_velocity(G: f64, reference: &Body, position: NVec2) -> Result<NVec2, SimError> {
    let r = position - reference.x;
    let d = r.norm();

    if !(d.is_finite() && d > 0.0) {
        return Err(SimError::CoincidentWithReference);
    }

    let speed = (G * reference.mass() / d).sqrt();

    Ok(NVec2::new(-speed * (r.y / d), speed * (r.x / d)))
}

/// Overwrite `body.v` with the circular velocity around the system's
/// primary (most massive) body
#[allow(non_snake_case)]
pub fn assign_circular_velocity(sys: &System, G: f64, body: &mut Body) -> Result<(), SimError> {
    let primary = sys.primary().ok_or(SimError::NoReferenceBody)?;
    body.v = circular_velocity(G, &sys.bodies[primary], body.x)?;
    Ok(())
}
