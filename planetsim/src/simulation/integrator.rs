//! Fixed-step semi-implicit (symplectic) Euler for the planetary system
//!
//! Velocity is advanced first with the fresh acceleration, then position is
//! advanced with the *new* velocity. Each body's trail records the new
//! position afterwards.

use crate::configuration::config::UpdateOrder;
use crate::simulation::error::SimError;
use crate::simulation::forces::ForceSet;
use crate::simulation::states::{Body, NVec2, System};

/// Advance every body in `sys` by `dt` seconds
///
/// `order` picks how forces relate to the positions being updated:
/// - [`UpdateOrder::Snapshot`]: all net forces come from the positions at the
///   start of the step, held in a scratch buffer before anything moves
/// - [`UpdateOrder::Sequential`]: body `i` is integrated right after its own
///   force sum, so later bodies see earlier bodies' new positions
///
/// An invalid `dt` is rejected before any body changes.
pub fn symplectic_euler(sys: &mut System, forces: &ForceSet, dt: f64, order: UpdateOrder) -> Result<(), SimError> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SimError::InvalidTimeStep(dt));
    }

    let n = sys.bodies.len();

    match order {
        UpdateOrder::Snapshot => {
            // f[i] is the net force on body i at time t_n
            let mut f = vec![NVec2::zeros(); n];
            forces.accumulate_forces(&sys.bodies, &mut f);

            for (b, f) in sys.bodies.iter_mut().zip(f.iter()) {
                kick_drift(b, *f, dt);
            }
        }
        UpdateOrder::Sequential => {
            for i in 0..n {
                let f = forces.force_on(i, &sys.bodies);
                kick_drift(&mut sys.bodies[i], f, dt);
            }
        }
    }

    sys.t += dt;
    sys.steps += 1;

    Ok(())
}

/// a = F / m, v += a dt, x += v dt, then record x
fn kick_drift(b: &mut Body, f: NVec2, dt: f64) {
    b.a = f / b.mass();
    b.v += b.a * dt;
    b.x += b.v * dt;
    b.trail.push(b.x);
}
