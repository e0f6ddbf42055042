//! Conserved quantities, for sanity checks and logging

use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, System};

/// Sum of 1/2 m v^2
pub fn kinetic_energy(sys: &System) -> f64 {
    sys.iter().map(|b| 0.5 * b.mass() * b.v.norm_squared()).sum()
}

/// Sum over unordered pairs of -G m_i m_j / r
/// Pairs inside the clamp radius exert no force and are skipped here too
pub fn potential_energy(sys: &System, params: &Parameters) -> f64 {
    let bodies = sys.bodies();
    let mut u = 0.0;

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let r2 = (bodies[j].x - bodies[i].x).norm_squared();
            if r2 < params.min_r2 {
                continue;
            }
            u -= params.G * bodies[i].mass() * bodies[j].mass() / r2.sqrt();
        }
    }

    u
}

pub fn total_energy(sys: &System, params: &Parameters) -> f64 {
    kinetic_energy(sys) + potential_energy(sys, params)
}

/// Sum of m v
pub fn total_momentum(sys: &System) -> NVec2 {
    sys.iter().fold(NVec2::zeros(), |p, b| p + b.mass() * b.v)
}
