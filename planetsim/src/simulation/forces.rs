//! Force contributors for the planetary engine
//!
//! Forces (not accelerations) are summed per body and divided by the body's
//! mass afterwards, so the integrator can derive `a = F / m` in one place.

use crate::simulation::states::{Body, NVec2};

/// Collection of force terms (gravity, and anything added later)
/// Each term implements [`Force`]; their contributions are summed into a
/// single net force per body
pub struct ForceSet {
    terms: Vec<Box<dyn Force>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Net force on body `i`, reading positions only from `bodies`
    pub fn force_on(&self, i: usize, bodies: &[Body]) -> NVec2 {
        let mut f = NVec2::zeros();
        for term in &self.terms {
            f += term.force_on(i, bodies);
        }
        f
    }

    /// Net force on every body in `bodies`
    /// - `out[i]` is overwritten with the sum of contributions from all terms
    pub fn accumulate_forces(&self, bodies: &[Body], out: &mut [NVec2]) {
        for (i, f) in out.iter_mut().enumerate() {
            *f = self.force_on(i, bodies);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// A source of force acting on a single body of the registry
pub trait Force {
    fn force_on(&self, i: usize, bodies: &[Body]) -> NVec2;
}

/// Direct-sum Newtonian gravity with a hard zero-force clamp for
/// (near-)coincident pairs
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub min_r2: f64, // pairs with r^2 below this exert nothing
}

impl NewtonianGravity {
    /// Force on `a` due to `b`, pointing from `a` toward `b`
    pub fn pair_force(&self, a: &Body, b: &Body) -> NVec2 {
        // r points from a to b, so a is pulled along +r
        let r = b.x - a.x;
        let r2 = r.norm_squared();

        if r2 < self.min_r2 {
            return NVec2::zeros();
        }

        let dist = r2.sqrt();
        let magnitude = self.G * a.mass() * b.mass() / r2;

        magnitude * (r / dist)
    }
}

impl Force for NewtonianGravity {
    /// O(n) sum over every other body, in registry order
    fn force_on(&self, i: usize, bodies: &[Body]) -> NVec2 {
        let bi = &bodies[i];
        let mut net = NVec2::zeros();

        for (j, bj) in bodies.iter().enumerate() {
            if j == i {
                continue;
            }
            net += self.pair_force(bi, bj);
        }

        net
    }
}
