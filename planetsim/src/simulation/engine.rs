//! Runtime engine settings
//!
//! Holds the update order and the per-step time increment `dt`, with the
//! "faster"/"slower" controls the frontend exposes. Slowing down is floored
//! so the step never reaches zero.

use log::{debug, warn};

use crate::configuration::config::UpdateOrder;
use crate::simulation::error::SimError;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Ten simulated hours per step
pub const DEFAULT_DT: f64 = 10.0 * SECONDS_PER_HOUR;

/// One millionth of an hour per step
pub const MIN_DT: f64 = 1e-6 * SECONDS_PER_HOUR;

/// Multiplier applied by one faster/slower press
pub const SPEED_FACTOR: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct Engine {
    pub order: UpdateOrder, // snapshot or sequential
    dt: f64, // current step (s)
    min_dt: f64, // floor for slower()
    speed_factor: f64, // multiplier for faster()/slower()
}

impl Engine {
    pub fn new(order: UpdateOrder, dt: f64, min_dt: f64, speed_factor: f64) -> Result<Self, SimError> {
        if !(min_dt.is_finite() && min_dt > 0.0) {
            return Err(SimError::InvalidTimeStep(min_dt));
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::InvalidTimeStep(dt));
        }
        if !(speed_factor.is_finite() && speed_factor > 1.0) {
            return Err(SimError::InvalidSpeedFactor(speed_factor));
        }
        Ok(Self {
            order,
            dt: dt.max(min_dt),
            min_dt,
            speed_factor,
        })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn min_dt(&self) -> f64 {
        self.min_dt
    }

    /// Set `dt` directly, clamped to the floor
    pub fn set_dt(&mut self, dt: f64) -> Result<(), SimError> {
        if !dt.is_finite() {
            return Err(SimError::InvalidTimeStep(dt));
        }
        self.dt = dt.max(self.min_dt);
        Ok(())
    }

    pub fn faster(&mut self) {
        self.dt *= self.speed_factor;
        debug!("dt raised to {} s", self.dt);
    }

    pub fn slower(&mut self) {
        self.dt /= self.speed_factor;
        if self.dt < self.min_dt {
            warn!("dt clamped to minimum {} s", self.min_dt);
            self.dt = self.min_dt;
        }
        debug!("dt lowered to {} s", self.dt);
    }

    /// Simulated hours covered by one step
    pub fn hours_per_step(&self) -> f64 {
        self.dt / SECONDS_PER_HOUR
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            order: UpdateOrder::default(),
            dt: DEFAULT_DT,
            min_dt: MIN_DT,
            speed_factor: SPEED_FACTOR,
        }
    }
}
