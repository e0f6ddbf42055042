//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - physical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`ForceSet`)
//! - bodies waiting to be inserted at the next step boundary
//!
//! The frontend owns one `Scenario`, calls [`Scenario::advance`] once per
//! frame and reads [`Scenario::system`] to draw.

use log::{debug, info};

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::error::SimError;
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::integrator::symplectic_euler;
use crate::simulation::orbit::{assign_circular_velocity, circular_velocity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, Color, NVec2, System};

pub struct Scenario {
    pub engine: Engine,
    pub system: System,
    parameters: Parameters, // always the values `forces` was built from
    forces: ForceSet,
    pending: Vec<Body>, // inserted before the next step
}

/// Newtonian gravity with the constants in `parameters`
fn gravity_from(parameters: &Parameters) -> ForceSet {
    ForceSet::new().with(NewtonianGravity {
        G: parameters.G,
        min_r2: parameters.min_r2,
    })
}

impl Scenario {
    /// Bundle a system with Newtonian gravity built from `parameters`
    pub fn new(engine: Engine, parameters: Parameters, system: System) -> Self {
        let forces = gravity_from(&parameters);

        Self {
            engine,
            system,
            parameters,
            forces,
            pending: Vec::new(),
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Replace the physical constants; the force set is rebuilt so the
    /// next step, insertions and diagnostics all see the same values
    pub fn set_parameters(&mut self, parameters: Parameters) {
        debug!("parameters changed to {:?}", parameters);
        self.forces = gravity_from(&parameters);
        self.parameters = parameters;
    }

    pub fn forces(&self) -> &ForceSet {
        &self.forces
    }

    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        // Bodies: map `BodyConfig` -> runtime `Body`, remembering which want an orbit
        let mut bodies = Vec::with_capacity(cfg.bodies.len());
        let mut orbital = Vec::new();
        for (i, bc) in cfg.bodies.iter().enumerate() {
            bodies.push(body_from_config(bc)?);
            if bc.orbital {
                orbital.push(i);
            }
        }

        // Parameters (runtime) from ParametersConfig
        let parameters = Parameters {
            G: cfg.parameters.G,
            min_r2: cfg.parameters.min_r2,
        };

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine::new(e_cfg.order, e_cfg.dt, e_cfg.min_dt, e_cfg.speed_factor)?;

        // Orbital bodies circle the heaviest body of the whole initial set
        let mut system = System::with_bodies(bodies);
        if !orbital.is_empty() {
            let primary = system.primary().ok_or(SimError::NoReferenceBody)?;
            for i in orbital {
                let v = circular_velocity(parameters.G, &system.bodies[primary], system.bodies[i].x)?;
                system.bodies[i].v = v;
            }
        }

        info!(
            "scenario: {} bodies, dt = {} s, order = {:?}",
            system.len(),
            engine.dt(),
            engine.order
        );

        Ok(Self::new(engine, parameters, system))
    }

    /// Queue `body` for insertion at the start of the next step
    ///
    /// With `orbital`, its velocity is replaced right away by the circular
    /// velocity around the current heaviest body.
    pub fn request_insert(&mut self, mut body: Body, orbital: bool) -> Result<(), SimError> {
        if orbital {
            assign_circular_velocity(&self.system, self.parameters.G, &mut body)?;
        }
        debug!("queued body at ({:e}, {:e}) with v = ({:e}, {:e})", body.x.x, body.x.y, body.v.x, body.v.y);
        self.pending.push(body);
        Ok(())
    }

    /// Bodies waiting for the next step boundary
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move queued bodies into the registry
    pub fn flush_insertions(&mut self) {
        for body in self.pending.drain(..) {
            self.system.push(body);
        }
    }

    /// One frame: flush insertions, then one integrator step with the
    /// engine's current `dt`
    pub fn advance(&mut self) -> Result<(), SimError> {
        self.flush_insertions();
        symplectic_euler(&mut self.system, &self.forces, self.engine.dt(), self.engine.order)
    }
}

fn body_from_config(bc: &BodyConfig) -> Result<Body, SimError> {
    let x = vec2("x", &bc.x)?;
    let v = vec2("v", &bc.v)?;
    let color = match &bc.color {
        Some(name) => Color::from_name(name)?,
        None => Color::default(),
    };
    Body::new(x, v, bc.m, bc.radius, color)
}

fn vec2(field: &'static str, xs: &[f64]) -> Result<NVec2, SimError> {
    match xs {
        [x, y] => Ok(NVec2::new(*x, *y)),
        _ => Err(SimError::BadVector { field, len: xs.len() }),
    }
}
