use std::time::Instant;

use crate::configuration::config::UpdateOrder;
use crate::simulation::error::SimError;
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::integrator::symplectic_euler;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, Color, NVec2, System};

/// Body counts the direct sum is expected to handle per frame
const NS: [usize; 5] = [10, 20, 40, 80, 160];

/// Helper to build a manual System of size `n`
/// Deterministic positions on a loose spiral, no rand needed
pub fn spiral_system(n: usize) -> Result<System, SimError> {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        let x = NVec2::new(
            (i_f * 0.37).sin() * 1.0e11 * (1.0 + i_f),
            (i_f * 0.13).cos() * 1.0e11 * (1.0 + i_f),
        );
        bodies.push(Body::at_rest(x, 1.0e24, 10.0, Color::WHITE)?);
    }

    Ok(System::with_bodies(bodies))
}

fn make_forces(params: &Parameters) -> ForceSet {
    ForceSet::new().with(NewtonianGravity {
        G: params.G,
        min_r2: params.min_r2,
    })
}

/// Time one full net-force evaluation for each N
pub fn bench_gravity() -> Result<(), SimError> {
    let params = Parameters::default();
    let forces = make_forces(&params);

    for n in NS {
        let sys = spiral_system(n)?;
        let mut out = vec![NVec2::zeros(); n];

        // Warm up
        forces.accumulate_forces(sys.bodies(), &mut out);

        let t0 = Instant::now();
        forces.accumulate_forces(sys.bodies(), &mut out);
        let dt_direct = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, direct = {:10.8} s", dt_direct);
    }

    Ok(())
}

/// Time whole steps, both update orders, for each N
pub fn bench_step() -> Result<(), SimError> {
    let steps = 100;
    let dt = 3600.0;
    let params = Parameters::default();
    let forces = make_forces(&params);

    for n in NS {
        let mut per_step = [0.0; 2];

        for (k, order) in [UpdateOrder::Snapshot, UpdateOrder::Sequential].into_iter().enumerate() {
            let mut sys = spiral_system(n)?;

            // Warm-up
            symplectic_euler(&mut sys, &forces, dt, order)?;

            let t0 = Instant::now();
            for _ in 0..steps {
                symplectic_euler(&mut sys, &forces, dt, order)?;
            }
            per_step[k] = t0.elapsed().as_secs_f64() / steps as f64;
        }

        println!(
            "N = {:5}, snapshot step = {:10.8} s,   sequential step = {:10.8} s",
            n, per_step[0], per_step[1]
        );
    }

    Ok(())
}
