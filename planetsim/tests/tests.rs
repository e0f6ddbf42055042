use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use planetsim::simulation::forces::Force;
use planetsim::{circular_velocity, symplectic_euler, total_energy, total_momentum};
use planetsim::{Body, Color, ForceSet, NVec2, NewtonianGravity, Parameters, SimError, System, UpdateOrder};
use planetsim::{GRAVITATIONAL_CONSTANT, TRAIL_CAPACITY};

fn body(x: f64, y: f64, m: f64) -> Body {
    Body::at_rest(NVec2::new(x, y), m, 1.0, Color::WHITE).unwrap()
}

fn moving_body(x: [f64; 2], v: [f64; 2], m: f64) -> Body {
    Body::new(NVec2::new(x[0], x[1]), NVec2::new(v[0], v[1]), m, 1.0, Color::WHITE).unwrap()
}

/// Build a simple 2-body System separated along the x-axis
fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    System::with_bodies(vec![body(-dist / 2.0, 0.0, m1), body(dist / 2.0, 0.0, m2)])
}

/// Parameters with G = 1 for easy numbers
fn unit_params() -> Parameters {
    Parameters {
        G: 1.0,
        ..Parameters::default()
    }
}

/// Build a gravity term + ForceSet
fn gravity_set(p: &Parameters) -> ForceSet {
    ForceSet::new().with(NewtonianGravity {
        G: p.G,
        min_r2: p.min_r2,
    })
}

fn net_forces(sys: &System, forces: &ForceSet) -> Vec<NVec2> {
    let mut out = vec![NVec2::zeros(); sys.len()];
    forces.accumulate_forces(sys.bodies(), &mut out);
    out
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn two_body_force_matches_newton() {
    let (m1, m2, d) = (5.97e24, 7.35e22, 3.84e8);
    let sys = two_body_system(d, m1, m2);
    let forces = gravity_set(&Parameters::default());

    let f = net_forces(&sys, &forces);
    let expected = GRAVITATIONAL_CONSTANT * m1 * m2 / (d * d);

    assert_relative_eq!(f[0].norm(), expected, max_relative = 1e-12);
    assert_relative_eq!(f[1].norm(), expected, max_relative = 1e-12);

    // Along the joining line, toward the other body
    assert!(f[0].x > 0.0 && f[0].y == 0.0);
    assert!(f[1].x < 0.0 && f[1].y == 0.0);
}

#[test]
fn gravity_newton_third_law() {
    let sys = System::with_bodies(vec![body(0.3, -1.2, 2.0), body(-0.7, 0.4, 3.0)]);
    let forces = gravity_set(&unit_params());

    let f = net_forces(&sys, &forces);
    let net = f[0] + f[1];

    assert!(net.norm() < 1e-12 * f[0].norm(), "Net force not zero: {:?}", net);
}

#[test]
fn gravity_inverse_square_law() {
    let p = unit_params();
    let forces = gravity_set(&p);

    let f_r = net_forces(&two_body_system(1.0, 1.0, 1.0), &forces);
    let f_2r = net_forces(&two_body_system(2.0, 1.0, 1.0), &forces);

    assert_relative_eq!(f_r[0].norm() / f_2r[0].norm(), 4.0, max_relative = 1e-12);
}

#[test]
fn injected_constant_scales_force() {
    let sys = two_body_system(1.0, 1.0, 1.0);
    let f_one = net_forces(&sys, &gravity_set(&unit_params()));
    let f_two = net_forces(&sys, &gravity_set(&Parameters { G: 2.0, ..Parameters::default() }));

    assert_relative_eq!(f_one[0].x, 1.0, max_relative = 1e-15);
    assert_relative_eq!(f_two[0].x, 2.0, max_relative = 1e-15);
}

#[test]
fn body_exerts_no_force_on_itself() {
    let sys = System::with_bodies(vec![body(4.0, 2.0, 10.0)]);
    let gravity = NewtonianGravity { G: 1.0, min_r2: 1e-5 };

    assert_eq!(gravity.force_on(0, sys.bodies()), NVec2::zeros());
}

#[test]
fn lone_body_never_moves() {
    let mut sys = System::with_bodies(vec![moving_body([1.0, 2.0], [0.0, 0.0], 5.0)]);
    let forces = gravity_set(&unit_params());

    for _ in 0..10 {
        symplectic_euler(&mut sys, &forces, 0.5, UpdateOrder::Snapshot).unwrap();
    }

    let b = &sys.bodies()[0];
    assert_eq!(b.x, NVec2::new(1.0, 2.0));
    assert_eq!(b.v, NVec2::zeros());
    assert_eq!(b.acceleration(), NVec2::zeros());
}

#[test]
fn coincident_bodies_exert_nothing() {
    let mut sys = System::with_bodies(vec![body(3.0, 3.0, 1e30), body(3.0, 3.0, 1e30)]);
    let forces = gravity_set(&Parameters::default());

    let f = net_forces(&sys, &forces);
    assert_eq!(f[0], NVec2::zeros());
    assert_eq!(f[1], NVec2::zeros());

    symplectic_euler(&mut sys, &forces, 36_000.0, UpdateOrder::Snapshot).unwrap();
    for b in sys.iter() {
        assert!(b.x.iter().all(|c| c.is_finite()));
        assert!(b.v.iter().all(|c| c.is_finite()));
        assert_eq!(b.x, NVec2::new(3.0, 3.0));
    }
}

#[test]
fn clamp_applies_only_below_threshold() {
    let forces = gravity_set(&unit_params());

    // r^2 = 0.9e-5: clamped
    let inside = System::with_bodies(vec![body(0.0, 0.0, 1.0), body(0.9e-5_f64.sqrt(), 0.0, 1.0)]);
    assert_eq!(net_forces(&inside, &forces)[0], NVec2::zeros());

    // r^2 = 4e-5: full force 1 / 4e-5
    let outside = System::with_bodies(vec![body(0.0, 0.0, 1.0), body(4e-5_f64.sqrt(), 0.0, 1.0)]);
    assert_relative_eq!(net_forces(&outside, &forces)[0].x, 1.0 / 4e-5, max_relative = 1e-9);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn velocity_updates_before_position() {
    // Primary of mass 1000 at the origin, light body at (10, 0) moving +y
    let mut sys = System::with_bodies(vec![body(0.0, 0.0, 1000.0), moving_body([10.0, 0.0], [0.0, 2.0], 1.0)]);
    let forces = gravity_set(&unit_params());

    symplectic_euler(&mut sys, &forces, 1.0, UpdateOrder::Snapshot).unwrap();

    // a = -G M / d^2 = -10 along x
    let b = &sys.bodies()[1];
    assert_relative_eq!(b.acceleration().x, -10.0, max_relative = 1e-15);
    assert_relative_eq!(b.v.x, -10.0, max_relative = 1e-15);
    assert_relative_eq!(b.v.y, 2.0, max_relative = 1e-15);

    // x_new = x_old + v_new dt, not x_old + v_old dt = (10, 2)
    assert!(b.x.x.abs() < 1e-12, "x moved with the old velocity: {}", b.x.x);
    assert_relative_eq!(b.x.y, 2.0, max_relative = 1e-15);
}

#[test]
fn acceleration_is_recomputed_every_step() {
    let mut sys = System::with_bodies(vec![body(0.0, 0.0, 100.0), moving_body([5.0, 0.0], [0.0, 3.0], 1.0)]);
    let forces = gravity_set(&unit_params());

    for _ in 0..5 {
        let before = sys.clone();
        symplectic_euler(&mut sys, &forces, 0.1, UpdateOrder::Snapshot).unwrap();

        for (i, b) in sys.iter().enumerate() {
            let expected = forces.force_on(i, before.bodies()) / b.mass();
            assert_eq!(b.acceleration(), expected);
        }
    }
}

#[test]
fn snapshot_ignores_registry_order() {
    let a = moving_body([0.0, 0.0], [0.0, -1.0], 3.0);
    let b = moving_body([2.0, 1.0], [0.5, 1.0], 1.0);
    let forces = gravity_set(&unit_params());

    let mut ab = System::with_bodies(vec![a.clone(), b.clone()]);
    let mut ba = System::with_bodies(vec![b, a]);

    for _ in 0..3 {
        symplectic_euler(&mut ab, &forces, 0.1, UpdateOrder::Snapshot).unwrap();
        symplectic_euler(&mut ba, &forces, 0.1, UpdateOrder::Snapshot).unwrap();
    }

    assert_eq!(ab.bodies()[0].x, ba.bodies()[1].x);
    assert_eq!(ab.bodies()[1].x, ba.bodies()[0].x);
}

/// Straight-line re-statement of the interleaved update: force on body i,
/// then move body i, then go on to i + 1
fn interleaved_reference(state: &mut [[f64; 5]], g: f64, dt: f64) {
    let n = state.len();
    for i in 0..n {
        let (mut fx, mut fy) = (0.0, 0.0);
        for j in 0..n {
            if i == j {
                continue;
            }
            let dx = state[j][0] - state[i][0];
            let dy = state[j][1] - state[i][1];
            let r2 = dx * dx + dy * dy;
            if r2 < 1e-5 {
                continue;
            }
            let d = r2.sqrt();
            let f = g * state[i][4] * state[j][4] / r2;
            fx += f * (dx / d);
            fy += f * (dy / d);
        }
        let (ax, ay) = (fx / state[i][4], fy / state[i][4]);
        state[i][2] += ax * dt;
        state[i][3] += ay * dt;
        state[i][0] += state[i][2] * dt;
        state[i][1] += state[i][3] * dt;
    }
}

#[test]
fn sequential_order_matches_interleaved_update() {
    let mut state = [
        [0.0, 0.0, 0.0, 0.0, 10.0],
        [1.0, 0.0, 0.0, 3.0, 1.0],
        [0.0, -2.0, 2.0, 0.0, 0.5],
    ];
    let mut seq = System::with_bodies(state.iter().map(|s| moving_body([s[0], s[1]], [s[2], s[3]], s[4])).collect());
    let mut snap = seq.clone();
    let forces = gravity_set(&unit_params());

    for _ in 0..20 {
        interleaved_reference(&mut state, 1.0, 0.05);
        symplectic_euler(&mut seq, &forces, 0.05, UpdateOrder::Sequential).unwrap();
        symplectic_euler(&mut snap, &forces, 0.05, UpdateOrder::Snapshot).unwrap();
    }

    for (b, s) in seq.iter().zip(state.iter()) {
        assert_relative_eq!(b.x.x, s[0], max_relative = 1e-12);
        assert_relative_eq!(b.x.y, s[1], max_relative = 1e-12);
        assert_relative_eq!(b.v.x, s[2], max_relative = 1e-12);
        assert_relative_eq!(b.v.y, s[3], max_relative = 1e-12);
    }

    // The two orders are different schemes
    let gap = (seq.bodies()[2].x - snap.bodies()[2].x).norm();
    assert!(gap > 1e-6, "orders agree suspiciously well: {gap}");
}

#[test]
fn invalid_time_step_leaves_state_untouched() {
    let mut sys = two_body_system(1.0, 1.0, 1.0);
    let forces = gravity_set(&unit_params());

    for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = symplectic_euler(&mut sys, &forces, dt, UpdateOrder::Snapshot).unwrap_err();
        assert!(matches!(err, SimError::InvalidTimeStep(_)));
    }

    assert_eq!(sys.t, 0.0);
    assert_eq!(sys.steps, 0);
    assert_eq!(sys.bodies()[0].x, NVec2::new(-0.5, 0.0));
    assert!(sys.bodies()[0].trail().is_empty());
}

#[test]
fn time_and_step_count_accumulate() {
    let mut sys = two_body_system(10.0, 1.0, 1.0);
    let forces = gravity_set(&unit_params());

    symplectic_euler(&mut sys, &forces, 0.25, UpdateOrder::Snapshot).unwrap();
    symplectic_euler(&mut sys, &forces, 0.5, UpdateOrder::Sequential).unwrap();

    assert_eq!(sys.steps, 2);
    assert_relative_eq!(sys.t, 0.75);
}

#[test]
fn snapshot_conserves_momentum() {
    let mut sys = System::with_bodies(vec![
        moving_body([0.0, 0.0], [0.0, 0.1], 5.0),
        moving_body([3.0, 0.0], [0.0, 1.2], 1.0),
        moving_body([-4.0, 1.0], [0.3, -0.8], 2.0),
    ]);
    let forces = gravity_set(&unit_params());
    let p0 = total_momentum(&sys);

    for _ in 0..1000 {
        symplectic_euler(&mut sys, &forces, 1e-3, UpdateOrder::Snapshot).unwrap();
    }

    assert!((total_momentum(&sys) - p0).norm() < 1e-10);
}

#[test]
fn energy_drift_stays_bounded() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let params = unit_params();
    let forces = gravity_set(&params);
    let dt = 1e-2;

    for _ in 0..20 {
        let m1: f64 = rng.gen_range(0.5..2.0);
        let m2: f64 = rng.gen_range(0.5..2.0);
        let sep: f64 = rng.gen_range(1.0..3.0);
        let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        // 95-100% of circular speed keeps the orbit bound and mildly eccentric
        let factor: f64 = rng.gen_range(0.95..1.0);

        let total = m1 + m2;
        let dir = NVec2::new(angle.cos(), angle.sin());
        let perp = NVec2::new(-dir.y, dir.x);
        let v_rel = factor * (params.G * total / sep).sqrt() * perp;

        let mut sys = System::with_bodies(vec![
            Body::new(-m2 / total * sep * dir, -m2 / total * v_rel, m1, 1.0, Color::WHITE).unwrap(),
            Body::new(m1 / total * sep * dir, m1 / total * v_rel, m2, 1.0, Color::WHITE).unwrap(),
        ]);

        let e0 = total_energy(&sys, &params);
        let mut worst: f64 = 0.0;
        for _ in 0..20_000 {
            symplectic_euler(&mut sys, &forces, dt, UpdateOrder::Snapshot).unwrap();
            worst = worst.max(((total_energy(&sys, &params) - e0) / e0).abs());
        }

        assert!(
            worst < 1e-2,
            "energy drifted by {worst} (m1 = {m1}, m2 = {m2}, sep = {sep}, factor = {factor})"
        );
    }
}

// ==================================================================================
// Trail tests
// ==================================================================================

#[test]
fn trail_starts_empty() {
    let b = body(1.0, 1.0, 1.0);
    assert!(b.trail().is_empty());
    assert_eq!(b.trail().oldest(), None);
}

#[test]
fn trail_keeps_last_hundred_positions() {
    let mut sys = System::with_bodies(vec![
        body(0.0, 0.0, 1.989e30),
        moving_body([1.5e11, 0.0], [0.0, 2.98e4], 5.97e24),
    ]);
    let forces = gravity_set(&Parameters::default());

    let n = 150;
    let mut recorded = Vec::with_capacity(n);
    for step in 1..=n {
        symplectic_euler(&mut sys, &forces, 36_000.0, UpdateOrder::Snapshot).unwrap();
        let earth = &sys.bodies()[1];
        recorded.push(earth.x);

        assert_eq!(earth.trail().len(), step.min(TRAIL_CAPACITY));
        assert_eq!(earth.trail().newest(), Some(&earth.x));
    }

    let trail = sys.bodies()[1].trail();
    assert_eq!(trail.len(), 100);

    // Oldest entry is the position after step n - 99
    assert_eq!(trail.oldest(), Some(&recorded[n - 100]));
    assert!(trail.iter().eq(recorded[n - 100..].iter()));
}

#[test]
fn trail_fade_grows_with_index() {
    let mut trail = planetsim::Trail::new();
    for i in 0..4 {
        trail.push(NVec2::new(i as f64, 0.0));
    }

    assert_eq!(trail.fade(0), 0.0);
    assert_eq!(trail.fade(2), 0.5);
    assert_eq!(trail.fade(3), 0.75);
}

#[test]
fn trail_fade_out_of_range_is_zero() {
    let mut trail = planetsim::Trail::new();
    assert_eq!(trail.fade(0), 0.0);

    trail.push(NVec2::new(1.0, 0.0));
    trail.push(NVec2::new(2.0, 0.0));

    assert_eq!(trail.fade(1), 0.5);
    assert_eq!(trail.fade(2), 0.0);
    assert_eq!(trail.fade(usize::MAX), 0.0);
    assert_eq!(trail.get(2), None);
}

// ==================================================================================
// Orbital velocity tests
// ==================================================================================

#[test]
fn earth_distance_gives_earth_speed() {
    let sun = body(0.0, 0.0, 1.989e30);
    let pos = NVec2::new(1.5e11, 0.0);

    let v = circular_velocity(GRAVITATIONAL_CONSTANT, &sun, pos).unwrap();
    let expected = (6.674e-11_f64 * 1.989e30 / 1.5e11).sqrt();

    assert_relative_eq!(v.norm(), expected, max_relative = 1e-12);
    assert!((29_000.0..30_500.0).contains(&v.norm()));

    // perpendicular to the radius, +90 degree rotation
    assert!(v.dot(&pos).abs() < 1e-6 * v.norm() * pos.norm());
    assert_relative_eq!(v.y, expected, max_relative = 1e-12);
}

#[test]
fn orbital_direction_follows_sign_convention() {
    let sun = body(1.0e11, -2.0e11, 1.989e30);

    // Candidate straight "below" in +y: velocity along -x
    let v = circular_velocity(GRAVITATIONAL_CONSTANT, &sun, NVec2::new(1.0e11, -0.5e11)).unwrap();
    assert!(v.x < 0.0);
    assert!(v.y.abs() < 1e-9 * v.norm());

    // Candidate to the left, -x: velocity along -y
    let v = circular_velocity(GRAVITATIONAL_CONSTANT, &sun, NVec2::new(-1.0e11, -2.0e11)).unwrap();
    assert!(v.y < 0.0);
    assert!(v.x.abs() < 1e-9 * v.norm());
}

#[test]
fn orbital_velocity_rejects_zero_distance() {
    let sun = body(5.0, 5.0, 1.989e30);
    let err = circular_velocity(GRAVITATIONAL_CONSTANT, &sun, NVec2::new(5.0, 5.0)).unwrap_err();

    assert_eq!(err, SimError::CoincidentWithReference);
}

#[test]
fn circular_insertion_stays_circular() {
    let params = unit_params();
    let forces = gravity_set(&params);
    let primary = body(0.0, 0.0, 1.0);

    let mut planet = body(1.0, 0.0, 1e-9);
    planet.v = circular_velocity(params.G, &primary, planet.x).unwrap();
    let mut sys = System::with_bodies(vec![primary, planet]);

    // one full period, 2 pi
    for _ in 0..6283 {
        symplectic_euler(&mut sys, &forces, 1e-3, UpdateOrder::Snapshot).unwrap();
        let r = (sys.bodies()[1].x - sys.bodies()[0].x).norm();
        assert!((r - 1.0).abs() < 1e-2, "orbit radius wandered to {r}");
    }
}

// ==================================================================================
// Body / registry tests
// ==================================================================================

#[test]
fn body_rejects_bad_mass_and_radius() {
    let x = NVec2::zeros();
    assert_eq!(Body::at_rest(x, 0.0, 1.0, Color::RED).unwrap_err(), SimError::InvalidMass(0.0));
    assert_eq!(Body::at_rest(x, -3.0, 1.0, Color::RED).unwrap_err(), SimError::InvalidMass(-3.0));
    assert_eq!(Body::at_rest(x, 1.0, 0.0, Color::RED).unwrap_err(), SimError::InvalidRadius(0.0));
    assert!(matches!(Body::at_rest(x, f64::NAN, 1.0, Color::RED), Err(SimError::InvalidMass(_))));
    assert!(matches!(Body::at_rest(x, 1.0, f64::INFINITY, Color::RED), Err(SimError::InvalidRadius(_))));
}

#[test]
fn primary_is_heaviest_first_on_ties() {
    let mut sys = System::new();
    assert_eq!(sys.primary(), None);

    sys.push(body(0.0, 0.0, 1.0));
    sys.push(body(1.0, 0.0, 5.0));
    sys.push(body(2.0, 0.0, 5.0));
    sys.push(body(3.0, 0.0, 2.0));

    assert_eq!(sys.primary(), Some(1));
}
