//! Property and scenario tests for the leg kinematics, convergence and calibration.

use std::f64::consts::PI;

use legcore::calibration::presets;
use legcore::kinematics::error::KinematicsError;
use legcore::kinematics::math::{forward_kinematics, wrap_angle};
use legcore::{
    AnalyticIkSolver, ConvergenceLoop, ConvergenceSettings, FootTarget, GainParams, JointAngles,
    JointCalibration, JointRange, LinkLengths, Reach,
};
use proptest::prelude::*;

fn sim_links() -> LinkLengths {
    LinkLengths::new(1.0, 1.2).unwrap()
}

/// A reachable target, kept clear of the inner dead zone and the outer boundary.
fn arb_reachable_target() -> impl Strategy<Value = FootTarget> {
    (0.25..2.19f64, -PI..PI).prop_map(|(r, bearing)| FootTarget::new(r * bearing.cos(), r * bearing.sin()))
}

proptest! {
    #[test]
    fn ik_reproduces_reachable_targets(target in arb_reachable_target()) {
        let links = sim_links();
        let solution = AnalyticIkSolver::default().solve(&target, &links).unwrap();
        let (x, y) = forward_kinematics(&solution.angles, &links);

        prop_assert_eq!(solution.reach, Reach::Within);
        prop_assert!((x - target.x).abs() < 1e-6, "x {} vs {}", x, target.x);
        prop_assert!((y - target.y).abs() < 1e-6, "y {} vs {}", y, target.y);
    }

    #[test]
    fn unreachable_targets_extend_fully(r in 2.21..50.0f64, bearing in -PI..PI) {
        let target = FootTarget::new(r * bearing.cos(), r * bearing.sin());
        let solution = AnalyticIkSolver::default().solve(&target, &sim_links()).unwrap();

        prop_assert_eq!(solution.reach, Reach::Unreachable);
        prop_assert_eq!(solution.angles.theta_knee, 0.);
    }

    #[test]
    fn calibration_round_trips(theta in -PI..PI) {
        let hip = JointCalibration::new(JointRange::new(-PI, PI), JointRange::new(-0.51, 0.02)).unwrap();
        prop_assert!((hip.to_radians(hip.to_actuator(theta)) - theta).abs() < 1e-9);

        let knee = presets::knee().unwrap();
        let half = theta / 2.;
        prop_assert!((knee.to_radians(knee.to_actuator(half)) - half).abs() < 1e-9);
    }

    #[test]
    fn wrap_is_zero_for_equal_angles(a in -100.0..100.0f64) {
        prop_assert_eq!(wrap_angle(a, a), 0.);
    }

    #[test]
    fn wrap_is_shortest_path(a in -20.0..20.0f64, b in -20.0..20.0f64) {
        let d = wrap_angle(a, b);
        prop_assert!(d > -PI && d <= PI);
        // d differs from a - b by a whole number of turns
        let turns = (a - b - d) / (2. * PI);
        prop_assert!((turns - turns.round()).abs() < 1e-9);
    }

    #[test]
    fn convergence_never_yields_nan(x in -4.0..4.0f64, y in -4.0..4.0f64, hip in -PI..PI, knee in -PI..PI) {
        let lp = ConvergenceLoop::new(sim_links(), GainParams::default(), ConvergenceSettings::new(0.1, 200).unwrap());
        let result = lp.converge(&FootTarget::new(x, y), JointAngles::new(hip, knee)).unwrap();

        prop_assert!(result.angles.is_finite());
        prop_assert!(result.iterations <= 200);
    }
}

#[test]
fn foot_one_metre_below_hip() {
    let links = sim_links();
    // the hop set point 1.0 * sin(t) - 2.0 at t = π / 2
    let target = FootTarget::new(0., (PI / 2.).sin() - 2.);
    let solution = AnalyticIkSolver::default().solve(&target, &links).unwrap();
    let (x, y) = forward_kinematics(&solution.angles, &links);

    assert!((x - 0.).abs() < 1e-6);
    assert!((y + 1.).abs() < 1e-6);
}

#[test]
fn zero_angle_maps_to_actuator_midpoint() {
    let hip = JointCalibration::new(JointRange::new(-PI, PI), JointRange::new(-0.51, 0.02)).unwrap();
    assert!((hip.to_actuator(0.) + 0.245).abs() < 1e-12);
}

#[test]
fn hopping_gains_converge_within_cap() {
    let lp = ConvergenceLoop::new(
        sim_links(),
        GainParams::new(25., 0.015).unwrap(),
        ConvergenceSettings::new(0.1, 1000).unwrap(),
    );

    for target in [FootTarget::new(0., -1.), FootTarget::new(0.5, -1.8), FootTarget::new(-1.2, 0.4)] {
        let result = lp.converge(&target, JointAngles::default()).unwrap();
        assert!(result.converged, "did not converge on {:?}", target);
        assert!(result.iterations <= 1000);
    }
}

#[test]
fn origin_target_is_degenerate() {
    let err = AnalyticIkSolver::default().solve(&FootTarget::new(0., 0.), &sim_links()).unwrap_err();
    assert!(matches!(err, KinematicsError::DegenerateGeometry { .. }));

    let lp = ConvergenceLoop::new(sim_links(), GainParams::default(), ConvergenceSettings::default());
    let result = lp.converge(&FootTarget::new(0., 0.), JointAngles::default()).unwrap();
    assert!(!result.converged);
    assert!(matches!(result.held, Some(KinematicsError::DegenerateGeometry { .. })));
}

#[test]
fn boundary_target_fully_extends() {
    let links = sim_links();
    let r = links.reach();
    let solution = AnalyticIkSolver::default().solve(&FootTarget::new(0., -r), &links).unwrap();

    assert_eq!(solution.angles.theta_knee, 0.);
    assert_eq!(solution.reach, Reach::Boundary);
}

#[test]
fn hop_cycle_with_actuator_feedback() {
    let config = legcore::LegConfig::simulation().unwrap();
    let mut controller = config.controller(JointAngles::default()).unwrap();
    let hop = legcore::SineHopTarget::simulation();

    for cycle in 0..200 {
        let t = cycle as f64 * config.gains().dt();
        let output = controller.step(&hop.at(t)).unwrap();
        let command = output.command;

        assert!(command.hip.is_finite() && command.knee.is_finite());
        assert!(config.hip().actuator().contains(command.hip));
        assert!(config.knee().actuator().contains(command.knee));

        // the actuators settle exactly on the command
        controller.apply_feedback(command.hip, command.knee).unwrap();
    }

    let (x, y) = controller.foot_position();
    assert!(x.is_finite() && y.is_finite());
}
