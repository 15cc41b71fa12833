//!
//! Calibration constants recorded on the bench monoped
//!

use std::f64::consts::{FRAC_PI_2, PI};

use super::{ActuatorRange, JointCalibration, JointRange};
use super::error::CalibrationError;

/// The span of hip angles mapped onto the hip actuator.
pub const HIP_RADIANS: JointRange = JointRange::new(-PI, PI);
/// The hip actuator window the IK output is mapped onto.
pub const HIP_ACTUATOR: ActuatorRange = JointRange::new(-0.48, 0.4);

/// The span of knee angles mapped onto the knee actuator.
pub const KNEE_RADIANS: JointRange = JointRange::new(-FRAC_PI_2, FRAC_PI_2);
/// The knee actuator window the IK output is mapped onto.
pub const KNEE_ACTUATOR: ActuatorRange = JointRange::new(-0.18, 0.18);

/// The position limits configured on the hip motor controller (`servopos.position_min/max`).
pub const HIP_CONTROLLER_LIMITS: ActuatorRange = JointRange::new(-0.51, 0.02);
/// The position limits configured on the knee motor controller.
pub const KNEE_CONTROLLER_LIMITS: ActuatorRange = JointRange::new(-0.65, -0.15);

/// Link lengths of the simulated leg, in metres.
pub const SIM_LINKS: (f64, f64) = (1.0, 1.2);
/// Link lengths of the bench leg, in metres.
pub const BENCH_LINKS: (f64, f64) = (0.1, 0.15);

/// Proportional gain used by the hopping controller.
pub const DEFAULT_KP: f64 = 25.0;
/// Fixed time step used by the hopping controller, in seconds.
pub const DEFAULT_DT: f64 = 0.015;
/// Foot distance below which the convergence loop stops, in metres.
pub const DEFAULT_EPSILON: f64 = 0.1;
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

pub fn hip() -> Result<JointCalibration, CalibrationError> {
    JointCalibration::new(HIP_RADIANS, HIP_ACTUATOR)
}

pub fn knee() -> Result<JointCalibration, CalibrationError> {
    JointCalibration::new(KNEE_RADIANS, KNEE_ACTUATOR)
}
