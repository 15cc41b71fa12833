use thiserror::Error;

use crate::calibration::error::CalibrationError;
use crate::kinematics::error::KinematicsError;

///
/// All errors emitted from the control module.
///
/// - `InvalidGains`: When the proportional gain or time step is not a finite positive number
/// - `InvalidSettings`: When the convergence epsilon is not a finite positive number, or
/// the iteration cap is zero
/// - `InvalidEstimate`: When the joint angle estimate handed to the loop is not finite, so
/// there is no valid estimate to iterate from or hold
/// - `InvalidFeedback`: When an actuator reports a position which is not finite
/// - `Kinematics`: A wrapped kinematics error
/// - `Calibration`: A wrapped calibration error
///
/// A loop which runs out of iterations is not an error, see `ConvergenceResult::converged`.
///
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    #[error("Invalid gains kp: {kp}, dt: {dt}, both must be finite and greater than zero")]
    InvalidGains { kp: f64, dt: f64 },

    #[error("Invalid convergence settings epsilon: {epsilon}, max_iterations: {max_iterations}")]
    InvalidSettings { epsilon: f64, max_iterations: usize },

    #[error("The joint estimate (hip: {theta_hip}, knee: {theta_knee}) is not finite")]
    InvalidEstimate { theta_hip: f64, theta_knee: f64 },

    #[error("The actuator feedback (hip: {hip}, knee: {knee}) is not finite")]
    InvalidFeedback { hip: f64, knee: f64 },

    #[error(transparent)]
    Kinematics(#[from] KinematicsError),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}
