use crate::calibration::JointCalibration;
use crate::kinematics::math::forward_kinematics;
use crate::kinematics::{FootTarget, JointAngles};

use super::error::ControlError;
use super::{ConvergenceLoop, ConvergenceResult};

///
/// A pair of actuator commands, ready for the motor transport.
///
/// # Fields:
/// - `hip`: The hip actuator position command
/// - `knee`: The knee actuator position command
/// - `clamped`: Whether either command was limited to its actuator window
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorCommand {
    pub hip: f64,
    pub knee: f64,
    pub clamped: bool,
}

///
/// Everything a control cycle produced.
///
/// # Fields:
/// - `convergence`: The outcome of the convergence loop
/// - `command`: The actuator commands for the new estimate
///
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutput {
    pub convergence: ConvergenceResult,
    pub command: ActuatorCommand,
}

///
/// A control session for one leg. It owns the running joint estimate, advancing it once
/// per cycle towards the requested foot target and pulling it back into line with the
/// positions the actuators report.
///
/// # Fields:
/// - `convergence`: The configured convergence loop
/// - `hip`: The hip joint calibration
/// - `knee`: The knee joint calibration
/// - `estimate`: The running joint angle estimate
///
pub struct LegController {
    convergence: ConvergenceLoop,
    hip: JointCalibration,
    knee: JointCalibration,
    estimate: JointAngles,
}

impl LegController {
    ///
    /// Starts a new control session.
    ///
    /// # Parameters:
    /// - `convergence`: The configured convergence loop
    /// - `hip`: The hip joint calibration
    /// - `knee`: The knee joint calibration
    /// - `initial`: The initial joint estimate, zero or derived from the actuators
    ///
    /// # Returns:
    /// - A new `LegController` instance
    /// - `ControlError::InvalidEstimate` if `initial` is not finite
    ///
    pub fn new(convergence: ConvergenceLoop, hip: JointCalibration, knee: JointCalibration, initial: JointAngles) -> Result<LegController, ControlError> {
        check_estimate(&initial)?;

        Ok(LegController { convergence, hip, knee, estimate: initial })
    }

    ///
    /// Runs one control cycle: converges the estimate on `target`, stores it, and maps
    /// it into actuator commands.
    ///
    /// # Parameters:
    /// - `target`: The desired foot position for this cycle
    ///
    /// # Returns:
    /// - The convergence outcome and the actuator commands to send
    /// - A `ControlError` if the cycle could not run
    ///
    pub fn step(&mut self, target: &FootTarget) -> Result<CycleOutput, ControlError> {
        let convergence = self.convergence.converge(target, self.estimate)?;
        self.estimate = convergence.angles;

        let command = self.command_for(&self.estimate);
        Ok(CycleOutput { convergence, command })
    }

    ///
    /// Maps joint angles into actuator commands, clamped into each actuator's window.
    ///
    pub fn command_for(&self, angles: &JointAngles) -> ActuatorCommand {
        let (hip, hip_clamped) = self.hip.clamp_command(self.hip.to_actuator(angles.theta_hip));
        let (knee, knee_clamped) = self.knee.clamp_command(self.knee.to_actuator(angles.theta_knee));

        if hip_clamped || knee_clamped {
            log::warn!("Clamped actuator commands to hip: {:.4}, knee: {:.4}", hip, knee);
        }

        ActuatorCommand { hip, knee, clamped: hip_clamped || knee_clamped }
    }

    ///
    /// Replaces the running estimate with the joint angles implied by the positions the
    /// actuators reported.
    ///
    /// # Parameters:
    /// - `hip_position`: The reported hip actuator position
    /// - `knee_position`: The reported knee actuator position
    ///
    /// # Returns:
    /// - The updated estimate
    /// - `ControlError::InvalidFeedback` if either position is not finite, the estimate is
    /// left untouched
    ///
    pub fn apply_feedback(&mut self, hip_position: f64, knee_position: f64) -> Result<JointAngles, ControlError> {
        if !(hip_position.is_finite() && knee_position.is_finite()) {
            return Err(ControlError::InvalidFeedback { hip: hip_position, knee: knee_position });
        }

        self.estimate = JointAngles::new(self.hip.to_radians(hip_position), self.knee.to_radians(knee_position));
        Ok(self.estimate)
    }

    ///
    /// Re-initialises the running estimate, e.g. after the actuators recovered from a fault.
    ///
    pub fn reset(&mut self, angles: JointAngles) -> Result<(), ControlError> {
        check_estimate(&angles)?;
        self.estimate = angles;
        Ok(())
    }

    pub fn estimate(&self) -> JointAngles {
        self.estimate
    }

    ///
    /// # Returns:
    /// - The foot position implied by the running estimate, for telemetry
    ///
    pub fn foot_position(&self) -> (f64, f64) {
        forward_kinematics(&self.estimate, self.convergence.links())
    }

    pub fn convergence(&self) -> &ConvergenceLoop {
        &self.convergence
    }
}

fn check_estimate(angles: &JointAngles) -> Result<(), ControlError> {
    if !angles.is_finite() {
        return Err(ControlError::InvalidEstimate { theta_hip: angles.theta_hip, theta_knee: angles.theta_knee });
    }

    Ok(())
}
