//!
//! Proportional convergence of the joint estimate towards the inverse kinematics
//! solution, and the control session built on top of it
//!

pub mod error;
pub mod hop;
pub mod session;

use error::ControlError;
use serde::{Serialize, Deserialize};

use crate::calibration::presets;
use crate::kinematics::error::KinematicsError;
use crate::kinematics::ik::{AnalyticIkSolver, ElbowPolicy};
use crate::kinematics::math::{distance_to_target, wrap_angle};
use crate::kinematics::{FootTarget, JointAngles, LinkLengths};

///
/// The proportional gain and fixed discrete time step of the loop, constant for a session.
/// Both features have an associated getter function.
///
/// # Fields:
/// - `kp`: The proportional gain
/// - `dt`: The time step, in seconds
///
#[derive(getset::CopyGetters, Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[get_copy = "pub"]
#[serde(try_from = "RawGainParams")]
pub struct GainParams {
    kp: f64,
    dt: f64,
}

#[derive(Deserialize)]
struct RawGainParams {
    kp: f64,
    dt: f64,
}

impl TryFrom<RawGainParams> for GainParams {
    type Error = ControlError;

    fn try_from(raw: RawGainParams) -> Result<Self, Self::Error> {
        GainParams::new(raw.kp, raw.dt)
    }
}

impl GainParams {
    ///
    /// # Returns:
    /// - A new `GainParams` instance
    /// - `ControlError::InvalidGains` unless both values are finite and greater than zero
    ///
    pub fn new(kp: f64, dt: f64) -> Result<GainParams, ControlError> {
        if !(kp.is_finite() && dt.is_finite() && kp > 0. && dt > 0.) {
            return Err(ControlError::InvalidGains { kp, dt });
        }

        Ok(GainParams { kp, dt })
    }

    /// The fraction of the remaining angular error removed each iteration, `kp * dt`.
    pub fn step_fraction(&self) -> f64 {
        self.kp * self.dt
    }
}

impl Default for GainParams {
    fn default() -> Self {
        GainParams { kp: presets::DEFAULT_KP, dt: presets::DEFAULT_DT }
    }
}

///
/// When the convergence loop stops.
/// Both features have an associated getter function.
///
/// # Fields:
/// - `epsilon`: The foot distance to the target, in metres, below which the loop has converged
/// - `max_iterations`: The most iterations a single call may run
///
#[derive(getset::CopyGetters, Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[get_copy = "pub"]
#[serde(try_from = "RawConvergenceSettings")]
pub struct ConvergenceSettings {
    epsilon: f64,
    max_iterations: usize,
}

#[derive(Deserialize)]
struct RawConvergenceSettings {
    epsilon: f64,
    max_iterations: usize,
}

impl TryFrom<RawConvergenceSettings> for ConvergenceSettings {
    type Error = ControlError;

    fn try_from(raw: RawConvergenceSettings) -> Result<Self, Self::Error> {
        ConvergenceSettings::new(raw.epsilon, raw.max_iterations)
    }
}

impl ConvergenceSettings {
    ///
    /// # Returns:
    /// - A new `ConvergenceSettings` instance
    /// - `ControlError::InvalidSettings` if epsilon is not finite and positive, or the cap is zero
    ///
    pub fn new(epsilon: f64, max_iterations: usize) -> Result<ConvergenceSettings, ControlError> {
        if !(epsilon.is_finite() && epsilon > 0.) || max_iterations == 0 {
            return Err(ControlError::InvalidSettings { epsilon, max_iterations });
        }

        Ok(ConvergenceSettings { epsilon, max_iterations })
    }
}

impl Default for ConvergenceSettings {
    fn default() -> Self {
        ConvergenceSettings { epsilon: presets::DEFAULT_EPSILON, max_iterations: presets::DEFAULT_MAX_ITERATIONS }
    }
}

///
/// The outcome of a single convergence call.
///
/// # Fields:
/// - `angles`: The joint estimate after the call
/// - `converged`: Whether the foot came within epsilon of the target
/// - `iterations`: How many proportional updates were applied
/// - `distance`: The final foot distance to the target, `None` if the estimate was held
/// - `held`: Why the estimate was held unchanged, if the target was degenerate
///
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceResult {
    pub angles: JointAngles,
    pub converged: bool,
    pub iterations: usize,
    pub distance: Option<f64>,
    pub held: Option<KinematicsError>,
}

impl ConvergenceResult {
    pub fn theta_hip(&self) -> f64 {
        self.angles.theta_hip
    }

    pub fn theta_knee(&self) -> f64 {
        self.angles.theta_knee
    }
}

///
/// Iteratively moves a joint estimate towards the inverse kinematics solution of a
/// target with a fixed-gain proportional update, checking the foot position with
/// forward kinematics after every step.
///
/// # Fields:
/// - `links`: The leg link lengths
/// - `gains`: The proportional gain and time step
/// - `settings`: The stopping criteria
/// - `solver`: The inverse kinematics solver, carrying the elbow policy
///
#[derive(getset::Getters, Debug, Clone, Copy, PartialEq)]
#[get = "pub"]
pub struct ConvergenceLoop {
    links: LinkLengths,
    gains: GainParams,
    settings: ConvergenceSettings,
    solver: AnalyticIkSolver,
}

impl ConvergenceLoop {
    pub fn new(links: LinkLengths, gains: GainParams, settings: ConvergenceSettings) -> ConvergenceLoop {
        ConvergenceLoop { links, gains, settings, solver: AnalyticIkSolver::default() }
    }

    pub fn with_policy(mut self, policy: ElbowPolicy) -> ConvergenceLoop {
        self.solver = AnalyticIkSolver::new(policy);
        self
    }

    ///
    /// Advances `current` towards the joint angles which place the foot on `target`.
    ///
    /// Each iteration applies `theta += kp * wrap(theta_desired, theta) * dt` to both
    /// joints, then measures the foot distance to the target. The call stops once that
    /// distance is below epsilon, or after `max_iterations` updates with
    /// `converged == false` and the last estimate retained.
    ///
    /// A degenerate target leaves `current` unchanged and reports why in `held`.
    ///
    /// # Parameters:
    /// - `target`: The desired foot position
    /// - `current`: The joint estimate from the previous cycle
    ///
    /// # Returns:
    /// - A `ConvergenceResult` carrying the new estimate
    /// - `ControlError::InvalidEstimate` if `current` is not finite
    ///
    pub fn converge(&self, target: &FootTarget, current: JointAngles) -> Result<ConvergenceResult, ControlError> {
        if !current.is_finite() {
            return Err(ControlError::InvalidEstimate { theta_hip: current.theta_hip, theta_knee: current.theta_knee });
        }

        // the target is fixed for the whole call, so one solve serves every iteration
        let desired = match self.solver.solve(target, &self.links) {
            Ok(solution) => solution.angles,
            Err(err @ KinematicsError::DegenerateGeometry { .. }) => {
                log::warn!("Holding joint estimate: {}", err);
                return Ok(ConvergenceResult { angles: current, converged: false, iterations: 0, distance: None, held: Some(err) });
            }
            Err(err) => return Err(err.into()),
        };

        let step = self.gains.step_fraction();
        let mut angles = current;
        let mut distance = f64::INFINITY;

        for iteration in 1..=self.settings.max_iterations() {
            angles.theta_hip += step * wrap_angle(desired.theta_hip, angles.theta_hip);
            angles.theta_knee += step * wrap_angle(desired.theta_knee, angles.theta_knee);

            distance = distance_to_target(&angles, target, &self.links);
            if distance < self.settings.epsilon() {
                log::debug!("Converged on ({}, {}) after {} iterations, {:.5} m away", target.x, target.y, iteration, distance);
                return Ok(ConvergenceResult { angles, converged: true, iterations: iteration, distance: Some(distance), held: None });
            }
        }

        log::debug!("Gave up on ({}, {}) after {} iterations, {:.5} m away", target.x, target.y, self.settings.max_iterations(), distance);
        Ok(ConvergenceResult {
            angles,
            converged: false,
            iterations: self.settings.max_iterations(),
            distance: Some(distance),
            held: None,
        })
    }
}
