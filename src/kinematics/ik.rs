//!
//! Closed-form inverse kinematics for the two-link leg
//!

use serde::{Serialize, Deserialize};

use super::error::{DegenerateReason, KinematicsError};
use super::{FootTarget, JointAngles, LinkLengths};

/// How far outside [-1, 1] the law of cosines argument may drift from rounding alone
/// before the target is treated as degenerate.
pub const ACOS_TOLERANCE: f64 = 1e-9;

///
/// Selects between the two valid solutions (elbow-up / elbow-down) of a reachable
/// target.
///
/// - `FlipOnNegativeHip`: Solve with a positive knee first. If that yields a negative
/// hip angle, negate the knee and solve again. This is the policy the leg runs with.
/// - `Fixed`: Always keep the positive knee solution.
///
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElbowPolicy {
    #[default]
    FlipOnNegativeHip,
    Fixed,
}

///
/// How the target relates to the reach of the leg.
///
/// - `Within`: Strictly inside the reachable annulus, solved exactly
/// - `Boundary`: Exactly at `l0 + l1`, the knee is fully extended
/// - `Unreachable`: Beyond `l0 + l1`, the leg is fully extended and pointed at the target
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    Within,
    Boundary,
    Unreachable,
}

///
/// The desired joint angles for a target.
///
/// # Fields:
/// - `angles`: The desired hip and knee angles
/// - `reach`: Whether the target was reachable
/// - `flipped`: Whether the elbow policy negated the knee
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkSolution {
    pub angles: JointAngles,
    pub reach: Reach,
    pub flipped: bool,
}

///
/// The analytic two-link inverse kinematics solver.
///
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalyticIkSolver {
    policy: ElbowPolicy,
}

impl AnalyticIkSolver {
    pub fn new(policy: ElbowPolicy) -> AnalyticIkSolver {
        AnalyticIkSolver { policy }
    }

    pub fn policy(&self) -> ElbowPolicy {
        self.policy
    }

    ///
    /// Computes the desired hip and knee angles for a foot target.
    ///
    /// Targets beyond the reach of the leg are not an error: the knee is set to zero
    /// so the leg extends fully towards the target, and the solution is marked
    /// `Reach::Unreachable`.
    ///
    /// # Parameters:
    /// - `target`: The desired foot position, relative to the hip
    /// - `links`: The leg link lengths
    ///
    /// # Returns:
    /// - The desired joint angles
    /// - `KinematicsError::DegenerateGeometry` if the target is at the origin, not finite,
    /// or closer than the leg can fold
    ///
    pub fn solve(&self, target: &FootTarget, links: &LinkLengths) -> Result<IkSolution, KinematicsError> {
        let degenerate = |reason| KinematicsError::DegenerateGeometry { x: target.x, y: target.y, reason };

        if !target.is_finite() {
            return Err(degenerate(DegenerateReason::NonFiniteTarget));
        }

        let r = target.distance();
        if r == 0. {
            return Err(degenerate(DegenerateReason::TargetAtOrigin));
        }

        let (l0, l1) = (links.l0(), links.l1());
        let (knee, reach) = if r > links.reach() {
            (0., Reach::Unreachable)
        } else if r == links.reach() {
            (0., Reach::Boundary)
        } else {
            let cos_knee = (r * r - l0 * l0 - l1 * l1) / (2. * l0 * l1);
            if cos_knee.abs() > 1. + ACOS_TOLERANCE {
                return Err(degenerate(DegenerateReason::InsideMinimumReach { cos_knee }));
            }

            (cos_knee.clamp(-1., 1.).acos(), Reach::Within)
        };

        let gamma = target.y.atan2(target.x);
        let mut angles = JointAngles::new(gamma - beta(knee, links), knee);
        let mut flipped = false;

        if self.policy == ElbowPolicy::FlipOnNegativeHip && angles.theta_hip < 0. {
            angles.theta_knee = -knee;
            angles.theta_hip = gamma - beta(angles.theta_knee, links);
            flipped = true;
        }

        if reach == Reach::Unreachable {
            log::warn!("Foot target ({}, {}) is {:.4} m beyond reach, extending fully", target.x, target.y, r - links.reach());
        }

        Ok(IkSolution { angles, reach, flipped })
    }
}

///
/// Calculates the angle between the upper link and the hip-to-foot line for a knee angle.
///
fn beta(knee: f64, links: &LinkLengths) -> f64 {
    (links.l1() * knee.sin()).atan2(links.l0() + links.l1() * knee.cos())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::math::forward_kinematics;
    use approx::assert_relative_eq;

    fn sim_links() -> LinkLengths {
        LinkLengths::new(1.0, 1.2).unwrap()
    }

    #[test]
    fn reproduces_foot_below_hip() {
        let links = sim_links();
        let target = FootTarget::new(0., -1.);
        let solution = AnalyticIkSolver::default().solve(&target, &links).unwrap();

        let (x, y) = forward_kinematics(&solution.angles, &links);
        assert_relative_eq!(x, 0., epsilon = 1e-6);
        assert_relative_eq!(y, -1., epsilon = 1e-6);
        assert_eq!(solution.reach, Reach::Within);
        assert!(solution.flipped);
        assert!(solution.angles.theta_knee < 0.);
    }

    #[test]
    fn boundary_is_fully_extended() {
        let links = sim_links();
        let solution = AnalyticIkSolver::default().solve(&FootTarget::new(links.reach(), 0.), &links).unwrap();

        assert_eq!(solution.angles.theta_knee, 0.);
        assert_eq!(solution.angles.theta_hip, 0.);
        assert_eq!(solution.reach, Reach::Boundary);
    }

    #[test]
    fn unreachable_points_at_target() {
        let links = sim_links();
        let solution = AnalyticIkSolver::default().solve(&FootTarget::new(0., 5.), &links).unwrap();

        assert_eq!(solution.reach, Reach::Unreachable);
        assert_eq!(solution.angles.theta_knee, 0.);
        assert_relative_eq!(solution.angles.theta_hip, std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn fixed_policy_keeps_positive_knee() {
        let links = sim_links();
        let target = FootTarget::new(0., -1.);
        let solution = AnalyticIkSolver::new(ElbowPolicy::Fixed).solve(&target, &links).unwrap();

        assert!(!solution.flipped);
        assert!(solution.angles.theta_knee > 0.);
        let (x, y) = forward_kinematics(&solution.angles, &links);
        assert_relative_eq!(x, 0., epsilon = 1e-9);
        assert_relative_eq!(y, -1., epsilon = 1e-9);
    }

    #[test]
    fn origin_is_degenerate() {
        let err = AnalyticIkSolver::default().solve(&FootTarget::new(0., 0.), &sim_links()).unwrap_err();
        assert!(matches!(err, KinematicsError::DegenerateGeometry { reason: DegenerateReason::TargetAtOrigin, .. }));
    }

    #[test]
    fn inside_minimum_reach_is_degenerate() {
        let err = AnalyticIkSolver::default().solve(&FootTarget::new(0.1, 0.), &sim_links()).unwrap_err();
        assert!(matches!(err, KinematicsError::DegenerateGeometry { reason: DegenerateReason::InsideMinimumReach { .. }, .. }));
    }

    #[test]
    fn nan_target_is_degenerate() {
        let err = AnalyticIkSolver::default().solve(&FootTarget::new(f64::NAN, 1.), &sim_links()).unwrap_err();
        assert!(matches!(err, KinematicsError::DegenerateGeometry { reason: DegenerateReason::NonFiniteTarget, .. }));
    }
}
