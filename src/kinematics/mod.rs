//!
//! Planar two-link leg geometry: link lengths, foot targets, joint angles and the
//! forward / inverse kinematics that relate them
//!

pub mod error;
pub mod ik;
pub mod math;

use error::KinematicsError;
use serde::{Serialize, Deserialize};

///
/// The physical link lengths of the leg. All values are in metres.
/// Both features have an associated getter function.
///
/// # Fields:
/// - `l0`: The length of the upper link, between the hip and the knee
/// - `l1`: The length of the lower link, between the knee and the foot
///
#[derive(getset::CopyGetters, Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[get_copy = "pub"]
#[serde(try_from = "RawLinkLengths")]
pub struct LinkLengths {
    l0: f64,
    l1: f64,
}

#[derive(Deserialize)]
struct RawLinkLengths {
    l0: f64,
    l1: f64,
}

impl TryFrom<RawLinkLengths> for LinkLengths {
    type Error = KinematicsError;

    fn try_from(raw: RawLinkLengths) -> Result<Self, Self::Error> {
        LinkLengths::new(raw.l0, raw.l1)
    }
}

impl LinkLengths {
    ///
    /// Creates a new `LinkLengths`. Both lengths must be finite and strictly positive.
    ///
    /// # Parameters:
    /// - `l0`: The upper link length
    /// - `l1`: The lower link length
    ///
    /// # Returns:
    /// - A new `LinkLengths` instance
    /// - `KinematicsError::InvalidLinkLengths` if either length is zero, negative or not finite
    ///
    pub fn new(l0: f64, l1: f64) -> Result<LinkLengths, KinematicsError> {
        if !(l0.is_finite() && l1.is_finite() && l0 > 0. && l1 > 0.) {
            return Err(KinematicsError::InvalidLinkLengths { l0, l1 });
        }

        Ok(LinkLengths { l0, l1 })
    }

    ///
    /// # Returns:
    /// - The maximum distance from the hip the foot can reach, `l0 + l1`
    ///
    pub fn reach(&self) -> f64 {
        self.l0 + self.l1
    }

    ///
    /// # Returns:
    /// - The minimum distance from the hip the foot can reach, `|l0 - l1|`
    ///
    pub fn min_reach(&self) -> f64 {
        (self.l0 - self.l1).abs()
    }
}

///
/// A desired foot position, relative to the hip joint origin. Values are in metres.
///
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FootTarget {
    pub x: f64,
    pub y: f64,
}

impl FootTarget {
    pub fn new(x: f64, y: f64) -> FootTarget {
        FootTarget { x, y }
    }

    /// The straight-line distance between the hip and the target.
    pub fn distance(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

///
/// The running joint angle estimate of the leg, in radians. The control loop owns
/// one of these across cycles and hands it to the convergence loop each cycle.
///
/// # Fields:
/// - `theta_hip`: The hip angle, measured from the positive x axis
/// - `theta_knee`: The knee angle, measured relative to the upper link
///
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct JointAngles {
    pub theta_hip: f64,
    pub theta_knee: f64,
}

impl JointAngles {
    pub fn new(theta_hip: f64, theta_knee: f64) -> JointAngles {
        JointAngles { theta_hip, theta_knee }
    }

    pub fn is_finite(&self) -> bool {
        self.theta_hip.is_finite() && self.theta_knee.is_finite()
    }
}
