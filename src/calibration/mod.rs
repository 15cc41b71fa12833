//!
//! Linear conversion between joint angles and actuator command units
//!

pub mod error;
pub mod presets;

use error::CalibrationError;
use serde::{Serialize, Deserialize};

///
/// A numeric window, either a span of joint angles in radians or an actuator's
/// command window in raw position units. `min` maps onto the other range's `min`, so
/// an inverted joint is expressed by giving one of the ranges with `min > max`.
///
/// # Fields:
/// - `min`: The bound mapped onto the other range's minimum
/// - `max`: The bound mapped onto the other range's maximum
///
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct JointRange {
    pub min: f64,
    pub max: f64,
}

/// The calibrated command window of an actuator.
pub type ActuatorRange = JointRange;

impl JointRange {
    pub const fn new(min: f64, max: f64) -> JointRange {
        JointRange { min, max }
    }

    ///
    /// Checks the range can be interpolated over.
    ///
    /// # Returns:
    /// - Void if both bounds are finite and distinct
    /// - A `CalibrationError` explaining why the range is unusable
    ///
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(CalibrationError::NonFiniteRange { min: self.min, max: self.max });
        }

        if self.min == self.max {
            return Err(CalibrationError::DegenerateRange { min: self.min, max: self.max });
        }

        Ok(())
    }

    /// The signed width of the range, `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// The lower of the two bounds, regardless of orientation.
    pub fn lower(&self) -> f64 {
        self.min.min(self.max)
    }

    /// The higher of the two bounds, regardless of orientation.
    pub fn upper(&self) -> f64 {
        self.min.max(self.max)
    }

    pub fn midpoint(&self) -> f64 {
        self.min + self.span() / 2.
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower() && value <= self.upper()
    }
}

///
/// Linearly maps a value from one range onto another.
///
/// # Parameters:
/// - `value`: The value to convert, in the units of `from`
/// - `from`: The source range
/// - `to`: The destination range
///
/// # Returns:
/// - The converted value, in the units of `to`
/// - `CalibrationError::DegenerateRange` if `from` has no width
///
pub fn remap(value: f64, from: &JointRange, to: &JointRange) -> Result<f64, CalibrationError> {
    if from.span() == 0. {
        return Err(CalibrationError::DegenerateRange { min: from.min, max: from.max });
    }

    Ok(interpolate(value, from, to))
}

///
/// Linearly maps a value from one range onto another, never failing.
///
/// Policy: when `from` has no width every input maps to `to.min`. This matches how
/// the leg's motor scripts treated an uncalibrated joint, and is only suitable where the
/// caller has decided a pinned output beats an error. Prefer `remap`.
///
/// # Returns:
/// - The converted value, or `to.min` for a degenerate `from`
///
pub fn remap_or_min(value: f64, from: &JointRange, to: &JointRange) -> f64 {
    if from.span() == 0. {
        return to.min;
    }

    interpolate(value, from, to)
}

fn interpolate(value: f64, from: &JointRange, to: &JointRange) -> f64 {
    ((value - from.min) * to.span() / from.span()) + to.min
}

///
/// The calibration of a single joint, pairing its radian span with the actuator's
/// command window.
/// Both features have an associated getter function.
///
/// # Fields:
/// - `radians`: The span of joint angles, in radians
/// - `actuator`: The actuator command window the span maps onto
///
#[derive(getset::Getters, Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[get = "pub"]
#[serde(try_from = "RawJointCalibration")]
pub struct JointCalibration {
    radians: JointRange,
    actuator: ActuatorRange,
}

#[derive(Deserialize)]
struct RawJointCalibration {
    radians: JointRange,
    actuator: ActuatorRange,
}

impl TryFrom<RawJointCalibration> for JointCalibration {
    type Error = CalibrationError;

    fn try_from(raw: RawJointCalibration) -> Result<Self, Self::Error> {
        JointCalibration::new(raw.radians, raw.actuator)
    }
}

impl JointCalibration {
    ///
    /// Creates a new `JointCalibration`, validating both ranges so the conversions below
    /// can never divide by zero.
    ///
    /// # Parameters:
    /// - `radians`: The span of joint angles, in radians
    /// - `actuator`: The matching actuator command window
    ///
    /// # Returns:
    /// - A new `JointCalibration` instance
    /// - A `CalibrationError` if either range is degenerate or not finite
    ///
    pub fn new(radians: JointRange, actuator: ActuatorRange) -> Result<JointCalibration, CalibrationError> {
        radians.validate()?;
        actuator.validate()?;

        Ok(JointCalibration { radians, actuator })
    }

    ///
    /// Converts a joint angle into an actuator command.
    ///
    /// # Parameters:
    /// - `theta`: The joint angle, in radians
    ///
    /// # Returns:
    /// - The actuator command, unclamped
    ///
    pub fn to_actuator(&self, theta: f64) -> f64 {
        interpolate(theta, &self.radians, &self.actuator)
    }

    ///
    /// Converts an actuator position into a joint angle.
    ///
    /// # Parameters:
    /// - `command`: The actuator position, in raw position units
    ///
    /// # Returns:
    /// - The joint angle, in radians
    ///
    pub fn to_radians(&self, command: f64) -> f64 {
        interpolate(command, &self.actuator, &self.radians)
    }

    ///
    /// Limits an actuator command to the calibrated window.
    ///
    /// # Returns:
    /// - The limited command, and whether it had to be changed
    ///
    pub fn clamp_command(&self, command: f64) -> (f64, bool) {
        let clamped = command.clamp(self.actuator.lower(), self.actuator.upper());
        (clamped, clamped != command)
    }
}
