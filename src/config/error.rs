use thiserror::Error;

use crate::calibration::error::CalibrationError;
use crate::control::error::ControlError;
use crate::kinematics::error::KinematicsError;

///
/// All errors emitted from the config module.
/// Validation failures inside a JSON document surface as `Parse`, with the offending
/// value in the message.
///
/// - `Parse`: When the JSON is malformed, incomplete or holds an invalid value
/// - `Kinematics`: When a preset's link lengths are invalid
/// - `Control`: When a preset's gains or settings are invalid
/// - `Calibration`: When a preset's joint calibration is invalid
///
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read the leg configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Kinematics(#[from] KinematicsError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}
