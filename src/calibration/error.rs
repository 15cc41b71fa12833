use thiserror::Error;

///
/// All errors emitted from the calibration module.
/// These are setup-time errors: a `JointCalibration` can only be constructed from valid ranges.
///
/// - `DegenerateRange`: When a range has the same minimum and maximum, so it cannot be
/// interpolated over
///     Parameters:
///     - `min`: The range minimum
///     - `max`: The range maximum
/// - `NonFiniteRange`: When a range bound is NaN or infinite
///     Parameters:
///     - `min`: The range minimum
///     - `max`: The range maximum
///
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("The range [{min}, {max}] is degenerate, its bounds must differ")]
    DegenerateRange { min: f64, max: f64 },

    #[error("The range [{min}, {max}] has a bound which is not finite")]
    NonFiniteRange { min: f64, max: f64 },
}
