use std::fmt;

use thiserror::Error;

///
/// All errors emitted from the kinematics module.
///
/// - `InvalidLinkLengths`: When a link length is zero, negative or not finite
///     Parameters:
///     - `l0`: The requested upper link length
///     - `l1`: The requested lower link length
/// - `DegenerateGeometry`: When a target has no well-defined inverse kinematics solution
///     Parameters:
///     - `x`, `y`: The offending target
///     - `reason`: Which geometric check failed
///
/// An unreachable target (further than `l0 + l1`) is deliberately not an error, see
/// `ik::Reach::Unreachable`.
///
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    #[error("Invalid link lengths l0: {l0}, l1: {l1}, both must be finite and greater than zero")]
    InvalidLinkLengths { l0: f64, l1: f64 },

    #[error("Degenerate leg geometry for target ({x}, {y}): {reason}")]
    DegenerateGeometry { x: f64, y: f64, reason: DegenerateReason },
}

///
/// The reason a target was rejected as degenerate.
///
/// - `TargetAtOrigin`: The target sits on the hip joint, so its bearing is undefined
/// - `NonFiniteTarget`: The target contains a NaN or infinite component
/// - `InsideMinimumReach`: The target is closer to the hip than `|l0 - l1|`, the law of
/// cosines argument fell outside [-1, 1] beyond rounding tolerance
///     Parameters:
///     - `cos_knee`: The unclamped arccos argument
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DegenerateReason {
    TargetAtOrigin,
    NonFiniteTarget,
    InsideMinimumReach { cos_knee: f64 },
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateReason::TargetAtOrigin => write!(f, "the target is at the hip origin"),
            DegenerateReason::NonFiniteTarget => write!(f, "the target is not finite"),
            DegenerateReason::InsideMinimumReach { cos_knee } => {
                write!(f, "the target is inside the minimum reach (knee cosine {:.6})", cos_knee)
            }
        }
    }
}
