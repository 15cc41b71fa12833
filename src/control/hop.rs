//!
//! Sinusoidal foot set points for hopping in place
//!

use serde::{Serialize, Deserialize};

use crate::kinematics::FootTarget;

///
/// A foot target which bobs vertically on a sine wave, holding a fixed horizontal offset.
///
/// # Fields:
/// - `x`: The fixed horizontal foot position, in metres
/// - `amplitude`: The vertical swing either side of `offset`, in metres
/// - `offset`: The centre of the swing, in metres (negative is below the hip)
/// - `angular_rate`: How fast the wave advances, in radians per second
/// - `phase`: The phase of the wave at `t = 0`, in radians
///
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SineHopTarget {
    pub x: f64,
    pub amplitude: f64,
    pub offset: f64,
    pub angular_rate: f64,
    #[serde(default)]
    pub phase: f64,
}

impl SineHopTarget {
    ///
    /// The set point used with the simulated leg, swinging between 1 m and 3 m below the hip.
    /// The lower half of the swing is past the leg's reach.
    ///
    pub fn simulation() -> SineHopTarget {
        SineHopTarget { x: 0., amplitude: 1.0, offset: -2.0, angular_rate: 1.0, phase: 0. }
    }

    /// The set point used with the bench leg.
    pub fn bench_leg() -> SineHopTarget {
        SineHopTarget { x: 0., amplitude: 0.1, offset: -0.22, angular_rate: 1.0, phase: 0. }
    }

    ///
    /// Samples the foot target.
    ///
    /// # Parameters:
    /// - `t`: The time since the start of the hop, in seconds
    ///
    /// # Returns:
    /// - The foot target at time `t`
    ///
    pub fn at(&self, t: f64) -> FootTarget {
        FootTarget::new(self.x, self.amplitude * (self.angular_rate * t + self.phase).sin() + self.offset)
    }

    /// The lowest and highest foot heights the wave visits.
    pub fn vertical_extent(&self) -> (f64, f64) {
        (self.offset - self.amplitude.abs(), self.offset + self.amplitude.abs())
    }
}
