use std::f64::consts::{PI, TAU};

use nalgebra::Vector2;

use super::{FootTarget, JointAngles, LinkLengths};

///
/// Calculates the signed shortest angular difference `a - b`, normalised into the
/// interval (-π, π]. Two angles exactly half a turn apart give `+π`.
///
/// # Parameters:
/// - `a`: The angle to move towards, in radians
/// - `b`: The angle to move from, in radians
///
/// # Returns:
/// - The wrapped difference, in radians
///
pub fn wrap_angle(a: f64, b: f64) -> f64 {
    let wrapped = PI - (PI - (a - b)).rem_euclid(TAU);

    // rem_euclid can round up to exactly TAU for tiny negative remainders
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

///
/// Converts joint angles into the position of the knee joint, relative to the hip.
///
/// # Parameters:
/// - `angles`: The hip and knee angles
/// - `links`: The leg link lengths
///
/// # Returns:
/// - A tuple containing the x and y coordinates of the knee, respectively
///
pub fn knee_position(angles: &JointAngles, links: &LinkLengths) -> (f64, f64) {
    (links.l0() * angles.theta_hip.cos(), links.l0() * angles.theta_hip.sin())
}

///
/// Converts joint angles into the foot position, relative to the hip. All lengths
/// are in metres.
///
/// # Parameters:
/// - `angles`: The hip and knee angles
/// - `links`: The leg link lengths
///
/// # Returns:
/// - A tuple containing the x and y coordinates of the foot, respectively
///
pub fn forward_kinematics(angles: &JointAngles, links: &LinkLengths) -> (f64, f64) {
    let (knee_x, knee_y) = knee_position(angles, links);
    let outer = angles.theta_hip + angles.theta_knee;

    (knee_x + links.l1() * outer.cos(), knee_y + links.l1() * outer.sin())
}

///
/// Calculates the Euclidean distance between the foot, as placed by `angles`, and a
/// target.
///
/// # Returns:
/// - The distance in metres
///
pub fn distance_to_target(angles: &JointAngles, target: &FootTarget, links: &LinkLengths) -> f64 {
    let (x, y) = forward_kinematics(angles, links);

    (Vector2::new(x, y) - Vector2::new(target.x, target.y)).norm()
}
