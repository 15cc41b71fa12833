//!
//! Inverse kinematics and proportional joint control for a planar two-link (hip / knee)
//! hopping leg, plus the linear mapping between joint angles and actuator commands
//!

pub mod calibration;
pub mod config;
pub mod control;
pub mod kinematics;

pub use calibration::{ActuatorRange, JointCalibration, JointRange};
pub use config::LegConfig;
pub use control::hop::SineHopTarget;
pub use control::session::{ActuatorCommand, CycleOutput, LegController};
pub use control::{ConvergenceLoop, ConvergenceResult, ConvergenceSettings, GainParams};
pub use kinematics::ik::{AnalyticIkSolver, ElbowPolicy, IkSolution, Reach};
pub use kinematics::{FootTarget, JointAngles, LinkLengths};
