//!
//! Static session configuration for a leg
//!

pub mod error;

use error::ConfigError;
use serde::{Serialize, Deserialize};

use crate::calibration::{presets, JointCalibration};
use crate::control::session::LegController;
use crate::control::{ConvergenceLoop, ConvergenceSettings, GainParams};
use crate::kinematics::ik::ElbowPolicy;
use crate::kinematics::{JointAngles, LinkLengths};

///
/// Everything fixed for the lifetime of a control session. Every field is validated on
/// construction and on deserialisation, so a `LegConfig` is always usable.
/// All features have an associated getter function.
///
/// # Fields:
/// - `links`: The leg link lengths
/// - `gains`: The proportional gain and time step
/// - `convergence`: The convergence loop stopping criteria
/// - `elbow`: The elbow tie-break policy, defaults to flipping on a negative hip angle
/// - `hip`: The hip joint calibration
/// - `knee`: The knee joint calibration
///
#[derive(getset::Getters, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[get = "pub"]
pub struct LegConfig {
    links: LinkLengths,
    gains: GainParams,
    #[serde(default)]
    convergence: ConvergenceSettings,
    #[serde(default)]
    elbow: ElbowPolicy,
    hip: JointCalibration,
    knee: JointCalibration,
}

impl LegConfig {
    pub fn new(links: LinkLengths, gains: GainParams, convergence: ConvergenceSettings, hip: JointCalibration, knee: JointCalibration) -> LegConfig {
        LegConfig { links, gains, convergence, elbow: ElbowPolicy::default(), hip, knee }
    }

    pub fn with_elbow(mut self, elbow: ElbowPolicy) -> LegConfig {
        self.elbow = elbow;
        self
    }

    ///
    /// The simulated leg: 1.0 m and 1.2 m links with the bench calibration.
    ///
    pub fn simulation() -> Result<LegConfig, ConfigError> {
        let (l0, l1) = presets::SIM_LINKS;
        Self::with_links(l0, l1)
    }

    ///
    /// The bench monoped: 0.10 m and 0.15 m links.
    ///
    pub fn bench_leg() -> Result<LegConfig, ConfigError> {
        let (l0, l1) = presets::BENCH_LINKS;
        Self::with_links(l0, l1)
    }

    fn with_links(l0: f64, l1: f64) -> Result<LegConfig, ConfigError> {
        Ok(LegConfig::new(
            LinkLengths::new(l0, l1)?,
            GainParams::new(presets::DEFAULT_KP, presets::DEFAULT_DT)?,
            ConvergenceSettings::new(presets::DEFAULT_EPSILON, presets::DEFAULT_MAX_ITERATIONS)?,
            presets::hip()?,
            presets::knee()?,
        ))
    }

    ///
    /// Parses and validates a configuration from JSON text. Reading the text from disk is
    /// left to the caller.
    ///
    /// # Parameters:
    /// - `json`: The JSON document
    ///
    /// # Returns:
    /// - A valid `LegConfig`
    /// - `ConfigError::Parse` explaining what was wrong with the document
    ///
    pub fn from_json(json: &str) -> Result<LegConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn convergence_loop(&self) -> ConvergenceLoop {
        ConvergenceLoop::new(self.links, self.gains, self.convergence).with_policy(self.elbow)
    }

    ///
    /// Starts a control session with this configuration.
    ///
    /// # Parameters:
    /// - `initial`: The initial joint estimate
    ///
    /// # Returns:
    /// - A new `LegController`
    /// - `ConfigError::Control` if `initial` is not finite
    ///
    pub fn controller(&self, initial: JointAngles) -> Result<LegController, ConfigError> {
        Ok(LegController::new(self.convergence_loop(), self.hip, self.knee, initial)?)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const BENCH_JSON: &str = r#"{
        "links": { "l0": 0.1, "l1": 0.15 },
        "gains": { "kp": 25.0, "dt": 0.015 },
        "hip": {
            "radians": { "min": -3.141592653589793, "max": 3.141592653589793 },
            "actuator": { "min": -0.48, "max": 0.4 }
        },
        "knee": {
            "radians": { "min": -1.5707963267948966, "max": 1.5707963267948966 },
            "actuator": { "min": -0.18, "max": 0.18 }
        }
    }"#;

    #[test]
    fn parses_with_defaults() {
        let config = LegConfig::from_json(BENCH_JSON).unwrap();
        assert_eq!(config, LegConfig::bench_leg().unwrap());
        assert_eq!(*config.elbow(), ElbowPolicy::FlipOnNegativeHip);
        assert_eq!(config.convergence().max_iterations(), presets::DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn json_round_trip() {
        let config = LegConfig::simulation().unwrap().with_elbow(ElbowPolicy::Fixed);
        let parsed = LegConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn rejects_invalid_values() {
        let bad_links = BENCH_JSON.replace(r#""l0": 0.1"#, r#""l0": 0.0"#);
        assert!(matches!(LegConfig::from_json(&bad_links), Err(ConfigError::Parse(_))));

        let bad_gain = BENCH_JSON.replace(r#""kp": 25.0"#, r#""kp": -1.0"#);
        assert!(LegConfig::from_json(&bad_gain).is_err());

        let bad_range = BENCH_JSON.replace(r#""min": -0.18, "max": 0.18"#, r#""min": 0.18, "max": 0.18"#);
        assert!(LegConfig::from_json(&bad_range).is_err());

        assert!(LegConfig::from_json("{}").is_err());
    }

    #[test]
    fn controller_from_config() {
        let mut controller = LegConfig::bench_leg().unwrap().controller(JointAngles::default()).unwrap();
        let output = controller.step(&crate::kinematics::FootTarget::new(0., -0.2)).unwrap();
        assert!(output.convergence.converged);
    }
}
