//! Environment configuration.
//!
//! An [`EnvConfig`] has two parts: [`PhysicsConfig`] (room size, time
//! step, gravity, prediction settings) and an optional [`SceneConfig`]
//! describing the objects and robot to place in the room. Both load from
//! TOML:
//!
//! ```toml
//! [physics]
//! dimensions = [10.0, 10.0, 20.0]
//! dt = 0.01
//!
//! [[scene.obstacles]]
//! min = [1.0, 2.0, 1.0]
//! max = [2.0, 2.5, 1.5]
//!
//! [[scene.targets]]
//! center = [2.0, 10.0, 2.0]
//! radius = 0.5
//!
//! [[scene.balls]]
//! position = [2.5, 2.5, 2.0]
//! radius = 0.25
//!
//! [scene.robot]
//! kind = "simple_human"
//! upper = 2.0
//! fore = 2.0
//! q0 = [0.0, 0.0, 0.0, 1.5707963, 0.0]
//! base = [3.0, 1.0, 0.0]
//! ```

use armsim_objects::GRAVITY;
use serde::{Deserialize, Serialize};

use crate::error::EnvError;

/// Numeric settings of the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Room extents; the room spans `[0, dimensions[i]]` on each axis.
    pub dimensions: [f64; 3],
    /// Length of one environment tick (seconds).
    pub dt: f64,
    /// Acceleration along z (m/s^2).
    pub gravity: f64,
    /// How far ahead landing predictions look (seconds).
    pub landing_horizon: f64,
    /// Number of samples a landing prediction takes over the horizon.
    pub landing_resolution: usize,
    /// Joint sphere radius for arm collision tests.
    pub link_thickness: f64,
    /// Cap on the arm's recorded joint history.
    pub max_history: Option<usize>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            dimensions: [10.0, 10.0, 10.0],
            dt: 0.01,
            gravity: GRAVITY,
            landing_horizon: 15.0,
            landing_resolution: 5000,
            link_thickness: armsim_kinematics::DEFAULT_LINK_THICKNESS,
            max_history: None,
        }
    }
}

impl PhysicsConfig {
    /// Same defaults with different room extents.
    pub fn with_dimensions(dimensions: [f64; 3]) -> Self {
        Self {
            dimensions,
            ..Default::default()
        }
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.dimensions.iter().any(|d| !(d.is_finite() && *d > 0.0)) {
            return Err(EnvError::Config(format!(
                "room dimensions must be positive, got {:?}",
                self.dimensions
            )));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(EnvError::Config(format!("dt must be positive, got {}", self.dt)));
        }
        if !self.gravity.is_finite() {
            return Err(EnvError::Config("gravity must be finite".to_string()));
        }
        if !(self.landing_horizon.is_finite() && self.landing_horizon > 0.0) {
            return Err(EnvError::Config(format!(
                "landing horizon must be positive, got {}",
                self.landing_horizon
            )));
        }
        if self.landing_resolution == 0 {
            return Err(EnvError::Config("landing resolution must be non-zero".to_string()));
        }
        if !(self.link_thickness.is_finite() && self.link_thickness >= 0.0) {
            return Err(EnvError::Config(format!(
                "link thickness must be non-negative, got {}",
                self.link_thickness
            )));
        }
        Ok(())
    }
}

/// An axis-aligned box given by two opposite corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    /// One corner.
    pub min: [f64; 3],
    /// The opposite corner.
    pub max: [f64; 3],
}

/// One scoring ring of a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingSpec {
    /// Outer radius.
    pub radius: f64,
    /// Points inside the ring.
    pub score: f64,
}

/// A scoring disc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Disc centre.
    pub center: [f64; 3],
    /// Disc radius.
    pub radius: f64,
    /// Custom rings, innermost first; default rings when empty.
    #[serde(default)]
    pub rings: Vec<RingSpec>,
}

/// A ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallSpec {
    /// Initial centre.
    pub position: [f64; 3],
    /// Ball radius.
    pub radius: f64,
    /// Start in the robot's hand.
    #[serde(default)]
    pub held: bool,
}

/// One of the predefined arm layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RobotSpec {
    /// [`armsim_kinematics::simple_human_arm`].
    SimpleHuman {
        /// Upper arm length.
        upper: f64,
        /// Forearm length.
        fore: f64,
        /// Resting configuration.
        q0: Vec<f64>,
        /// Base position.
        #[serde(default)]
        base: [f64; 3],
    },
    /// [`armsim_kinematics::noodle_arm`].
    Noodle {
        /// Segment lengths, base first.
        segments: Vec<f64>,
        /// Resting configuration.
        q0: Vec<f64>,
        /// Base position.
        #[serde(default)]
        base: [f64; 3],
    },
}

/// Objects to place in the room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Box obstacles.
    pub obstacles: Vec<ObstacleSpec>,
    /// Scoring targets.
    pub targets: Vec<TargetSpec>,
    /// Balls.
    pub balls: Vec<BallSpec>,
    /// Robot arm.
    pub robot: Option<RobotSpec>,
}

/// Complete environment description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Numeric settings.
    pub physics: PhysicsConfig,
    /// Room contents.
    pub scene: SceneConfig,
}

impl EnvConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, EnvError> {
        let config: EnvConfig = toml::from_str(s).map_err(|e| EnvError::Config(e.to_string()))?;
        config.physics.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = EnvConfig::from_toml_str("").unwrap();
        assert_eq!(config, EnvConfig::default());
        assert_eq!(config.physics.dimensions, [10.0, 10.0, 10.0]);
        assert_eq!(config.physics.landing_resolution, 5000);
        assert_eq!(config.physics.gravity, GRAVITY);
    }

    #[test]
    fn test_parse_full_scene() {
        let doc = r#"
            [physics]
            dimensions = [10.0, 10.0, 20.0]
            dt = 0.005
            max_history = 100

            [[scene.obstacles]]
            min = [1.0, 2.0, 1.0]
            max = [2.0, 2.5, 1.5]

            [[scene.targets]]
            center = [2.0, 10.0, 2.0]
            radius = 0.5
            rings = [{ radius = 0.25, score = 5.0 }, { radius = 0.5, score = 1.0 }]

            [[scene.balls]]
            position = [2.5, 2.5, 2.0]
            radius = 0.25
            held = true

            [scene.robot]
            kind = "simple_human"
            upper = 2.0
            fore = 1.0
            q0 = [0.0, 0.0, 0.0, 0.0, 0.0]
            base = [3.0, 1.0, 0.0]
        "#;
        let config = EnvConfig::from_toml_str(doc).unwrap();
        assert_eq!(config.physics.dimensions, [10.0, 10.0, 20.0]);
        assert_eq!(config.physics.dt, 0.005);
        assert_eq!(config.physics.max_history, Some(100));
        assert_eq!(config.physics.landing_horizon, 15.0);
        assert_eq!(config.scene.obstacles.len(), 1);
        assert_eq!(config.scene.targets[0].rings.len(), 2);
        assert!(config.scene.balls[0].held);
        assert!(matches!(
            config.scene.robot,
            Some(RobotSpec::SimpleHuman { upper, .. }) if upper == 2.0
        ));
    }

    #[test]
    fn test_noodle_robot_spec() {
        let doc = r#"
            [scene.robot]
            kind = "noodle"
            segments = [1.0, 2.0, 1.0]
            q0 = [0.0, 0.0, 0.0]
        "#;
        let config = EnvConfig::from_toml_str(doc).unwrap();
        match config.scene.robot {
            Some(RobotSpec::Noodle { segments, base, .. }) => {
                assert_eq!(segments, vec![1.0, 2.0, 1.0]);
                assert_eq!(base, [0.0, 0.0, 0.0]);
            }
            other => panic!("unexpected robot {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EnvConfig::from_toml_str("[physics]\ndt = 0.0"),
            Err(EnvError::Config(_))
        ));
        assert!(EnvConfig::from_toml_str("[physics]\ndimensions = [1.0, -1.0, 1.0]").is_err());
        assert!(EnvConfig::from_toml_str("[physics]\nlanding_resolution = 0").is_err());
        assert!(EnvConfig::from_toml_str("[physics]\ndt = \"fast\"").is_err());
        assert!(EnvConfig::from_toml_str("[scene.robot]\nkind = \"tentacle\"").is_err());
    }
}
