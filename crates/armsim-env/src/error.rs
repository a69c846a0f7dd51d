//! Error types for environments.

use armsim_kinematics::KinematicsError;
use armsim_objects::GeometryError;
use thiserror::Error;

/// Errors that can occur while building or driving an environment.
///
/// A failing call never leaves the environment mid-tick; only the request
/// itself is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvError {
    /// The operation needs a robot arm and none is present.
    #[error("Environment has no robot")]
    NoRobot,

    /// No dynamic object has this id.
    #[error("Unknown dynamic object")]
    UnknownObject,

    /// The static object at this index is not a target.
    #[error("Static object {0} is not a target")]
    NotATarget(usize),

    /// No predefined environment has this name.
    #[error("Unknown predefined environment: {0}")]
    UnknownEnvironment(String),

    /// Configuration could not be parsed or is out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid object geometry.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Kinematic chain failure (bad joint vector, IK non-convergence, ...).
    #[error(transparent)]
    Kinematics(#[from] KinematicsError),
}
