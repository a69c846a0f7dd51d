//! Error types for kinematic chains.

use thiserror::Error;

/// Errors that can occur while building or driving a kinematic chain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// A chain needs at least one link.
    #[error("Kinematic chain has no links")]
    EmptyChain,

    /// A joint vector does not match the number of links.
    #[error("Expected {expected} joint values, got {got}")]
    JointCountMismatch {
        /// Number of links in the chain.
        expected: usize,
        /// Length of the supplied vector.
        got: usize,
    },

    /// A link index is past the end of the chain.
    #[error("Link {index} out of range for a chain of {count} links")]
    LinkOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of links.
        count: usize,
    },

    /// Inverse kinematics ran out of iterations.
    #[error("Inverse kinematics did not converge after {iterations} iterations (residual {residual:e})")]
    ConvergenceFailure {
        /// Iterations performed.
        iterations: usize,
        /// Distance to the target when the solver stopped.
        residual: f64,
    },

    /// The Jacobian could not be pseudo-inverted.
    #[error("Singular Jacobian at configuration {0:?}")]
    SingularJacobian(Vec<f64>),

    /// `release` was called with nothing held.
    #[error("Arm is not holding object {0}")]
    NothingHeld(usize),

    /// A persisted joint path could not be read.
    #[error("Malformed joint path: {0}")]
    Path(String),
}
