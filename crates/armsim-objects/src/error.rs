//! Error types for object construction.

use thiserror::Error;

/// Errors raised when an object is built from inconsistent geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The minimum corner of a box exceeds the maximum corner on some axis.
    #[error("Invalid obstacle corners: min {min:?} is not below max {max:?}")]
    InvalidCorners {
        /// Requested minimum corner.
        min: [f64; 3],
        /// Requested maximum corner.
        max: [f64; 3],
    },

    /// A radius is negative, zero or not finite.
    #[error("Invalid radius: {0}")]
    InvalidRadius(f64),

    /// Scoring rings are not sorted by radius or gain score outward.
    #[error("Invalid scoring rings: {0}")]
    InvalidRings(String),
}
