#![warn(missing_docs)]

//! Kinematic chains for armsim.
//!
//! An [`Arm`] is an ordered chain of revolute Denavit-Hartenberg
//! [`Link`]s between a base frame and a tool frame. It provides
//!
//! - forward kinematics over the whole chain or a prefix,
//! - the manipulator Jacobian in tool and world frames,
//! - pseudo-inverse inverse kinematics towards a point,
//! - joint velocity integration and link-versus-obstacle collision,
//! - a recorded [`JointPath`] history that can be exported and replayed.
//!
//! # Example
//!
//! ```
//! use armsim_kinematics::{simple_human_arm, IK_MAX_ITERATIONS};
//! use armsim_math::Point3;
//!
//! let q0 = vec![0.0, std::f64::consts::FRAC_PI_4, 0.0, -std::f64::consts::FRAC_PI_4, 0.0];
//! let mut arm = simple_human_arm(2.0, 1.0, q0, None).unwrap();
//! let q = arm.ikine(&Point3::new(1.0, 1.0, 1.0), IK_MAX_ITERATIONS, 0.5).unwrap();
//! assert_eq!(q.len(), 5);
//! ```

mod arm;
mod error;
mod link;
mod path;
mod robots;

pub use arm::{Arm, IK_DEFAULT_STEP, IK_MAX_ITERATIONS, IK_TOLERANCE};
pub use error::KinematicsError;
pub use link::{Link, DEFAULT_LINK_THICKNESS, DEFAULT_MAX_VELOCITY, SEGMENT_SAMPLES};
pub use path::JointPath;
pub use robots::{noodle_arm, simple_human_arm};
