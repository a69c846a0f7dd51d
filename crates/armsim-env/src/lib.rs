#![warn(missing_docs)]

//! Discrete-time room simulation for armsim.
//!
//! An [`Environment`] owns a bounded room, the balls and static objects
//! inside it and an optional robot [`Arm`](armsim_kinematics::Arm). It
//! drives the balls through time, stops them where they hit something and
//! keeps held balls in the arm's hand.
//!
//! # Features
//!
//! - Fixed-step ball integration under configurable gravity
//! - Sphere collision against obstacles, targets and the room walls
//! - Hold/release of balls by the arm, thrown with the end-effector velocity
//! - Side-effect-free landing prediction for planners
//! - TOML scene descriptions and a set of predefined rooms
//!
//! # Example
//!
//! ```
//! use armsim_env::predefined;
//!
//! let mut env = predefined("throwing").unwrap();
//! env.update_link_velocity(1, 150.0).unwrap();
//! let forecast = env.hypothetical_landing_position().unwrap();
//! env.release().unwrap();
//! let landed = env.run(5.0);
//! assert_eq!(landed.len(), 1);
//! assert!(forecast.is_some());
//! ```

mod config;
mod environment;
mod error;
mod predefined;

pub use config::{BallSpec, EnvConfig, ObstacleSpec, PhysicsConfig, RingSpec, RobotSpec, SceneConfig, TargetSpec};
pub use environment::{Contact, Environment};
pub use error::EnvError;
pub use predefined::{easy, hard, medium, noodle, predefined, throwing, very_hard, PREDEFINED_NAMES};
