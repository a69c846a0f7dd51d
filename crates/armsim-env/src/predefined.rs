//! Ready-made rooms used by the planning and throwing experiments.

use std::f64::consts::FRAC_PI_2;

use armsim_kinematics::{noodle_arm, simple_human_arm};
use armsim_math::Point3;
use armsim_objects::{Ball, Obstacle, Target};

use crate::config::PhysicsConfig;
use crate::environment::Environment;
use crate::error::EnvError;

/// Names accepted by [`predefined`].
pub const PREDEFINED_NAMES: [&str; 6] = ["easy", "medium", "hard", "very_hard", "noodle", "throwing"];

const ROOM: [f64; 3] = [10.0, 10.0, 10.0];

/// Build a predefined room by name.
pub fn predefined(name: &str) -> Result<Environment, EnvError> {
    match name {
        "easy" => easy(),
        "medium" => medium(),
        "hard" => hard(),
        "very_hard" => very_hard(),
        "noodle" => noodle(),
        "throwing" => throwing(),
        _ => Err(EnvError::UnknownEnvironment(name.to_string())),
    }
}

/// Two low boxes beside a resting ball; the arm starts with a bent elbow.
pub fn easy() -> Result<Environment, EnvError> {
    let arm = simple_human_arm(2.0, 2.0, vec![0.0, 0.0, 0.0, FRAC_PI_2, 0.0], Some(Point3::new(3.0, 1.0, 0.0)))?;
    Ok(planning_room(
        &[([1.0, 2.0, 1.0], [2.0, 2.5, 1.5]), ([3.0, 2.0, 1.0], [4.0, 2.5, 1.5])],
        Ball::new(Point3::new(2.5, 2.5, 2.0), 0.25)?,
    )?
    .with_robot(arm))
}

/// One box overhanging the arm's shoulder.
pub fn medium() -> Result<Environment, EnvError> {
    let arm = simple_human_arm(2.0, 2.0, vec![0.0; 5], Some(Point3::new(3.0, 1.0, 0.0)))?;
    Ok(planning_room(
        &[([2.5, 0.0, 2.2], [3.5, 1.0, 2.5]), ([3.0, 2.0, 1.0], [4.0, 2.5, 1.5])],
        Ball::new(Point3::new(2.5, 2.5, 2.0), 0.25)?,
    )?
    .with_robot(arm))
}

/// The ball sits in a five-sided cubby.
pub fn hard() -> Result<Environment, EnvError> {
    let arm = simple_human_arm(3.0, 2.0, vec![0.0, 0.0, 0.0, -FRAC_PI_2, 0.0], Some(Point3::new(1.0, 1.0, 0.0)))?;
    Ok(planning_room(
        &[
            ([0.0, 2.0, 0.0], [1.5, 2.5, 3.0]),
            ([0.0, 4.0, 0.0], [1.5, 4.5, 3.0]),
            ([0.0, 2.5, 0.0], [0.5, 4.0, 3.0]),
            ([0.0, 2.0, 3.0], [1.5, 4.5, 3.5]),
            ([0.5, 2.5, 0.0], [1.5, 4.0, 1.0]),
        ],
        Ball::new(Point3::new(1.0, 3.25, 2.0), 0.5)?,
    )?
    .with_robot(arm))
}

/// Tall walls between the arm and the ball.
pub fn very_hard() -> Result<Environment, EnvError> {
    let arm = simple_human_arm(2.0, 2.0, vec![0.0; 5], Some(Point3::new(3.0, 3.0, 0.0)))?;
    Ok(planning_room(
        &[
            ([2.5, 2.0, 0.0], [4.0, 2.5, 4.0]),
            ([1.5, 2.0, 0.0], [2.5, 3.5, 4.0]),
            ([3.2, 3.5, 0.0], [5.5, 4.0, 4.0]),
        ],
        Ball::new(Point3::new(2.8, 3.8, 2.0), 0.25)?,
    )?
    .with_robot(arm))
}

/// A ten-segment noodle arm weaving between scattered boxes.
pub fn noodle() -> Result<Environment, EnvError> {
    let segments = [1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0];
    let arm = noodle_arm(&segments, vec![0.0; segments.len()], Some(Point3::new(3.0, 1.0, 0.0)))?;
    Ok(planning_room(
        &[
            ([0.0, 2.0, 0.0], [1.5, 2.5, 3.0]),
            ([4.0, 4.0, 0.0], [4.5, 4.5, 3.0]),
            ([5.0, 0.0, 2.0], [5.5, 0.5, 3.0]),
            ([2.0, 2.0, 3.0], [5.0, 2.5, 3.5]),
            // corners given top-down
            ([3.0, 4.5, 6.0], [7.0, 6.0, 5.0]),
        ],
        Ball::new(Point3::new(5.0, 5.0, 3.0), 0.5)?,
    )?
    .with_robot(arm))
}

/// A tall room with a target on the far wall and a ball in the arm's hand.
pub fn throwing() -> Result<Environment, EnvError> {
    let arm = simple_human_arm(2.0, 2.0, vec![0.0; 5], Some(Point3::new(2.0, 2.0, 4.0)))?;
    let mut env = Environment::new(PhysicsConfig::with_dimensions([10.0, 10.0, 50.0]))?.with_robot(arm);
    env.add_static(Target::new(Point3::new(2.0, 10.0, 2.0), 0.5)?);
    let ball = env.add_ball(Ball::new(Point3::origin(), 0.15)?);
    env.hold(ball)?;
    Ok(env)
}

fn planning_room(obstacles: &[([f64; 3], [f64; 3])], ball: Ball) -> Result<Environment, EnvError> {
    let mut env = Environment::with_dimensions(ROOM)?;
    for (a, b) in obstacles {
        env.add_static(Obstacle::from_corners(Point3::from(*a), Point3::from(*b))?);
    }
    env.add_ball(ball);
    Ok(env)
}
