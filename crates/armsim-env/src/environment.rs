//! The simulated room.

use armsim_kinematics::{noodle_arm, simple_human_arm, Arm};
use armsim_math::{Point3, Vec3};
use armsim_objects::{Ball, ObjectId, Obstacle, ScoreRing, StaticObject, Target};
use slotmap::SlotMap;
use tracing::{debug, info, warn};

use crate::config::{EnvConfig, PhysicsConfig, RobotSpec};
use crate::error::EnvError;

/// What a flying ball ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// A boundary plane of the room, on the given axis (0 = x).
    Wall {
        /// Axis whose lower or upper bound was crossed.
        axis: usize,
    },
    /// The static object at this index.
    Static {
        /// Index into [`Environment::static_objects`].
        index: usize,
    },
}

/// A bounded room holding balls, static objects and an optional arm.
///
/// The room spans `[0, dimensions[i]]` on each axis. Each [`step`] first
/// integrates every ball, then tests each flying ball against the static
/// objects and the walls, attaching it where it hits. A collision only
/// stops the ball involved; the rest of the tick proceeds.
///
/// Balls held by the arm follow the end effector after every joint
/// update made through the environment.
///
/// [`step`]: Environment::step
#[derive(Debug, Clone)]
pub struct Environment {
    physics: PhysicsConfig,
    balls: SlotMap<ObjectId, Ball>,
    statics: Vec<StaticObject>,
    robot: Option<Arm>,
    time: f64,
}

impl Environment {
    /// Create an empty room.
    pub fn new(physics: PhysicsConfig) -> Result<Self, EnvError> {
        physics.validate()?;
        Ok(Self {
            physics,
            balls: SlotMap::with_key(),
            statics: Vec::new(),
            robot: None,
            time: 0.0,
        })
    }

    /// Create an empty room with default physics.
    pub fn with_dimensions(dimensions: [f64; 3]) -> Result<Self, EnvError> {
        Self::new(PhysicsConfig::with_dimensions(dimensions))
    }

    /// Build a populated room from a configuration.
    pub fn from_config(config: &EnvConfig) -> Result<Self, EnvError> {
        let mut env = Self::new(config.physics.clone())?;
        let scene = &config.scene;

        for spec in &scene.obstacles {
            let obstacle = Obstacle::from_corners(Point3::from(spec.min), Point3::from(spec.max))?;
            env.add_static(obstacle);
        }
        for spec in &scene.targets {
            let mut target = Target::new(Point3::from(spec.center), spec.radius)?;
            if !spec.rings.is_empty() {
                let rings = spec
                    .rings
                    .iter()
                    .map(|r| ScoreRing {
                        radius: r.radius,
                        score: r.score,
                    })
                    .collect();
                target = target.with_rings(rings)?;
            }
            env.add_static(target);
        }

        if let Some(spec) = &scene.robot {
            let arm = build_robot(spec)?;
            env.set_robot(arm);
        }

        for spec in &scene.balls {
            let id = env.add_ball(Ball::new(Point3::from(spec.position), spec.radius)?);
            if spec.held {
                env.hold(id)?;
            }
        }
        Ok(env)
    }

    /// Parse a TOML document and build the room it describes.
    pub fn from_toml_str(s: &str) -> Result<Self, EnvError> {
        Self::from_config(&EnvConfig::from_toml_str(s)?)
    }

    /// Install `arm` and return the environment.
    pub fn with_robot(mut self, arm: Arm) -> Self {
        self.set_robot(arm);
        self
    }

    /// Install `arm`, replacing any previous one.
    ///
    /// The arm gets the configured link thickness and history cap.
    pub fn set_robot(&mut self, arm: Arm) {
        let mut arm = arm.with_link_thickness(self.physics.link_thickness);
        if let Some(max) = self.physics.max_history {
            arm = arm.with_max_history(max);
        }
        self.robot = Some(arm);
        self.sync_held();
    }

    /// Add a ball to the room.
    pub fn add_ball(&mut self, ball: Ball) -> ObjectId {
        self.balls.insert(ball)
    }

    /// Add a static object, returning its index.
    pub fn add_static(&mut self, object: impl Into<StaticObject>) -> usize {
        self.statics.push(object.into());
        self.statics.len() - 1
    }

    /// Numeric settings.
    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Room extents.
    pub fn dimensions(&self) -> [f64; 3] {
        self.physics.dimensions
    }

    /// Simulated seconds elapsed.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// A ball by id.
    pub fn ball(&self, id: ObjectId) -> Option<&Ball> {
        self.balls.get(id)
    }

    /// All balls.
    pub fn balls(&self) -> impl Iterator<Item = (ObjectId, &Ball)> {
        self.balls.iter()
    }

    /// Static objects, in insertion order.
    pub fn static_objects(&self) -> &[StaticObject] {
        &self.statics
    }

    /// The arm, if any.
    pub fn robot(&self) -> Option<&Arm> {
        self.robot.as_ref()
    }

    /// Advance one tick.
    ///
    /// Returns the balls that landed during this tick and what they hit.
    pub fn step(&mut self) -> Vec<(ObjectId, Contact)> {
        let dt = self.physics.dt;
        let gravity = self.physics.gravity;
        for ball in self.balls.values_mut() {
            ball.step_with_gravity(dt, gravity);
        }

        let mut landed = Vec::new();
        for (id, ball) in self.balls.iter_mut() {
            if ball.is_attached() {
                continue;
            }
            let position = ball.position();
            let contact = find_contact(&self.statics, &self.physics.dimensions, &position, ball.radius());
            if let Some(contact) = contact {
                ball.attach();
                debug!(?id, ?contact, x = position.x, y = position.y, z = position.z, "ball landed");
                landed.push((id, contact));
            }
        }

        self.sync_held();
        self.time += dt;
        landed
    }

    /// Advance `duration` seconds, rounded to whole ticks.
    ///
    /// Returns every landing, in order. A negative or non-finite `duration` runs no ticks.
    pub fn run(&mut self, duration: f64) -> Vec<(ObjectId, Contact)> {
        if !duration.is_finite() {
            warn!(duration, "ignoring non-finite run duration");
            return Vec::new();
        }
        let ticks = (duration / self.physics.dt).round().max(0.0) as usize;
        let mut landed = Vec::new();
        for _ in 0..ticks {
            landed.extend(self.step());
        }
        let flying = self.balls.values().filter(|b| !b.is_attached()).count();
        info!(ticks, landed = landed.len(), flying, time = self.time, "run finished");
        landed
    }

    /// Where a ball released right now would first hit something, using
    /// the configured horizon and resolution.
    pub fn hypothetical_landing_position(&self) -> Result<Option<Point3>, EnvError> {
        self.hypothetical_landing_position_with(self.physics.landing_horizon, self.physics.landing_resolution)
    }

    /// Forecast a release from the current end-effector position and
    /// velocity, sampling `resolution` steps over `horizon` seconds.
    ///
    /// The sphere takes the radius of the ball [`release`](Self::release)
    /// would throw, or zero when the hand is empty. Nothing in the
    /// environment changes. Returns `None` if no static object or wall is
    /// reached within the horizon.
    pub fn hypothetical_landing_position_with(
        &self,
        horizon: f64,
        resolution: usize,
    ) -> Result<Option<Point3>, EnvError> {
        let robot = self.robot.as_ref().ok_or(EnvError::NoRobot)?;
        if resolution == 0 || !(horizon.is_finite() && horizon > 0.0) {
            return Err(EnvError::Config(format!(
                "landing prediction needs a positive horizon and resolution, got {horizon} / {resolution}"
            )));
        }

        let radius = robot
            .held()
            .last()
            .and_then(|id| self.balls.get(*id))
            .map_or(0.0, Ball::radius);
        let dt = horizon / resolution as f64;
        let mut position = robot.pose().position();
        let mut velocity = robot.end_effector_velocity();
        for _ in 0..resolution {
            velocity.z += self.physics.gravity * dt;
            position += velocity * dt;
            if find_contact(&self.statics, &self.physics.dimensions, &position, radius).is_some() {
                return Ok(Some(position));
            }
        }
        Ok(None)
    }

    /// Set every joint angle, optionally recording the configuration.
    pub fn update_angles(&mut self, q: &[f64], save: bool) -> Result<(), EnvError> {
        self.robot_mut()?.update_angles(q, save)?;
        self.sync_held();
        Ok(())
    }

    /// Set one joint angle, optionally recording the configuration.
    pub fn update_link_angle(&mut self, link: usize, theta: f64, save: bool) -> Result<(), EnvError> {
        self.robot_mut()?.update_link_angle(link, theta, save)?;
        self.sync_held();
        Ok(())
    }

    /// Accelerate one joint for a single tick.
    pub fn update_link_velocity(&mut self, link: usize, accel: f64) -> Result<(), EnvError> {
        let dt = self.physics.dt;
        self.robot_mut()?.update_link_velocity(link, accel, dt)?;
        self.sync_held();
        Ok(())
    }

    /// Run inverse kinematics on the arm.
    ///
    /// Held balls follow the arm to its final iterate, also when the
    /// solver fails.
    pub fn ikine(&mut self, target: &Point3, max_iters: usize, alpha: f64) -> Result<Vec<f64>, EnvError> {
        let result = self.robot_mut()?.ikine(target, max_iters, alpha);
        self.sync_held();
        Ok(result?)
    }

    /// Return the arm to its resting configuration.
    pub fn reset_robot(&mut self) -> Result<(), EnvError> {
        self.robot_mut()?.reset();
        self.sync_held();
        Ok(())
    }

    /// Put a ball in the arm's hand.
    pub fn hold(&mut self, id: ObjectId) -> Result<(), EnvError> {
        let robot = self.robot.as_mut().ok_or(EnvError::NoRobot)?;
        let ball = self.balls.get_mut(id).ok_or(EnvError::UnknownObject)?;
        ball.attach();
        robot.hold(id);
        self.sync_held();
        Ok(())
    }

    /// Throw the most recently held ball with the current end-effector
    /// velocity.
    pub fn release(&mut self) -> Result<ObjectId, EnvError> {
        let robot = self.robot.as_mut().ok_or(EnvError::NoRobot)?;
        let (id, velocity) = robot.release(None)?;
        let ball = self.balls.get_mut(id).ok_or(EnvError::UnknownObject)?;
        ball.throw(velocity);
        Ok(id)
    }

    /// Throw a ball with an explicit velocity, taking it out of the
    /// arm's hand first if needed.
    pub fn throw(&mut self, id: ObjectId, velocity: Vec3) -> Result<(), EnvError> {
        if !self.balls.contains_key(id) {
            return Err(EnvError::UnknownObject);
        }
        if let Some(robot) = self.robot.as_mut() {
            if let Some(index) = robot.held().iter().position(|h| *h == id) {
                robot.release(Some(index))?;
            }
        }
        if let Some(ball) = self.balls.get_mut(id) {
            ball.throw(velocity);
        }
        Ok(())
    }

    /// Whether any link of the arm touches a static object.
    pub fn robot_in_collision(&self) -> Result<bool, EnvError> {
        let robot = self.robot.as_ref().ok_or(EnvError::NoRobot)?;
        Ok(self.statics.iter().any(|object| robot.is_in_collision(object)))
    }

    /// Score of a ball's leading point on the target at `target_index`.
    pub fn score(&self, id: ObjectId, target_index: usize) -> Result<f64, EnvError> {
        let ball = self.balls.get(id).ok_or(EnvError::UnknownObject)?;
        let target = self
            .statics
            .get(target_index)
            .and_then(StaticObject::as_target)
            .ok_or(EnvError::NotATarget(target_index))?;
        Ok(target.get_score(&ball.leading_point()))
    }

    fn robot_mut(&mut self) -> Result<&mut Arm, EnvError> {
        self.robot.as_mut().ok_or(EnvError::NoRobot)
    }

    fn sync_held(&mut self) {
        let Some(robot) = self.robot.as_ref() else {
            return;
        };
        let tip = robot.pose().position();
        for id in robot.held() {
            if let Some(ball) = self.balls.get_mut(*id) {
                ball.carry_to(tip);
            }
        }
    }
}

/// First thing a sphere at `position` touches: static objects in order,
/// then the walls.
fn find_contact(statics: &[StaticObject], dimensions: &[f64; 3], position: &Point3, radius: f64) -> Option<Contact> {
    if let Some(index) = statics
        .iter()
        .position(|object| object.is_hit_by_sphere(position, radius))
    {
        return Some(Contact::Static { index });
    }
    (0..3)
        .find(|&axis| position[axis] <= 0.0 || position[axis] >= dimensions[axis])
        .map(|axis| Contact::Wall { axis })
}

fn build_robot(spec: &RobotSpec) -> Result<Arm, EnvError> {
    let arm = match spec {
        RobotSpec::SimpleHuman { upper, fore, q0, base } => {
            simple_human_arm(*upper, *fore, q0.clone(), Some(Point3::from(*base)))?
        }
        RobotSpec::Noodle { segments, q0, base } => noodle_arm(segments, q0.clone(), Some(Point3::from(*base)))?,
    };
    Ok(arm)
}
