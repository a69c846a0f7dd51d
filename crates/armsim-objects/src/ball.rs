//! Throwable balls.

use armsim_math::{Point3, Vec3};

use crate::error::GeometryError;

/// Gravitational acceleration along z (m/s^2).
pub const GRAVITY: f64 = -9.81;

/// A spherical free body.
///
/// A ball is either attached (resting, or carried by an arm) or flying.
/// While attached its velocity is zero and [`Ball::step`] does nothing.
/// Every position the ball takes is appended to its trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    position: Point3,
    velocity: Vec3,
    radius: f64,
    attached: bool,
    positions: Vec<Point3>,
}

impl Ball {
    /// Create a resting ball.
    pub fn new(position: Point3, radius: f64) -> Result<Self, GeometryError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self {
            position,
            velocity: Vec3::zeros(),
            radius,
            attached: true,
            positions: vec![position],
        })
    }

    /// Current centre.
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Current velocity.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Radius of the ball.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Whether the ball is attached (not flying).
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Every position taken so far, oldest first.
    pub fn trajectory(&self) -> &[Point3] {
        &self.positions
    }

    /// Most recent point of the trajectory.
    pub fn leading_point(&self) -> Point3 {
        self.position
    }

    /// Release the ball with the given velocity.
    pub fn throw(&mut self, velocity: Vec3) {
        self.attached = false;
        self.velocity = velocity;
    }

    /// Stop the ball where it is.
    pub fn attach(&mut self) {
        self.attached = true;
        self.velocity = Vec3::zeros();
    }

    /// Advance one explicit-Euler step of `dt` seconds under [`GRAVITY`].
    pub fn step(&mut self, dt: f64) {
        self.step_with_gravity(dt, GRAVITY);
    }

    /// Advance one explicit-Euler step with a custom z acceleration.
    ///
    /// Velocity is updated before position.
    pub fn step_with_gravity(&mut self, dt: f64, gravity: f64) {
        if self.attached {
            return;
        }
        self.velocity.z += gravity * dt;
        self.position += self.velocity * dt;
        self.positions.push(self.position);
    }

    /// Move an attached ball, e.g. to follow an end effector.
    ///
    /// Flying balls only move through [`Ball::step`]; the request is
    /// ignored for them.
    pub fn carry_to(&mut self, position: Point3) {
        if !self.attached {
            return;
        }
        if position != self.position {
            self.position = position;
            self.positions.push(position);
        }
    }
}
