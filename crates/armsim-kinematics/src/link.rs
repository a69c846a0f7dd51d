//! A single Denavit-Hartenberg link.

use armsim_math::{wrap_angle, Point3, Transform};
use armsim_objects::StaticObject;

/// Radius of the sphere used to test a joint against obstacles.
pub const DEFAULT_LINK_THICKNESS: f64 = 0.1;

/// Default joint speed limit (rad/s).
pub const DEFAULT_MAX_VELOCITY: f64 = 2.0;

/// Number of samples taken along a link's segment for collision tests.
pub const SEGMENT_SAMPLES: usize = 100;

/// One revolute joint and the rigid segment that follows it.
///
/// `offset`, `length` and `twist` are the constant DH parameters `d`,
/// `a` and `alpha`; `theta` is the joint variable. `transform` always
/// equals the DH matrix for the current `theta`.
///
/// `base_pos`/`end_pos` are world positions and are owned by the
/// [`Arm`](crate::Arm), which rewrites them whenever any joint moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    theta: f64,
    offset: f64,
    length: f64,
    twist: f64,
    velocity: f64,
    max_velocity: f64,
    transform: Transform,
    base_pos: Point3,
    end_pos: Point3,
}

impl Link {
    /// Create a link from its initial angle and DH parameters.
    pub fn new(theta: f64, offset: f64, length: f64, twist: f64) -> Self {
        Self {
            theta,
            offset,
            length,
            twist,
            velocity: 0.0,
            max_velocity: DEFAULT_MAX_VELOCITY,
            transform: Transform::denavit_hartenberg(theta, offset, length, twist),
            base_pos: Point3::origin(),
            end_pos: Point3::origin(),
        }
    }

    /// Override the joint speed limit.
    pub fn with_max_velocity(mut self, max_velocity: f64) -> Self {
        self.max_velocity = max_velocity.abs();
        self
    }

    /// Current joint angle.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// DH offset `d`.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// DH length `a`.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// DH twist `alpha`.
    pub fn twist(&self) -> f64 {
        self.twist
    }

    /// Current joint velocity.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Joint speed limit.
    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    /// Local transform for the current angle.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// World position of the joint.
    pub fn base_pos(&self) -> Point3 {
        self.base_pos
    }

    /// World position of the far end of the segment.
    pub fn end_pos(&self) -> Point3 {
        self.end_pos
    }

    /// Local transform for an arbitrary angle, leaving the link untouched.
    pub fn transform_at(&self, theta: f64) -> Transform {
        Transform::denavit_hartenberg(theta, self.offset, self.length, self.twist)
    }

    /// Set the joint angle and recompute the local transform.
    ///
    /// World positions are not touched; go through the arm for that.
    pub fn set_theta(&mut self, theta: f64) {
        self.theta = theta;
        self.transform = self.transform_at(theta);
    }

    /// Integrate `accel` over `dt` into the joint velocity (clamped to the
    /// speed limit), then the velocity into the angle (wrapped to
    /// `(-pi, pi]`).
    pub fn integrate(&mut self, accel: f64, dt: f64) {
        self.velocity = (self.velocity + accel * dt).clamp(-self.max_velocity, self.max_velocity);
        self.set_theta(wrap_angle(self.theta + self.velocity * dt));
    }

    /// Zero the joint velocity.
    pub fn reset_velocity(&mut self) {
        self.velocity = 0.0;
    }

    /// Whether the segment has any physical extent.
    pub fn has_extent(&self) -> bool {
        (self.end_pos - self.base_pos).norm() > f64::EPSILON
    }

    /// Two-phase collision test against a static object.
    ///
    /// First the joint is tested as a sphere of radius `thickness`; if
    /// that misses and the segment has extent, evenly spaced samples along
    /// `base_pos -> end_pos` are point-tested.
    pub fn is_in_collision(&self, object: &StaticObject, thickness: f64) -> bool {
        if object.is_hit_by_sphere(&self.base_pos, thickness) {
            return true;
        }
        if !self.has_extent() {
            return false;
        }
        object.is_hit_any(&self.segment_samples())
    }

    /// Evenly spaced points from `base_pos` to `end_pos`, both included.
    pub fn segment_samples(&self) -> Vec<Point3> {
        let step = (self.end_pos - self.base_pos) / (SEGMENT_SAMPLES - 1) as f64;
        (0..SEGMENT_SAMPLES)
            .map(|i| self.base_pos + step * i as f64)
            .collect()
    }

    pub(crate) fn set_positions(&mut self, base_pos: Point3, end_pos: Point3) {
        self.base_pos = base_pos;
        self.end_pos = end_pos;
    }
}
