//! Serial-link robot arms.

use armsim_math::{pseudo_inverse, Point3, Transform, Vec3};
use armsim_objects::{ObjectId, StaticObject};
use nalgebra::{DVector, Matrix6, Matrix6xX, Vector6};
use tracing::{debug, warn};

use crate::error::KinematicsError;
use crate::link::{Link, DEFAULT_LINK_THICKNESS};
use crate::path::JointPath;

/// Distance to the target at which inverse kinematics stops.
pub const IK_TOLERANCE: f64 = 1e-6;

/// Default iteration budget for inverse kinematics.
pub const IK_MAX_ITERATIONS: usize = 1000;

/// Step size used when the requested one is outside `[0, 1]`.
pub const IK_DEFAULT_STEP: f64 = 0.1;

/// A serial chain of revolute DH links between a base and a tool frame.
///
/// The topology is fixed at construction. Every joint update runs a full
/// forward pass so link positions are never stale. Joint configurations
/// can be recorded into a [`JointPath`] history for replay.
///
/// Objects held by the arm are tracked by [`ObjectId`] only; whoever owns
/// the objects moves them to [`Arm::end_effector_position`] after each
/// update.
#[derive(Debug, Clone)]
pub struct Arm {
    name: String,
    links: Vec<Link>,
    q0: Vec<f64>,
    base: Transform,
    tool: Transform,
    held: Vec<ObjectId>,
    history: JointPath,
    max_history: Option<usize>,
    link_thickness: f64,
}

impl Arm {
    /// Create an arm resting at `q0`.
    ///
    /// `q0` must have one entry per link. The resting configuration is the
    /// first row of the history.
    pub fn new(links: Vec<Link>, q0: Vec<f64>, name: impl Into<String>) -> Result<Self, KinematicsError> {
        if links.is_empty() {
            return Err(KinematicsError::EmptyChain);
        }
        if q0.len() != links.len() {
            return Err(KinematicsError::JointCountMismatch {
                expected: links.len(),
                got: q0.len(),
            });
        }
        let mut history = JointPath::new(links.len());
        history.push(&q0)?;
        let mut arm = Self {
            name: name.into(),
            links,
            q0,
            base: Transform::identity(),
            tool: Transform::identity(),
            held: Vec::new(),
            history,
            max_history: None,
            link_thickness: DEFAULT_LINK_THICKNESS,
        };
        let q0 = arm.q0.clone();
        arm.apply_angles(&q0);
        Ok(arm)
    }

    /// Place the base at `position` with no rotation.
    pub fn with_base_position(self, position: Point3) -> Self {
        self.with_base(Transform::from_point(&position))
    }

    /// Set the base frame.
    pub fn with_base(mut self, base: Transform) -> Self {
        self.base = base;
        self.update_positions();
        self
    }

    /// Set the tool frame appended after the last link.
    pub fn with_tool(mut self, tool: Transform) -> Self {
        self.tool = tool;
        self.update_positions();
        self
    }

    /// Set the sphere radius used for joint collision tests.
    pub fn with_link_thickness(mut self, thickness: f64) -> Self {
        self.link_thickness = thickness.abs();
        self
    }

    /// Keep at most `max_rows` configurations in the history.
    pub fn with_max_history(mut self, max_rows: usize) -> Self {
        self.max_history = Some(max_rows.max(1));
        self.history.retain_last(max_rows.max(1));
        self
    }

    /// Name of the arm.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of links.
    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    /// Number of links with a physical segment.
    pub fn active_links(&self) -> usize {
        self.links
            .iter()
            .filter(|l| l.offset() != 0.0 || l.length() != 0.0)
            .count()
    }

    /// All links, base first.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Link `index`.
    pub fn link(&self, index: usize) -> Result<&Link, KinematicsError> {
        self.links.get(index).ok_or(KinematicsError::LinkOutOfRange {
            index,
            count: self.links.len(),
        })
    }

    /// Base frame.
    pub fn base(&self) -> &Transform {
        &self.base
    }

    /// Tool frame.
    pub fn tool(&self) -> &Transform {
        &self.tool
    }

    /// Resting configuration.
    pub fn q0(&self) -> &[f64] {
        &self.q0
    }

    /// Current joint angles.
    pub fn current_config(&self) -> Vec<f64> {
        self.links.iter().map(Link::theta).collect()
    }

    /// Current joint velocities.
    pub fn joint_velocities(&self) -> Vec<f64> {
        self.links.iter().map(Link::velocity).collect()
    }

    /// World `(base_pos, end_pos)` of every link.
    pub fn link_positions(&self) -> Vec<(Point3, Point3)> {
        self.links.iter().map(|l| (l.base_pos(), l.end_pos())).collect()
    }

    /// Recorded joint configurations, oldest first.
    pub fn history(&self) -> &JointPath {
        &self.history
    }

    /// Copy of the recorded history, for export.
    pub fn save_path(&self) -> JointPath {
        self.history.clone()
    }

    /// Ids of the objects currently held.
    pub fn held(&self) -> &[ObjectId] {
        &self.held
    }

    /// Radius used for joint collision tests.
    pub fn link_thickness(&self) -> f64 {
        self.link_thickness
    }

    /// Set one joint angle and re-derive every link position.
    pub fn set_theta(&mut self, link: usize, theta: f64) -> Result<(), KinematicsError> {
        self.update_link_angle(link, theta, false)
    }

    /// Set one joint angle, re-derive positions and optionally record the
    /// resulting configuration.
    pub fn update_link_angle(&mut self, link: usize, theta: f64, save: bool) -> Result<(), KinematicsError> {
        self.check_link(link)?;
        self.links[link].set_theta(theta);
        self.update_positions();
        if save {
            self.record()?;
        }
        Ok(())
    }

    /// Set every joint angle, then recompute all link positions.
    pub fn update_angles(&mut self, q: &[f64], save: bool) -> Result<(), KinematicsError> {
        self.check_len(q)?;
        self.apply_angles(q);
        if save {
            self.record()?;
        }
        Ok(())
    }

    /// Accelerate one joint for `dt` seconds; see [`Link::integrate`].
    pub fn update_link_velocity(&mut self, link: usize, accel: f64, dt: f64) -> Result<(), KinematicsError> {
        self.check_link(link)?;
        self.links[link].integrate(accel, dt);
        self.update_positions();
        Ok(())
    }

    /// Return to the resting configuration with all joints at rest.
    pub fn reset(&mut self) {
        for link in &mut self.links {
            link.reset_velocity();
        }
        let q0 = self.q0.clone();
        self.apply_angles(&q0);
    }

    /// `base * T_1(q_1) * ... * T_n(q_n) * tool` for configuration `q`.
    pub fn forward_kinematics(&self, q: &[f64]) -> Result<Transform, KinematicsError> {
        self.check_len(q)?;
        Ok(self.chain_transform(q, self.links.len()))
    }

    /// Like [`Arm::forward_kinematics`] over the first `count` links only.
    ///
    /// `q` may be the full configuration or just the prefix.
    pub fn forward_kinematics_prefix(&self, q: &[f64], count: usize) -> Result<Transform, KinematicsError> {
        if count > self.links.len() {
            return Err(KinematicsError::LinkOutOfRange {
                index: count,
                count: self.links.len(),
            });
        }
        if q.len() < count {
            return Err(KinematicsError::JointCountMismatch {
                expected: count,
                got: q.len(),
            });
        }
        Ok(self.chain_transform(q, count))
    }

    /// Pose of the tool frame in the current configuration.
    pub fn pose(&self) -> Transform {
        self.chain_transform(&self.current_config(), self.links.len())
    }

    /// End-effector position, in the current configuration if `q` is `None`.
    pub fn end_effector_position(&self, q: Option<&[f64]>) -> Result<Point3, KinematicsError> {
        match q {
            Some(q) => Ok(self.forward_kinematics(q)?.position()),
            None => Ok(self.pose().position()),
        }
    }

    /// Manipulator Jacobian in the tool frame.
    ///
    /// Built by a backward recursion from the tool: `U` starts at the tool
    /// transform and is premultiplied by each link transform from last to
    /// first. Column `i` holds the linear part
    /// `(-U00*U13 + U10*U03, -U01*U13 + U11*U03, -U02*U13 + U12*U03)` and
    /// the angular part `U[2, 0..3]`.
    pub fn jacobian_body(&self, q: &[f64]) -> Result<Matrix6xX<f64>, KinematicsError> {
        self.check_len(q)?;
        Ok(self.body_jacobian(q))
    }

    /// Manipulator Jacobian in the world frame.
    ///
    /// The body Jacobian premultiplied by `diag(R, R)`, `R` being the
    /// end-effector orientation.
    pub fn jacobian_world(&self, q: &[f64]) -> Result<Matrix6xX<f64>, KinematicsError> {
        self.check_len(q)?;
        Ok(self.world_jacobian(q))
    }

    /// Linear end-effector velocity from the current joint velocities.
    pub fn end_effector_velocity(&self) -> Vec3 {
        let qd = DVector::from_vec(self.joint_velocities());
        let twist = self.world_jacobian(&self.current_config()) * qd;
        Vec3::new(twist[0], twist[1], twist[2])
    }

    /// Move the end effector to `target` by damped pseudo-inverse
    /// iteration on the position rows of the world Jacobian.
    ///
    /// Each iteration applies `q += alpha * pinv(J_pos) * err` and records
    /// `q` in the history. Stops once `|err| <= IK_TOLERANCE`. A step size
    /// outside `[0, 1]` is replaced by [`IK_DEFAULT_STEP`].
    ///
    /// The arm is left at the last iterate, also on failure.
    pub fn ikine(&mut self, target: &Point3, max_iters: usize, alpha: f64) -> Result<Vec<f64>, KinematicsError> {
        let alpha = if (0.0..=1.0).contains(&alpha) {
            alpha
        } else {
            warn!(alpha, fallback = IK_DEFAULT_STEP, "IK step size out of range, using default");
            IK_DEFAULT_STEP
        };

        let mut q = self.current_config();
        let mut residual = f64::INFINITY;
        for iteration in 0..=max_iters {
            let err = *target - self.end_effector_position(Some(&q))?;
            residual = err.norm();
            if residual <= IK_TOLERANCE {
                debug!(arm = %self.name, iteration, residual, "IK converged");
                return Ok(q);
            }
            if iteration == max_iters {
                break;
            }

            let jacobian = self.jacobian_world(&q)?;
            let position_rows = jacobian.rows(0, 3).into_owned();
            let pinv = pseudo_inverse(&position_rows)
                .ok_or_else(|| KinematicsError::SingularJacobian(q.clone()))?;
            let dq = pinv * DVector::from_column_slice(err.as_slice()) * alpha;
            for (qi, dqi) in q.iter_mut().zip(dq.iter()) {
                *qi += dqi;
            }
            self.update_angles(&q, true)?;
        }

        warn!(arm = %self.name, max_iters, residual, "IK did not converge");
        Err(KinematicsError::ConvergenceFailure {
            iterations: max_iters,
            residual,
        })
    }

    /// Start carrying an object at the end effector.
    pub fn hold(&mut self, id: ObjectId) {
        if !self.held.contains(&id) {
            debug!(arm = %self.name, ?id, "holding object");
            self.held.push(id);
        }
    }

    /// Let go of a held object (the most recent one if `index` is `None`).
    ///
    /// Returns the object's id and the linear end-effector velocity it
    /// should be thrown with.
    pub fn release(&mut self, index: Option<usize>) -> Result<(ObjectId, Vec3), KinematicsError> {
        let index = match index {
            Some(i) => i,
            None => self
                .held
                .len()
                .checked_sub(1)
                .ok_or(KinematicsError::NothingHeld(0))?,
        };
        if index >= self.held.len() {
            return Err(KinematicsError::NothingHeld(index));
        }
        let velocity = self.end_effector_velocity();
        let id = self.held.remove(index);
        debug!(arm = %self.name, ?id, speed = velocity.norm(), "releasing object");
        Ok((id, velocity))
    }

    /// True if any link touches `object`.
    pub fn is_in_collision(&self, object: &StaticObject) -> bool {
        self.links
            .iter()
            .any(|link| link.is_in_collision(object, self.link_thickness))
    }

    /// Apply every row of `path` in turn, returning the link positions of
    /// each frame. The arm ends in the last configuration.
    pub fn replay(&mut self, path: &JointPath) -> Result<Vec<Vec<(Point3, Point3)>>, KinematicsError> {
        if path.num_joints() != self.links.len() {
            return Err(KinematicsError::JointCountMismatch {
                expected: self.links.len(),
                got: path.num_joints(),
            });
        }
        let mut frames = Vec::with_capacity(path.len());
        for row in path.rows() {
            self.apply_angles(row);
            frames.push(self.link_positions());
        }
        Ok(frames)
    }

    /// `q` must have one angle per link.
    fn body_jacobian(&self, q: &[f64]) -> Matrix6xX<f64> {
        let n = self.links.len();
        let mut jacobian = Matrix6xX::zeros(n);
        let mut u = self.tool;
        for i in (0..n).rev() {
            u = self.links[i].transform_at(q[i]).then(&u);
            let m = &u.matrix;
            let column = Vector6::new(
                -m[(0, 0)] * m[(1, 3)] + m[(1, 0)] * m[(0, 3)],
                -m[(0, 1)] * m[(1, 3)] + m[(1, 1)] * m[(0, 3)],
                -m[(0, 2)] * m[(1, 3)] + m[(1, 2)] * m[(0, 3)],
                m[(2, 0)],
                m[(2, 1)],
                m[(2, 2)],
            );
            jacobian.set_column(i, &column);
        }
        jacobian
    }

    fn world_jacobian(&self, q: &[f64]) -> Matrix6xX<f64> {
        let r = self.chain_transform(q, self.links.len()).rotation();
        let mut rotation = Matrix6::zeros();
        rotation.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
        rotation.fixed_view_mut::<3, 3>(3, 3).copy_from(&r);
        rotation * self.body_jacobian(q)
    }

    fn chain_transform(&self, q: &[f64], count: usize) -> Transform {
        let mut t = self.base;
        for (link, &theta) in self.links.iter().zip(q).take(count) {
            t = t.then(&link.transform_at(theta));
        }
        t.then(&self.tool)
    }

    fn apply_angles(&mut self, q: &[f64]) {
        for (link, &theta) in self.links.iter_mut().zip(q) {
            link.set_theta(theta);
        }
        self.update_positions();
    }

    fn update_positions(&mut self) {
        let mut t = self.base;
        for link in &mut self.links {
            let start = t.position();
            t = t.then(link.transform());
            link.set_positions(start, t.position());
        }
    }

    fn record(&mut self) -> Result<(), KinematicsError> {
        let q = self.current_config();
        self.history.push(&q)?;
        if let Some(max) = self.max_history {
            self.history.retain_last(max);
        }
        Ok(())
    }

    fn check_len(&self, q: &[f64]) -> Result<(), KinematicsError> {
        if q.len() != self.links.len() {
            return Err(KinematicsError::JointCountMismatch {
                expected: self.links.len(),
                got: q.len(),
            });
        }
        Ok(())
    }

    fn check_link(&self, link: usize) -> Result<(), KinematicsError> {
        if link >= self.links.len() {
            return Err(KinematicsError::LinkOutOfRange {
                index: link,
                count: self.links.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robots::simple_human_arm;
    use approx::assert_relative_eq;
    use armsim_objects::Obstacle;
    use nalgebra::Matrix4;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn reference_q() -> Vec<f64> {
        vec![0.0, FRAC_PI_4, 0.0, -FRAC_PI_4, FRAC_PI_2]
    }

    fn reference_arm() -> Arm {
        simple_human_arm(2.0, 1.0, reference_q(), None).unwrap()
    }

    #[test]
    fn test_new_validates_lengths() {
        assert_eq!(
            Arm::new(Vec::new(), Vec::new(), "empty").unwrap_err(),
            KinematicsError::EmptyChain
        );
        let links = vec![Link::new(0.0, 1.0, 0.0, 0.0)];
        assert!(matches!(
            Arm::new(links, vec![0.0, 0.0], "bad"),
            Err(KinematicsError::JointCountMismatch { expected: 1, got: 2 })
        ));
    }

    #[test]
    fn test_forward_kinematics_reference_pose() {
        let arm = reference_arm();
        #[rustfmt::skip]
        let expected = Matrix4::new(
            0.0, -1.0, 0.0, -2.414213562373095,
            1.0,  0.0, 0.0,  0.0,
            0.0,  0.0, 1.0,  1.414213562373095,
            0.0,  0.0, 0.0,  1.0,
        );
        let pose = arm.forward_kinematics(&reference_q()).unwrap();
        assert_relative_eq!(pose.matrix, expected, epsilon = 1e-9);
        assert_eq!(arm.pose(), pose);
        assert!(arm.forward_kinematics(&[0.0; 3]).is_err());
    }

    #[test]
    fn test_prefix_and_link_positions_agree() {
        let arm = reference_arm();
        let q = arm.current_config();
        let positions = arm.link_positions();
        for (i, (base, end)) in positions.iter().enumerate() {
            let before = arm.forward_kinematics_prefix(&q, i).unwrap().position();
            let after = arm.forward_kinematics_prefix(&q, i + 1).unwrap().position();
            assert_relative_eq!(*base, before, epsilon = 1e-12);
            assert_relative_eq!(*end, after, epsilon = 1e-12);
        }
        for pair in positions.windows(2) {
            assert_relative_eq!(pair[0].1, pair[1].0, epsilon = 1e-12);
        }
        assert!(arm.forward_kinematics_prefix(&q, 6).is_err());
        assert!(arm.forward_kinematics_prefix(&q[..2], 3).is_err());
    }

    #[test]
    fn test_update_angles_refreshes_positions() {
        let mut arm = reference_arm();
        let before = arm.link_positions();
        arm.update_angles(&[0.3, 0.2, 0.1, -0.4, 0.0], false).unwrap();
        let after = arm.link_positions();
        assert_ne!(before, after);
        let tip = arm.end_effector_position(None).unwrap();
        assert_relative_eq!(after[4].1, tip, epsilon = 1e-12);
        assert_eq!(arm.history().len(), 1);

        arm.update_angles(&[0.0; 5], true).unwrap();
        assert_eq!(arm.history().len(), 2);
        assert!(arm.update_angles(&[0.0; 4], true).is_err());
    }

    #[test]
    fn test_set_theta_refreshes_downstream_links() {
        let mut arm = reference_arm();
        let end_before = arm.links()[4].end_pos();
        arm.set_theta(0, FRAC_PI_2).unwrap();
        let end_after = arm.links()[4].end_pos();
        // rotating the base joint by 90deg about z maps (x, y) to (-y, x)
        assert_relative_eq!(end_after.x, -end_before.y, epsilon = 1e-9);
        assert_relative_eq!(end_after.y, end_before.x, epsilon = 1e-9);
        assert_relative_eq!(end_after.z, end_before.z, epsilon = 1e-9);
        assert!(matches!(
            arm.set_theta(9, 0.0),
            Err(KinematicsError::LinkOutOfRange { index: 9, count: 5 })
        ));
    }

    #[test]
    fn test_world_jacobian_matches_finite_differences() {
        let arm = reference_arm();
        let q = vec![0.2, -0.4, 0.9, 0.3, -1.1];
        let jacobian = arm.jacobian_world(&q).unwrap();
        let h = 1e-6;
        for k in 0..q.len() {
            let mut qp = q.clone();
            let mut qm = q.clone();
            qp[k] += h;
            qm[k] -= h;
            let dp = (arm.forward_kinematics(&qp).unwrap().position()
                - arm.forward_kinematics(&qm).unwrap().position())
                / (2.0 * h);
            for r in 0..3 {
                assert_relative_eq!(jacobian[(r, k)], dp[r], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_body_jacobian_is_world_in_tool_frame() {
        let arm = reference_arm();
        let q = vec![0.5, 0.1, -0.7, 1.2, 0.4];
        let body = arm.jacobian_body(&q).unwrap();
        let world = arm.jacobian_world(&q).unwrap();
        let r = arm.forward_kinematics(&q).unwrap().rotation();
        let linear = r.transpose() * world.fixed_rows::<3>(0);
        let angular = r.transpose() * world.fixed_rows::<3>(3);
        assert_relative_eq!(linear, body.fixed_rows::<3>(0).into_owned(), epsilon = 1e-12);
        assert_relative_eq!(angular, body.fixed_rows::<3>(3).into_owned(), epsilon = 1e-12);
    }

    #[test]
    fn test_ikine_reaches_reference_target() {
        let mut arm = reference_arm();
        let target = Point3::new(1.0, 1.0, 1.0);
        let q = arm.ikine(&target, 10_000, 0.01).unwrap();
        let reached = arm.forward_kinematics(&q).unwrap().position();
        assert!((reached - target).norm() < 1.0);
        assert!((reached - target).norm() <= 1e-5);
        assert_eq!(arm.current_config(), q);
        assert!(arm.history().len() > 1);
        assert_eq!(arm.history().last(), Some(&q[..]));
    }

    #[test]
    fn test_ikine_clamps_out_of_range_step() {
        let target = Point3::new(1.0, 1.0, 1.0);
        let mut clamped = reference_arm();
        let mut default = reference_arm();
        let a = clamped.ikine(&target, IK_MAX_ITERATIONS, 5.0).unwrap();
        let b = default.ikine(&target, IK_MAX_ITERATIONS, IK_DEFAULT_STEP).unwrap();
        assert_eq!(a, b);
        assert_eq!(clamped.history().len(), default.history().len());
    }

    #[test]
    fn test_ikine_reports_convergence_failure() {
        let mut arm = reference_arm();
        let far = Point3::new(10.0, 10.0, 10.0);
        let err = arm.ikine(&far, 50, 0.5).unwrap_err();
        match err {
            KinematicsError::ConvergenceFailure { iterations, residual } => {
                assert_eq!(iterations, 50);
                assert!(residual > 1.0);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(arm.history().len(), 51);
    }

    #[test]
    fn test_link_velocity_moves_end_effector() {
        let mut arm = reference_arm();
        arm.update_link_velocity(0, 1.0, 0.5).unwrap();
        assert_relative_eq!(arm.links()[0].velocity(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(arm.links()[0].theta(), 0.25, epsilon = 1e-12);
        assert!(arm.update_link_velocity(5, 1.0, 0.5).is_err());
    }

    #[test]
    fn test_end_effector_velocity_is_world_jacobian_times_rates() {
        let mut arm = reference_arm();
        arm.update_link_velocity(0, 1.0, 0.5).unwrap();
        arm.update_link_velocity(2, -3.0, 0.5).unwrap();
        let q = arm.current_config();
        let qd = DVector::from_vec(arm.joint_velocities());
        let twist = arm.jacobian_world(&q).unwrap() * qd;
        let v = arm.end_effector_velocity();
        assert_relative_eq!(v, Vec3::new(twist[0], twist[1], twist[2]), epsilon = 1e-12);
        assert!(v.norm() > 0.0);
        assert!(arm.jacobian_world(&q[1..]).is_err());
    }

    #[test]
    fn test_release_throws_with_end_effector_velocity() {
        let mut slots = slotmap::SlotMap::<ObjectId, ()>::with_key();
        let id = slots.insert(());

        let mut arm = reference_arm();
        assert!(matches!(arm.release(None), Err(KinematicsError::NothingHeld(_))));

        arm.hold(id);
        arm.hold(id);
        assert_eq!(arm.held(), &[id]);

        arm.update_link_velocity(0, 1.0, 1.0).unwrap();
        let p = arm.end_effector_position(None).unwrap();
        let (released, v) = arm.release(None).unwrap();
        assert_eq!(released, id);
        assert!(arm.held().is_empty());
        // spinning about the world z axis through the origin: v = z x p
        assert_relative_eq!(v, Vec3::new(-p.y, p.x, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_collision_with_obstacle() {
        let arm = reference_arm();
        let (base, end) = arm.link_positions()[2];
        let mid = nalgebra::center(&base, &end);
        let on_arm: StaticObject = Obstacle::new(
            mid - Vec3::new(0.05, 0.05, 0.05),
            mid + Vec3::new(0.05, 0.05, 0.05),
        )
        .unwrap()
        .into();
        assert!(arm.is_in_collision(&on_arm));

        let away: StaticObject =
            Obstacle::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0))
                .unwrap()
                .into();
        assert!(!arm.is_in_collision(&away));
    }

    #[test]
    fn test_reset_restores_q0() {
        let mut arm = reference_arm();
        let rest = arm.link_positions();
        arm.update_link_velocity(1, 2.0, 0.5).unwrap();
        arm.update_angles(&[1.0, 1.0, 1.0, 1.0, 1.0], true).unwrap();
        arm.reset();
        assert_eq!(arm.current_config(), reference_q());
        assert!(arm.joint_velocities().iter().all(|&v| v == 0.0));
        assert_eq!(arm.link_positions(), rest);
    }

    #[test]
    fn test_replay_saved_path() {
        let mut arm = reference_arm();
        arm.ikine(&Point3::new(1.0, 1.0, 1.0), IK_MAX_ITERATIONS, 0.5).unwrap();
        let path = arm.save_path();
        let final_positions = arm.link_positions();

        let mut replayed = reference_arm();
        let frames = replayed.replay(&path).unwrap();
        assert_eq!(frames.len(), path.len());
        assert_eq!(frames.last(), Some(&final_positions));
        assert_eq!(replayed.current_config(), arm.current_config());

        let wrong = JointPath::new(3);
        assert!(replayed.replay(&wrong).is_err());
    }

    #[test]
    fn test_history_cap_keeps_newest() {
        let mut arm = reference_arm().with_max_history(3);
        for i in 0..10 {
            arm.update_link_angle(0, i as f64 * 0.1, true).unwrap();
        }
        assert_eq!(arm.history().len(), 3);
        assert_relative_eq!(arm.history().last().unwrap()[0], 0.9, epsilon = 1e-12);
    }
}
