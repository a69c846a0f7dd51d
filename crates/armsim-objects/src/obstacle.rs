//! Axis-aligned box obstacles.

use armsim_math::Point3;

use crate::error::GeometryError;

/// A stationary axis-aligned box that links and balls can collide with.
///
/// The box is closed: points on a face count as inside.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    min: Point3,
    max: Point3,
}

impl Obstacle {
    /// Create an obstacle from its minimum and maximum corners.
    ///
    /// Fails if `min` exceeds `max` on any axis. Degenerate (flat) boxes
    /// are accepted.
    pub fn new(min: Point3, max: Point3) -> Result<Self, GeometryError> {
        let finite = min.iter().chain(max.iter()).all(|v| v.is_finite());
        if !finite || (0..3).any(|i| min[i] > max[i]) {
            return Err(GeometryError::InvalidCorners {
                min: [min.x, min.y, min.z],
                max: [max.x, max.y, max.z],
            });
        }
        Ok(Self { min, max })
    }

    /// Create an obstacle from any two opposite corners, in any order.
    pub fn from_corners(a: Point3, b: Point3) -> Result<Self, GeometryError> {
        let min = Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
        let max = Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z));
        Self::new(min, max)
    }

    /// Minimum corner.
    pub fn min(&self) -> Point3 {
        self.min
    }

    /// Maximum corner.
    pub fn max(&self) -> Point3 {
        self.max
    }

    /// Centre of the box.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Inclusive point membership test.
    pub fn is_hit(&self, point: &Point3) -> bool {
        (0..3).all(|i| self.min[i] <= point[i] && point[i] <= self.max[i])
    }

    /// True if any sample of a sampled path lies inside the box.
    pub fn is_hit_any(&self, points: &[Point3]) -> bool {
        points.iter().any(|p| self.is_hit(p))
    }

    /// Sphere test against the box grown by `radius` on every axis.
    ///
    /// True iff on every axis `center + radius >= min` and
    /// `center - radius <= max`. Tangent contact counts as a hit.
    pub fn is_hit_by_sphere(&self, center: &Point3, radius: f64) -> bool {
        (0..3).all(|i| center[i] + radius >= self.min[i] && center[i] - radius <= self.max[i])
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Point3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// The six faces as corner quads, for renderers.
    ///
    /// Order: bottom, top, front, back, left, right.
    pub fn faces(&self) -> [[Point3; 4]; 6] {
        let c = self.corners();
        [
            [c[0], c[2], c[6], c[4]],
            [c[1], c[3], c[7], c[5]],
            [c[0], c[1], c[5], c[4]],
            [c[2], c[3], c[7], c[6]],
            [c[0], c[1], c[3], c[2]],
            [c[4], c[5], c[7], c[6]],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Obstacle {
        Obstacle::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)).unwrap()
    }

    #[test]
    fn test_rejects_inverted_corners() {
        let err = Obstacle::new(Point3::new(2.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!(matches!(err, Err(GeometryError::InvalidCorners { .. })));
    }

    #[test]
    fn test_from_corners_normalizes() {
        let obs =
            Obstacle::from_corners(Point3::new(4.0, 2.5, 1.0), Point3::new(3.0, 2.0, 1.5)).unwrap();
        assert_eq!(obs.min(), Point3::new(3.0, 2.0, 1.0));
        assert_eq!(obs.max(), Point3::new(4.0, 2.5, 1.5));
    }

    #[test]
    fn test_point_membership_is_inclusive() {
        let obs = unit_box();
        assert!(obs.is_hit(&Point3::origin()));
        assert!(obs.is_hit(&Point3::new(1.0, 1.0, 1.0)));
        assert!(obs.is_hit(&Point3::new(-1.0, 0.0, 0.5)));
        assert!(!obs.is_hit(&Point3::new(1.0001, 0.0, 0.0)));
        assert!(!obs.is_hit(&Point3::new(0.0, 0.0, -3.0)));
    }

    #[test]
    fn test_path_hit_if_any_sample_inside() {
        let obs = unit_box();
        let miss = [Point3::new(5.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0)];
        assert!(!obs.is_hit_any(&miss));
        let hit = [Point3::new(5.0, 0.0, 0.0), Point3::new(0.5, 0.0, 0.0)];
        assert!(obs.is_hit_any(&hit));
        assert!(!obs.is_hit_any(&[]));
    }

    #[test]
    fn test_sphere_inside_box() {
        let obs = unit_box();
        assert!(obs.is_hit_by_sphere(&Point3::origin(), 0.5));
    }

    #[test]
    fn test_sphere_far_away() {
        let obs = unit_box();
        assert!(!obs.is_hit_by_sphere(&Point3::new(10.0, 0.0, 0.0), 1.0));
    }

    #[test]
    fn test_sphere_tangent_to_face() {
        let obs = unit_box();
        assert!(obs.is_hit_by_sphere(&Point3::new(2.0, 0.0, 0.0), 1.0));
        assert!(!obs.is_hit_by_sphere(&Point3::new(2.0 + 1e-9, 0.0, 0.0), 1.0));
    }

    #[test]
    fn test_faces_use_corners() {
        let obs = unit_box();
        let faces = obs.faces();
        for face in &faces {
            for p in face {
                assert!(obs.corners().contains(p));
            }
        }
        // bottom face lies in z = min
        assert!(faces[0].iter().all(|p| p.z == -1.0));
        assert!(faces[1].iter().all(|p| p.z == 1.0));
    }
}
