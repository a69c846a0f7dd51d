//! Closed set of stationary objects.

use armsim_math::Point3;

use crate::obstacle::Obstacle;
use crate::target::Target;

/// Any object that never moves during a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum StaticObject {
    /// Axis-aligned box.
    Obstacle(Obstacle),
    /// Thin scoring disc.
    Target(Target),
}

impl StaticObject {
    /// Point membership test.
    pub fn is_hit(&self, point: &Point3) -> bool {
        match self {
            StaticObject::Obstacle(o) => o.is_hit(point),
            StaticObject::Target(t) => t.is_hit(point),
        }
    }

    /// True if any sample of a sampled path hits the object.
    pub fn is_hit_any(&self, points: &[Point3]) -> bool {
        match self {
            StaticObject::Obstacle(o) => o.is_hit_any(points),
            StaticObject::Target(t) => t.is_hit_any(points),
        }
    }

    /// Sphere intersection test.
    pub fn is_hit_by_sphere(&self, center: &Point3, radius: f64) -> bool {
        match self {
            StaticObject::Obstacle(o) => o.is_hit_by_sphere(center, radius),
            StaticObject::Target(t) => t.is_hit_by_sphere(center, radius),
        }
    }

    /// The target, if this is one.
    pub fn as_target(&self) -> Option<&Target> {
        match self {
            StaticObject::Target(t) => Some(t),
            StaticObject::Obstacle(_) => None,
        }
    }

    /// The obstacle, if this is one.
    pub fn as_obstacle(&self) -> Option<&Obstacle> {
        match self {
            StaticObject::Obstacle(o) => Some(o),
            StaticObject::Target(_) => None,
        }
    }
}

impl From<Obstacle> for StaticObject {
    fn from(o: Obstacle) -> Self {
        StaticObject::Obstacle(o)
    }
}

impl From<Target> for StaticObject {
    fn from(t: Target) -> Self {
        StaticObject::Target(t)
    }
}
