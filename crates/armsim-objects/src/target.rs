//! Thin disc targets with concentric scoring rings.

use armsim_math::Point3;

use crate::error::GeometryError;

/// Half-thickness of a target along its normal axis.
pub const HIT_TOLERANCE: f64 = 0.01;

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// The x axis.
    X,
    /// The y axis.
    #[default]
    Y,
    /// The z axis.
    Z,
}

impl Axis {
    /// Component index of this axis.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One scoring ring: any point within `radius` of the centre scores at
/// least `score`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRing {
    /// Outer radius of the ring.
    pub radius: f64,
    /// Points awarded inside this ring.
    pub score: f64,
}

/// A thin planar target a projectile passes through.
///
/// The disc is modelled as a slab: `radius` of tolerance on the two
/// in-plane axes and [`HIT_TOLERANCE`] along the normal axis, which
/// defaults to y.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    center: Point3,
    radius: f64,
    normal: Axis,
    rings: Vec<ScoreRing>,
}

impl Target {
    /// Scores of the default rings, innermost first.
    pub const DEFAULT_SCORES: [f64; 5] = [10.0, 8.0, 6.0, 4.0, 2.0];

    /// Create a target facing along y with five evenly spaced rings.
    pub fn new(center: Point3, radius: f64) -> Result<Self, GeometryError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::InvalidRadius(radius));
        }
        let count = Self::DEFAULT_SCORES.len() as f64;
        let rings = Self::DEFAULT_SCORES
            .iter()
            .enumerate()
            .map(|(i, &score)| ScoreRing {
                radius: radius * (i as f64 + 1.0) / count,
                score,
            })
            .collect();
        Ok(Self {
            center,
            radius,
            normal: Axis::Y,
            rings,
        })
    }

    /// Replace the scoring rings.
    ///
    /// Rings must be strictly increasing in radius and non-increasing in
    /// score.
    pub fn with_rings(mut self, rings: Vec<ScoreRing>) -> Result<Self, GeometryError> {
        if rings.is_empty() {
            return Err(GeometryError::InvalidRings("no rings".to_string()));
        }
        for ring in &rings {
            if !(ring.radius.is_finite() && ring.radius > 0.0) {
                return Err(GeometryError::InvalidRadius(ring.radius));
            }
        }
        for pair in rings.windows(2) {
            if pair[1].radius <= pair[0].radius {
                return Err(GeometryError::InvalidRings(format!(
                    "radius {} follows {}",
                    pair[1].radius, pair[0].radius
                )));
            }
            if pair[1].score > pair[0].score {
                return Err(GeometryError::InvalidRings(format!(
                    "score {} outside score {}",
                    pair[1].score, pair[0].score
                )));
            }
        }
        self.rings = rings;
        Ok(self)
    }

    /// Orient the disc so that it faces along `axis`.
    pub fn with_normal(mut self, axis: Axis) -> Self {
        self.normal = axis;
        self
    }

    /// Centre of the disc.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Radius of the disc.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Normal axis of the disc.
    pub fn normal(&self) -> Axis {
        self.normal
    }

    /// Scoring rings, innermost first.
    pub fn rings(&self) -> &[ScoreRing] {
        &self.rings
    }

    /// Per-axis slab test around the centre.
    pub fn is_hit(&self, point: &Point3) -> bool {
        self.within(point, 0.0)
    }

    /// True if any sample of a sampled path passes through the target.
    pub fn is_hit_any(&self, points: &[Point3]) -> bool {
        points.iter().any(|p| self.is_hit(p))
    }

    /// Slab test with every tolerance grown by `radius`.
    pub fn is_hit_by_sphere(&self, center: &Point3, radius: f64) -> bool {
        self.within(center, radius)
    }

    /// Score of a point, by its distance from the centre.
    ///
    /// Returns 0 beyond the outermost ring.
    pub fn get_score(&self, point: &Point3) -> f64 {
        let distance = (point - self.center).norm();
        self.rings
            .iter()
            .find(|ring| distance <= ring.radius)
            .map_or(0.0, |ring| ring.score)
    }

    fn within(&self, point: &Point3, grow: f64) -> bool {
        let diff = (point - self.center).abs();
        let normal = self.normal.index();
        (0..3).all(|i| {
            let tolerance = if i == normal { HIT_TOLERANCE } else { self.radius };
            diff[i] <= tolerance + grow
        })
    }
}
