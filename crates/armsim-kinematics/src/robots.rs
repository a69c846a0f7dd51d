//! Ready-made arm layouts.

use std::f64::consts::FRAC_PI_2;

use armsim_math::Point3;

use crate::arm::Arm;
use crate::error::KinematicsError;
use crate::link::Link;

/// A five-joint human-like arm: a two-axis shoulder, an upper arm of
/// `upper_len`, a two-axis elbow and a forearm of `fore_len`.
///
/// Segment lengths are DH offsets, so each segment lies along the z axis
/// of the preceding joint frame.
pub fn simple_human_arm(
    upper_len: f64,
    fore_len: f64,
    q0: Vec<f64>,
    base: Option<Point3>,
) -> Result<Arm, KinematicsError> {
    let links = vec![
        Link::new(0.0, 0.0, 0.0, FRAC_PI_2),
        Link::new(0.0, 0.0, 0.0, -FRAC_PI_2),
        Link::new(0.0, upper_len, 0.0, -FRAC_PI_2),
        Link::new(0.0, 0.0, 0.0, FRAC_PI_2),
        Link::new(0.0, fore_len, 0.0, FRAC_PI_2),
    ];
    let arm = Arm::new(links, q0, "simple_human_arm")?;
    Ok(match base {
        Some(p) => arm.with_base_position(p),
        None => arm,
    })
}

/// A long snake-like arm with one joint per segment and alternating
/// twist, so consecutive joints bend in perpendicular planes.
pub fn noodle_arm(
    segment_lengths: &[f64],
    q0: Vec<f64>,
    base: Option<Point3>,
) -> Result<Arm, KinematicsError> {
    let links = segment_lengths
        .iter()
        .enumerate()
        .map(|(i, &len)| {
            let twist = if i % 2 == 0 { FRAC_PI_2 } else { -FRAC_PI_2 };
            Link::new(0.0, len, 0.0, twist)
        })
        .collect();
    let arm = Arm::new(links, q0, "noodle_arm")?;
    Ok(match base {
        Some(p) => arm.with_base_position(p),
        None => arm,
    })
}
