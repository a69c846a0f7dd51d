//! Recorded joint-configuration histories.

use serde::{Deserialize, Serialize};

use crate::error::KinematicsError;

/// A dense `rows x num_joints` matrix of joint configurations, stored
/// row-major with one row per recorded configuration.
///
/// This is the replay format for arm motions: a path can be exported
/// after running inverse kinematics and applied again later without
/// re-solving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawJointPath")]
pub struct JointPath {
    num_joints: usize,
    data: Vec<f64>,
}

/// Unchecked wire form of a [`JointPath`].
#[derive(Deserialize)]
struct RawJointPath {
    num_joints: usize,
    data: Vec<f64>,
}

impl TryFrom<RawJointPath> for JointPath {
    type Error = KinematicsError;

    fn try_from(raw: RawJointPath) -> Result<Self, Self::Error> {
        Self::from_row_major(raw.num_joints, raw.data)
    }
}

impl JointPath {
    /// Empty path for a chain of `num_joints` links.
    pub fn new(num_joints: usize) -> Self {
        Self {
            num_joints,
            data: Vec::new(),
        }
    }

    /// Build a path from row-major data.
    pub fn from_row_major(num_joints: usize, data: Vec<f64>) -> Result<Self, KinematicsError> {
        if num_joints == 0 {
            return Err(KinematicsError::Path("zero joints".to_string()));
        }
        if data.len() % num_joints != 0 {
            return Err(KinematicsError::Path(format!(
                "{} values do not fill rows of {}",
                data.len(),
                num_joints
            )));
        }
        Ok(Self { num_joints, data })
    }

    /// Build a path from explicit rows.
    pub fn from_rows<R: AsRef<[f64]>>(num_joints: usize, rows: &[R]) -> Result<Self, KinematicsError> {
        let mut path = Self::new(num_joints);
        for row in rows {
            path.push(row.as_ref())?;
        }
        Ok(path)
    }

    /// Append a configuration.
    pub fn push(&mut self, q: &[f64]) -> Result<(), KinematicsError> {
        if q.len() != self.num_joints {
            return Err(KinematicsError::JointCountMismatch {
                expected: self.num_joints,
                got: q.len(),
            });
        }
        self.data.extend_from_slice(q);
        Ok(())
    }

    /// Drop the oldest rows so at most `max_rows` remain.
    pub fn retain_last(&mut self, max_rows: usize) {
        let rows = self.len();
        if rows > max_rows {
            self.data.drain(..(rows - max_rows) * self.num_joints);
        }
    }

    /// Number of joints per row.
    pub fn num_joints(&self) -> usize {
        self.num_joints
    }

    /// Number of recorded configurations.
    pub fn len(&self) -> usize {
        if self.num_joints == 0 {
            0
        } else {
            self.data.len() / self.num_joints
        }
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row `i`, if present.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        let start = i.checked_mul(self.num_joints)?;
        self.data.get(start..start + self.num_joints)
    }

    /// Most recent row.
    pub fn last(&self) -> Option<&[f64]> {
        self.len().checked_sub(1).and_then(|i| self.row(i))
    }

    /// Iterate rows, oldest first.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.num_joints.max(1))
    }

    /// The raw row-major values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, KinematicsError> {
        serde_json::to_string(self).map_err(|e| KinematicsError::Path(e.to_string()))
    }

    /// Deserialize from JSON, checking the shape.
    pub fn from_json(json: &str) -> Result<Self, KinematicsError> {
        serde_json::from_str(json).map_err(|e| KinematicsError::Path(e.to_string()))
    }

    /// Whitespace-separated text, one row per line.
    ///
    /// Values are written with full round-trip precision.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|v| format!("{v:?}")).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }

    /// Parse the text form. Blank lines are skipped; every other line must
    /// hold the same number of values.
    pub fn from_text(text: &str) -> Result<Self, KinematicsError> {
        let mut path: Option<JointPath> = None;
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|tok| tok.parse::<f64>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| KinematicsError::Path(format!("line {}: {e}", lineno + 1)))?;
            let path = path.get_or_insert_with(|| JointPath::new(row.len()));
            path.push(&row)
                .map_err(|e| KinematicsError::Path(format!("line {}: {e}", lineno + 1)))?;
        }
        path.ok_or_else(|| KinematicsError::Path("empty input".to_string()))
    }
}
