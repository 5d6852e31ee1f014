//! Cable geometry: piecewise-linear paths under a shape policy
//!
//! The x-coordinate of point `i` is always `i` (unit spacing along the main
//! axis). The shape only decides the y/z offsets.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::CableError;

/// Shape policy used to lay out the cable points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CableShape {
    /// Point i = (i, 0, 0)
    Straight,
    /// Point i = (i, 0, sin(i·π/16))
    Sine,
    /// Point i = (i, cos(i·π/8), sin(i·π/8))
    Coil,
}

impl CableShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            CableShape::Straight => "straight",
            CableShape::Sine => "sine",
            CableShape::Coil => "coil",
        }
    }

    /// Coordinates of point `i` under this shape
    fn point_at(&self, i: usize) -> Point3<f64> {
        let x = i as f64;
        match self {
            CableShape::Straight => Point3::new(x, 0.0, 0.0),
            CableShape::Sine => {
                let theta = x * (2.0 * PI) / 4.0;
                Point3::new(x, 0.0, (theta / 8.0).sin())
            }
            CableShape::Coil => {
                let theta = x * (2.0 * PI) / 2.0;
                Point3::new(x, (theta / 8.0).cos(), (theta / 8.0).sin())
            }
        }
    }
}

impl fmt::Display for CableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CableShape {
    type Err = CableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "straight" => Ok(CableShape::Straight),
            "sine" => Ok(CableShape::Sine),
            "coil" => Ok(CableShape::Coil),
            other => Err(CableError::InvalidShape(other.to_string())),
        }
    }
}

/// Ordered cable points; consecutive points form directed segments
#[derive(Debug, Clone, PartialEq)]
pub struct CablePath {
    points: Vec<Point3<f64>>,
    /// `None` for paths built from arbitrary points
    shape: Option<CableShape>,
}

impl CablePath {
    /// Build a path of exactly `length` points
    pub fn new(length: usize, shape: CableShape) -> Self {
        let points = (0..length).map(|i| shape.point_at(i)).collect();
        Self {
            points,
            shape: Some(shape),
        }
    }

    /// Wrap an existing point sequence; order sets the current direction
    pub fn from_points(points: Vec<Point3<f64>>) -> Self {
        Self { points, shape: None }
    }

    pub fn shape(&self) -> Option<CableShape> {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Number of directed segments (zero for paths shorter than two points)
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Iterate over `(start, end)` pairs in current-flow order
    pub fn segments(&self) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> + '_ {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }

    pub fn coords_at(&self, index: usize) -> Result<Point3<f64>, CableError> {
        self.points
            .get(index)
            .copied()
            .ok_or(CableError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
    }
}

/// Generate a cable path from a shape identifier
pub fn generate(length: usize, shape: &str) -> Result<CablePath, CableError> {
    let shape: CableShape = shape.parse()?;
    if length < 2 {
        tracing::debug!(length, %shape, "generated cable has no segments");
    }
    Ok(CablePath::new(length, shape))
}

pub fn get_coords_at_index(path: &CablePath, index: usize) -> Result<Point3<f64>, CableError> {
    path.coords_at(index)
}

pub fn get_cable_structure(path: &CablePath) -> &[Point3<f64>] {
    path.points()
}
