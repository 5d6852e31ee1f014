//! Magnetic field computation using Biot-Savart law
//!
//! Every segment of a cable path contributes
//! `dB = (μ₀/4π) · I · (dl × r) / |r|³`, where `dl` is the segment vector and
//! `r` runs from the segment reference point to the query point. The default
//! reference is the segment start, i.e. the whole segment current is treated
//! as concentrated there.

use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::cable::CablePath;

/// Permeability of free space (H/m)
pub const MU0: f64 = 4.0 * PI * 1e-7;

/// Cable current used when the caller does not supply one
pub const DEFAULT_CURRENT: f64 = 100.0;

/// Point of a segment that `r` is measured from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentReference {
    /// Segment start point
    #[default]
    Start,
    /// Segment midpoint (opt-in, changes every result)
    Midpoint,
}

/// Current and discretization rule applied to every segment of a cable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldModel {
    pub current: f64,
    pub reference: SegmentReference,
}

impl Default for FieldModel {
    fn default() -> Self {
        Self {
            current: DEFAULT_CURRENT,
            reference: SegmentReference::Start,
        }
    }
}

impl FieldModel {
    pub fn with_current(current: f64) -> Self {
        Self {
            current,
            ..Self::default()
        }
    }

    /// Net field at `point` from every segment of `path`
    pub fn field_at(&self, point: &Point3<f64>, path: &CablePath) -> Vector3<f64> {
        field_from_cable_with(point, path, self.current, self.reference)
    }
}

/// Field contribution of a single segment, measured from its start point.
///
/// Returns the zero vector when `point == start` instead of the diverging
/// on-wire value.
pub fn field_from_segment(
    point: &Point3<f64>,
    current: f64,
    start: &Point3<f64>,
    end: &Point3<f64>,
) -> Vector3<f64> {
    biot_savart(point, current, start, end - start)
}

/// Field contribution of a single segment, measured from its midpoint
pub fn field_from_segment_midpoint(
    point: &Point3<f64>,
    current: f64,
    start: &Point3<f64>,
    end: &Point3<f64>,
) -> Vector3<f64> {
    let dl = end - start;
    let mid = start + dl / 2.0;
    biot_savart(point, current, &mid, dl)
}

fn biot_savart(
    point: &Point3<f64>,
    current: f64,
    origin: &Point3<f64>,
    dl: Vector3<f64>,
) -> Vector3<f64> {
    let r = point - origin;
    let norm_r = r.norm();

    if norm_r == 0.0 {
        return Vector3::zeros();
    }

    let factor = MU0 / (4.0 * PI) * current;
    factor * (dl.cross(&r) / norm_r.powi(3))
}

/// Superposed field of all segments of `path` at `point`.
///
/// Paths with fewer than two points have no segments and give the zero
/// vector.
pub fn field_from_cable(point: &Point3<f64>, path: &CablePath, current: f64) -> Vector3<f64> {
    field_from_cable_with(point, path, current, SegmentReference::Start)
}

pub fn field_from_cable_with(
    point: &Point3<f64>,
    path: &CablePath,
    current: f64,
    reference: SegmentReference,
) -> Vector3<f64> {
    let segment_field: fn(&Point3<f64>, f64, &Point3<f64>, &Point3<f64>) -> Vector3<f64> =
        match reference {
            SegmentReference::Start => field_from_segment,
            SegmentReference::Midpoint => field_from_segment_midpoint,
        };

    path.segments()
        .fold(Vector3::zeros(), |total, (start, end)| {
            total + segment_field(point, current, start, end)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cable::{generate, CableShape};

    fn assert_vec_close(actual: &Vector3<f64>, expected: &Vector3<f64>, tol: f64) {
        assert!(
            (actual - expected).norm() < tol,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_zero_at_segment_start() {
        let start = Point3::new(1.0, 2.0, 3.0);
        let end = Point3::new(4.0, 2.0, 3.0);
        let b = field_from_segment(&start, 100.0, &start, &end);
        assert_eq!(b, Vector3::zeros());
    }

    #[test]
    fn test_single_segment_value() {
        // dl = (1,0,0), r = (0,1,0) -> dl x r = (0,0,1), |r| = 1
        let b = field_from_segment(
            &Point3::new(0.0, 1.0, 0.0),
            100.0,
            &Point3::origin(),
            &Point3::new(1.0, 0.0, 0.0),
        );
        assert_vec_close(&b, &Vector3::new(0.0, 0.0, 1e-5), 1e-18);
    }

    #[test]
    fn test_concrete_straight_cable() {
        // Four unit segments along x, query at (2,1,0):
        // Bz = 1e-7 * 100 * (5^-1.5 + 2^-1.5 + 1 + 2^-1.5)
        let path = generate(5, "straight").unwrap();
        let b = field_from_cable(&Point3::new(2.0, 1.0, 0.0), &path, 100.0);
        assert_vec_close(&b, &Vector3::new(0.0, 0.0, 1.7965495002865393e-5), 1e-15);
    }

    #[test]
    fn test_field_above_straight_wire() {
        let path = CablePath::from_points(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)]);
        let query = Point3::new(5.0, 0.0, 1.0);

        let b = field_from_cable(&query, &path, 100.0);
        assert_eq!(b.x, 0.0);
        assert_eq!(b.z, 0.0);
        // dl x r = (0,-10,0), |r|^3 = 26^1.5
        assert!((b.y - (-7.54292827454554e-7)).abs() < 1e-18);

        // Same symmetry for the generated unit cable
        let unit = CablePath::new(2, CableShape::Straight);
        let b = field_from_cable(&Point3::new(0.5, 0.0, 1.0), &unit, 100.0);
        assert_eq!(b.x, 0.0);
        assert_eq!(b.z, 0.0);
        assert!(b.y < 0.0);
    }

    #[test]
    fn test_linear_in_current() {
        let path = generate(12, "coil").unwrap();
        let query = Point3::new(3.3, -0.7, 2.1);
        let base = field_from_cable(&query, &path, 100.0);
        for k in [0.0, -1.0, 2.5, 1e3] {
            let scaled = field_from_cable(&query, &path, 100.0 * k);
            assert_vec_close(&scaled, &(base * k), 1e-12 * base.norm().max(1.0) * k.abs().max(1.0));
        }
    }

    #[test]
    fn test_single_segment_cable_matches_segment() {
        let path = generate(2, "coil").unwrap();
        let query = Point3::new(0.2, 3.0, -1.0);
        let from_cable = field_from_cable(&query, &path, 42.0);
        let from_segment = field_from_segment(&query, 42.0, &path.points()[0], &path.points()[1]);
        assert_eq!(from_cable, from_segment);
    }

    #[test]
    fn test_degenerate_paths_give_zero() {
        let query = Point3::new(1.0, 1.0, 1.0);
        for length in [0, 1] {
            let path = generate(length, "sine").unwrap();
            assert_eq!(field_from_cable(&query, &path, 100.0), Vector3::zeros());
        }
    }

    #[test]
    fn test_deterministic() {
        let path = generate(30, "coil").unwrap();
        let query = Point3::new(7.1, 1.2, -0.4);
        let a = field_from_cable(&query, &path, DEFAULT_CURRENT);
        let b = field_from_cable(&query, &path, DEFAULT_CURRENT);
        assert_eq!(a, b);
    }

    #[test]
    fn test_midpoint_mode_is_opt_in() {
        let path = generate(8, "sine").unwrap();
        let query = Point3::new(3.0, 1.0, 0.5);

        let model = FieldModel::default();
        assert_eq!(model.reference, SegmentReference::Start);
        assert_eq!(model.field_at(&query, &path), field_from_cable(&query, &path, 100.0));

        let midpoint = field_from_cable_with(&query, &path, 100.0, SegmentReference::Midpoint);
        assert!((midpoint - model.field_at(&query, &path)).norm() > 1e-9);
    }

    #[test]
    fn test_midpoint_symmetric_about_segment_center() {
        // Query directly above the midpoint: r is perpendicular to dl
        let b = field_from_segment_midpoint(
            &Point3::new(1.0, 0.0, 2.0),
            100.0,
            &Point3::origin(),
            &Point3::new(2.0, 0.0, 0.0),
        );
        // dl x r = (2,0,0) x (0,0,2) = (0,-4,0), |r|^3 = 8
        assert_vec_close(&b, &Vector3::new(0.0, -5e-6, 0.0), 1e-18);
    }
}
