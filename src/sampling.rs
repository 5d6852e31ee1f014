//! Query point sampling on rings around each cable segment
//!
//! Rings are placed at `num_circles + 1` evenly spaced stations along every
//! segment. Each ring starts at a vector perpendicular to the segment and is
//! swept around the segment axis in steps of `2π / (points_per_circle - 1)`,
//! so the last point of a ring lands back on the first. Every sample is
//! evaluated against the whole cable, not only the local segment.

use std::f64::consts::PI;

use nalgebra::{Point3, Rotation3, Unit, Vector3};
use tracing::{debug, warn};

use crate::cable::CablePath;
use crate::error::CableError;
use crate::field::FieldModel;

/// Query points and the field evaluated at each, index-aligned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSamples {
    pub points: Vec<Point3<f64>>,
    pub vectors: Vec<Vector3<f64>>,
}

impl FieldSamples {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            vectors: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, point: Point3<f64>, vector: Vector3<f64>) {
        self.points.push(point);
        self.vectors.push(vector);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Point3<f64>, &Vector3<f64>)> + '_ {
        self.points.iter().zip(self.vectors.iter())
    }

    /// Largest field magnitude, zero when empty
    pub fn max_magnitude(&self) -> f64 {
        self.vectors.iter().map(|v| v.norm()).fold(0.0, f64::max)
    }
}

/// Ring layout around the cable
#[derive(Debug, Clone, PartialEq)]
pub struct RingSampler {
    points_per_circle: usize,
    num_circles: usize,
    radii: Vec<f64>,
}

impl RingSampler {
    pub fn new(points_per_circle: usize, num_circles: usize, radii: Vec<f64>) -> Result<Self, CableError> {
        if points_per_circle < 2 {
            return Err(CableError::InvalidSampling(format!(
                "points_per_circle must be at least 2, got {}",
                points_per_circle
            )));
        }
        if num_circles == 0 {
            return Err(CableError::InvalidSampling(
                "num_circles must be at least 1".to_string(),
            ));
        }
        if radii.is_empty() {
            return Err(CableError::InvalidSampling("no radii given".to_string()));
        }

        Ok(Self {
            points_per_circle,
            num_circles,
            radii,
        })
    }

    pub fn points_per_circle(&self) -> usize {
        self.points_per_circle
    }

    pub fn num_circles(&self) -> usize {
        self.num_circles
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Number of samples produced for `path`, assuming no degenerate segments
    pub fn sample_count(&self, path: &CablePath) -> usize {
        self.radii.len() * path.segment_count() * (self.num_circles + 1) * self.points_per_circle
    }

    /// Ring points around one segment at the given radius.
    ///
    /// Returns an empty list for a zero-length segment, which has no axis to
    /// rotate about.
    pub fn segment_ring_points(
        &self,
        start: &Point3<f64>,
        end: &Point3<f64>,
        radius: f64,
    ) -> Vec<Point3<f64>> {
        let direction = end - start;
        let Some(axis) = Unit::try_new(direction, 0.0) else {
            return Vec::new();
        };

        let perp = perpendicular(&direction) * radius;
        let step = 2.0 * PI / (self.points_per_circle - 1) as f64;
        let rotation = Rotation3::from_axis_angle(&axis, step);

        let mut points = Vec::with_capacity((self.num_circles + 1) * self.points_per_circle);
        for j in 0..=self.num_circles {
            let mut offset = perp + (j as f64 / self.num_circles as f64) * direction;
            points.push(start + offset);

            for _ in 1..self.points_per_circle {
                offset = rotation * offset;
                points.push(start + offset);
            }
        }

        points
    }

    /// Sample the field around every segment of `path`
    pub fn sample(&self, path: &CablePath, model: &FieldModel) -> FieldSamples {
        let mut samples = FieldSamples::with_capacity(self.sample_count(path));
        self.sample_into(path, model, &mut samples);
        samples
    }

    /// Append samples for every radius and segment of `path` to `out`
    pub fn sample_into(&self, path: &CablePath, model: &FieldModel, out: &mut FieldSamples) {
        for &radius in &self.radii {
            debug!(radius, segments = path.segment_count(), "sampling rings");

            for (index, (start, end)) in path.segments().enumerate() {
                let ring = self.segment_ring_points(start, end, radius);
                if ring.is_empty() {
                    warn!(index, "zero-length segment has no axis, skipping");
                    continue;
                }

                for point in ring {
                    let vector = model.field_at(&point, path);
                    out.push(point, vector);
                }
            }
        }
    }
}

/// Unit vector perpendicular to `direction`, zero if `direction` is parallel
/// to (1, 1, 1)
fn perpendicular(direction: &Vector3<f64>) -> Vector3<f64> {
    let perp = direction.cross(&Vector3::new(1.0, 1.0, 1.0));
    let norm = perp.norm();
    if norm != 0.0 {
        perp / norm
    } else {
        perp
    }
}
