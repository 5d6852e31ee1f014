//! Visualization run configuration, loadable from JSON

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cable::{CablePath, CableShape};
use crate::error::CableError;
use crate::field::{FieldModel, SegmentReference, DEFAULT_CURRENT};
use crate::sampling::RingSampler;

/// Everything needed to build a cable and sample its field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualizationConfig {
    /// Number of cable points
    pub length: usize,
    pub shape: CableShape,
    /// Cable current (arbitrary units)
    pub current: f64,
    /// Segment point the field is measured from
    pub segment_reference: SegmentReference,
    /// Points per ring, including the closing point
    pub points_per_circle: usize,
    /// Ring stations per segment, minus one
    pub num_circles: usize,
    /// Ring radii, sampled in order
    pub radii: Vec<f64>,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            length: 30,
            shape: CableShape::Coil,
            current: DEFAULT_CURRENT,
            segment_reference: SegmentReference::Start,
            points_per_circle: 20,
            num_circles: 20,
            radii: vec![1.2, 1.3],
        }
    }
}

impl VisualizationConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid visualization config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&json)
    }

    pub fn cable(&self) -> CablePath {
        CablePath::new(self.length, self.shape)
    }

    pub fn field_model(&self) -> FieldModel {
        FieldModel {
            current: self.current,
            reference: self.segment_reference,
        }
    }

    pub fn sampler(&self) -> Result<RingSampler, CableError> {
        RingSampler::new(self.points_per_circle, self.num_circles, self.radii.clone())
    }
}
