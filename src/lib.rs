//! cable-field: magnetic field of arbitrarily shaped cables
//!
//! This crate provides:
//! - Cable geometry generation (straight, sine, coil polylines)
//! - Field evaluation with a discretized Biot-Savart law
//! - Ring sampling of query points around the cable
//! - Flat CSV export and an HTML cone plot
//!
//! Lengths are in cable index units: point `i` sits at `x = i`.

pub mod cable;
pub mod config;
pub mod error;
pub mod export;
pub mod field;
pub mod plot;
pub mod sampling;

pub use cable::{generate, get_cable_structure, get_coords_at_index, CablePath, CableShape};
pub use config::VisualizationConfig;
pub use error::{CableError, ExportError};
pub use field::{field_from_cable, field_from_segment, FieldModel, SegmentReference, DEFAULT_CURRENT, MU0};
pub use sampling::{FieldSamples, RingSampler};

use anyhow::Result;

/// Main entry point: build the configured cable and sample its field
pub fn visualize(config: &VisualizationConfig) -> Result<(CablePath, FieldSamples)> {
    let path = config.cable();
    let sampler = config.sampler()?;
    let model = config.field_model();

    tracing::info!(
        shape = ?path.shape(),
        points = path.len(),
        expected_samples = sampler.sample_count(&path),
        "sampling cable field"
    );

    let samples = sampler.sample(&path, &model);
    Ok((path, samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visualize_default_config() {
        let config = VisualizationConfig {
            length: 5,
            points_per_circle: 4,
            num_circles: 2,
            ..VisualizationConfig::default()
        };
        let (path, samples) = visualize(&config).unwrap();

        assert_eq!(path.len(), 5);
        assert_eq!(samples.len(), 2 * 4 * 3 * 4);
        assert!(samples.max_magnitude() > 0.0);
    }

    #[test]
    fn test_visualize_rejects_bad_sampling() {
        let config = VisualizationConfig {
            points_per_circle: 1,
            ..VisualizationConfig::default()
        };
        let err = visualize(&config).unwrap_err();
        assert!(err.downcast_ref::<CableError>().is_some());
    }
}
