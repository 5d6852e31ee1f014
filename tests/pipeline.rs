use cable_field::export::{read_samples, read_table, write_samples};
use cable_field::plot::{render_html, write_html, PlotOptions};
use cable_field::{field_from_cable, generate, visualize, CableShape, VisualizationConfig};
use nalgebra::Point3;
use pretty_assertions::assert_eq;

#[test]
fn test_sample_export_and_replot() {
    let dir = tempfile::tempdir().unwrap();
    let coords = dir.path().join("coords.csv");
    let vectors = dir.path().join("vectors.csv");
    let html = dir.path().join("field.html");

    let config = VisualizationConfig {
        length: 6,
        shape: CableShape::Coil,
        points_per_circle: 5,
        num_circles: 2,
        radii: vec![0.5, 1.0],
        ..VisualizationConfig::default()
    };
    let (cable, samples) = visualize(&config).unwrap();
    assert_eq!(samples.len(), 2 * 5 * 3 * 5);

    write_samples(&samples, &coords, &vectors).unwrap();
    assert_eq!(read_table(&coords).unwrap().len(), samples.len());

    // Shortest round-trip formatting keeps every value exact
    let reloaded = read_samples(&coords, &vectors).unwrap();
    assert_eq!(reloaded, samples);

    let page = render_html(cable.points(), &reloaded, &PlotOptions::default()).unwrap();
    write_html(&html, &page).unwrap();
    let written = std::fs::read_to_string(&html).unwrap();
    assert!(written.contains("type: \"cone\""));
}

#[test]
fn test_exported_vectors_match_direct_evaluation() {
    let dir = tempfile::tempdir().unwrap();
    let coords = dir.path().join("coords.csv");
    let vectors = dir.path().join("vectors.csv");

    let config = VisualizationConfig {
        length: 4,
        shape: CableShape::Sine,
        points_per_circle: 3,
        num_circles: 1,
        radii: vec![1.0],
        ..VisualizationConfig::default()
    };
    let (cable, samples) = visualize(&config).unwrap();
    write_samples(&samples, &coords, &vectors).unwrap();

    let reloaded = read_samples(&coords, &vectors).unwrap();
    for (point, vector) in reloaded.iter() {
        assert_eq!(*vector, field_from_cable(point, &cable, config.current));
    }
}

#[test]
fn test_straight_cable_scenario() {
    let path = generate(5, "straight").unwrap();
    let b = field_from_cable(&Point3::new(2.0, 1.0, 0.0), &path, 100.0);

    // mu0/4pi * I = 1e-5; each unit segment contributes 1e-5 / |r|^3 along +z
    let expected: f64 = [5.0f64, 2.0, 1.0, 2.0]
        .iter()
        .map(|r2| 1e-5 / r2.powf(1.5))
        .sum();
    assert!(b.x.abs() < 1e-20 && b.y.abs() < 1e-20);
    assert!((b.z - expected).abs() < 1e-15);
}
