//! cable-field: CLI for sampling, exporting and plotting cable magnetic fields

use std::path::PathBuf;

use anyhow::{Context, Result};
use cable_field::export::{read_samples, write_samples};
use cable_field::plot::{render_html, write_html, PlotOptions};
use cable_field::{visualize, CableShape, SegmentReference, VisualizationConfig};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cable-field")]
#[command(about = "Magnetic field around a current-carrying cable (discretized Biot-Savart)")]
#[command(version)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of cable points
    #[arg(long)]
    length: Option<usize>,

    /// Cable shape (straight, sine, coil)
    #[arg(long)]
    shape: Option<String>,

    /// Cable current
    #[arg(long)]
    current: Option<f64>,

    /// Points per sampling ring
    #[arg(long)]
    points_per_circle: Option<usize>,

    /// Ring stations per segment, minus one
    #[arg(long)]
    num_circles: Option<usize>,

    /// Ring radius (repeat for several radii)
    #[arg(long = "radius")]
    radii: Vec<f64>,

    /// Measure each segment's field from its midpoint instead of its start
    #[arg(long)]
    midpoint: bool,

    /// Output CSV of query points
    #[arg(long, requires = "vectors_out")]
    coords_out: Option<PathBuf>,

    /// Output CSV of field vectors
    #[arg(long, requires = "coords_out")]
    vectors_out: Option<PathBuf>,

    /// Output HTML cone plot
    #[arg(long)]
    html_out: Option<PathBuf>,

    /// Plot previously exported tables instead of recomputing
    #[arg(long, num_args = 2, value_names = ["COORDS", "VECTORS"], requires = "html_out")]
    from_files: Option<Vec<PathBuf>>,

    /// Cone size reference for the plot (default 1, or 3 with --from-files)
    #[arg(long)]
    sizeref: Option<f64>,

    /// Print the resolved config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn resolve_config(args: &Args) -> Result<VisualizationConfig> {
    let mut config = match &args.config {
        Some(path) => VisualizationConfig::load(path)?,
        None => VisualizationConfig::default(),
    };

    if let Some(length) = args.length {
        config.length = length;
    }
    if let Some(shape) = &args.shape {
        config.shape = shape.parse::<CableShape>()?;
    }
    if let Some(current) = args.current {
        config.current = current;
    }
    if let Some(points_per_circle) = args.points_per_circle {
        config.points_per_circle = points_per_circle;
    }
    if let Some(num_circles) = args.num_circles {
        config.num_circles = num_circles;
    }
    if !args.radii.is_empty() {
        config.radii = args.radii.clone();
    }
    if args.midpoint {
        config.segment_reference = SegmentReference::Midpoint;
    }

    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = resolve_config(&args)?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let (cable, samples, default_sizeref) = match &args.from_files {
        Some(files) => {
            let samples = read_samples(&files[0], &files[1])
                .with_context(|| format!("Failed to read exported tables: {:?}", files))?;
            info!(rows = samples.len(), "loaded field samples");
            (config.cable(), samples, 3.0)
        }
        None => {
            let (cable, samples) = visualize(&config).context("Field sampling failed")?;
            (cable, samples, 1.0)
        }
    };

    if let (Some(coords), Some(vectors)) = (&args.coords_out, &args.vectors_out) {
        write_samples(&samples, coords, vectors)
            .with_context(|| format!("Failed to write tables: {:?}, {:?}", coords, vectors))?;
    }

    if let Some(html_path) = &args.html_out {
        let options = PlotOptions {
            title: format!("{} cable, {} points", config.shape, config.length),
            sizeref: args.sizeref.unwrap_or(default_sizeref),
        };
        let html = render_html(cable.points(), &samples, &options)?;
        write_html(html_path, &html)?;
    }

    println!(
        "{} samples around a {}-point {} cable, max |B| = {:e}",
        samples.len(),
        cable.len(),
        config.shape,
        samples.max_magnitude()
    );

    Ok(())
}
