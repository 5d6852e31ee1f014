//! Standalone HTML cone plot of sampled field vectors (Plotly via CDN)

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use minijinja::{context, Environment};
use nalgebra::Point3;

use crate::sampling::FieldSamples;

const PLOT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{ title|e }}</title>
<!-- Generated: {{ timestamp }} -->
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
</head>
<body>
<div id="plot" style="width:100%;height:100vh;"></div>
<script>
const cable = {
    type: "scatter3d",
    mode: "lines",
    name: "cable",
    x: {{ cable_x }},
    y: {{ cable_y }},
    z: {{ cable_z }},
    line: { width: 6 }
};

const cones = {
    type: "cone",
    name: "B",
    x: {{ x }},
    y: {{ y }},
    z: {{ z }},
    u: {{ u }},
    v: {{ v }},
    w: {{ w }},
    sizemode: "scaled",
    sizeref: {{ sizeref }}
};

Plotly.newPlot("plot", [cable, cones], {
    title: { text: {{ title_json }} },
    scene: { aspectmode: "data" }
});
</script>
</body>
</html>
"##;

/// Presentation settings for the cone plot
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    /// Plotly cone `sizeref` (larger values draw smaller cones)
    pub sizeref: f64,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: "Magnetic field around cable".to_string(),
            sizeref: 1.0,
        }
    }
}

fn column<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>, pick: impl Fn(&T) -> f64) -> Result<String> {
    let values: Vec<f64> = items.into_iter().map(pick).collect();
    Ok(serde_json::to_string(&values)?)
}

/// JSON literal safe to embed in a `<script>` block
fn script_json(value: &str) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Render the cable polyline and one cone per sample
pub fn render_html(cable: &[Point3<f64>], samples: &FieldSamples, options: &PlotOptions) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("plot", PLOT_TEMPLATE)?;
    let template = env.get_template("plot")?;

    let output = template.render(context! {
        title => &options.title,
        title_json => script_json(&options.title)?,
        timestamp => chrono::Utc::now().to_rfc3339(),
        sizeref => options.sizeref,
        cable_x => column(cable, |p| p.x)?,
        cable_y => column(cable, |p| p.y)?,
        cable_z => column(cable, |p| p.z)?,
        x => column(&samples.points, |p| p.x)?,
        y => column(&samples.points, |p| p.y)?,
        z => column(&samples.points, |p| p.z)?,
        u => column(&samples.vectors, |v| v.x)?,
        v => column(&samples.vectors, |v| v.y)?,
        w => column(&samples.vectors, |v| v.z)?,
    })?;

    Ok(output)
}

pub fn write_html(path: &Path, html: &str) -> Result<()> {
    fs::write(path, html).with_context(|| format!("Failed to write plot file: {:?}", path))?;
    tracing::info!(?path, "wrote field plot");
    Ok(())
}
