//! Flat numeric export: headerless CSV tables of 3-component rows
//!
//! Query points and field vectors go to two separate files, one row per
//! sample, so row `i` of the point table pairs with row `i` of the vector
//! table.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::{Point3, Vector3};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::ExportError;
use crate::sampling::FieldSamples;

/// Write rows as `x,y,z` lines
pub fn write_rows<W: Write>(writer: &mut W, rows: impl IntoIterator<Item = [f64; 3]>) -> Result<usize, ExportError> {
    let mut count = 0;
    for [x, y, z] in rows {
        writeln!(writer, "{:e},{:e},{:e}", x, y, z)?;
        count += 1;
    }
    Ok(count)
}

/// Parse `x,y,z` lines; blank lines are skipped
pub fn read_rows<R: BufRead>(reader: R) -> Result<Vec<[f64; 3]>, ExportError> {
    let mut rows = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let line_no = index + 1;
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(ExportError::Parse {
                line: line_no,
                message: format!("expected 3 columns, found {}", fields.len()),
            });
        }

        let mut row = [0.0; 3];
        for (slot, field) in row.iter_mut().zip(&fields) {
            *slot = field.parse().map_err(|_| ExportError::Parse {
                line: line_no,
                message: format!("not a number: {:?}", field),
            })?;
        }
        rows.push(row);
    }

    Ok(rows)
}

pub fn write_table(path: &Path, rows: impl IntoIterator<Item = [f64; 3]>) -> Result<usize, ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let count = write_rows(&mut writer, rows)?;
    writer.flush()?;
    Ok(count)
}

pub fn read_table(path: &Path) -> Result<Vec<[f64; 3]>, ExportError> {
    read_rows(BufReader::new(File::open(path)?))
}

/// Write rows to a temporary file next to `path`, not yet moved into place
fn stage_table(path: &Path, rows: impl IntoIterator<Item = [f64; 3]>) -> Result<(NamedTempFile, usize), ExportError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    let count = {
        let mut writer = BufWriter::new(staged.as_file_mut());
        let count = write_rows(&mut writer, rows)?;
        writer.flush()?;
        count
    };
    Ok((staged, count))
}

/// Write the point table and the vector table of `samples`.
///
/// Both tables are staged first; neither file is touched unless both were
/// written completely.
pub fn write_samples(samples: &FieldSamples, coords_path: &Path, vectors_path: &Path) -> Result<(), ExportError> {
    let (coords, points) = stage_table(coords_path, samples.points.iter().map(|p| [p.x, p.y, p.z]))?;
    let (vectors, rows) = stage_table(vectors_path, samples.vectors.iter().map(|v| [v.x, v.y, v.z]))?;
    debug_assert_eq!(points, rows);

    coords.persist(coords_path).map_err(|e| ExportError::Io(e.error))?;
    vectors.persist(vectors_path).map_err(|e| ExportError::Io(e.error))?;
    info!(rows = points, ?coords_path, ?vectors_path, "exported field samples");
    Ok(())
}

/// Read a pair of tables written by [`write_samples`]
pub fn read_samples(coords_path: &Path, vectors_path: &Path) -> Result<FieldSamples, ExportError> {
    let points = read_table(coords_path)?;
    let vectors = read_table(vectors_path)?;

    if points.len() != vectors.len() {
        return Err(ExportError::RowCountMismatch {
            points: points.len(),
            vectors: vectors.len(),
        });
    }

    Ok(FieldSamples {
        points: points.into_iter().map(Point3::from).collect(),
        vectors: vectors.into_iter().map(Vector3::from).collect(),
    })
}
