use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Catalog, IngestReport, ObservedPlanet};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// The attributes read from a source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Column {
    Name,
    Host,
    Radius,
    Temperature,
    Period,
    Mass,
    Method,
    Year,
}

/// Map a header to an attribute. Accepts the NASA Exoplanet Archive column
/// names and the names used by the CSV export.
fn column_for(header: &str) -> Option<Column> {
    match header.trim() {
        "pl_name" | "name" => Some(Column::Name),
        "hostname" | "host_name" => Some(Column::Host),
        "pl_rade" | "radius" => Some(Column::Radius),
        "pl_eqt" | "temperature" => Some(Column::Temperature),
        "pl_orbper" | "period" => Some(Column::Period),
        "pl_masse" | "mass" => Some(Column::Mass),
        "discoverymethod" | "method" => Some(Column::Method),
        "disc_year" | "year" => Some(Column::Year),
        _ => None,
    }
}

/// A single source cell, before it is assigned to a typed field.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Null,
}

impl Cell {
    fn into_text(self) -> Option<String> {
        match self {
            Cell::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Cell::Number(n) => Some(n.to_string()),
            Cell::Null => None,
        }
    }

    /// Unparseable text is treated as missing, like a coerced numeric column.
    fn into_number(self) -> Option<f64> {
        let n = match self {
            Cell::Number(n) => Some(n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Null => None,
        };
        n.filter(|n| n.is_finite())
    }
}

fn assign(planet: &mut ObservedPlanet, column: Column, cell: Cell) {
    match column {
        Column::Name => planet.name = cell.into_text(),
        Column::Host => planet.host_name = cell.into_text(),
        Column::Radius => planet.radius = cell.into_number(),
        Column::Temperature => planet.temperature = cell.into_number(),
        Column::Period => planet.period = cell.into_number(),
        Column::Mass => planet.mass = cell.into_number(),
        Column::Method => planet.method = cell.into_text(),
        Column::Year => {
            planet.year = cell
                .into_number()
                .filter(|y| y.fract() == 0.0 && *y >= i32::MIN as f64 && *y <= i32::MAX as f64)
                .map(|y| y as i32)
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load raw planet rows from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – one row per planet, archive or export column names
/// * `.json`    – `[{ "pl_name": "...", "pl_rade": 1.0, ... }, ...]`
/// * `.csv`     – header row with archive or export column names
pub fn load_file(path: &Path) -> Result<Vec<ObservedPlanet>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;
    log::info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load a file and run the enrichment pass over it.
pub fn load_catalog(path: &Path) -> Result<(Catalog, IngestReport)> {
    let rows = load_file(path)?;
    let (catalog, report) = Catalog::ingest(rows);
    log::info!(
        "Scored {} planets ({} duplicates dropped, {} rejected)",
        catalog.len(),
        report.duplicates,
        report.rejected.len()
    );
    Ok((catalog, report))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as returned by the archive's TAP service with
/// `format=json`.
fn load_json(path: &Path) -> Result<Vec<ObservedPlanet>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Vec<ObservedPlanet>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;

            let mut planet = ObservedPlanet::default();
            for (key, val) in obj {
                if let Some(column) = column_for(key) {
                    assign(&mut planet, column, json_to_cell(val));
                }
            }
            Ok(planet)
        })
        .collect()
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => n.as_f64().map_or(Cell::Null, Cell::Number),
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<ObservedPlanet>> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_csv(file)
}

fn parse_csv<R: std::io::Read>(source: R) -> Result<Vec<ObservedPlanet>> {
    let mut reader = csv::ReaderBuilder::new()
        // The archive's CSV download starts with `#` comment lines.
        .comment(Some(b'#'))
        .from_reader(source);
    let columns: Vec<Option<Column>> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(column_for)
        .collect();

    if !columns.contains(&Some(Column::Name)) {
        bail!("CSV missing 'pl_name' (or 'name') column");
    }

    let mut planets = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let mut planet = ObservedPlanet::default();
        for (column, value) in columns.iter().zip(record.iter()) {
            if let Some(column) = column {
                let cell = if value.is_empty() {
                    Cell::Null
                } else {
                    Cell::Text(value.to_string())
                };
                assign(&mut planet, *column, cell);
            }
        }
        planets.push(planet);
    }

    Ok(planets)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load archive rows from Parquet. Any column type among strings, integers
/// and floats is accepted for any attribute; unknown columns are skipped.
fn load_parquet(path: &Path) -> Result<Vec<ObservedPlanet>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut planets = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let columns: HashMap<usize, Column> = schema
            .fields()
            .iter()
            .enumerate()
            .filter_map(|(i, f)| column_for(f.name()).map(|c| (i, c)))
            .collect();

        if !columns.values().any(|c| *c == Column::Name) {
            bail!("Parquet file missing 'pl_name' (or 'name') column");
        }

        for row in 0..batch.num_rows() {
            let mut planet = ObservedPlanet::default();
            for (col_idx, column) in &columns {
                let cell = extract_cell(batch.column(*col_idx), row)
                    .with_context(|| format!("Row {row}: column {}", schema.field(*col_idx).name()))?;
                assign(&mut planet, *column, cell);
            }
            planets.push(planet);
        }
    }

    Ok(planets)
}

// -- Parquet / Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<Cell> {
    if col.is_null(row) {
        return Ok(Cell::Null);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().context("expected Int32Array")?;
            Cell::Number(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().context("expected Int64Array")?;
            Cell::Number(arr.value(row) as f64)
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Cell::Number(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Cell::Number(arr.value(row))
        }
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(cell)
}
