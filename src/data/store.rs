use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrowPrimitiveType, AsArray, Float64Array, Int32Array, PrimitiveArray, StringArray,
    UInt8Array,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Catalog, ObservedPlanet, PlanetRecord};

// ---------------------------------------------------------------------------
// Enriched catalog store (Parquet)
// ---------------------------------------------------------------------------

fn schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("host_name", DataType::Utf8, true),
        Field::new("radius", DataType::Float64, false),
        Field::new("temperature", DataType::Float64, true),
        Field::new("period", DataType::Float64, true),
        Field::new("mass", DataType::Float64, true),
        Field::new("method", DataType::Utf8, true),
        Field::new("year", DataType::Int32, true),
        Field::new("planet_type", DataType::Utf8, false),
        Field::new("score", DataType::UInt8, false),
    ]))
}

/// Persist the scored catalog, preserving record order.
pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    let records = catalog.records();
    let schema = schema();

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(records.iter().map(PlanetRecord::name))),
            Arc::new(StringArray::from_iter(records.iter().map(PlanetRecord::host_name))),
            Arc::new(Float64Array::from_iter_values(records.iter().map(PlanetRecord::radius))),
            Arc::new(Float64Array::from_iter(records.iter().map(PlanetRecord::temperature))),
            Arc::new(Float64Array::from_iter(records.iter().map(PlanetRecord::period))),
            Arc::new(Float64Array::from_iter(records.iter().map(PlanetRecord::mass))),
            Arc::new(StringArray::from_iter(records.iter().map(PlanetRecord::method))),
            Arc::new(Int32Array::from_iter(records.iter().map(PlanetRecord::year))),
            Arc::new(StringArray::from_iter_values(
                records.iter().map(|r| r.planet_type().label()),
            )),
            Arc::new(UInt8Array::from_iter_values(
                records.iter().map(PlanetRecord::habitability),
            )),
        ],
    )
    .context("building catalog record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing catalog")?;
    writer.close().context("closing parquet writer")?;

    log::info!("Saved {} planets to {}", catalog.len(), path.display());
    Ok(())
}

/// Read a stored catalog back.
///
/// Scores are recomputed from the physical attributes; stored scores that no
/// longer agree are reported and replaced.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?
        .build()
        .context("building parquet reader")?;

    let mut records = Vec::new();
    let mut stale = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading catalog record batch")?;
        let names = string_column(&batch, "name")?;
        let hosts = string_column(&batch, "host_name")?;
        let radii = column::<Float64Array>(&batch, "radius")?;
        let temperatures = column::<Float64Array>(&batch, "temperature")?;
        let periods = column::<Float64Array>(&batch, "period")?;
        let masses = column::<Float64Array>(&batch, "mass")?;
        let methods = string_column(&batch, "method")?;
        let years = column::<Int32Array>(&batch, "year")?;
        let scores = column::<UInt8Array>(&batch, "score")?;

        for row in 0..batch.num_rows() {
            let observed = ObservedPlanet {
                name: text(names, row),
                host_name: text(hosts, row),
                radius: value(radii, row),
                temperature: value(temperatures, row),
                period: value(periods, row),
                mass: value(masses, row),
                method: text(methods, row),
                year: value(years, row),
            };
            let record = PlanetRecord::score(observed)
                .with_context(|| format!("stored row {row} is not a valid planet"))?;

            if value(scores, row) != Some(record.habitability()) {
                log::warn!(
                    "Stale score for {}: stored {:?}, recomputed {}",
                    record.name(),
                    value(scores, row),
                    record.habitability()
                );
                stale += 1;
            }
            records.push(record);
        }
    }

    if stale > 0 {
        log::info!("Recomputed {stale} stale scores");
    }
    log::info!("Loaded {} planets from {}", records.len(), path.display());
    Ok(Catalog::from_records(records))
}

/// Whether `path` is a Parquet file carrying every stored catalog column.
/// Anything else (other formats, archive-shaped Parquet) is not a store file.
pub fn is_saved_catalog(path: &Path) -> bool {
    let Ok(file) = std::fs::File::open(path) else {
        return false;
    };
    let Ok(builder) = ParquetRecordBatchReaderBuilder::try_new(file) else {
        return false;
    };
    let found = builder.schema();
    schema()
        .fields()
        .iter()
        .all(|f| found.column_with_name(f.name()).is_some())
}

// -- Arrow helpers --

fn column<'a, T: Array + 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
    let Some(col) = batch.column_by_name(name) else {
        bail!("catalog file missing '{name}' column");
    };
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("column '{name}' has type {:?}", col.data_type()))
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    let Some(col) = batch.column_by_name(name) else {
        bail!("catalog file missing '{name}' column");
    };
    col.as_string_opt::<i32>()
        .with_context(|| format!("column '{name}' has type {:?}", col.data_type()))
}

fn value<T: ArrowPrimitiveType>(array: &PrimitiveArray<T>, row: usize) -> Option<T::Native> {
    (!array.is_null(row)).then(|| array.value(row))
}

fn text(array: &StringArray, row: usize) -> Option<String> {
    (!array.is_null(row)).then(|| array.value(row).to_string())
}
