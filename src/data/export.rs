use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, Serializer};

use super::model::PlanetRecord;

// ---------------------------------------------------------------------------
// Flat export row
// ---------------------------------------------------------------------------

/// One line of the CSV export. Header names are the attribute names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub name: String,
    #[serde(serialize_with = "fixed_2")]
    pub radius: f64,
    #[serde(serialize_with = "opt_fixed_2")]
    pub temperature: Option<f64>,
    #[serde(serialize_with = "opt_fixed_4")]
    pub period: Option<f64>,
    pub method: Option<String>,
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub planet_type: String,
    pub score: u8,
}

impl From<&PlanetRecord> for ExportRow {
    fn from(r: &PlanetRecord) -> Self {
        ExportRow {
            name: r.name().to_string(),
            radius: r.radius(),
            temperature: r.temperature(),
            period: r.period(),
            method: r.method().map(str::to_string),
            year: r.year(),
            planet_type: r.planet_type().to_string(),
            score: r.habitability(),
        }
    }
}

fn fixed_2<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{v:.2}"))
}

fn opt_fixed_2<S: Serializer>(v: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    match v {
        Some(v) => fixed_2(v, s),
        None => s.serialize_none(),
    }
}

fn opt_fixed_4<S: Serializer>(v: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    match v {
        Some(v) => s.serialize_str(&format!("{v:.4}")),
        None => s.serialize_none(),
    }
}

// ---------------------------------------------------------------------------
// Writing / reading
// ---------------------------------------------------------------------------

/// Write records as CSV, header first.
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a PlanetRecord>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for record in records {
        wtr.serialize(ExportRow::from(record))
            .with_context(|| format!("writing row for {}", record.name()))?;
        rows += 1;
    }
    if rows == 0 {
        // serde only emits the header together with the first row.
        wtr.write_record(HEADER)?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(rows)
}

/// CSV export as a string.
pub fn to_csv_string<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a PlanetRecord>,
{
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    String::from_utf8(buf).context("CSV output is not UTF-8")
}

/// Write the export to a file.
pub fn export_to_path<'a, I>(path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a PlanetRecord>,
{
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let rows = write_csv(file, records)?;
    log::info!("Exported {rows} planets to {}", path.display());
    Ok(rows)
}

/// Parse an export back into rows.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<ExportRow>> {
    let mut rdr = csv::Reader::from_reader(reader);
    rdr.deserialize()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("CSV row {i}")))
        .collect()
}

pub const HEADER: [&str; 8] = [
    "name",
    "radius",
    "temperature",
    "period",
    "method",
    "year",
    "type",
    "score",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{self, FilterCriteria, Range};
    use crate::data::fixtures::{observed, sample_catalog};
    use crate::data::model::Catalog;

    #[test]
    fn header_and_formatting() {
        let catalog = sample_catalog();
        let kepler = catalog
            .records()
            .iter()
            .find(|r| r.name() == "Kepler-442b")
            .unwrap();
        let text = to_csv_string([kepler]).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(HEADER.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("Kepler-442b,1.34,233.00,112.3000,Transit,2015,Super-Earth,91")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn missing_values_are_empty_fields() {
        let catalog = sample_catalog();
        let kepler_22b = catalog
            .records()
            .iter()
            .find(|r| r.name() == "Kepler-22b")
            .unwrap();
        let text = to_csv_string([kepler_22b]).unwrap();
        assert!(text.contains("Kepler-22b,2.10,,289.9000,Transit,2011,Mini-Neptune,58"));
    }

    #[test]
    fn empty_result_still_has_header() {
        let text = to_csv_string(std::iter::empty()).unwrap();
        assert_eq!(text.trim_end(), HEADER.join(","));
        assert!(parse_csv(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn filtered_export_round_trips() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria {
            radius: Range::at_most(5.0),
            ..Default::default()
        };
        let result = filter::apply(&catalog, &criteria).unwrap();
        let text = to_csv_string(result.iter().copied()).unwrap();
        let parsed = parse_csv(text.as_bytes()).unwrap();

        assert_eq!(parsed.len(), result.len());
        for (row, record) in parsed.iter().zip(&result) {
            let expected = ExportRow::from(*record);
            assert_eq!(row.name, expected.name);
            assert!((row.radius - expected.radius).abs() < 0.005);
            match (row.temperature, expected.temperature) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 0.005),
                (a, b) => assert_eq!(a, b),
            }
            match (row.period, expected.period) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 0.00005),
                (a, b) => assert_eq!(a, b),
            }
            assert_eq!(row.method, expected.method);
            assert_eq!(row.year, expected.year);
            assert_eq!(row.planet_type, expected.planet_type);
            assert_eq!(row.score, expected.score);
        }
    }

    #[test]
    fn non_finite_measurements_export_and_filter_as_missing() {
        let (catalog, _) = Catalog::ingest(vec![observed("X", 1.0, f64::INFINITY, f64::NAN)]);

        let criteria = FilterCriteria {
            temperature: Range::at_least(0.0),
            ..Default::default()
        };
        assert!(filter::apply(&catalog, &criteria).unwrap().is_empty());

        let text = to_csv_string(catalog.records()).unwrap();
        assert_eq!(text.lines().nth(1), Some("X,1.00,,,,,Rocky (Earth-like),50"));
    }

    #[test]
    fn export_to_file() {
        let catalog = sample_catalog();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planets.csv");
        let rows = export_to_path(&path, catalog.records()).unwrap();
        assert_eq!(rows, catalog.len());

        let file = std::fs::File::open(&path).unwrap();
        assert_eq!(parse_csv(file).unwrap().len(), catalog.len());
    }
}
