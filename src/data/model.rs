use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::scoring::{self, ScoringError};

// ---------------------------------------------------------------------------
// PlanetType – radius bucket
// ---------------------------------------------------------------------------

/// Size class derived from the planet radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlanetType {
    #[serde(rename = "Rocky (Earth-like)")]
    Rocky,
    #[serde(rename = "Super-Earth")]
    SuperEarth,
    #[serde(rename = "Mini-Neptune")]
    MiniNeptune,
    #[serde(rename = "Neptune-like")]
    NeptuneLike,
    #[serde(rename = "Jupiter-like")]
    JupiterLike,
}

impl PlanetType {
    pub const ALL: [PlanetType; 5] = [
        PlanetType::Rocky,
        PlanetType::SuperEarth,
        PlanetType::MiniNeptune,
        PlanetType::NeptuneLike,
        PlanetType::JupiterLike,
    ];

    /// Bucket a radius (Earth radii) into a size class.
    pub fn from_radius(radius: f64) -> Self {
        if radius < 1.25 {
            PlanetType::Rocky
        } else if radius < 2.0 {
            PlanetType::SuperEarth
        } else if radius < 4.0 {
            PlanetType::MiniNeptune
        } else if radius < 10.0 {
            PlanetType::NeptuneLike
        } else {
            PlanetType::JupiterLike
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanetType::Rocky => "Rocky (Earth-like)",
            PlanetType::SuperEarth => "Super-Earth",
            PlanetType::MiniNeptune => "Mini-Neptune",
            PlanetType::NeptuneLike => "Neptune-like",
            PlanetType::JupiterLike => "Jupiter-like",
        }
    }
}

impl fmt::Display for PlanetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlanetType {
    type Err = String;

    /// Case-sensitive: only the exact labels are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanetType::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| format!("unknown planet type '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// ObservedPlanet – one raw row from the archive
// ---------------------------------------------------------------------------

/// A planet as delivered by the ingestion source, before scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservedPlanet {
    pub name: Option<String>,
    pub host_name: Option<String>,
    /// Earth radii.
    pub radius: Option<f64>,
    /// Equilibrium temperature in Kelvin.
    pub temperature: Option<f64>,
    /// Orbital period in days.
    pub period: Option<f64>,
    /// Earth masses.
    pub mass: Option<f64>,
    pub method: Option<String>,
    pub year: Option<i32>,
}

// ---------------------------------------------------------------------------
// PlanetRecord – one scored, immutable catalog entry
// ---------------------------------------------------------------------------

/// A confirmed exoplanet with its derived attributes attached.
///
/// Fields are read-only: the only way to obtain a record is through
/// [`PlanetRecord::score`], so the score and planet type always match the
/// physical attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetRecord {
    name: String,
    host_name: Option<String>,
    radius: f64,
    temperature: Option<f64>,
    period: Option<f64>,
    mass: Option<f64>,
    method: Option<String>,
    year: Option<i32>,
    planet_type: PlanetType,
    score: u8,
}

impl PlanetRecord {
    /// Score an observed planet. Fails when the radius is unusable; rows
    /// without a name are rejected the same way. Non-finite optional
    /// measurements are stored as missing.
    pub fn score(observed: ObservedPlanet) -> Result<Self, ScoringError> {
        let name = observed
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ScoringError::InvalidInput("planet name is missing".into()))?;

        let score = scoring::score(observed.radius, observed.temperature, observed.period)?;
        // scoring::score already rejected a missing radius.
        let radius = observed.radius.unwrap_or_default();

        let finite = |v: Option<f64>| v.filter(|v| v.is_finite());

        Ok(PlanetRecord {
            name,
            host_name: observed.host_name,
            radius,
            temperature: finite(observed.temperature),
            period: finite(observed.period),
            mass: finite(observed.mass),
            method: observed.method,
            year: observed.year,
            planet_type: PlanetType::from_radius(radius),
            score,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host_name(&self) -> Option<&str> {
        self.host_name.as_deref()
    }

    /// Earth radii.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Kelvin.
    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    /// Days.
    pub fn period(&self) -> Option<f64> {
        self.period
    }

    /// Earth masses.
    pub fn mass(&self) -> Option<f64> {
        self.mass
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn planet_type(&self) -> PlanetType {
        self.planet_type
    }

    /// Habitability score in `[0, 100]`.
    pub fn habitability(&self) -> u8 {
        self.score
    }

    pub fn is_potentially_habitable(&self) -> bool {
        scoring::is_potentially_habitable(self.score)
    }

    /// Back to the raw shape, e.g. to rescore after the scoring bands change.
    pub fn to_observed(&self) -> ObservedPlanet {
        ObservedPlanet {
            name: Some(self.name.clone()),
            host_name: self.host_name.clone(),
            radius: Some(self.radius),
            temperature: self.temperature,
            period: self.period,
            mass: self.mass,
            method: self.method.clone(),
            year: self.year,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete enriched dataset
// ---------------------------------------------------------------------------

/// Outcome of one enrichment pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// Rows whose name already has a scored record; the first one wins.
    pub duplicates: usize,
    /// Rows that could not be scored, with the row name (or its index).
    pub rejected: Vec<(String, ScoringError)>,
}

/// The full scored catalog with pre-computed column indices.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<PlanetRecord>,
    /// Sorted set of discovery methods present.
    pub methods: BTreeSet<String>,
    /// Sorted set of planet types present.
    pub planet_types: BTreeSet<PlanetType>,
}

impl Catalog {
    /// Build from already scored records, keeping their order. Names are
    /// unique keys: a repeated name keeps its first record and the rest are
    /// dropped with a warning.
    pub(crate) fn from_records(records: Vec<PlanetRecord>) -> Self {
        let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
        let records: Vec<PlanetRecord> = records
            .into_iter()
            .filter(|r| {
                let first = seen.insert(r.name.clone());
                if !first {
                    log::warn!("Dropping repeated planet {}", r.name);
                }
                first
            })
            .collect();
        let methods = records.iter().filter_map(|r| r.method.clone()).collect();
        let planet_types = records.iter().map(PlanetRecord::planet_type).collect();
        Catalog {
            records,
            methods,
            planet_types,
        }
    }

    /// Single enrichment pass over raw rows: score every row, keep the first
    /// scoreable row of each name and report every row that could not be
    /// scored.
    pub fn ingest(rows: Vec<ObservedPlanet>) -> (Self, IngestReport) {
        let mut report = IngestReport::default();
        let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
        let mut records = Vec::with_capacity(rows.len());

        for (row_no, row) in rows.into_iter().enumerate() {
            if row.name.as_ref().is_some_and(|name| seen.contains(name)) {
                report.duplicates += 1;
                continue;
            }
            let label = row.name.clone().unwrap_or_else(|| format!("row {row_no}"));
            match PlanetRecord::score(row) {
                Ok(record) => {
                    seen.insert(record.name.clone());
                    records.push(record);
                }
                Err(e) => {
                    log::warn!("Skipping {label}: {e}");
                    report.rejected.push((label, e));
                }
            }
        }

        (Catalog::from_records(records), report)
    }

    pub fn records(&self) -> &[PlanetRecord] {
        &self.records
    }

    /// Number of planets.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest discovery year present.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let mut years = self.records.iter().filter_map(|r| r.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::observed;

    #[test]
    fn planet_type_bucket_edges() {
        assert_eq!(PlanetType::from_radius(1.24), PlanetType::Rocky);
        assert_eq!(PlanetType::from_radius(1.25), PlanetType::SuperEarth);
        assert_eq!(PlanetType::from_radius(2.0), PlanetType::MiniNeptune);
        assert_eq!(PlanetType::from_radius(4.0), PlanetType::NeptuneLike);
        assert_eq!(PlanetType::from_radius(10.0), PlanetType::JupiterLike);
    }

    #[test]
    fn planet_type_parse_is_case_sensitive() {
        assert_eq!("Super-Earth".parse::<PlanetType>(), Ok(PlanetType::SuperEarth));
        assert!("super-earth".parse::<PlanetType>().is_err());
        for t in PlanetType::ALL {
            assert_eq!(t.to_string().parse::<PlanetType>(), Ok(t));
        }
    }

    #[test]
    fn scored_record_matches_engine() {
        let record = PlanetRecord::score(observed("Kepler-442b", 1.34, 233.0, 112.3)).unwrap();
        assert_eq!(
            record.habitability(),
            scoring::score(Some(1.34), Some(233.0), Some(112.3)).unwrap()
        );
        assert_eq!(record.planet_type(), PlanetType::SuperEarth);
        assert!(record.is_potentially_habitable());

        let rescored = PlanetRecord::score(record.to_observed()).unwrap();
        assert_eq!(rescored, record);
    }

    #[test]
    fn record_without_name_is_rejected() {
        let mut row = observed("x", 1.0, 250.0, 300.0);
        row.name = Some("   ".into());
        assert!(PlanetRecord::score(row).is_err());
    }

    #[test]
    fn ingest_dedups_and_reports_rejections() {
        let rows = vec![
            observed("A", 1.0, 250.0, 300.0),
            observed("A", 11.0, 1500.0, 2.0),
            observed("B", 0.0, 250.0, 300.0),
            ObservedPlanet {
                radius: Some(1.0),
                ..Default::default()
            },
            observed("C", 3.0, 600.0, 10.0),
        ];

        let (catalog, report) = Catalog::ingest(rows);
        let names: Vec<&str> = catalog.records().iter().map(PlanetRecord::name).collect();
        assert_eq!(names, ["A", "C"]);
        assert_eq!(catalog.records()[0].radius(), 1.0);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].0, "B");
        assert_eq!(report.rejected[1].0, "row 3");
    }

    #[test]
    fn unscoreable_first_row_does_not_hide_a_later_one() {
        let mut first = observed("K2-18 b", 2.6, 255.0, 32.9);
        first.radius = None;
        let rows = vec![first, observed("K2-18 b", 2.6, 255.0, 32.9)];

        let (catalog, report) = Catalog::ingest(rows);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].radius(), 2.6);
        assert_eq!(report.duplicates, 0);
        assert_eq!(report.rejected.len(), 1);
    }

    #[test]
    fn non_finite_measurements_are_stored_as_missing() {
        let mut row = observed("X", 1.0, f64::INFINITY, f64::NAN);
        row.mass = Some(f64::NEG_INFINITY);
        let record = PlanetRecord::score(row).unwrap();
        assert_eq!(record.temperature(), None);
        assert_eq!(record.period(), None);
        assert_eq!(record.mass(), None);
        assert_eq!(record.habitability(), 50);
    }

    #[test]
    fn repeated_names_keep_the_first_record() {
        let a = PlanetRecord::score(observed("A", 1.0, 250.0, 300.0)).unwrap();
        let a_again = PlanetRecord::score(observed("A", 11.0, 1500.0, 2.0)).unwrap();
        let b = PlanetRecord::score(observed("B", 3.0, 600.0, 10.0)).unwrap();

        let catalog = Catalog::from_records(vec![a.clone(), a_again, b]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[0], a);
    }

    #[test]
    fn catalog_indices() {
        let mut a = observed("A", 1.0, 250.0, 300.0);
        a.method = Some("Transit".into());
        a.year = Some(2016);
        let mut b = observed("B", 12.0, 1200.0, 3.0);
        b.method = Some("Radial Velocity".into());
        b.year = Some(1995);
        let (catalog, _) = Catalog::ingest(vec![a, b]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.methods.iter().collect::<Vec<_>>(),
            ["Radial Velocity", "Transit"]
        );
        assert!(catalog.planet_types.contains(&PlanetType::JupiterLike));
        assert_eq!(catalog.year_span(), Some((1995, 2016)));
        assert_eq!(Catalog::default().year_span(), None);
    }
}
