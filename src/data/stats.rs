use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::model::{Catalog, PlanetRecord, PlanetType};

// ---------------------------------------------------------------------------
// Headline numbers
// ---------------------------------------------------------------------------

/// Catalog-wide figures shown in the sidebar and on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogSummary {
    pub total_planets: usize,
    pub host_stars: usize,
    pub potentially_habitable: usize,
    pub latest_year: Option<i32>,
}

pub fn summary(catalog: &Catalog) -> CatalogSummary {
    let records = catalog.records();
    CatalogSummary {
        total_planets: records.len(),
        host_stars: records
            .iter()
            .filter_map(PlanetRecord::host_name)
            .collect::<BTreeSet<_>>()
            .len(),
        potentially_habitable: records.iter().filter(|r| r.is_potentially_habitable()).count(),
        latest_year: records.iter().filter_map(PlanetRecord::year).max(),
    }
}

/// Averages over a (filtered) result set. `None` when nothing contributes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResultSummary {
    pub count: usize,
    pub mean_radius: Option<f64>,
    pub mean_temperature: Option<f64>,
    pub mean_score: Option<f64>,
}

pub fn result_summary(records: &[&PlanetRecord]) -> ResultSummary {
    ResultSummary {
        count: records.len(),
        mean_radius: mean(records.iter().map(|r| r.radius())),
        mean_temperature: mean(records.iter().filter_map(|r| r.temperature())),
        mean_score: mean(records.iter().map(|r| f64::from(r.habitability()))),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

// ---------------------------------------------------------------------------
// Distributions
// ---------------------------------------------------------------------------

/// Earliest year plotted on the discovery timeline.
pub const TIMELINE_START: i32 = 1990;

/// Discoveries per year from [`TIMELINE_START`] on, ascending.
pub fn discoveries_per_year(catalog: &Catalog) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in catalog.records().iter().filter_map(PlanetRecord::year) {
        if year >= TIMELINE_START {
            *counts.entry(year).or_default() += 1;
        }
    }
    counts.into_iter().collect()
}

/// The `limit` most used discovery methods, most frequent first.
pub fn top_methods(catalog: &Catalog, limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for method in catalog.records().iter().filter_map(PlanetRecord::method) {
        *counts.entry(method).or_default() += 1;
    }
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(m, n)| (m.to_string(), n))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.truncate(limit);
    counts
}

/// Planets per size class, most common first.
pub fn type_distribution(catalog: &Catalog) -> Vec<(PlanetType, usize)> {
    let mut counts: BTreeMap<PlanetType, usize> = BTreeMap::new();
    for record in catalog.records() {
        *counts.entry(record.planet_type()).or_default() += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Discovery era buckets, oldest first.
pub const ERAS: [&str; 5] = ["Pre-2000", "2000s", "2010-2015", "2015-2020", "2020+"];

/// Era label for a discovery year. Bucket upper edges are inclusive.
pub fn era(year: i32) -> &'static str {
    match year {
        i32::MIN..=2000 => ERAS[0],
        2001..=2010 => ERAS[1],
        2011..=2015 => ERAS[2],
        2016..=2020 => ERAS[3],
        _ => ERAS[4],
    }
}

/// Planets per discovery era, in [`ERAS`] order; empty eras are included.
pub fn era_distribution(catalog: &Catalog) -> Vec<(&'static str, usize)> {
    let mut counts = [0usize; ERAS.len()];
    for year in catalog.records().iter().filter_map(PlanetRecord::year) {
        let label = era(year);
        if let Some(i) = ERAS.iter().position(|e| *e == label) {
            counts[i] += 1;
        }
    }
    ERAS.into_iter().zip(counts).collect()
}

/// Habitability histogram: bin `i` counts scores in `[10i, 10i + 9]`; the
/// last bin also holds 100.
pub fn score_histogram(catalog: &Catalog) -> [usize; 10] {
    let mut bins = [0usize; 10];
    for record in catalog.records() {
        let bin = usize::from(record.habitability() / 10).min(9);
        bins[bin] += 1;
    }
    bins
}

// ---------------------------------------------------------------------------
// Top lists
// ---------------------------------------------------------------------------

fn top_by<'a, K>(
    catalog: &'a Catalog,
    limit: usize,
    key: impl Fn(&PlanetRecord) -> Option<K>,
    order: impl Fn(&K, &K) -> Ordering,
) -> Vec<&'a PlanetRecord> {
    let mut keyed: Vec<(K, &PlanetRecord)> = catalog
        .records()
        .iter()
        .filter_map(|r| key(r).map(|k| (k, r)))
        .collect();
    keyed.sort_by(|a, b| order(&a.0, &b.0).then_with(|| a.1.name().cmp(b.1.name())));
    keyed.into_iter().take(limit).map(|(_, r)| r).collect()
}

pub fn hottest(catalog: &Catalog, limit: usize) -> Vec<&PlanetRecord> {
    top_by(catalog, limit, PlanetRecord::temperature, |a, b| b.total_cmp(a))
}

/// Coldest planets with a positive temperature.
pub fn coldest(catalog: &Catalog, limit: usize) -> Vec<&PlanetRecord> {
    top_by(
        catalog,
        limit,
        |r| r.temperature().filter(|t| *t > 0.0),
        |a, b| a.total_cmp(b),
    )
}

pub fn largest(catalog: &Catalog, limit: usize) -> Vec<&PlanetRecord> {
    top_by(catalog, limit, |r| Some(r.radius()), |a, b| b.total_cmp(a))
}

/// Shortest positive orbital periods.
pub fn fastest_orbits(catalog: &Catalog, limit: usize) -> Vec<&PlanetRecord> {
    top_by(
        catalog,
        limit,
        |r| r.period().filter(|p| *p > 0.0),
        |a, b| a.total_cmp(b),
    )
}

/// Potentially habitable planets, best score first.
pub fn most_habitable(catalog: &Catalog, limit: usize) -> Vec<&PlanetRecord> {
    top_by(
        catalog,
        limit,
        |r| r.is_potentially_habitable().then(|| r.habitability()),
        |a, b| b.cmp(a),
    )
}

/// Hosts with more than one planet, largest systems first.
pub fn multi_planet_systems(catalog: &Catalog, limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for host in catalog.records().iter().filter_map(PlanetRecord::host_name) {
        *counts.entry(host).or_default() += 1;
    }
    let mut systems: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(h, n)| (h.to_string(), n))
        .collect();
    systems.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    systems.truncate(limit);
    systems
}
