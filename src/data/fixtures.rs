//! Shared test catalog.

use super::model::{Catalog, ObservedPlanet};

pub fn observed(name: &str, radius: f64, temperature: f64, period: f64) -> ObservedPlanet {
    ObservedPlanet {
        name: Some(name.to_string()),
        radius: Some(radius),
        temperature: Some(temperature),
        period: Some(period),
        ..Default::default()
    }
}

fn planet(
    name: &str,
    host: &str,
    radius: f64,
    temperature: Option<f64>,
    period: Option<f64>,
    method: &str,
    year: i32,
) -> ObservedPlanet {
    ObservedPlanet {
        name: Some(name.to_string()),
        host_name: Some(host.to_string()),
        radius: Some(radius),
        temperature,
        period,
        method: Some(method.to_string()),
        year: Some(year),
        ..Default::default()
    }
}

/// Small catalog, deliberately not in year/name order.
pub fn sample_catalog() -> Catalog {
    let mut rows = vec![
        planet("TRAPPIST-1e", "TRAPPIST-1", 0.92, Some(251.0), Some(6.1), "Transit", 2017),
        planet("Kepler-442b", "Kepler-442", 1.34, Some(233.0), Some(112.3), "Transit", 2015),
        planet("HD-generic-1", "HD-generic", 11.2, Some(1400.0), Some(4.0), "Radial Velocity", 2015),
        planet("51 Peg b", "51 Peg", 21.0, Some(1284.0), Some(4.23), "Radial Velocity", 1995),
        planet("TRAPPIST-1f", "TRAPPIST-1", 1.05, Some(219.0), Some(9.2), "Transit", 2017),
        planet("Kepler-22b", "Kepler-22", 2.1, None, Some(289.9), "Transit", 2011),
        planet("GJ 1214 b", "GJ 1214", 2.74, Some(596.0), None, "Transit", 2009),
        planet("OGLE-2005-BLG-390L b", "OGLE-2005-BLG-390L", 1.5, Some(50.0), Some(3500.0), "Microlensing", 2005),
    ];
    // Masses are only known for some planets.
    rows[0].mass = Some(0.69);
    rows[3].mass = Some(146.0);
    let (catalog, report) = Catalog::ingest(rows);
    assert!(report.rejected.is_empty());
    catalog
}
