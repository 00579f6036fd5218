/// Data layer: planet records, scoring, loading, querying and export.
///
/// Architecture:
/// ```text
///  archive .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<ObservedPlanet>
///   └──────────┘
///        │  scoring::score
///        ▼
///   ┌──────────┐        ┌─────────┐
///   │ Catalog  │ ◀────▶ │  store  │  enriched catalog as .parquet
///   └──────────┘        └─────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → ordered matches
///   └──────────┘
///        │
///        ├──▶ export  (CSV)
///        └──▶ stats   (charts, top lists)
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod scoring;
pub mod stats;
pub mod store;

#[cfg(test)]
pub(crate) mod fixtures;
