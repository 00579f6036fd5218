use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::color::TypeColors;
use crate::config::AppConfig;
use crate::data::filter::{self, FilterCriteria, QueryError};
use crate::data::model::{Catalog, IngestReport, PlanetRecord, PlanetType};
use crate::data::stats::{self, CatalogSummary};
use crate::data::{export, loader, store};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Explorer,
    Analytics,
    TopDiscoveries,
    About,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Explorer,
        Page::Analytics,
        Page::TopDiscoveries,
        Page::About,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Explorer => "Explorer",
            Page::Analytics => "Analytics",
            Page::TopDiscoveries => "Top Discoveries",
            Page::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Loaded catalog (None until the user opens a file). Never mutated;
    /// replaced wholesale when another file is opened.
    pub catalog: Option<Arc<Catalog>>,

    /// Headline numbers for the loaded catalog.
    pub summary: CatalogSummary,

    pub page: Page,

    /// Explorer predicates.
    pub criteria: FilterCriteria,

    /// Positions of records passing the current criteria, in query order.
    pub visible_indices: Vec<usize>,

    /// Set when the criteria are malformed, as opposed to matching nothing.
    pub query_error: Option<QueryError>,

    pub type_colors: TypeColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            catalog: None,
            summary: CatalogSummary::default(),
            page: Page::default(),
            criteria: FilterCriteria::default(),
            visible_indices: Vec::new(),
            query_error: None,
            type_colors: TypeColors::default(),
            status_message: None,
        }
    }

    /// Install a newly loaded catalog and reset the explorer.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.summary = stats::summary(&catalog);
        self.catalog = Some(Arc::new(catalog));
        self.criteria = FilterCriteria::default();
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` after a criteria change.
    pub fn refilter(&mut self) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        match filter::matching_indices(catalog, &self.criteria) {
            Ok(indices) => {
                self.visible_indices = indices;
                self.query_error = None;
            }
            Err(e) => {
                log::debug!("Rejected criteria: {e}");
                self.visible_indices.clear();
                self.query_error = Some(e);
            }
        }
    }

    /// Records passing the current criteria, in query order.
    pub fn visible_records(&self) -> Vec<&PlanetRecord> {
        match &self.catalog {
            Some(catalog) => {
                let records = catalog.records();
                self.visible_indices.iter().map(|&i| &records[i]).collect()
            }
            None => Vec::new(),
        }
    }

    /// Toggle a discovery method in the explorer filter.
    pub fn toggle_method(&mut self, method: &str) {
        if !self.criteria.methods.remove(method) {
            self.criteria.methods.insert(method.to_string());
        }
        self.refilter();
    }

    /// Toggle a planet type in the explorer filter.
    pub fn toggle_planet_type(&mut self, planet_type: PlanetType) {
        if !self.criteria.planet_types.remove(&planet_type) {
            self.criteria.planet_types.insert(planet_type);
        }
        self.refilter();
    }

    /// Drop every predicate.
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.refilter();
    }

    // -- file operations (dialogs live in the UI layer) --

    /// Open archive rows and score them.
    pub fn open_archive(&mut self, path: &Path) -> Result<IngestReport> {
        let (catalog, report) = loader::load_catalog(path)?;
        self.set_catalog(catalog);
        if !report.rejected.is_empty() {
            self.status_message = Some(format!(
                "{} rows skipped (missing name or radius)",
                report.rejected.len()
            ));
        }
        Ok(report)
    }

    /// Open a catalog written by [`AppState::save_catalog`].
    pub fn open_saved_catalog(&mut self, path: &Path) -> Result<()> {
        self.set_catalog(store::load_catalog(path)?);
        Ok(())
    }

    /// Open either kind of file: a `.parquet` written by the store is
    /// recognised by its schema, anything else is treated as archive rows.
    /// A store file that fails to load is reported, never reread as rows.
    pub fn open_any(&mut self, path: &Path) -> Result<()> {
        if store::is_saved_catalog(path) {
            self.open_saved_catalog(path)
        } else {
            log::debug!("{} is not a saved catalog, reading as archive rows", path.display());
            self.open_archive(path).map(|_| ())
        }
    }

    pub fn save_catalog(&self, path: &Path) -> Result<()> {
        match &self.catalog {
            Some(catalog) => store::save_catalog(path, catalog),
            None => anyhow::bail!("no catalog loaded"),
        }
    }

    /// Write the current explorer result as CSV.
    pub fn export_visible(&self, path: &Path) -> Result<usize> {
        export::export_to_path(path, self.visible_records())
    }

    /// Record a failed operation for display.
    pub fn report_error(&mut self, context: &str, error: &anyhow::Error) {
        log::error!("{context}: {error:#}");
        self.status_message = Some(format!("{context}: {error:#}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Range;
    use crate::data::fixtures::sample_catalog;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(AppConfig::default());
        state.set_catalog(sample_catalog());
        state
    }

    #[test]
    fn new_catalog_shows_everything() {
        let state = loaded_state();
        assert_eq!(state.visible_indices, (0..8).collect::<Vec<_>>());
        assert_eq!(state.summary.potentially_habitable, 4);
        assert!(state.query_error.is_none());
    }

    #[test]
    fn toggles_narrow_and_restore() {
        let mut state = loaded_state();
        state.toggle_method("Radial Velocity");
        let names: Vec<&str> = state.visible_records().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["51 Peg b", "HD-generic-1"]);

        state.toggle_planet_type(PlanetType::Rocky);
        assert!(state.visible_indices.is_empty());
        assert!(state.query_error.is_none());

        state.toggle_method("Radial Velocity");
        state.toggle_planet_type(PlanetType::Rocky);
        assert_eq!(state.visible_indices.len(), 8);
    }

    #[test]
    fn malformed_criteria_are_reported() {
        let mut state = loaded_state();
        state.criteria.year = Range::between(2020, 2000);
        state.refilter();
        assert!(matches!(
            state.query_error,
            Some(QueryError::InvalidCriteria { field: "year", .. })
        ));
        assert!(state.visible_indices.is_empty());

        state.clear_filters();
        assert!(state.query_error.is_none());
        assert_eq!(state.visible_indices.len(), 8);
    }

    #[test]
    fn save_then_open_any() {
        let state = loaded_state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.parquet");
        state.save_catalog(&path).unwrap();

        let mut reopened = AppState::new(AppConfig::default());
        reopened.open_any(&path).unwrap();
        assert_eq!(reopened.summary, state.summary);
    }

    #[test]
    fn broken_store_file_is_not_reread_as_archive_rows() {
        use arrow::array::{Float64Array, Int32Array, StringArray, UInt8Array};
        use arrow::datatypes::{DataType, Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let nullable = |name: &str, data_type: DataType| Field::new(name, data_type, true);
        let schema = Arc::new(Schema::new(vec![
            nullable("name", DataType::Utf8),
            nullable("host_name", DataType::Utf8),
            nullable("radius", DataType::Float64),
            nullable("temperature", DataType::Float64),
            nullable("period", DataType::Float64),
            nullable("mass", DataType::Float64),
            nullable("method", DataType::Utf8),
            nullable("year", DataType::Int32),
            nullable("planet_type", DataType::Utf8),
            nullable("score", DataType::UInt8),
        ]));
        // The second row has a negative radius.
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(StringArray::from(vec![None::<&str>, None])),
                Arc::new(Float64Array::from(vec![1.0, -1.0])),
                Arc::new(Float64Array::from(vec![None::<f64>, None])),
                Arc::new(Float64Array::from(vec![None::<f64>, None])),
                Arc::new(Float64Array::from(vec![None::<f64>, None])),
                Arc::new(StringArray::from(vec![None::<&str>, None])),
                Arc::new(Int32Array::from(vec![None::<i32>, None])),
                Arc::new(StringArray::from(vec!["Rocky (Earth-like)", "Rocky (Earth-like)"])),
                Arc::new(UInt8Array::from(vec![50u8, 0])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let mut state = AppState::new(AppConfig::default());
        assert!(state.open_any(&path).is_err());
        assert!(state.catalog.is_none());
    }

    #[test]
    fn archive_rows_open_through_open_any() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        std::fs::write(&path, "pl_name,pl_rade\nKepler-442b,1.34\nNo radius,\n").unwrap();

        let mut state = AppState::new(AppConfig::default());
        state.open_any(&path).unwrap();
        assert_eq!(state.summary.total_planets, 1);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn export_current_result() {
        let mut state = loaded_state();
        state.criteria.score = Range::at_least(51);
        state.refilter();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habitable.csv");
        assert_eq!(state.export_visible(&path).unwrap(), 4);
    }

    #[test]
    fn saving_without_catalog_fails() {
        let state = AppState::new(AppConfig::default());
        assert!(state.save_catalog(Path::new("unused.parquet")).is_err());
    }
}
