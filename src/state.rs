use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::color::CategoryColors;
use crate::data::cache::TableCache;
use crate::data::filter::{self, YearSelection};
use crate::data::model::VehicleTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Listings file, fixed for the lifetime of the process.
    pub data_path: PathBuf,

    cache: TableCache,

    /// Normalized table from the last successful load.
    pub table: Option<Arc<VehicleTable>>,

    /// Manufacturer options derived from `table`.
    pub make_options: Vec<String>,

    /// "Model Year" selection.
    pub year: YearSelection,

    /// "Manufacturer" selection; empty means every make.
    pub makes: BTreeSet<String>,

    /// Histogram normalization toggle for the days-listed chart.
    pub normalize_histogram: bool,

    /// Output of the last pipeline run.
    pub filtered: VehicleTable,

    /// Colours per vehicle condition, shared by every chart.
    pub colors: CategoryColors,

    /// Fatal pipeline error; when set nothing else is rendered.
    pub error: Option<String>,
}

impl AppState {
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            data_path,
            cache: TableCache::new(),
            table: None,
            make_options: Vec::new(),
            year: YearSelection::All,
            makes: BTreeSet::new(),
            normalize_histogram: false,
            filtered: VehicleTable::default(),
            colors: CategoryColors::default(),
            error: None,
        }
    }

    /// Run load → filter for the current selection.
    ///
    /// On failure every derived table is cleared and the error kept for display.
    pub fn refresh(&mut self) {
        match self.run_pipeline() {
            Ok(()) => self.error = None,
            Err(e) => {
                log::error!("Pipeline failed: {e:#}");
                self.table = None;
                self.make_options.clear();
                self.filtered = VehicleTable::default();
                self.error = Some(format!("Error: {e:#}"));
            }
        }
    }

    fn run_pipeline(&mut self) -> Result<()> {
        let table = self
            .cache
            .get_or_load(&self.data_path)
            .with_context(|| format!("loading {}", self.data_path.display()))?;

        let reloaded = self
            .table
            .as_ref()
            .map_or(true, |current| !Arc::ptr_eq(current, &table));
        if reloaded {
            self.make_options = filter::make_options(&table);
            self.colors = CategoryColors::new(&table.unique_conditions());
            // Drop selected makes that no longer exist.
            let available: BTreeSet<&String> = self.make_options.iter().collect();
            self.makes.retain(|m| available.contains(m));
            self.table = Some(Arc::clone(&table));
        }

        self.filtered = filter::filter(&table, self.year, &self.makes);
        log::debug!(
            "Selection year={} makes={:?}: {} rows",
            self.year,
            self.makes,
            self.filtered.len()
        );
        Ok(())
    }

    /// Forget the cached table and load the file again.
    pub fn reload(&mut self) {
        self.cache.clear();
        self.refresh();
        log::info!(
            "Reloaded {} ({} loads this session)",
            self.data_path.display(),
            self.cache.loads()
        );
    }

    /// Change the year selection and rerun the pipeline.
    pub fn set_year(&mut self, year: YearSelection) {
        self.year = year;
        self.refresh();
    }

    /// Add or remove one manufacturer and rerun the pipeline.
    pub fn toggle_make(&mut self, make: &str) {
        if !self.makes.remove(make) {
            self.makes.insert(make.to_string());
        }
        self.refresh();
    }

    /// Clear the manufacturer selection.
    pub fn clear_makes(&mut self) {
        self.makes.clear();
        self.refresh();
    }

    /// Number of rows in the filtered table.
    pub fn result_count(&self) -> usize {
        self.filtered.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CSV: &str = "price,model_year,model,condition,type,odometer,days_listed,date_posted\n\
                       9400,2015,ford f150,good,pickup,145000,19,2019-03-01\n\
                       25500,,toyota camry,excellent,sedan,88705,50,2018-10-19\n\
                       5500,2013,hyundai sonata,like new,sedan,110000,79,2019-02-07\n\
                       1500,2015,ford focus,fair,sedan,,9,2018-07-22\n";

    fn state_with(csv: &str) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vehicles_us.csv");
        fs::write(&path, csv).unwrap();
        let mut state = AppState::new(path);
        state.refresh();
        (dir, state)
    }

    #[test]
    fn initial_refresh_shows_full_table() {
        let (_dir, state) = state_with(CSV);
        assert!(state.error.is_none());
        assert_eq!(state.result_count(), 3);
        assert_eq!(state.make_options, vec!["ford", "hyundai"]);
    }

    #[test]
    fn selections_narrow_the_result() {
        let (_dir, mut state) = state_with(CSV);

        state.set_year(YearSelection::Year(2015));
        assert_eq!(state.result_count(), 2);

        state.toggle_make("hyundai");
        assert_eq!(state.result_count(), 0);
        assert!(state.error.is_none());

        state.set_year(YearSelection::All);
        assert_eq!(state.result_count(), 1);

        state.toggle_make("hyundai");
        assert!(state.makes.is_empty());
        assert_eq!(state.result_count(), 3);
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(dir.path().join("absent.csv"));
        state.refresh();

        let msg = state.error.as_deref().unwrap();
        assert!(msg.contains("absent.csv"), "{msg}");
        assert!(state.filtered.is_empty());
    }

    #[test]
    fn malformed_file_clears_previous_result() {
        let (dir, mut state) = state_with(CSV);
        assert_eq!(state.result_count(), 3);

        fs::write(
            dir.path().join("vehicles_us.csv"),
            "model_year,model,date_posted\n2015,ford f150,03/01/2019\n",
        )
        .unwrap();
        state.refresh();

        assert!(state.error.is_some());
        assert_eq!(state.result_count(), 0);
        assert!(state.table.is_none());
        assert!(state.make_options.is_empty());
    }

    #[test]
    fn recovers_after_file_is_fixed() {
        let (dir, mut state) = state_with(CSV);
        let path = dir.path().join("vehicles_us.csv");

        fs::write(&path, "model_year,model\n2015,ford f150\n").unwrap();
        state.refresh();
        assert!(state.table.is_none());

        fs::write(&path, CSV).unwrap();
        state.refresh();
        assert!(state.error.is_none());
        assert_eq!(state.table.as_ref().map(|t| t.len()), Some(3));
        assert_eq!(state.make_options, vec!["ford", "hyundai"]);
    }
}
