use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::color::CategoryColors;
use crate::data::aggregate::{apply, DashboardView};
use crate::data::export::{export_filtered_csv, export_summary_json};
use crate::data::filter::FilterSelection;
use crate::data::loader::load_workbook;
use crate::data::model::{CanonicalTable, Metric};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering: the loaded snapshot, the
/// current facet selection and the cached recompute result.
pub struct AppState {
    /// Workbook path, fixed at startup.
    pub data_path: PathBuf,

    /// Loaded snapshot (None until a load succeeds). Replaced wholesale
    /// on reload, never mutated in place.
    pub table: Option<CanonicalTable>,

    /// Current facet selection; empty sets mean "show all".
    pub selection: FilterSelection,

    /// Metric weighting the rollup and charts.
    pub metric: Metric,

    /// Result of the latest filter + aggregate pass (cached).
    pub view: Option<DashboardView>,

    /// Colour per Level 1 category, stable for the loaded snapshot.
    pub colors: Option<CategoryColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            data_path,
            table: None,
            selection: FilterSelection::default(),
            metric: Metric::Quantity,
            view: None,
            colors: None,
            status_message: None,
        }
    }

    /// Load (or reload) the workbook snapshot. On failure the previous
    /// snapshot stays usable and the error lands in the status line.
    pub fn load(&mut self) {
        match load_workbook(&self.data_path) {
            Ok(table) => self.set_table(table),
            Err(err) => {
                log::error!("{err}");
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Ingest a snapshot: reset the selection (the distinct value sets may
    /// have changed), rebuild colours, recompute the view.
    pub fn set_table(&mut self, table: CanonicalTable) {
        self.colors = Some(CategoryColors::new(&table.categories));
        self.selection = FilterSelection::default();
        self.table = Some(table);
        self.status_message = None;
        self.recompute();
    }

    /// Run one filter + aggregate pass with the current selection.
    pub fn recompute(&mut self) {
        self.view = self
            .table
            .as_ref()
            .map(|table| apply(table, &self.selection, self.metric));
    }

    pub fn set_metric(&mut self, metric: Metric) {
        if self.metric != metric {
            self.metric = metric;
            self.recompute();
        }
    }

    /// Toggle one year in the selection.
    pub fn toggle_year(&mut self, year: u16) {
        let Some(table) = &self.table else { return };
        toggle_value(&mut self.selection.years, &table.years, year);
        self.recompute();
    }

    /// Toggle one province in the selection.
    pub fn toggle_province(&mut self, province: &str) {
        let Some(table) = &self.table else { return };
        toggle_value(
            &mut self.selection.provinces,
            &table.provinces,
            province.to_string(),
        );
        self.recompute();
    }

    /// Toggle one Level 1 category in the selection.
    pub fn toggle_category(&mut self, category: &str) {
        let Some(table) = &self.table else { return };
        toggle_value(
            &mut self.selection.categories,
            &table.categories,
            category.to_string(),
        );
        self.recompute();
    }

    /// Clear the year facet back to "show all".
    pub fn clear_years(&mut self) {
        self.selection.years.clear();
        self.recompute();
    }

    /// Clear the province facet back to "show all".
    pub fn clear_provinces(&mut self) {
        self.selection.provinces.clear();
        self.recompute();
    }

    /// Clear the category facet back to "show all".
    pub fn clear_categories(&mut self) {
        self.selection.categories.clear();
        self.recompute();
    }

    /// Drop every facet constraint at once.
    pub fn reset_filters(&mut self) {
        self.selection = FilterSelection::default();
        self.recompute();
    }

    /// Export the filtered rows as CSV next to the workbook.
    pub fn export_csv(&mut self) {
        let (Some(table), Some(view)) = (&self.table, &self.view) else {
            return;
        };
        let path = self.export_path("impact_filtered.csv");
        match export_filtered_csv(&path, table, view) {
            Ok(()) => {
                log::info!("wrote {} rows to {}", view.rows.len(), path.display());
                self.status_message = Some(format!("Exported {}", path.display()));
            }
            Err(err) => {
                log::error!("CSV export failed: {err:#}");
                self.status_message = Some(format!("Export failed: {err:#}"));
            }
        }
    }

    /// Export the aggregate summary as JSON next to the workbook.
    pub fn export_summary(&mut self) {
        let Some(view) = &self.view else { return };
        let path = self.export_path("impact_summary.json");
        match export_summary_json(&path, view) {
            Ok(()) => {
                log::info!("wrote summary to {}", path.display());
                self.status_message = Some(format!("Exported {}", path.display()));
            }
            Err(err) => {
                log::error!("summary export failed: {err:#}");
                self.status_message = Some(format!("Export failed: {err:#}"));
            }
        }
    }

    /// Exports land in the workbook's directory, falling back to the
    /// working directory for bare file names.
    fn export_path(&self, file_name: &str) -> PathBuf {
        match self.data_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
            _ => PathBuf::from(file_name),
        }
    }
}

/// Toggle `value` in a facet where the empty set means "all selected":
/// the first deselection materializes the rest of the facet, and
/// re-selecting the last missing value collapses back to empty.
fn toggle_value<T: Ord + Clone>(selected: &mut BTreeSet<T>, all: &BTreeSet<T>, value: T) {
    if selected.is_empty() {
        selected.extend(all.iter().cloned());
    }
    if !selected.remove(&value) {
        selected.insert(value);
    }
    if selected.len() == all.len() {
        selected.clear();
    }
}
