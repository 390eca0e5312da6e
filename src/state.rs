use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::export;
use crate::data::filter::{apply, FilterSelection, FilteredView};
use crate::data::loader::LoadError;
use crate::data::model::{Dataset, Dimension};
use crate::data::summary::Summary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset, or why it could not be loaded.
    pub dataset: Result<Arc<Dataset>, LoadError>,

    /// Current filter selection.
    pub selection: FilterSelection,

    /// Contents of the search box.
    pub search_text: String,

    /// Indices of records passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Metrics for the current selection.
    pub summary: Summary,

    /// Colours for the module type column.
    pub type_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: Result<Arc<Dataset>, LoadError>) -> Self {
        let type_colors = dataset
            .as_ref()
            .ok()
            .map(|ds| ColorMap::new(ds.distinct(Dimension::ModuleType)));

        let mut state = Self {
            config,
            dataset,
            selection: FilterSelection::default(),
            search_text: String::new(),
            visible_indices: Vec::new(),
            summary: Summary::default(),
            type_colors,
            status_message: None,
        };
        state.refilter();
        state
    }

    /// The dataset, when it loaded.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_deref().ok()
    }

    /// Current view over the dataset.
    pub fn view(&self) -> Option<FilteredView<'_>> {
        self.dataset()
            .map(|ds| FilteredView::from_indices(ds, self.visible_indices.clone()))
    }

    /// Recompute the view and metrics after a selection change.
    pub fn refilter(&mut self) {
        let Ok(ds) = &self.dataset else {
            return;
        };
        self.selection.set_query(&self.search_text);
        let view = apply(ds, &self.selection);
        self.summary = Summary::compute(&view, &self.selection);
        log::debug!("{} of {} records match", view.len(), ds.len());
        self.visible_indices = view.into_indices();
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &str) {
        self.selection.toggle(dim, value);
        self.refilter();
    }

    /// Remove the restriction on one dimension.
    pub fn clear_filter(&mut self, dim: Dimension) {
        self.selection.clear(dim);
        self.refilter();
    }

    /// Remove every restriction, including the search text.
    pub fn reset_filters(&mut self) {
        self.selection.clear_all();
        self.search_text.clear();
        self.refilter();
    }

    /// CSV bytes of the current view, or `None` without a dataset.
    pub fn export_csv(&self) -> Option<Result<Vec<u8>, export::ExportError>> {
        self.view().map(|view| export::to_csv_bytes(&view))
    }
}
