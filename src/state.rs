use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::data::derive::derive;
use crate::data::filter::{self, FilterCriteria, RankedTrack};
use crate::data::loader::{load_file, LoadOptions};
use crate::data::model::Dataset;

/// Load and derive a dataset in one go.
pub fn open_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    let tracks = load_file(path, options)
        .with_context(|| format!("loading dataset {}", path.display()))?;
    Ok(derive(tracks))
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// One dashboard session, independent of rendering.
///
/// The dataset is shared read-only; everything mutable belongs to this
/// session alone.
pub struct AppState {
    /// Loaded dataset and its derived views.
    pub dataset: Arc<Dataset>,

    /// Where `dataset` came from.
    pub source: PathBuf,

    /// Unique artist names offered by the selector.
    pub artist_options: Vec<String>,

    /// Current sidebar selections.
    pub criteria: FilterCriteria,

    /// Output of the filter pipeline for `criteria`.
    pub top: Vec<RankedTrack>,

    /// Text typed into the artist search box.
    pub artist_query: String,

    /// Sidebar branding image.
    pub logo: PathBuf,

    pub load_options: LoadOptions,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, source: PathBuf, config: &Config) -> Self {
        let mut state = Self {
            artist_options: dataset.artist_options(),
            criteria: FilterCriteria::for_dataset(&dataset, config.top_n),
            dataset,
            source,
            top: Vec::new(),
            artist_query: String::new(),
            logo: config.logo.clone(),
            load_options: config.load_options(),
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Swap in a newly loaded dataset and reset the selections.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>, source: PathBuf) {
        self.artist_options = dataset.artist_options();
        self.criteria = FilterCriteria::for_dataset(&dataset, self.criteria.top_n);
        self.dataset = dataset;
        self.source = source;
        self.artist_query.clear();
        self.status_message = None;
        self.refilter();
    }

    /// Load `path`, keeping the current dataset if that fails.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let dataset = open_dataset(path, &self.load_options)?;
        log::info!("Loaded {} tracks from {}", dataset.len(), path.display());
        self.set_dataset(Arc::new(dataset), path.to_path_buf());
        Ok(())
    }

    /// Rerun the filter pipeline for the current criteria.
    pub fn refilter(&mut self) {
        self.top = filter::apply(&self.dataset, &self.criteria);
    }

    /// Observed release-year span, for the year slider.
    pub fn year_bounds(&self) -> (i32, i32) {
        self.dataset.year_bounds().unwrap_or(self.criteria.years)
    }

    /// Toggle a single artist in the selection.
    pub fn toggle_artist(&mut self, artist: &str) {
        if !self.criteria.artists.remove(artist) {
            self.criteria.artists.insert(artist.to_string());
        }
        self.refilter();
    }

    /// Deselect every artist.
    pub fn clear_artists(&mut self) {
        self.criteria.artists.clear();
        self.refilter();
    }

    /// Set the year range, swapping the ends if they cross.
    pub fn set_years(&mut self, from: i32, to: i32) {
        self.criteria.years = (from.min(to), from.max(to));
        self.refilter();
    }

    /// Set the month range, clamped to 1..=12 and ordered.
    pub fn set_months(&mut self, from: u32, to: u32) {
        let from = from.clamp(1, 12);
        let to = to.clamp(1, 12);
        self.criteria.months = (from.min(to), from.max(to));
        self.refilter();
    }

    /// Artist options matching the search box, case-insensitively.
    pub fn visible_artist_options(&self) -> Vec<&str> {
        let query = self.artist_query.trim().to_lowercase();
        self.artist_options
            .iter()
            .filter(|name| query.is_empty() || name.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }
}
