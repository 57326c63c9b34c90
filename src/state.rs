use std::path::PathBuf;
use std::sync::Arc;

use crate::data::aggregate::{self, HexDensity, HEX_RADIUS_M};
use crate::data::filter::{self, RankedStreet};
use crate::data::loader::{DATA_PATH, DEFAULT_ROW_LIMIT, LoadCache};
use crate::data::model::{CollisionDataset, InjuryCategory};

/// Length of the "top dangerous streets" table.
pub const TOP_STREET_COUNT: usize = 5;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Widget values driving the derived views.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    /// Minimum persons injured for the map view.
    pub injured_min: u32,
    /// Hour of day for the density, histogram, and raw views.
    pub hour: u32,
    /// Affected-party category for the street ranking.
    pub category: InjuryCategory,
    /// Whether the raw data table is shown.
    pub show_raw: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            injured_min: 0,
            hour: 0,
            category: InjuryCategory::Pedestrians,
            show_raw: false,
        }
    }
}

/// Views derived from the dataset and the current controls. Recomputed on
/// interaction, read every frame.
pub struct DerivedViews {
    /// Collisions with at least `injured_min` persons injured.
    pub injured_view: Vec<usize>,
    /// Collisions within the selected hour.
    pub hour_view: Vec<usize>,
    /// Per-minute crash counts of the hour view.
    pub minute_counts: [u32; 60],
    /// Mean (latitude, longitude) of the hour view; `None` when it is empty.
    pub midpoint: Option<(f64, f64)>,
    /// Hex-binned hour view; `None` when it is empty.
    pub density: Option<HexDensity>,
    /// Worst collisions for the selected category.
    pub top_streets: Vec<RankedStreet>,
}

impl Default for DerivedViews {
    fn default() -> Self {
        Self {
            injured_view: Vec::new(),
            hour_view: Vec::new(),
            minute_counts: [0; 60],
            midpoint: None,
            density: None,
            top_streets: Vec::new(),
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Memoized loader for the current source file.
    pub cache: LoadCache,
    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<CollisionDataset>>,
    pub controls: Controls,
    pub views: DerivedViews,
    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: LoadCache::new(DATA_PATH),
            dataset: None,
            controls: Controls::default(),
            views: DerivedViews::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Load (or re-use) the dataset for the given row limit.
    pub fn load(&mut self, limit: usize) {
        match self.cache.get(limit) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} collisions from {}",
                    dataset.len(),
                    self.cache.path().display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", self.cache.path().display());
                self.dataset = None;
                self.views = DerivedViews::default();
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Load the default data file with the default row limit.
    pub fn load_default(&mut self) {
        self.load(DEFAULT_ROW_LIMIT);
    }

    /// Switch to a different source file and load it.
    pub fn open(&mut self, path: PathBuf) {
        self.cache.set_path(path);
        self.load_default();
    }

    fn set_dataset(&mut self, dataset: Arc<CollisionDataset>) {
        // Keep the threshold slider within the new dataset's bounds.
        self.controls.injured_min = self.controls.injured_min.min(dataset.max_persons_injured);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Re-derive every view from the controls. Called after loading and
    /// whenever a control changes.
    pub fn recompute(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.views = DerivedViews::default();
            return;
        };

        let hour_view = filter::hour_indices(dataset, self.controls.hour);
        self.views = DerivedViews {
            injured_view: filter::min_injured_indices(dataset, self.controls.injured_min),
            minute_counts: aggregate::minute_histogram(dataset, &hour_view),
            midpoint: aggregate::midpoint(dataset, &hour_view),
            density: aggregate::hex_density(dataset, &hour_view, HEX_RADIUS_M),
            top_streets: filter::top_streets(dataset, self.controls.category, TOP_STREET_COUNT),
            hour_view,
        };
    }
}
