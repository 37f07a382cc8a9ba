//=========================================================================
// Asset Loader
//=========================================================================
//
// Tracks which asset keys are loaded and reports loading progress on
// the EventBus. The engine performs the actual file IO.
//
// Load cycle:
//   begin(manifest) ──> [AssetRequest]  (engine fetches files)
//   file_loaded(key) × N ──> assetLoadingProgress
//   complete() ──> assetsLoaded    |    failed(file) ──> assetLoadingError
//
// A failed load is not retried.
//
//=========================================================================

//=== Module Declarations =================================================

mod manifest;

//=== Public API ==========================================================

pub use manifest::{
    AssetManifest, AtlasEntry, AudioEntry, ImageEntry, MultiatlasEntry, SpritesheetEntry,
};

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::rc::Rc;

use log::{debug, info, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::event_bus::{EventBus, GameEvent};

//=== Constants ===========================================================

/// Directory every manifest path is resolved against.
pub const ASSET_ROOT: &str = "assets/";

//=== Requests ============================================================

/// Loader the engine should use for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Spritesheet {
        frame_width: u32,
        frame_height: u32,
        end_frame: Option<u32>,
        margin: Option<u32>,
        spacing: Option<u32>,
    },
    Audio {
        instances: Option<u32>,
    },
    Atlas {
        atlas_url: String,
    },
    Multiatlas,
}

/// One file the engine is asked to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub key: String,
    pub url: String,
    pub kind: AssetKind,
}

/// File identity reported back by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    pub key: String,
    pub url: String,
}

//=== Payloads ============================================================

/// Payload of `assetLoadingProgress`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLoadingProgress {
    pub percentage: u32,
    pub loaded: usize,
    pub total: usize,
    pub current_file: String,
}

/// Payload of `assetLoadingError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLoadFailure {
    pub file: AssetFile,
    pub error: AssetError,
}

/// Payload of `assetUnloaded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUnloaded {
    pub key: String,
}

//=== AssetError ==========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("asset loading already in progress")]
    AlreadyLoading,

    #[error("failed to load asset: {key} ({url})")]
    LoadFailed { key: String, url: String },
}

//=== AssetLoader =========================================================

pub struct AssetLoader {
    bus: Rc<EventBus>,
    loaded: HashSet<String>,
    batch: Vec<String>,
    batch_loaded: usize,
    current_file: String,
    loading: bool,
}

impl AssetLoader {
    pub fn new(bus: Rc<EventBus>) -> Self {
        Self {
            bus,
            loaded: HashSet::new(),
            batch: Vec::new(),
            batch_loaded: 0,
            current_file: String::new(),
            loading: false,
        }
    }

    //--- Load cycle -------------------------------------------------------

    /// Starts a load and returns the files the engine must fetch.
    ///
    /// Keys already loaded are skipped. The batch stays open until
    /// [`complete`](Self::complete) or [`failed`](Self::failed), even when
    /// nothing needed fetching.
    ///
    /// # Errors
    ///
    /// [`AssetError::AlreadyLoading`] if a previous batch is still open.
    pub fn begin(&mut self, manifest: &AssetManifest) -> Result<Vec<AssetRequest>, AssetError> {
        if self.loading {
            warn!("Asset load requested while another is in flight");
            return Err(AssetError::AlreadyLoading);
        }

        let requests = self.requests_for(manifest);
        self.batch = requests.iter().map(|r| r.key.clone()).collect();
        self.batch_loaded = 0;
        self.current_file.clear();
        self.loading = true;

        info!(
            "Loading {} assets ({} already cached)",
            requests.len(),
            manifest.len() - requests.len()
        );
        Ok(requests)
    }

    /// Marks `key` as loaded and publishes progress.
    pub fn file_loaded(&mut self, key: &str) {
        if self.loaded.insert(key.to_owned()) && self.batch.iter().any(|k| k == key) {
            self.batch_loaded += 1;
        }
        self.current_file = key.to_owned();
        debug!("Asset loaded: {}", key);
        self.bus.emit(GameEvent::AssetLoadingProgress(self.progress()));
    }

    /// Closes the current batch and publishes `assetsLoaded`.
    pub fn complete(&mut self) {
        self.loading = false;
        info!("Assets loaded ({} cached)", self.loaded.len());
        self.bus.emit(GameEvent::AssetsLoaded);
    }

    /// Closes the current batch as failed, publishing `assetLoadingError`.
    pub fn failed(&mut self, file: AssetFile) -> AssetError {
        self.loading = false;
        let error = AssetError::LoadFailed {
            key: file.key.clone(),
            url: file.url.clone(),
        };
        warn!("{}", error);
        self.bus.emit(GameEvent::AssetLoadingError(AssetLoadFailure {
            file,
            error: error.clone(),
        }));
        error
    }

    //--- Cache ------------------------------------------------------------

    /// Forgets `key`; always publishes `assetUnloaded`.
    pub fn unload(&mut self, key: &str) {
        self.loaded.remove(key);
        self.bus.emit(GameEvent::AssetUnloaded(AssetUnloaded {
            key: key.to_owned(),
        }));
    }

    pub fn is_loaded(&self, key: &str) -> bool {
        self.loaded.contains(key)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Loaded keys, sorted.
    pub fn loaded_assets(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.loaded.iter().cloned().collect();
        keys.sort();
        keys
    }

    /// Progress of the current (or last) batch.
    pub fn progress(&self) -> AssetLoadingProgress {
        let total = self.batch.len();
        let loaded = self.batch_loaded;
        let percentage = if total == 0 {
            0
        } else {
            (loaded as f64 / total as f64 * 100.0).round() as u32
        };
        AssetLoadingProgress {
            percentage,
            loaded,
            total,
            current_file: self.current_file.clone(),
        }
    }

    /// Drops all tracking state.
    pub fn destroy(&mut self) {
        self.loaded.clear();
        self.batch.clear();
        self.batch_loaded = 0;
        self.current_file.clear();
        self.loading = false;
    }

    //--- Internal Helpers -------------------------------------------------

    fn requests_for(&self, manifest: &AssetManifest) -> Vec<AssetRequest> {
        let mut requests = Vec::with_capacity(manifest.len());
        let mut push = |key: &str, path: &str, kind: AssetKind| {
            if !self.loaded.contains(key) {
                requests.push(AssetRequest {
                    key: key.to_owned(),
                    url: asset_url(path),
                    kind,
                });
            }
        };

        for image in &manifest.images {
            push(&image.key, &image.path, AssetKind::Image);
        }
        for sheet in &manifest.spritesheets {
            push(
                &sheet.key,
                &sheet.path,
                AssetKind::Spritesheet {
                    frame_width: sheet.frame_width,
                    frame_height: sheet.frame_height,
                    end_frame: sheet.end_frame,
                    margin: sheet.margin,
                    spacing: sheet.spacing,
                },
            );
        }
        for audio in &manifest.audio {
            push(
                &audio.key,
                &audio.path,
                AssetKind::Audio {
                    instances: audio.instances,
                },
            );
        }
        for atlas in &manifest.atlases {
            push(
                &atlas.key,
                &atlas.path,
                AssetKind::Atlas {
                    atlas_url: asset_url(&atlas.atlas_path),
                },
            );
        }
        for multi in &manifest.multiatlases {
            push(&multi.key, &multi.path, AssetKind::Multiatlas);
        }
        requests
    }
}

fn asset_url(path: &str) -> String {
    format!("{ASSET_ROOT}{path}")
}

//=========================================================================
// Unit Tests
//=========================================================================
