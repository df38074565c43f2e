//! Model loading
//!
//! [`load_obj`] reads a Wavefront OBJ file into a [`Model`]. [`AssetSlot`]
//! runs that load on a background thread and hands the finished
//! [`LoadedScene`] to the frame loop, which polls it once per frame. Until a
//! scene is ready, the slot reports nothing and dependent animation work is
//! skipped.

use crate::anchors::{derive_anchors, Anchors};
use crate::bounds::Aabb;
use crate::error::{Error, Result};
use crate::model::{Material, Model, Surface};
use glam::Vec3;
use serde::Serialize;
use showcase_core::Color;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

// ============================================================================
// OBJ Loading
// ============================================================================

/// Options applied while loading a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Translate the model so its bounds are centered on the origin
    pub recenter: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { recenter: true }
    }
}

/// Load an OBJ file, one surface per object/group
///
/// Materials come from the referenced MTL file when it can be read; a
/// missing MTL file is logged and surfaces keep the default white material.
/// Objects without vertices are skipped.
pub fn load_obj(path: &Path, options: &LoadOptions) -> Result<Model> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let (objects, materials) = tobj::load_obj_buf(
        &mut reader,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
        |mtl_path| tobj::load_mtl(base_dir.join(mtl_path)),
    )
    .map_err(|source| Error::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let materials = materials.unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), "material library not loaded: {err}");
        Vec::new()
    });

    let surfaces: Vec<Surface> = objects
        .iter()
        .filter_map(|object| {
            let bounds = Aabb::from_points(
                object
                    .mesh
                    .positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            if bounds.is_empty() {
                tracing::debug!(object = %object.name, "skipping object without vertices");
                return None;
            }
            let color = object
                .mesh
                .material_id
                .and_then(|id| materials.get(id))
                .and_then(|material| material.diffuse)
                .map(Color::from_array)
                .unwrap_or(Color::WHITE);
            Some(Surface {
                name: object.name.clone(),
                bounds,
                material: Material {
                    color,
                    emissive: Color::BLACK,
                },
            })
        })
        .collect();

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut model = Model::new(name, surfaces);
    if options.recenter {
        let offset = model.recenter();
        tracing::debug!(?offset, "model recentered");
    }

    tracing::info!(
        path = %path.display(),
        surfaces = model.surfaces.len(),
        "model loaded"
    );
    Ok(model)
}

// ============================================================================
// Loaded Scene
// ============================================================================

/// A loaded model together with its anchors
///
/// Anchors are derived once at load time and never change afterwards.
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub source: PathBuf,
    pub model: Model,
    pub anchors: Option<Anchors>,
}

impl LoadedScene {
    /// Wrap an already-built model, deriving its anchors
    pub fn new(source: impl Into<PathBuf>, model: Model) -> Self {
        let anchors = derive_anchors(&model.surface_bounds());
        if anchors.is_none() {
            tracing::warn!(model = %model.name, "model has no surfaces, no anchors derived");
        }
        Self {
            source: source.into(),
            model,
            anchors,
        }
    }

    /// Load an OBJ file and derive its anchors
    pub fn load(path: &Path, options: &LoadOptions) -> Result<Self> {
        let model = load_obj(path, options)?;
        Ok(Self::new(path, model))
    }
}

// ============================================================================
// Asset Slot
// ============================================================================

/// Observable state of an [`AssetSlot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// Nothing requested
    Empty,
    /// Load in progress
    Loading,
    /// Scene available
    Ready,
    /// Load failed; the scene will never become available for this request
    Failed,
}

enum SlotState {
    Empty,
    Loading(Receiver<Result<LoadedScene>>),
    Ready(Box<LoadedScene>),
    Failed,
}

/// Holds the scene for one asset reference, loading it in the background
///
/// Requesting the same path again keeps the current load or scene; a
/// different path discards the old scene and its anchors.
pub struct AssetSlot {
    source: Option<PathBuf>,
    options: LoadOptions,
    state: SlotState,
}

impl Default for AssetSlot {
    fn default() -> Self {
        Self::new(LoadOptions::default())
    }
}

impl AssetSlot {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            source: None,
            options,
            state: SlotState::Empty,
        }
    }

    /// A slot that already holds a scene (procedural models, tests)
    pub fn ready(scene: LoadedScene) -> Self {
        Self {
            source: Some(scene.source.clone()),
            options: LoadOptions::default(),
            state: SlotState::Ready(Box::new(scene)),
        }
    }

    /// Start loading `path` unless it is already the current asset
    ///
    /// Returns true if a new load was started.
    pub fn request(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if self.source.as_deref() == Some(path) && !matches!(self.state, SlotState::Empty) {
            return false;
        }

        let (sender, receiver) = mpsc::channel();
        let thread_path = path.to_path_buf();
        let options = self.options;
        thread::spawn(move || {
            let result = LoadedScene::load(&thread_path, &options);
            // The slot may have been unloaded or re-targeted meanwhile
            let _ = sender.send(result);
        });

        tracing::debug!(path = %path.display(), "asset load started");
        self.source = Some(path.to_path_buf());
        self.state = SlotState::Loading(receiver);
        true
    }

    /// Move a finished background load into the slot
    pub fn poll(&mut self) -> SlotStatus {
        if let SlotState::Loading(receiver) = &self.state {
            let next = match receiver.try_recv() {
                Ok(Ok(scene)) => Some(SlotState::Ready(Box::new(scene))),
                Ok(Err(err)) => {
                    tracing::warn!("asset load failed: {err}");
                    Some(SlotState::Failed)
                }
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    let path = self.source.clone().unwrap_or_default();
                    tracing::warn!("{}", Error::LoaderDisconnected(path));
                    Some(SlotState::Failed)
                }
            };
            if let Some(next) = next {
                self.state = next;
            }
        }
        self.status()
    }

    /// Block until the current load finishes
    pub fn wait(&mut self) -> SlotStatus {
        if let SlotState::Loading(receiver) = &self.state {
            self.state = match receiver.recv() {
                Ok(Ok(scene)) => SlotState::Ready(Box::new(scene)),
                Ok(Err(err)) => {
                    tracing::warn!("asset load failed: {err}");
                    SlotState::Failed
                }
                Err(_) => SlotState::Failed,
            };
        }
        self.status()
    }

    pub fn status(&self) -> SlotStatus {
        match self.state {
            SlotState::Empty => SlotStatus::Empty,
            SlotState::Loading(_) => SlotStatus::Loading,
            SlotState::Ready(_) => SlotStatus::Ready,
            SlotState::Failed => SlotStatus::Failed,
        }
    }

    /// Path of the current asset reference
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn scene(&self) -> Option<&LoadedScene> {
        match &self.state {
            SlotState::Ready(scene) => Some(&**scene),
            _ => None,
        }
    }

    pub fn scene_mut(&mut self) -> Option<&mut LoadedScene> {
        match &mut self.state {
            SlotState::Ready(scene) => Some(&mut **scene),
            _ => None,
        }
    }

    /// Drop the scene and forget the asset reference
    pub fn unload(&mut self) {
        self.source = None;
        self.state = SlotState::Empty;
    }
}

impl std::fmt::Debug for AssetSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetSlot")
            .field("source", &self.source)
            .field("status", &self.status())
            .finish()
    }
}
