//! Anchor reports for model files

use anyhow::Context;
use serde::Serialize;
use showcase_assets::{AnchorRegion, LoadOptions, LoadedScene};
use std::path::{Path, PathBuf};

/// Per-surface summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceReport {
    pub name: String,
    pub center: [f32; 3],
    pub size: [f32; 3],
}

/// What the camera tour would visit for a model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorReport {
    pub model: PathBuf,
    pub surfaces: Vec<SurfaceReport>,
    /// `None` when the model has no surfaces
    pub anchors: Option<Vec<AnchorRegion>>,
}

/// Load `path` and describe its surfaces and anchors
pub fn anchor_report(path: &Path, options: &LoadOptions) -> anyhow::Result<AnchorReport> {
    let scene = LoadedScene::load(path, options)
        .with_context(|| format!("Failed to load model {}", path.display()))?;
    let surfaces = scene
        .model
        .surfaces
        .iter()
        .map(|surface| SurfaceReport {
            name: surface.name.clone(),
            center: surface.bounds.center().to_array(),
            size: surface.bounds.size().to_array(),
        })
        .collect();
    Ok(AnchorReport {
        model: scene.source.clone(),
        surfaces,
        anchors: scene.anchors.map(|anchors| anchors.iter().copied().collect()),
    })
}
