//! Scenario files for headless runs
//!
//! A scenario names the model, the page layout and a scroll/hover timeline:
//!
//! ```toml
//! model = "logo.obj"
//! frames = 600
//! fps = 60.0
//! viewport = { width = 1280, height = 800 }
//!
//! [timeline]
//! scroll = [[0, 0], [480, 2400]]
//! hover = [[120, 180]]
//!
//! [animation]
//! floating = false
//! ```

use anyhow::{bail, Context};
use app::AnimationConfig;
use serde::{Deserialize, Serialize};
use showcase_core::Viewport;
use std::path::{Path, PathBuf};

/// Scroll and hover input over time, keyed by frame number
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeline {
    /// `(frame, scroll_y)` keys; scroll is interpolated linearly between them
    pub scroll: Vec<(u64, u32)>,
    /// `[start, end)` frame spans during which the pointer is over the model
    pub hover: Vec<(u64, u64)>,
}

impl Timeline {
    /// Scroll offset at `frame`, holding the first and last keys outside
    /// the keyed range
    pub fn scroll_at(&self, frame: u64) -> u32 {
        let Some(&(first_frame, first_y)) = self.scroll.first() else {
            return 0;
        };
        if frame <= first_frame {
            return first_y;
        }
        for pair in self.scroll.windows(2) {
            let (start_frame, start_y) = pair[0];
            let (end_frame, end_y) = pair[1];
            if frame < end_frame {
                let t = (frame - start_frame) as f64 / (end_frame - start_frame) as f64;
                let y = start_y as f64 + (end_y as f64 - start_y as f64) * t;
                return y.round() as u32;
            }
        }
        self.scroll.last().map_or(0, |&(_, y)| y)
    }

    pub fn hovered_at(&self, frame: u64) -> bool {
        self.hover
            .iter()
            .any(|&(start, end)| frame >= start && frame < end)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for pair in self.scroll.windows(2) {
            if pair[1].0 <= pair[0].0 {
                bail!(
                    "timeline scroll keys must have increasing frames, got {} after {}",
                    pair[1].0,
                    pair[0].0
                );
            }
        }
        for &(start, end) in &self.hover {
            if end < start {
                bail!("timeline hover span ends before it starts: [{start}, {end})");
            }
        }
        Ok(())
    }
}

/// A headless run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// OBJ file; relative paths resolve against the scenario file
    pub model: Option<PathBuf>,
    pub viewport: Viewport,
    /// Document height as a multiple of the viewport height
    pub height_multiple: f32,
    pub fps: f64,
    pub frames: u64,
    /// Block on the model load before the first frame
    pub wait_for_model: bool,
    pub timeline: Timeline,
    pub animation: AnimationConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            model: None,
            viewport: Viewport::default(),
            height_multiple: showcase_core::page::DEFAULT_HEIGHT_MULTIPLE,
            fps: 60.0,
            frames: 600,
            wait_for_model: false,
            timeline: Timeline::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(source).context("Failed to parse scenario")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a scenario, resolving its model path against the file's directory
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        let mut config = Self::from_toml_str(&source)
            .with_context(|| format!("Invalid scenario {}", path.display()))?;
        if let (Some(model), Some(dir)) = (&config.model, path.parent()) {
            if model.is_relative() {
                config.model = Some(dir.join(model));
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.fps > 0.0) {
            bail!("fps must be positive, got {}", self.fps);
        }
        if !(self.height_multiple >= 1.0) {
            bail!(
                "height_multiple must be at least 1, got {}",
                self.height_multiple
            );
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            bail!("viewport must be non-empty");
        }
        self.timeline.validate()?;
        self.animation.validate()?;
        Ok(())
    }
}
