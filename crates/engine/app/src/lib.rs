//! Scroll-driven model view
//!
//! This crate turns page scroll into per-frame animation of a loaded model
//! and a virtual camera:
//!
//! - [`ObjectAnimator`]: scale, position, rotation and material of the model
//! - [`ScrollCamera`]: camera tour across the model's three anchor regions
//! - [`ModelView`]: mounts both on a page and drives them once per frame
//! - [`AnimationConfig`]: every tuning constant, loadable from TOML
//! - [`cli::CommonArgs`]: command line arguments shared by showcase tools

pub mod animator;
pub mod camera;
pub mod cli;
pub mod config;
pub mod view;

pub use animator::{
    material_appearance, object_targets, FrameInput, MaterialAppearance, ObjectAnimator,
    ObjectTargets, ObjectTransform, RotationMode,
};
pub use camera::{camera_targets, Camera, CameraTargets, ScrollCamera};
pub use config::{AnimationConfig, CameraConfig, ConfigError};
pub use view::{FrameSnapshot, ModelView};
