//! Scene assets for the model showcase
//!
//! Loads a 3D model, keeps its surfaces as bounding boxes plus mutable
//! materials, and derives the three anchor regions the camera tours while
//! the page scrolls.
//!
//! # Modules
//!
//! - [`bounds`]: Axis-aligned bounding boxes
//! - [`model`]: Surfaces, materials and models
//! - [`anchors`]: Left-to-right anchor regions from surface geometry
//! - [`loader`]: OBJ loading and background asset slots
//! - [`error`]: Error types

pub mod anchors;
pub mod bounds;
pub mod error;
pub mod loader;
pub mod model;

pub use anchors::{derive_anchors, AnchorRegion, Anchors};
pub use bounds::Aabb;
pub use error::{Error, Result};
pub use loader::{load_obj, AssetSlot, LoadOptions, LoadedScene, SlotStatus};
pub use model::{Material, Model, Surface};
