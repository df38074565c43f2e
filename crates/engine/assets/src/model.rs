//! Scene model: surfaces with bounds and mutable materials

use crate::bounds::Aabb;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use showcase_core::Color;

/// Surface material the animator writes every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color
    pub color: Color,
    /// Emitted light color
    pub emissive: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            emissive: Color::BLACK,
        }
    }
}

/// A renderable surface of a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub name: String,
    /// Bounds in model space
    pub bounds: Aabb,
    pub material: Material,
}

impl Surface {
    pub fn new(name: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            bounds,
            material: Material::default(),
        }
    }
}

/// A loaded model: an ordered list of surfaces
///
/// Surface order is the order the source file declares them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub surfaces: Vec<Surface>,
}

impl Model {
    pub fn new(name: impl Into<String>, surfaces: Vec<Surface>) -> Self {
        Self {
            name: name.into(),
            surfaces,
        }
    }

    /// Build a model from bare bounding boxes, naming surfaces by index
    pub fn from_boxes(name: impl Into<String>, boxes: impl IntoIterator<Item = Aabb>) -> Self {
        let surfaces = boxes
            .into_iter()
            .enumerate()
            .map(|(index, bounds)| Surface::new(format!("surface_{index}"), bounds))
            .collect();
        Self::new(name, surfaces)
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Bounds enclosing every surface
    pub fn bounds(&self) -> Aabb {
        self.surfaces
            .iter()
            .fold(Aabb::EMPTY, |acc, surface| acc.union(&surface.bounds))
    }

    /// Bounds of each surface in declaration order
    pub fn surface_bounds(&self) -> Vec<Aabb> {
        self.surfaces.iter().map(|surface| surface.bounds).collect()
    }

    /// Move every surface so the model's bounds are centered on the origin
    ///
    /// Returns the applied offset.
    pub fn recenter(&mut self) -> Vec3 {
        let bounds = self.bounds();
        if bounds.is_empty() {
            return Vec3::ZERO;
        }
        let offset = -bounds.center();
        for surface in &mut self.surfaces {
            surface.bounds = surface.bounds.translated(offset);
        }
        offset
    }

    /// Iterate over all surface materials mutably
    pub fn materials_mut(&mut self) -> impl Iterator<Item = &mut Material> {
        self.surfaces.iter_mut().map(|surface| &mut surface.material)
    }
}
