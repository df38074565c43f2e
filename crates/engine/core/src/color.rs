//! Colors for surface materials
//!
//! Colors are plain RGB triples in [0, 1] without gamma handling; the
//! renderer consuming the scene decides how to present them.

use serde::{Deserialize, Serialize};

/// RGB color with f32 channels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// CSS `orange` (#FFA500)
    pub const ORANGE: Self = Self::rgb(1.0, 165.0 / 255.0, 0.0);
    /// CSS `blue` (#0000FF)
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// CSS `green` (#008000)
    pub const GREEN: Self = Self::rgb(0.0, 128.0 / 255.0, 0.0);

    /// Create a color from float channels
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a `[r, g, b]` array (tobj material layout)
    pub fn from_array(rgb: [f32; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Linear blend between two colors
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Multiply every channel by a scalar (not clamped)
    pub fn scale(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Base color per scroll segment: orange, then blue, then green
pub const SEGMENT_PALETTE: [Color; 3] = [Color::ORANGE, Color::BLUE, Color::GREEN];
