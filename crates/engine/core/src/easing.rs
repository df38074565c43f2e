//! Interpolation and smoothing helpers
//!
//! Every animated value in the showcase is driven by a pure target function
//! followed by exponential smoothing toward that target. The helpers here are
//! the shared vocabulary for both halves.

use glam::Vec3;

/// Linear interpolation from `a` to `b` by `t` (not clamped)
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep over [0, 1]
///
/// Input is clamped first, so values outside the unit range saturate at
/// 0 or 1.
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

/// Exponential smoothing step: move `factor` of the remaining distance
/// from `current` toward `target`
///
/// With `factor` in (0, 1] the per-call change is bounded by
/// `factor * |target - current|`, so values never jump.
#[inline]
pub fn damp(current: f32, target: f32, factor: f32) -> f32 {
    lerp(current, target, factor)
}

/// [`damp`] applied component-wise to a vector
#[inline]
pub fn damp_vec3(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    current + (target - current) * factor
}
