//! Scroll-driven object animation
//!
//! The animator is split in two layers:
//!
//! - **Targets** ([`object_targets`], [`material_appearance`]): pure functions
//!   of scroll state, elapsed time, hover and viewport. No state, no engine.
//! - **Integration** ([`ObjectAnimator`]): exponentially smooths the applied
//!   transform toward the targets once per frame and writes materials into
//!   the loaded scene.
//!
//! # Phases
//!
//! - **Arrival** (`pixel_offset < arrival_distance`): the object zooms in
//!   from `arrival_scale` to `rest_scale` and slides from its start position
//!   to the origin.
//! - **Segment ease** (`local_t < 0.5`): scale eases from `rest_scale` to
//!   `zoom_scale`.
//! - **Segment hold**: scale holds at `zoom_scale` with a small pulse.

use crate::config::AnimationConfig;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use showcase_assets::{Anchors, LoadedScene};
use showcase_core::easing::{damp, lerp, smoothstep};
use showcase_core::{Color, FrameTime, Phase, ScrollState, Segment, Viewport, SEGMENT_PALETTE};
use std::f32::consts::{PI, TAU};
use std::path::PathBuf;

// ============================================================================
// Frame Input
// ============================================================================

/// Everything the animation reads for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub scroll: ScrollState,
    pub time: FrameTime,
    /// Pointer currently over the object
    pub hovered: bool,
    pub viewport: Viewport,
}

impl FrameInput {
    pub fn segment(&self) -> Segment {
        Segment::from_progress(self.scroll.progress)
    }

    pub fn phase(&self, config: &AnimationConfig) -> Phase {
        Phase::classify(
            self.scroll.pixel_offset,
            self.segment().local_t,
            config.arrival_distance,
        )
    }
}

// ============================================================================
// Targets
// ============================================================================

/// How rotation evolves this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// Constant-rate spin around the vertical axis
    Spin,
    /// Smoothly return to the neutral heading
    Reset,
}

/// Target transform for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTargets {
    pub scale: f32,
    pub position: Vec3,
    pub rotation: RotationMode,
}

/// Material values shared by every surface for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialAppearance {
    pub color: Color,
    /// Emissive multiplier applied to `color`; oscillates in sign
    pub glow: f32,
    pub emissive: Color,
}

/// Target uniform scale
pub fn scale_target(
    pixel_offset: u32,
    segment: Segment,
    hovered: bool,
    config: &AnimationConfig,
) -> f32 {
    let offset = pixel_offset as f32;
    let scale = if offset < config.arrival_distance {
        lerp(
            config.arrival_scale,
            config.rest_scale,
            offset / config.arrival_distance,
        )
    } else if segment.local_t < Phase::HOLD_THRESHOLD {
        let t = smoothstep(segment.local_t / Phase::HOLD_THRESHOLD);
        lerp(config.rest_scale, config.zoom_scale, t)
    } else {
        let t = (segment.local_t - Phase::HOLD_THRESHOLD) / (1.0 - Phase::HOLD_THRESHOLD);
        config.zoom_scale + (t * TAU).sin() * config.pulse_amplitude
    };

    if hovered {
        scale.max(config.hover_min_scale)
    } else {
        scale
    }
}

/// Target position, including the floating oscillation when enabled
pub fn position_target(
    pixel_offset: u32,
    elapsed: f32,
    viewport: Viewport,
    config: &AnimationConfig,
) -> Vec3 {
    let offset = pixel_offset as f32;
    let mut position = Vec3::ZERO;
    if offset < config.arrival_distance {
        let t = smoothstep(offset / config.arrival_distance);
        let start = config.start_position(viewport);
        position.x = lerp(start.x, 0.0, t);
        position.y = lerp(start.y, 0.0, t);
    }
    if config.floating {
        position.y += (elapsed * config.float_frequency).sin() * config.float_amplitude;
    }
    position
}

/// Pure per-frame targets for the object transform
pub fn object_targets(input: &FrameInput, config: &AnimationConfig) -> ObjectTargets {
    let pixel_offset = input.scroll.pixel_offset;
    let rotation = if pixel_offset > config.spin_threshold || input.hovered {
        RotationMode::Spin
    } else {
        RotationMode::Reset
    };
    ObjectTargets {
        scale: scale_target(pixel_offset, input.segment(), input.hovered, config),
        position: position_target(pixel_offset, input.time.elapsed, input.viewport, config),
        rotation,
    }
}

/// Surface color and glow for a scroll progress
///
/// The base color blends from the current segment's palette entry toward the
/// next one; the glow follows `sin((p + segment) * π)` so it pulses as the
/// page moves between segments.
pub fn material_appearance(progress: f32, config: &AnimationConfig) -> MaterialAppearance {
    let segment = Segment::from_progress(progress);
    let color = SEGMENT_PALETTE[segment.index].lerp(
        SEGMENT_PALETTE[segment.next_index()],
        segment.local_t,
    );
    let glow = ((progress + segment.index as f32) * PI).sin() * config.glow_amplitude;
    MaterialAppearance {
        color,
        glow,
        emissive: color.scale(glow),
    }
}

// ============================================================================
// Object Animator
// ============================================================================

/// Transform applied to the loaded object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
    /// Uniform scale
    pub scale: f32,
    pub position: Vec3,
    /// Heading around the vertical axis in radians
    pub rotation_y: f32,
}

impl ObjectTransform {
    pub fn with_scale(scale: f32) -> Self {
        Self {
            scale,
            position: Vec3::ZERO,
            rotation_y: 0.0,
        }
    }
}

/// Applies scroll-driven animation to the loaded object each frame
#[derive(Debug, Clone)]
pub struct ObjectAnimator {
    config: AnimationConfig,
    transform: ObjectTransform,
    /// Asset whose anchors have already been reported
    reported_source: Option<PathBuf>,
    last_phase: Option<Phase>,
}

impl ObjectAnimator {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            transform: ObjectTransform::with_scale(config.initial_scale),
            config,
            reported_source: None,
            last_phase: None,
        }
    }

    pub fn transform(&self) -> &ObjectTransform {
        &self.transform
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Report anchors again for the next scene, even from the same path
    pub fn forget_asset(&mut self) {
        self.reported_source = None;
    }

    /// Advance one frame
    ///
    /// Does nothing while `scene` is `None`. Returns the scene's anchors on
    /// the first frame they are seen for a given asset, `None` otherwise.
    pub fn update(
        &mut self,
        scene: Option<&mut LoadedScene>,
        input: &FrameInput,
    ) -> Option<Anchors> {
        let scene = scene?;

        let appearance = material_appearance(input.scroll.progress, &self.config);
        for material in scene.model.materials_mut() {
            material.color = appearance.color;
            material.emissive = appearance.emissive;
        }

        let targets = object_targets(input, &self.config);
        let factor = self.config.object_smoothing;
        self.transform.scale = damp(self.transform.scale, targets.scale, factor);
        self.transform.position.x = damp(self.transform.position.x, targets.position.x, factor);
        self.transform.position.y = damp(self.transform.position.y, targets.position.y, factor);

        match targets.rotation {
            RotationMode::Spin => {
                self.transform.rotation_y += input.time.delta * self.config.spin_rate;
            }
            RotationMode::Reset => {
                self.transform.rotation_y = damp(self.transform.rotation_y, 0.0, factor);
            }
        }

        let phase = input.phase(&self.config);
        if self.last_phase != Some(phase) {
            tracing::debug!(
                ?phase,
                pixel_offset = input.scroll.pixel_offset,
                progress = input.scroll.progress,
                "animation phase changed"
            );
            self.last_phase = Some(phase);
        }

        if self.reported_source.as_ref() == Some(&scene.source) {
            return None;
        }
        let anchors = scene.anchors?;
        self.reported_source = Some(scene.source.clone());
        tracing::info!(
            source = %scene.source.display(),
            centers = ?anchors.iter().map(|region| region.center).collect::<Vec<_>>(),
            "anchors published"
        );
        Some(anchors)
    }
}
