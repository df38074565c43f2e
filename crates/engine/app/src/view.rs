//! The model view: one scroll-animated model and its camera
//!
//! [`ModelView`] wires the pieces together. Every frame it
//!
//! 1. moves a finished background load into the asset slot,
//! 2. runs the object animator, which publishes anchors once per asset,
//! 3. runs the camera controller against the stored anchors.
//!
//! Scroll state is read once per frame from a [`ScrollHandle`], so frames
//! see the latest value written by the page, however many scroll events
//! arrived in between.

use crate::animator::{
    material_appearance, FrameInput, MaterialAppearance, ObjectAnimator, ObjectTransform,
};
use crate::camera::{Camera, ScrollCamera};
use crate::config::AnimationConfig;
use glam::Vec3;
use serde::Serialize;
use showcase_assets::{Anchors, AssetSlot, LoadOptions, LoadedScene, SlotStatus};
use showcase_core::{
    FrameTime, Page, Phase, ScrollHandle, ScrollState, ScrollTracker, Segment, Viewport,
};
use std::path::Path;

/// Observable state after one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub time: FrameTime,
    pub scroll: ScrollState,
    pub segment: Segment,
    pub phase: Phase,
    pub asset: SlotStatus,
    pub object: ObjectTransform,
    /// Material written this frame; `None` until the scene is ready
    pub material: Option<MaterialAppearance>,
    pub camera_position: Vec3,
    pub camera_look_at: Vec3,
    pub anchors: Option<Anchors>,
}

/// A mounted, scroll-driven model view
#[derive(Debug)]
pub struct ModelView {
    config: AnimationConfig,
    tracker: Option<ScrollTracker>,
    scroll: ScrollHandle,
    asset: AssetSlot,
    animator: ObjectAnimator,
    camera_controller: ScrollCamera,
    camera: Camera,
    anchors: Option<Anchors>,
    hovered: bool,
}

impl ModelView {
    /// Create a view reading an existing scroll handle
    pub fn new(config: AnimationConfig, scroll: ScrollHandle) -> Self {
        Self {
            tracker: None,
            scroll,
            asset: AssetSlot::new(LoadOptions::default()),
            animator: ObjectAnimator::new(config.clone()),
            camera_controller: ScrollCamera::new(config.clone()),
            camera: Camera::from_config(&config.camera),
            anchors: None,
            hovered: false,
            config,
        }
    }

    /// Mount a view on a page with its own scroll tracker
    pub fn mount(page: &mut Page, config: AnimationConfig) -> Self {
        let tracker = ScrollTracker::mount(page);
        let mut view = Self::new(config, tracker.handle());
        view.tracker = Some(tracker);
        view
    }

    /// Remove the view's page listeners and drop its scene
    pub fn unmount(mut self, page: &mut Page) {
        if let Some(tracker) = self.tracker.take() {
            tracker.unmount(page);
        }
        self.asset.unload();
        tracing::debug!("model view unmounted");
    }

    /// Point the view at a model file
    ///
    /// Loading runs in the background; frames before it finishes animate
    /// nothing and keep the camera at rest. Switching to another file
    /// discards the previous anchors.
    pub fn load(&mut self, path: impl AsRef<Path>) -> bool {
        let started = self.asset.request(path);
        if started {
            self.anchors = None;
            self.animator.forget_asset();
        }
        started
    }

    /// Show an already-built scene
    pub fn show(&mut self, scene: LoadedScene) {
        self.asset = AssetSlot::ready(scene);
        self.anchors = None;
        self.animator.forget_asset();
    }

    /// Block until the pending load finishes
    pub fn wait_for_asset(&mut self) -> SlotStatus {
        self.asset.wait()
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Advance one frame
    pub fn frame(&mut self, time: FrameTime, viewport: Viewport) -> FrameSnapshot {
        let status = self.asset.poll();
        let input = FrameInput {
            scroll: self.scroll.snapshot(),
            time,
            hovered: self.hovered,
            viewport,
        };

        if let Some(anchors) = self.animator.update(self.asset.scene_mut(), &input) {
            self.anchors = Some(anchors);
        }
        self.camera_controller
            .update(&mut self.camera, &input, self.anchors.as_ref());

        FrameSnapshot {
            time,
            scroll: input.scroll,
            segment: input.segment(),
            phase: input.phase(&self.config),
            asset: status,
            object: *self.animator.transform(),
            material: (status == SlotStatus::Ready)
                .then(|| material_appearance(input.scroll.progress, &self.config)),
            camera_position: self.camera.position,
            camera_look_at: self.camera_controller.look_at(),
            anchors: self.anchors,
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn anchors(&self) -> Option<&Anchors> {
        self.anchors.as_ref()
    }

    pub fn scene(&self) -> Option<&LoadedScene> {
        self.asset.scene()
    }

    pub fn object(&self) -> &ObjectTransform {
        self.animator.transform()
    }
}
