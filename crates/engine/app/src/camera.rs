//! Perspective camera and the scroll-driven camera controller
//!
//! # Components
//!
//! - [`Camera`]: position, rotation (quaternion), field of view and clip planes
//! - [`camera_targets`]: pure per-frame target position and look-at point
//! - [`ScrollCamera`]: smooths a [`Camera`] toward those targets every frame

use crate::animator::FrameInput;
use crate::config::{AnimationConfig, CameraConfig};
use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use showcase_assets::Anchors;
use showcase_core::easing::{damp_vec3, smoothstep};
use showcase_core::Phase;
use std::f32::consts::PI;

// ============================================================================
// Camera
// ============================================================================

/// Default vertical field of view: 45 degrees
pub const DEFAULT_VFOV: f32 = 45.0 * PI / 180.0;

/// Camera for 3D rendering
///
/// # Coordinate System
///
/// Uses OpenGL convention:
/// - +X is right
/// - +Y is up
/// - -Z is forward (into the screen)
///
/// # Examples
///
/// ```
/// use app::camera::Camera;
/// use glam::Vec3;
///
/// let camera = Camera::look_at(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO, Vec3::Y);
/// assert!(camera.forward().z < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Camera rotation (orientation) as quaternion
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub vfov: f32,
    pub near: f32,
    pub far: f32,
    /// Point the camera was last aimed at
    pub target_position: Option<Vec3>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::look_at(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO, Vec3::Y)
    }
}

impl Camera {
    /// Create a camera at `position` looking down -Z
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            vfov: DEFAULT_VFOV,
            near: 0.01,
            far: 1000.0,
            target_position: None,
        }
    }

    /// Create a camera from configured lens settings at the base position
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(config.base_position);
        camera.vfov = config.vfov_degrees.to_radians();
        camera.near = config.near;
        camera.far = config.far;
        camera.set_look_at(Vec3::ZERO);
        camera
    }

    /// Create camera with position looking at target
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut camera = Self::new(position);
        if let Some(rotation) = look_rotation(target - position, up) {
            camera.rotation = rotation;
        }
        camera.target_position = Some(target);
        camera
    }

    /// Aim the camera at `target` using world up
    ///
    /// A target at the camera position leaves the rotation unchanged.
    pub fn set_look_at(&mut self, target: Vec3) {
        if let Some(rotation) = look_rotation(target - self.position, Vec3::Y) {
            self.rotation = rotation;
        }
        self.target_position = Some(target);
    }

    /// Get the forward direction vector
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Get the right direction vector
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction vector
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// World-to-view transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

}

/// Rotation that maps -Z onto `direction`, keeping `up` vertical on screen
fn look_rotation(direction: Vec3, up: Vec3) -> Option<Quat> {
    let forward = direction.try_normalize()?;
    match forward.cross(up).try_normalize() {
        Some(right) => {
            let cam_up = right.cross(forward);
            // In camera space: right=+X, up=+Y, forward=-Z
            Some(Quat::from_mat3(&Mat3::from_cols(right, cam_up, -forward)))
        }
        // Looking straight along the up axis
        None => Some(Quat::from_rotation_arc(Vec3::NEG_Z, forward)),
    }
}

// ============================================================================
// Scroll Camera
// ============================================================================

/// Smoothing factor that places the camera on its target in one frame
pub const SNAP: f32 = 1.0;

/// Target camera placement for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTargets {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Fraction of the remaining position distance covered this frame
    pub position_smoothing: f32,
    /// Fraction of the remaining look-at distance covered this frame
    pub look_at_smoothing: f32,
}

/// Position in front of an anchor center the camera zooms to
pub fn zoom_position(center: Vec3, config: &CameraConfig) -> Vec3 {
    center + Vec3::new(0.0, 0.0, config.zoom_distance)
}

/// Pure per-frame camera targets
///
/// During the arrival the camera is pinned at the base position looking at
/// the origin. Without anchors it drifts back to the base position while the
/// look-at snaps to the origin. Afterwards each segment eases toward its
/// anchor and then holds on it with a small horizontal sway.
pub fn camera_targets(
    input: &FrameInput,
    anchors: Option<&Anchors>,
    config: &AnimationConfig,
) -> CameraTargets {
    let camera = &config.camera;
    let resting = |position_smoothing| CameraTargets {
        position: camera.base_position,
        look_at: Vec3::ZERO,
        position_smoothing,
        look_at_smoothing: SNAP,
    };

    let Some(anchors) = anchors else {
        return resting(camera.idle_smoothing);
    };

    let segment = input.segment();
    let anchor = anchors.get(segment.index);
    let zoom = zoom_position(anchor.center, camera);

    match input.phase(config) {
        Phase::Arrival => resting(SNAP),
        Phase::SegmentEase => {
            let t = smoothstep(segment.local_t / Phase::HOLD_THRESHOLD);
            CameraTargets {
                position: camera.base_position.lerp(zoom, t),
                look_at: Vec3::ZERO.lerp(anchor.center, t),
                position_smoothing: camera.smoothing,
                look_at_smoothing: camera.smoothing,
            }
        }
        Phase::SegmentHold => {
            let t = (segment.local_t - Phase::HOLD_THRESHOLD) / (1.0 - Phase::HOLD_THRESHOLD);
            let sway = (t * PI).sin() * camera.parallax_amplitude;
            CameraTargets {
                position: zoom + Vec3::new(sway, 0.0, 0.0),
                look_at: anchor.center,
                position_smoothing: camera.smoothing,
                look_at_smoothing: camera.smoothing,
            }
        }
    }
}

/// Smooths the camera toward [`camera_targets`] every frame
///
/// The look-at point is smoothed separately from the position and persists
/// between frames. A factor of [`SNAP`] assigns the target exactly.
#[derive(Debug, Clone)]
pub struct ScrollCamera {
    config: AnimationConfig,
    look_at: Vec3,
}

impl ScrollCamera {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            look_at: Vec3::ZERO,
        }
    }

    /// Current smoothed look-at point
    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn update(&mut self, camera: &mut Camera, input: &FrameInput, anchors: Option<&Anchors>) {
        let targets = camera_targets(input, anchors, &self.config);
        camera.position = approach(camera.position, targets.position, targets.position_smoothing);
        self.look_at = approach(self.look_at, targets.look_at, targets.look_at_smoothing);
        camera.set_look_at(self.look_at);
    }
}

fn approach(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    if factor >= SNAP {
        target
    } else {
        damp_vec3(current, target, factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_assets::{derive_anchors, Aabb};
    use showcase_core::{FrameTime, ScrollState, Viewport};

    fn input(pixel_offset: u32, progress: f32) -> FrameInput {
        FrameInput {
            scroll: ScrollState {
                progress,
                pixel_offset,
            },
            time: FrameTime::default(),
            hovered: false,
            viewport: Viewport::default(),
        }
    }

    fn anchors() -> Anchors {
        let boxes: Vec<Aabb> = [-3.0, 0.0, 3.0]
            .iter()
            .map(|&x| Aabb::from_center_size(Vec3::new(x, 0.5, 0.0), Vec3::ONE))
            .collect();
        derive_anchors(&boxes).unwrap()
    }

    #[test]
    fn test_camera_default() {
        let camera = Camera::default();
        assert!((camera.vfov - DEFAULT_VFOV).abs() < 0.001);
        assert_eq!(camera.target_position, Some(Vec3::ZERO));
    }

    #[test]
    fn test_camera_look_at() {
        let camera = Camera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);

        // Camera should be looking toward origin (negative Z)
        let forward = camera.forward();
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
        assert!((camera.up() - Vec3::Y).length() < 1e-5);
        assert!((camera.right() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_look_at_straight_down() {
        let mut camera = Camera::new(Vec3::new(0.0, 5.0, 0.0));
        camera.set_look_at(Vec3::ZERO);
        assert!((camera.forward() - Vec3::NEG_Y).length() < 1e-5);
        assert!(!camera.rotation.is_nan());
    }

    #[test]
    fn test_look_at_own_position() {
        let mut camera = Camera::default();
        let rotation = camera.rotation;
        camera.set_look_at(camera.position);
        assert_eq!(camera.rotation, rotation);
    }

    #[test]
    fn test_view_matrix_maps_target_forward() {
        let camera = Camera::look_at(Vec3::new(1.0, 2.0, 6.0), Vec3::new(1.0, 2.0, 0.0), Vec3::Y);
        let view_space = camera.view_matrix().transform_point3(Vec3::new(1.0, 2.0, 0.0));
        assert!(view_space.x.abs() < 1e-5);
        assert!(view_space.y.abs() < 1e-5);
        assert!((view_space.z + 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_from_config() {
        let config = CameraConfig::default();
        let camera = Camera::from_config(&config);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 6.0));
        assert!((camera.vfov - 45f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.near, 0.01);
        assert_eq!(camera.far, 1000.0);
    }

    #[test]
    fn test_targets_without_anchors() {
        let config = AnimationConfig::default();
        let targets = camera_targets(&input(2000, 0.5), None, &config);
        assert_eq!(targets.position, Vec3::new(0.0, 0.0, 6.0));
        assert_eq!(targets.look_at, Vec3::ZERO);
        assert_eq!(targets.position_smoothing, 0.08);
        assert_eq!(targets.look_at_smoothing, SNAP);
    }

    #[test]
    fn test_targets_pinned_during_arrival() {
        let config = AnimationConfig::default();
        let anchors = anchors();
        let targets = camera_targets(&input(499, 0.3), Some(&anchors), &config);
        assert_eq!(targets.position, config.camera.base_position);
        assert_eq!(targets.look_at, Vec3::ZERO);
        assert_eq!(targets.position_smoothing, SNAP);
        assert_eq!(targets.look_at_smoothing, SNAP);
    }

    #[test]
    fn test_targets_ease_toward_anchor() {
        let config = AnimationConfig::default();
        let anchors = anchors();

        // Start of segment 1: still at base
        let start = camera_targets(&input(600, 0.3334), Some(&anchors), &config);
        assert!((start.position - config.camera.base_position).length() < 1e-4);

        // Quarter of segment 1: halfway there (smoothstep(0.5) = 0.5)
        let quarter = camera_targets(&input(600, 1.0 / 3.0 + 1.0 / 12.0), Some(&anchors), &config);
        let center = anchors.get(1).center;
        let zoom = zoom_position(center, &config.camera);
        let expected = config.camera.base_position.lerp(zoom, 0.5);
        assert!((quarter.position - expected).length() < 1e-3);
        assert!((quarter.look_at - center * 0.5).length() < 1e-3);
    }

    #[test]
    fn test_targets_hold_on_anchor() {
        let config = AnimationConfig::default();
        let anchors = anchors();
        let targets = camera_targets(&input(1000, 0.9), Some(&anchors), &config);
        let center = anchors.get(2).center;
        assert_eq!(targets.look_at, center);

        let zoom = zoom_position(center, &config.camera);
        assert_eq!(targets.position.y, zoom.y);
        assert_eq!(targets.position.z, zoom.z);
        let sway = targets.position.x - zoom.x;
        assert!(sway > 0.0 && sway <= 0.15 + 1e-6);
    }

    #[test]
    fn test_update_step_bounded() {
        let config = AnimationConfig::default();
        let anchors = anchors();
        let mut controller = ScrollCamera::new(config.clone());
        let mut camera = Camera::from_config(&config.camera);

        let frame = input(1000, 0.9);
        let target = camera_targets(&frame, Some(&anchors), &config).position;
        for _ in 0..120 {
            let before = camera.position;
            let remaining = (target - before).length();
            controller.update(&mut camera, &frame, Some(&anchors));
            let step = (camera.position - before).length();
            assert!(step <= remaining * 0.06 + 1e-5);
            assert!(!camera.position.is_nan());
            assert!(!camera.rotation.is_nan());
        }
        // Converging on the zoom position
        assert!((camera.position - target).length() < 0.01);
        assert!((controller.look_at() - anchors.get(2).center).length() < 0.01);
    }

    /// Zoom in on the last segment until the camera settles
    fn zoomed_in(config: &AnimationConfig, anchors: &Anchors) -> (ScrollCamera, Camera) {
        let mut controller = ScrollCamera::new(config.clone());
        let mut camera = Camera::from_config(&config.camera);
        for _ in 0..300 {
            controller.update(&mut camera, &input(2200, 0.9), Some(anchors));
        }
        assert!(camera.position.distance(config.camera.base_position) > 1.0);
        (controller, camera)
    }

    #[test]
    fn test_update_pins_camera_on_arrival() {
        let config = AnimationConfig::default();
        let anchors = anchors();
        let (mut controller, mut camera) = zoomed_in(&config, &anchors);

        controller.update(&mut camera, &input(300, 0.1), Some(&anchors));
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 6.0));
        assert_eq!(controller.look_at(), Vec3::ZERO);
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_update_without_anchors_snaps_look_at() {
        let config = AnimationConfig::default();
        let anchors = anchors();
        let (mut controller, mut camera) = zoomed_in(&config, &anchors);
        let before = camera.position;

        // Asset switched: anchors are gone
        controller.update(&mut camera, &input(2200, 0.9), None);
        assert_eq!(controller.look_at(), Vec3::ZERO);
        let remaining = before.distance(config.camera.base_position);
        let step = camera.position.distance(before);
        assert!(step > 0.0);
        assert!(step <= remaining * 0.08 + 1e-5);
    }
}
