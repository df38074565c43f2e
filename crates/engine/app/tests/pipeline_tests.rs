//! End-to-end frame pipeline: page scroll, background load, animation, camera

use app::{AnimationConfig, ModelView};
use glam::Vec3;
use showcase_assets::SlotStatus;
use showcase_core::{FrameClock, Page, Phase, Viewport};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const VIEWPORT: Viewport = Viewport::new(1280, 800);

/// Write an OBJ file with one thin vertical bar per x position
fn write_bars_obj(path: &Path, xs: &[f32]) {
    let mut obj = String::new();
    for (index, x) in xs.iter().enumerate() {
        writeln!(obj, "o bar_{index}").unwrap();
        for corner in 0..8 {
            let vx = if corner & 1 == 0 { x - 0.2 } else { x + 0.2 };
            let vy = if corner & 2 == 0 { -1.0 } else { 1.0 };
            let vz = if corner & 4 == 0 { -0.2 } else { 0.2 };
            writeln!(obj, "v {vx} {vy} {vz}").unwrap();
        }
        let base = index * 8 + 1;
        for face in [
            [0, 1, 3, 2],
            [4, 6, 7, 5],
            [0, 4, 5, 1],
            [2, 3, 7, 6],
            [0, 2, 6, 4],
            [1, 5, 7, 3],
        ] {
            let indices: Vec<String> = face.iter().map(|i| (base + i).to_string()).collect();
            writeln!(obj, "f {}", indices.join(" ")).unwrap();
        }
    }
    fs::write(path, obj).unwrap();
}

fn loaded_view(page: &mut Page, xs: &[f32]) -> (tempfile::TempDir, ModelView) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.obj");
    write_bars_obj(&path, xs);

    let mut config = AnimationConfig::default();
    config.floating = false;
    let mut view = ModelView::mount(page, config);
    assert!(view.load(&path));
    assert_eq!(view.wait_for_asset(), SlotStatus::Ready);
    (dir, view)
}

#[test]
fn test_scroll_reaches_frames() {
    let mut page = Page::with_height_multiple(VIEWPORT, 4.0);
    let (_dir, mut view) = loaded_view(&mut page, &[-3.0, -1.0, 0.0, 1.0, 3.0]);
    let mut clock = FrameClock::new();

    let first = view.frame(clock.tick(1.0 / 60.0), VIEWPORT);
    assert_eq!(first.scroll.pixel_offset, 0);
    assert_eq!(first.phase, Phase::Arrival);
    assert!(first.anchors.is_some());

    // Several scroll events between two frames: only the last one is seen
    page.scroll_to(300);
    page.scroll_to(900);
    page.scroll_to(1200);
    let snapshot = view.frame(clock.tick(1.0 / 60.0), VIEWPORT);
    assert_eq!(snapshot.scroll.pixel_offset, 1200);
    assert!((snapshot.scroll.progress - 0.5).abs() < 1e-6);
    assert_eq!(snapshot.segment.index, 1);

    view.unmount(&mut page);
    assert_eq!(page.listener_count(), 0);
}

#[test]
fn test_five_bar_logo_tour() {
    let mut page = Page::with_height_multiple(VIEWPORT, 4.0);
    let (_dir, mut view) = loaded_view(&mut page, &[-3.0, -1.0, 0.0, 1.0, 3.0]);
    let mut clock = FrameClock::new();

    // Hold on the last segment
    page.scroll_to((page.max_scroll() as f32 * 0.9) as u32);
    let mut last = view.frame(clock.tick(1.0 / 60.0), VIEWPORT);
    for _ in 0..300 {
        last = view.frame(clock.tick(1.0 / 60.0), VIEWPORT);
    }
    assert_eq!(last.segment.index, 2);
    assert_eq!(last.phase, Phase::SegmentHold);

    let anchors = last.anchors.unwrap();
    let centers: Vec<f32> = anchors.iter().map(|region| region.center.x).collect();
    assert!(centers[0] < centers[1] && centers[1] < centers[2]);

    // Camera in front of the rightmost anchor, object zoomed in
    let target = anchors.get(2).center;
    assert!((last.camera_look_at - target).length() < 0.01);
    assert!((last.camera_position.z - (target.z + 2.5)).abs() < 0.01);
    assert!((last.object.scale - 1.8).abs() <= 0.06);

    let json = serde_json::to_value(&last).unwrap();
    assert_eq!(json["phase"], "segment_hold");
    assert_eq!(json["asset"], "ready");
    assert_eq!(json["segment"]["index"], 2);
}

#[test]
fn test_camera_and_object_never_jump() {
    let mut page = Page::with_height_multiple(VIEWPORT, 4.0);
    let (_dir, mut view) = loaded_view(&mut page, &[-2.0, 0.0, 2.0]);
    let mut clock = FrameClock::new();

    let mut previous = view.frame(clock.tick(1.0 / 60.0), VIEWPORT);
    let max_scroll = page.max_scroll();
    for step in 0..=240u32 {
        page.scroll_to(max_scroll * step / 240);
        let snapshot = view.frame(clock.tick(1.0 / 60.0), VIEWPORT);
        assert!(snapshot.scroll.progress >= previous.scroll.progress);

        let camera_step = (snapshot.camera_position - previous.camera_position).length();
        let scale_step = (snapshot.object.scale - previous.object.scale).abs();
        // Bounded by the smoothing factor times the largest possible distance
        assert!(camera_step < 0.06 * 8.0);
        assert!(scale_step < 0.08 * 2.0);
        assert!(!snapshot.camera_position.is_nan());
        previous = snapshot;
    }
}

#[test]
fn test_scrolling_back_to_arrival_pins_camera() {
    let mut page = Page::with_height_multiple(VIEWPORT, 4.0);
    let (_dir, mut view) = loaded_view(&mut page, &[-2.0, 0.0, 2.0]);
    let mut clock = FrameClock::new();

    page.scroll_to(2200);
    for _ in 0..300 {
        view.frame(clock.tick(1.0 / 60.0), VIEWPORT);
    }
    assert!(view.camera().position.z < 3.0);

    page.scroll_to(300);
    let snapshot = view.frame(clock.tick(1.0 / 60.0), VIEWPORT);
    assert_eq!(snapshot.phase, Phase::Arrival);
    assert_eq!(snapshot.camera_position, Vec3::new(0.0, 0.0, 6.0));
    assert_eq!(snapshot.camera_look_at, Vec3::ZERO);
}

#[test]
fn test_resize_to_mobile_moves_arrival_start() {
    let mut page = Page::with_height_multiple(VIEWPORT, 4.0);
    let (_dir, mut view) = loaded_view(&mut page, &[-2.0, 0.0, 2.0]);
    let mut clock = FrameClock::new();

    let mobile = Viewport::new(390, 844);
    page.resize(mobile);
    let mut last = view.frame(clock.tick(1.0 / 60.0), mobile);
    for _ in 0..200 {
        last = view.frame(clock.tick(1.0 / 60.0), mobile);
    }
    assert!(last.object.position.x.abs() < 0.01);
    assert!((last.object.position.y - 1.5).abs() < 0.01);
    assert_eq!(last.camera_position, Vec3::new(0.0, 0.0, 6.0));
}

#[test]
fn test_missing_model_keeps_camera_at_rest() {
    let mut page = Page::with_height_multiple(VIEWPORT, 4.0);
    let mut view = ModelView::mount(&mut page, AnimationConfig::default());
    assert!(view.load("/no/such/logo.obj"));
    assert_eq!(view.wait_for_asset(), SlotStatus::Failed);

    page.scroll_to(2000);
    let mut clock = FrameClock::new();
    for _ in 0..30 {
        let snapshot = view.frame(clock.tick(1.0 / 60.0), VIEWPORT);
        assert_eq!(snapshot.asset, SlotStatus::Failed);
        assert!(snapshot.anchors.is_none());
        assert_eq!(snapshot.camera_position, Vec3::new(0.0, 0.0, 6.0));
    }
}
