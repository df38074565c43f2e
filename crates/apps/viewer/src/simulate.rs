//! Headless frame loop
//!
//! Plays a [`ScenarioConfig`] against a mounted [`ModelView`]: each frame the
//! timeline drives the page scroll and hover state, then the view advances
//! by one fixed time step.

use crate::config::ScenarioConfig;
use anyhow::Context;
use app::{FrameSnapshot, ModelView};
use serde::Serialize;
use showcase_assets::SlotStatus;
use showcase_core::{FrameClock, Page, Phase};

/// Totals over a finished run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    /// First frame that saw the loaded model
    pub ready_frame: Option<u64>,
    /// Frames at which the animation phase changed
    pub phase_changes: Vec<(u64, Phase)>,
    pub final_asset: Option<SlotStatus>,
}

/// Run a scenario, handing every frame's snapshot to `sink`
pub fn run<F>(scenario: &ScenarioConfig, mut sink: F) -> anyhow::Result<RunSummary>
where
    F: FnMut(&FrameSnapshot) -> anyhow::Result<()>,
{
    let mut page = Page::with_height_multiple(scenario.viewport, scenario.height_multiple);
    let mut view = ModelView::mount(&mut page, scenario.animation.clone());

    if let Some(model) = &scenario.model {
        view.load(model);
        if scenario.wait_for_model {
            let status = view.wait_for_asset();
            tracing::info!(?status, model = %model.display(), "model load finished");
        }
    } else {
        tracing::warn!("scenario has no model, camera will stay at rest");
    }

    let mut clock = FrameClock::new();
    let mut summary = RunSummary::default();
    let mut last_phase = None;
    let step = 1.0 / scenario.fps;

    for frame in 0..scenario.frames {
        page.scroll_to(scenario.timeline.scroll_at(frame));
        view.set_hovered(scenario.timeline.hovered_at(frame));

        let time = if frame == 0 { clock.now() } else { clock.tick(step) };
        let snapshot = view.frame(time, scenario.viewport);

        if summary.ready_frame.is_none() && snapshot.asset == SlotStatus::Ready {
            summary.ready_frame = Some(frame);
        }
        if last_phase != Some(snapshot.phase) {
            summary.phase_changes.push((frame, snapshot.phase));
            last_phase = Some(snapshot.phase);
        }
        summary.final_asset = Some(snapshot.asset);
        summary.frames += 1;

        sink(&snapshot).with_context(|| format!("Failed to emit frame {frame}"))?;
    }

    view.unmount(&mut page);
    tracing::info!(
        frames = summary.frames,
        ready_frame = ?summary.ready_frame,
        "simulation finished"
    );
    Ok(summary)
}
