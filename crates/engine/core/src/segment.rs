//! Scroll segments and animation phases
//!
//! Scroll progress is split into [`SEGMENT_COUNT`] equal segments, one per
//! anchor region. Combined with the raw pixel offset this yields the
//! [`Phase`] shared by the object animator and the camera controller.
//! Phases are a pure function of the current scroll state: there are no
//! transitions to track and no hysteresis.

use serde::{Deserialize, Serialize};

/// Number of scroll segments (and anchor regions)
pub const SEGMENT_COUNT: usize = 3;

/// Position within the segmented scroll range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment index in `0..SEGMENT_COUNT`
    pub index: usize,
    /// Normalized position inside the segment, in [0, 1]
    pub local_t: f32,
}

impl Segment {
    /// Locate a progress value in [0, 1]
    ///
    /// Out-of-range or NaN progress is clamped into range first.
    pub fn from_progress(progress: f32) -> Self {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let total = SEGMENT_COUNT as f32;
        let index = ((p * total).floor() as usize).min(SEGMENT_COUNT - 1);
        let local_t = ((p - index as f32 / total) * total).clamp(0.0, 1.0);
        Self { index, local_t }
    }

    /// Index of the following segment, saturating at the last one
    pub fn next_index(&self) -> usize {
        (self.index + 1).min(SEGMENT_COUNT - 1)
    }
}

/// Continuous animation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Initial zoom-in while the page is near the top
    Arrival,
    /// First half of a segment: easing toward the segment's anchor
    SegmentEase,
    /// Second half of a segment: holding on the anchor
    SegmentHold,
}

impl Phase {
    /// Local segment position where easing hands over to holding
    pub const HOLD_THRESHOLD: f32 = 0.5;

    /// Classify the current scroll position
    pub fn classify(pixel_offset: u32, local_t: f32, arrival_distance: f32) -> Self {
        if (pixel_offset as f32) < arrival_distance {
            Phase::Arrival
        } else if local_t < Self::HOLD_THRESHOLD {
            Phase::SegmentEase
        } else {
            Phase::SegmentHold
        }
    }
}
