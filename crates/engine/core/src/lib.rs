//! Core library for the scroll-driven model showcase
//!
//! Generic building blocks shared by the animation pipeline and the viewer:
//!
//! - [`page`]: Headless document model with scroll/resize listeners
//! - [`scroll`]: Scroll tracker publishing normalized progress to read handles
//! - [`segment`]: Three-segment scroll model and animation phases
//! - [`easing`]: Interpolation and exponential smoothing helpers
//! - [`color`]: RGB colors and the segment palette
//! - [`timer`]: Frame clock for elapsed/delta time

pub mod color;
pub mod easing;
pub mod page;
pub mod scroll;
pub mod segment;
pub mod timer;

// Re-export commonly used types at crate root
pub use color::{Color, SEGMENT_PALETTE};
pub use page::{DocumentMetrics, ListenerId, Page, PageEventKind, PageGeometry, Viewport};
pub use scroll::{ScrollHandle, ScrollState, ScrollTracker};
pub use segment::{Phase, Segment, SEGMENT_COUNT};
pub use timer::{FrameClock, FrameTime};
