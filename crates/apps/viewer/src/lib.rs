//! Headless driver for the scroll-driven model view
//!
//! - [`config`]: scenario files (model, page layout, scroll/hover timeline)
//! - [`simulate`]: fixed-step frame loop over a scenario
//! - [`report`]: anchor reports for a model file

pub mod config;
pub mod report;
pub mod simulate;

pub use config::{ScenarioConfig, Timeline};
pub use report::{anchor_report, AnchorReport};
pub use simulate::{run, RunSummary};
