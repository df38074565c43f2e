//! Command line arguments shared by showcase tools
//!
//! Tools flatten [`CommonArgs`] into their own argument struct:
//!
//! ```ignore
//! use app::cli::CommonArgs;
//! use clap::Parser;
//!
//! #[derive(Parser)]
//! struct ToolArgs {
//!     #[command(flatten)]
//!     common: CommonArgs,
//! }
//!
//! let args = ToolArgs::parse();
//! let config = args.common.apply_to(AnimationConfig::default())?;
//! ```

use crate::config::{AnimationConfig, ConfigError};
use clap::Args;
use showcase_core::Viewport;
use std::path::PathBuf;

/// Common command line arguments
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Load animation tuning from a TOML file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Viewport size in logical pixels
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_viewport)]
    pub viewport: Option<Viewport>,

    /// Disable the idle floating motion
    #[arg(long)]
    pub no_float: bool,
}

impl CommonArgs {
    /// Apply the arguments on top of `config`
    ///
    /// A `--config` file replaces `config` entirely; flags are applied last.
    pub fn apply_to(&self, config: AnimationConfig) -> Result<AnimationConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => AnimationConfig::from_file(path)?,
            None => config,
        };
        if self.no_float {
            config.floating = false;
        }
        Ok(config)
    }

    /// Get the config path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config.as_ref()
    }

    /// Requested viewport, or `fallback`
    pub fn viewport_or(&self, fallback: Viewport) -> Viewport {
        self.viewport.unwrap_or(fallback)
    }
}

/// Parse `WIDTHxHEIGHT`, for example `1440x900`
pub fn parse_viewport(value: &str) -> Result<Viewport, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|err| format!("invalid width '{width}': {err}"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|err| format!("invalid height '{height}': {err}"))?;
    if width == 0 || height == 0 {
        return Err(format!("viewport must be non-empty, got {width}x{height}"));
    }
    Ok(Viewport::new(width, height))
}
