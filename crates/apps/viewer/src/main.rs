use anyhow::Context;
use app::cli::CommonArgs;
use clap::{Parser, Subcommand};
use showcase_assets::LoadOptions;
use showcase_viewer::{anchor_report, simulate, ScenarioConfig};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Headless driver for the scroll-driven model view
#[derive(Parser, Debug)]
#[command(name = "showcase-viewer", version, about)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the surfaces and anchor regions of a model as JSON
    Anchors {
        /// OBJ file to inspect
        model: PathBuf,

        /// Keep the model's original placement
        #[arg(long)]
        no_recenter: bool,
    },

    /// Play a scenario and print one JSON snapshot per frame
    Simulate {
        /// Scenario TOML file
        scenario: Option<PathBuf>,

        /// Override the scenario's model
        #[arg(long, short = 'm', value_name = "PATH")]
        model: Option<PathBuf>,

        /// Override the number of frames
        #[arg(long, value_name = "N")]
        frames: Option<u64>,

        /// Block on the model load before the first frame
        #[arg(long)]
        wait: bool,

        /// Print only the run summary
        #[arg(long)]
        summary: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match args.command {
        Command::Anchors { model, no_recenter } => {
            let options = LoadOptions {
                recenter: !no_recenter,
            };
            let report = anchor_report(&model, &options)?;
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        Command::Simulate {
            scenario,
            model,
            frames,
            wait,
            summary,
        } => {
            let mut config = match &scenario {
                Some(path) => ScenarioConfig::from_file(path)?,
                None => ScenarioConfig::default(),
            };
            if model.is_some() {
                config.model = model;
            }
            if let Some(frames) = frames {
                config.frames = frames;
            }
            config.wait_for_model |= wait;
            config.viewport = args.common.viewport_or(config.viewport);
            config.animation = args
                .common
                .apply_to(config.animation)
                .context("Failed to load animation config")?;
            config.validate()?;

            tracing::info!(
                model = ?config.model,
                frames = config.frames,
                viewport = ?config.viewport,
                "starting simulation"
            );

            let result = simulate::run(&config, |snapshot| {
                if !summary {
                    serde_json::to_writer(&mut out, snapshot)?;
                    writeln!(out)?;
                }
                Ok(())
            })?;
            if summary {
                serde_json::to_writer_pretty(&mut out, &result)?;
                writeln!(out)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
