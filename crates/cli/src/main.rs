//! Feature Synthesis Demo - Main Entry Point
//!
//! Usage: `feature-synth [CONFIG]`. Without a path, `feature-synth.toml` in
//! the working directory is read when present.

use clap::Parser;
use cli::{init_logging, run, DemoConfig, ReportFormat};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fit a feature expression on a labelled CSV dataset")]
struct Args {
    /// TOML config file (defaults to feature-synth.toml when present)
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = DemoConfig::load(args.config.as_deref())?;
    init_logging(&config.log_level)?;

    info!("=== Feature Synth v{} ===", env!("CARGO_PKG_VERSION"));

    let report = run(&config)?;
    match config.report_format {
        ReportFormat::Text => print!("{}", report.render_text()),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
