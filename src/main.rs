//! `tmx2nal`: export a Tiled map to a Newton Adventure level.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use newton_adventure_tiled::core::ExportConfig;
use newton_adventure_tiled::{default_output_path, export_tmx};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Export a Tiled map (.tmx) to a Newton Adventure level (.nal) and its
/// animation archive (.nanim)
#[derive(Parser)]
#[command(name = "tmx2nal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Map to export
    input: PathBuf,

    /// Level file to write (default: the input with a .nal extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON export configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => ExportConfig::from_json_file(path)?,
        None => ExportConfig::default(),
    };
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    let summary = export_tmx(&cli.input, &output, config)
        .with_context(|| format!("Failed to export {}", cli.input.display()))?;

    info!(
        "Exported {} entities ({} types, {} embedded animations) to {} and {}",
        summary.entities,
        summary.entity_types,
        summary.animations,
        summary.level_path.display(),
        summary.animation_path.display()
    );
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
