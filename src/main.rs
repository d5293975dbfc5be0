mod audio;
mod common;
mod config;
mod export;
mod pipeline;
mod subtitle;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;

use crate::config::SplitConfig;

/// Split WAV recordings into per-subtitle clips using SRT timing cues
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Folder scanned for SRT files with matching WAV siblings
    #[arg(long = "input_folder")]
    input_folder: Option<PathBuf>,

    /// Folder the per-pair clip directories are created under
    #[arg(long = "output_folder")]
    output_folder: Option<PathBuf>,

    /// Resample exported clips to this rate (source rate kept when omitted)
    #[arg(long = "sample_rate")]
    sample_rate: Option<u32>,

    /// Downmix exported clips to mono
    #[arg(long)]
    mono: bool,

    /// Name clips after their subtitle text instead of timestamps
    #[arg(long = "use_subtitle_as_name")]
    use_subtitle_as_name: bool,

    /// Worker threads for concurrent export (defaults to available cores)
    #[arg(long)]
    workers: Option<usize>,

    /// TOML config file providing defaults for the options above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Activate debug mode
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        eprintln!("Debug mode is on");
    }

    let result = resolve_config(&cli).and_then(|config| pipeline::run(&config, cli.debug));
    match result {
        Ok(summary) if summary.failed == 0 => {}
        Ok(summary) => {
            eprintln!(
                "{} {} of {} pair(s) failed",
                "Error:".red(),
                summary.failed,
                summary.total()
            );
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            process::exit(1);
        }
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<SplitConfig> {
    let mut config = match &cli.config {
        Some(path) => SplitConfig::load(path)?,
        None => SplitConfig::default(),
    };
    if let Some(folder) = &cli.input_folder {
        config.input_folder = folder.clone();
    }
    if let Some(folder) = &cli.output_folder {
        config.output_folder = folder.clone();
    }
    if let Some(rate) = cli.sample_rate {
        config.sample_rate = Some(rate);
    }
    if cli.mono {
        config.mono = true;
    }
    if cli.use_subtitle_as_name {
        config.use_subtitle_as_name = true;
    }
    if let Some(workers) = cli.workers {
        config.workers = Some(workers);
    }
    Ok(config)
}
