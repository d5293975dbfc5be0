use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

fn default_input_folder() -> PathBuf {
    PathBuf::from("input")
}

fn default_output_folder() -> PathBuf {
    PathBuf::from("output")
}

/// Everything one run of the splitter needs to know. Loadable from a TOML
/// file; CLI flags override individual fields afterwards.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SplitConfig {
    /// Root scanned for `.srt` files with same-stem `.wav` siblings.
    #[serde(default = "default_input_folder")]
    pub input_folder: PathBuf,
    /// Root under which one clip directory per pair is created.
    #[serde(default = "default_output_folder")]
    pub output_folder: PathBuf,
    /// Resample clips to this rate; the source rate is kept when unset.
    #[serde(default)]
    pub sample_rate: Option<u32>,
    /// Downmix clips to a single channel.
    #[serde(default)]
    pub mono: bool,
    /// Name clips from subtitle text instead of timestamps.
    #[serde(default)]
    pub use_subtitle_as_name: bool,
    /// Worker threads for concurrent export; detected when unset.
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            input_folder: default_input_folder(),
            output_folder: default_output_folder(),
            sample_rate: None,
            mono: false,
            use_subtitle_as_name: false,
            workers: None,
        }
    }
}

impl SplitConfig {
    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<SplitConfig> {
        let s = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: SplitConfig = toml::from_str(&s).context("parsing config toml")?;
        Ok(config)
    }
}
