use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use walkdir::WalkDir;

use crate::audio::AudioTrack;
use crate::common::progress;
use crate::config::SplitConfig;
use crate::export::{
    ExportFormat, ExportJob, ExportScheduler, FilenameResolver, NamingMode, default_worker_count,
};
use crate::subtitle;

/// One subtitle file plus its same-stem audio sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitlePair {
    pub srt: PathBuf,
    pub wav: PathBuf,
    pub stem: String,
}

/// Aggregate result of one run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub completed: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.completed + self.failed
    }
}

/// Walk the input tree and split every pair found. Pairs fail independently:
/// an error aborts that pair only and is reported as it occurs.
pub fn run(config: &SplitConfig, debug: bool) -> Result<RunSummary> {
    let pairs = discover_pairs(&config.input_folder);
    if pairs.is_empty() {
        println!(
            "no subtitle/audio pairs found under {}",
            config.input_folder.display()
        );
        return Ok(RunSummary::default());
    }
    if debug {
        eprintln!(
            "found {} pair(s), exporting with {} worker(s)",
            pairs.len(),
            config.workers.unwrap_or_else(default_worker_count)
        );
    }

    let mut summary = RunSummary::default();
    for pair in &pairs {
        match split_pair(pair, config) {
            Ok(written) => {
                println!("{} {} ({} clips)", "✓".green(), pair.stem, written);
                summary.completed += 1;
            }
            Err(e) => {
                eprintln!("{} {}: {:#}", "✗".red(), pair.stem, e);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

/// Find every `.srt` file with a same-stem `.wav` sibling, in path order.
pub fn discover_pairs(root: &Path) -> Vec<SubtitlePair> {
    let mut pairs = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let srt = entry.path();
        if srt.extension().and_then(|e| e.to_str()) != Some("srt") {
            continue;
        }
        let wav = srt.with_extension("wav");
        if !wav.is_file() {
            continue;
        }
        let Some(stem) = srt.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        pairs.push(SubtitlePair {
            srt: srt.to_path_buf(),
            wav,
            stem: stem.to_string(),
        });
    }
    pairs
}

/// Drive one pair through reset, parse, extract, enqueue, drain and the
/// optional mapping write. Returns the number of clips written.
fn split_pair(pair: &SubtitlePair, config: &SplitConfig) -> Result<usize> {
    let out_dir = config.output_folder.join(&pair.stem);
    reset_output_dir(&out_dir)?;

    let content = fs::read_to_string(&pair.srt)
        .with_context(|| format!("reading subtitles {}", pair.srt.display()))?;
    let entries = subtitle::parse_subtitles(&content)
        .with_context(|| format!("parsing {}", pair.srt.display()))?;
    let track = AudioTrack::from_wav(&pair.wav)?;

    let workers = config.workers.unwrap_or_else(default_worker_count);
    let scheduler = ExportScheduler::new(entries.len(), workers);
    let mode = if config.use_subtitle_as_name {
        NamingMode::Label
    } else {
        NamingMode::Timestamp
    };
    let mut resolver = FilenameResolver::new(mode);
    let mut mapping = Vec::new();

    let bar = progress::create_bar(entries.len() as u64, format!("Processing {}", pair.stem));
    for entry in &entries {
        let mut segment = track.slice_ms(entry.start_ms, entry.end_ms);
        if config.mono {
            segment = segment.downmix_mono();
        }
        if let Some(rate) = config.sample_rate {
            segment = segment.resample(rate)?;
        }
        let filename = resolver.resolve(entry);
        if mode == NamingMode::Timestamp {
            mapping.push(format!("{}|{}", filename, entry.label));
        }
        scheduler.enqueue(ExportJob {
            segment,
            destination: out_dir.join(&filename),
            format: ExportFormat::Wav,
        })?;
        bar.inc(1);
    }
    bar.finish_and_clear();

    let written = scheduler.drain()?;

    if mode == NamingMode::Timestamp {
        write_mapping(&out_dir, &mapping)?;
    }
    Ok(written)
}

/// Destructive reset: the pair's clip directory is recreated empty before any
/// job targeting it is enqueued.
fn reset_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        println!("removing stale output directory {}", dir.display());
        fs::remove_dir_all(dir).with_context(|| format!("removing {}", dir.display()))?;
    }
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))
}

/// Write the pair's `filename|label` index, one line per entry in subtitle
/// order.
fn write_mapping(out_dir: &Path, records: &[String]) -> Result<()> {
    let path = out_dir.join("mapping.list");
    let mut contents = String::with_capacity(records.iter().map(|r| r.len() + 1).sum());
    for record in records {
        contents.push_str(record);
        contents.push('\n');
    }
    fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn discovers_only_srt_files_with_wav_siblings() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.srt"));
        touch(&dir.path().join("a.wav"));
        touch(&dir.path().join("orphan.srt"));
        touch(&dir.path().join("plain.wav"));
        touch(&dir.path().join("notes.txt"));

        let pairs = discover_pairs(dir.path());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].stem, "a");
    }

    #[test]
    fn discovers_pairs_in_nested_directories_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub/b.srt"));
        touch(&dir.path().join("sub/b.wav"));
        touch(&dir.path().join("a.srt"));
        touch(&dir.path().join("a.wav"));

        let pairs = discover_pairs(dir.path());
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].stem, "a");
        assert_eq!(pairs[1].stem, "b");
    }

    #[test]
    fn missing_input_root_finds_nothing() {
        assert!(discover_pairs(Path::new("/nonexistent/input")).is_empty());
    }

    #[test]
    fn reset_clears_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("pair");
        fs::create_dir_all(&out).unwrap();
        touch(&out.join("leftover.wav"));

        reset_output_dir(&out).unwrap();
        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn mapping_file_preserves_record_order() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            "0_1500.wav|Hello world".to_string(),
            "1500_3000.wav|Goodbye".to_string(),
        ];
        write_mapping(dir.path(), &records).unwrap();
        let contents = fs::read_to_string(dir.path().join("mapping.list")).unwrap();
        assert_eq!(contents, "0_1500.wav|Hello world\n1500_3000.wav|Goodbye\n");
    }
}
