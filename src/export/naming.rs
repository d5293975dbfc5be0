use std::collections::HashSet;

use crate::subtitle::SubtitleEntry;

/// Characters Windows refuses in filenames; replaced with `_`.
const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Longest allowed sanitized stem, leaving room for a numeric suffix and the
/// extension.
const MAX_STEM_CHARS: usize = 247;

/// How exported clips are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingMode {
    /// `<start_ms>_<end_ms>.wav`; paired with a mapping file.
    Timestamp,
    /// Sanitized subtitle text, deduplicated with numeric suffixes.
    Label,
}

/// Hands out unique output filenames for one pair's clips.
///
/// The pair's output directory starts empty, so the resolver's own record of
/// handed-out names is the single source of truth for collisions.
#[derive(Debug)]
pub struct FilenameResolver {
    mode: NamingMode,
    used: HashSet<String>,
}

impl FilenameResolver {
    pub fn new(mode: NamingMode) -> Self {
        FilenameResolver {
            mode,
            used: HashSet::new(),
        }
    }

    /// Resolve the filename for one entry. Duplicate labels get `_1`, `_2`, …
    /// appended before the extension, in entry order.
    pub fn resolve(&mut self, entry: &SubtitleEntry) -> String {
        let filename = match self.mode {
            NamingMode::Timestamp => format!("{}_{}.wav", entry.start_ms, entry.end_ms),
            NamingMode::Label => {
                let stem = sanitize_label(&entry.label);
                let mut candidate = format!("{stem}.wav");
                let mut n = 1;
                while self.used.contains(&candidate) {
                    candidate = format!("{stem}_{n}.wav");
                    n += 1;
                }
                candidate
            }
        };
        self.used.insert(filename.clone());
        filename
    }
}

/// Replace characters illegal on common filesystems and cap the length.
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_STEM_CHARS)
        .collect()
}
