use super::SubtitleError;
use super::timecode::parse_timecode;

/// One subtitle cue: a millisecond time range plus its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    pub start_ms: u64,
    pub end_ms: u64,
    pub label: String,
}

/// Split a subtitle file into entries, in file order.
///
/// Blocks are separated by a blank line. Within a block the second line holds
/// `start --> end`; every line from the third onward belongs to the label and
/// is joined with single spaces. Parsing is fail-fast: the first malformed
/// block aborts the rest of the file.
pub fn parse_subtitles(content: &str) -> Result<Vec<SubtitleEntry>, SubtitleError> {
    let normalized = content.replace("\r\n", "\n");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for (idx, block) in trimmed.split("\n\n").enumerate() {
        let index = idx + 1;
        let lines: Vec<&str> = block.lines().collect();
        if lines.len() < 3 {
            return Err(SubtitleError::MalformedBlock {
                index,
                reason: "expected sequence, timing and text lines".to_string(),
            });
        }
        let Some((raw_start, raw_end)) = lines[1].split_once("-->") else {
            return Err(SubtitleError::MalformedBlock {
                index,
                reason: format!("timing line '{}' lacks '-->'", lines[1]),
            });
        };
        let start_ms = parse_timecode(raw_start)?;
        let end_ms = parse_timecode(raw_end)?;
        if end_ms <= start_ms {
            return Err(SubtitleError::MalformedBlock {
                index,
                reason: format!("end time {end_ms}ms not after start time {start_ms}ms"),
            });
        }
        entries.push(SubtitleEntry {
            start_ms,
            end_ms,
            label: lines[2..].join(" "),
        });
    }
    Ok(entries)
}
