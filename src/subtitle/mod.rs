mod parser;
mod timecode;

pub use parser::{SubtitleEntry, parse_subtitles};
pub use timecode::parse_timecode;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SubtitleError {
    #[error("malformed timecode '{0}': expected H:M:S with optional fractional seconds")]
    MalformedTimecode(String),

    #[error("malformed subtitle block {index}: {reason}")]
    MalformedBlock { index: usize, reason: String },
}
