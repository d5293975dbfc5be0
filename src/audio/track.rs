use std::path::Path;

use hound::{SampleFormat, WavReader};

use super::{AudioError, Segment, f32_to_i16};

/// A fully decoded WAV file held in memory as interleaved 16-bit samples,
/// addressable by millisecond offset range.
#[derive(Debug, Clone)]
pub struct AudioTrack {
    samples: Vec<i16>,
    channels: u16,
    sample_rate: u32,
}

impl AudioTrack {
    /// Decode a whole WAV file. 16-bit integer sources are taken as-is;
    /// 24- and 32-bit integer and 32-bit float sources are narrowed to
    /// 16 bits at load time.
    pub fn from_wav(path: &Path) -> Result<Self, AudioError> {
        let decode_err = |source| AudioError::Decode {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = WavReader::open(path).map_err(decode_err)?;
        let spec = reader.spec();

        let samples = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, 16) => reader
                .samples::<i16>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(decode_err)?,
            (SampleFormat::Int, bits @ 17..=32) => {
                let shift = bits - 16;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| (v >> shift) as i16))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(decode_err)?
            }
            (SampleFormat::Float, 32) => reader
                .samples::<f32>()
                .map(|s| s.map(f32_to_i16))
                .collect::<Result<Vec<_>, _>>()
                .map_err(decode_err)?,
            (format, bits) => {
                return Err(AudioError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    bits,
                    format,
                });
            }
        };

        Ok(AudioTrack {
            samples,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
        })
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Track length in whole milliseconds, rounded down.
    pub fn duration_ms(&self) -> u64 {
        self.frames() as u64 * 1000 / self.sample_rate as u64
    }

    /// Copy out the frame-aligned range `[start_ms, end_ms)`. Ranges reaching
    /// past the end of the track are clamped; a range entirely past the end
    /// yields an empty segment.
    pub fn slice_ms(&self, start_ms: u64, end_ms: u64) -> Segment {
        let channels = self.channels as usize;
        let to_frame = |ms: u64| (ms as u128 * self.sample_rate as u128 / 1000) as usize;
        let start = to_frame(start_ms).min(self.frames());
        let end = to_frame(end_ms).min(self.frames()).max(start);
        Segment::new(
            self.samples[start * channels..end * channels].to_vec(),
            self.channels,
            self.sample_rate,
        )
    }
}
