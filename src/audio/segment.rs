use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use super::{AudioError, f32_to_i16};

/// Frames fed to the resampler per call; short tails are zero-padded up to
/// this size and the surplus output is trimmed afterwards.
const RESAMPLE_CHUNK: usize = 1024;

/// An owned, optionally normalized slice of an audio track, ready for
/// encoding. Carried by exactly one export job until written.
#[derive(Debug, Clone)]
pub struct Segment {
    samples: Vec<i16>,
    channels: u16,
    sample_rate: u32,
}

impl Segment {
    pub(crate) fn new(samples: Vec<i16>, channels: u16, sample_rate: u32) -> Self {
        Segment {
            samples,
            channels,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Average all channels of each frame into one.
    pub fn downmix_mono(self) -> Segment {
        if self.channels <= 1 {
            return self;
        }
        let channels = self.channels as usize;
        let samples = self
            .samples
            .chunks_exact(channels)
            .map(|frame| (frame.iter().map(|&s| s as i32).sum::<i32>() / channels as i32) as i16)
            .collect();
        Segment {
            samples,
            channels: 1,
            sample_rate: self.sample_rate,
        }
    }

    /// Convert the segment to `target_rate` with windowed-sinc interpolation.
    /// A no-op when the rates already match.
    pub fn resample(self, target_rate: u32) -> Result<Segment, AudioError> {
        if target_rate == self.sample_rate || self.samples.is_empty() {
            return Ok(Segment {
                sample_rate: target_rate,
                ..self
            });
        }

        let from = self.sample_rate;
        let channels = self.channels as usize;
        let frames = self.frames();
        let ratio = target_rate as f64 / from as f64;
        let resample_err = |detail: String| AudioError::Resample {
            from,
            to: target_rate,
            detail,
        };

        let params = SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };
        let mut resampler = SincFixedIn::<f32>::new(ratio, 1.0, params, RESAMPLE_CHUNK, channels)
            .map_err(|e| resample_err(e.to_string()))?;

        let mut input: Vec<Vec<f32>> = (0..channels)
            .map(|_| Vec::with_capacity(frames))
            .collect();
        for frame in self.samples.chunks_exact(channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                input[ch].push(sample as f32 / 32768.0);
            }
        }

        let expected = (frames as f64 * ratio).round() as usize;
        let mut output: Vec<Vec<f32>> = (0..channels)
            .map(|_| Vec::with_capacity(expected + RESAMPLE_CHUNK))
            .collect();

        // One trailing all-zero chunk flushes enough of the sinc filter's
        // delay that `expected` frames are always available.
        let mut pos = 0;
        while pos < frames + RESAMPLE_CHUNK {
            let start = pos.min(frames);
            let take = RESAMPLE_CHUNK.min(frames - start);
            let chunk: Vec<Vec<f32>> = input
                .iter()
                .map(|ch| {
                    let mut block = ch[start..start + take].to_vec();
                    block.resize(RESAMPLE_CHUNK, 0.0);
                    block
                })
                .collect();
            let processed = resampler
                .process(&chunk, None)
                .map_err(|e| resample_err(e.to_string()))?;
            for (ch, out) in processed.into_iter().enumerate() {
                output[ch].extend(out);
            }
            pos += RESAMPLE_CHUNK;
        }

        let available = output.iter().map(Vec::len).min().unwrap_or(0);
        let frames_out = expected.min(available);
        let mut samples = Vec::with_capacity(frames_out * channels);
        for i in 0..frames_out {
            for ch in &output {
                samples.push(f32_to_i16(ch[i]));
            }
        }

        Ok(Segment {
            samples,
            channels: self.channels,
            sample_rate: target_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_averages_channel_pairs() {
        let segment = Segment::new(vec![-2, 4, 100, 200, 0, 0], 2, 44_100);
        let mono = segment.downmix_mono();
        assert_eq!(mono.channels(), 1);
        assert_eq!(mono.samples(), &[1, 150, 0]);
    }

    #[test]
    fn downmix_of_mono_is_identity() {
        let segment = Segment::new(vec![1, 2, 3], 1, 44_100);
        assert_eq!(segment.downmix_mono().samples(), &[1, 2, 3]);
    }

    #[test]
    fn resample_to_same_rate_keeps_samples() {
        let segment = Segment::new(vec![1, 2, 3, 4], 1, 16_000);
        let out = segment.resample(16_000).unwrap();
        assert_eq!(out.sample_rate(), 16_000);
        assert_eq!(out.samples(), &[1, 2, 3, 4]);
    }

    #[test]
    fn resample_halves_frame_count_when_halving_rate() {
        let segment = Segment::new(vec![0i16; 44_100], 1, 44_100);
        let out = segment.resample(22_050).unwrap();
        assert_eq!(out.sample_rate(), 22_050);
        assert_eq!(out.frames(), 22_050);
        assert_eq!(out.channels(), 1);
    }

    #[test]
    fn resample_preserves_channel_count() {
        let segment = Segment::new(vec![0i16; 16_000 * 2], 2, 16_000);
        let out = segment.resample(8_000).unwrap();
        assert_eq!(out.channels(), 2);
        assert_eq!(out.frames(), 8_000);
    }

    #[test]
    fn resample_of_empty_segment_only_swaps_rate() {
        let segment = Segment::new(Vec::new(), 1, 44_100);
        let out = segment.resample(16_000).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.sample_rate(), 16_000);
    }
}
