use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::audio::{AudioError, Segment};

use super::{ExportFormat, ExportJob};

/// Encode one job's segment to its destination path.
pub fn write_segment(job: &ExportJob) -> Result<(), AudioError> {
    match job.format {
        ExportFormat::Wav => write_wav(&job.segment, &job.destination),
    }
}

fn write_wav(segment: &Segment, path: &Path) -> Result<(), AudioError> {
    let encode_err = |source| AudioError::Encode {
        path: path.to_path_buf(),
        source,
    };
    let spec = WavSpec {
        channels: segment.channels(),
        sample_rate: segment.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).map_err(encode_err)?;
    for &sample in segment.samples() {
        writer.write_sample(sample).map_err(encode_err)?;
    }
    writer.finalize().map_err(encode_err)
}
