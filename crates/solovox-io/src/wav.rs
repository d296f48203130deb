//! Offline WAV export.

use crate::Result;
use hound::WavWriter;
use std::path::Path;

/// Write mono f32 samples to a 16-bit PCM WAV file.
///
/// Samples are expected in `[-1, 1]`; values outside are clamped by the
/// integer conversion.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    let max_val = (1i32 << 15) as f32;
    for &sample in samples {
        let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i16;
        writer.write_sample(int_sample)?;
    }
    writer.finalize()?;
    Ok(())
}
