use std::path::Path;

use hound::{WavSpec, WavWriter};

use crate::stats::to_unit;

/// Write interleaved decimator output as a 32-bit float WAV file.
///
/// Samples are normalized so that a full-scale decimator output maps to 1.0.
pub fn save_wav<P: AsRef<Path>>(
    filename: P,
    samples: &[i32],
    channels: u16,
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(filename, spec)?;

    for &sample in samples {
        writer.write_sample(to_unit(sample))?;
    }

    writer.finalize()?;
    Ok(())
}
