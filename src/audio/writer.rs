//! Stereo WAV dump of the binaural stimulus (what the simulated listener
//! heard from the true location).

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::hrtf::set::Binaural;

pub fn write_binaural_wav(path: &Path, sample_rate: u32, signal: &Binaural) -> hound::Result<()> {
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;

    // HRTF-filtered noise can exceed full scale; normalize the pair jointly
    // so interaural level differences survive.
    let peak = signal
        .left
        .iter()
        .chain(signal.right.iter())
        .fold(0.0f32, |m, &v| m.max(v.abs()));
    let norm = if peak > 1.0 { 0.99 / peak } else { 1.0 };

    for (&l, &r) in signal.left.iter().zip(signal.right.iter()) {
        for s in [l, r] {
            let v = ((s * norm).clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(v)?;
        }
    }
    writer.finalize()
}
