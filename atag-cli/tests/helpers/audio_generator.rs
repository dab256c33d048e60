//! Short WAV fixtures written with hound
//!
//! A quarter second of 440Hz stereo tone is enough for lofty to treat the
//! file like any other taggable track.

use std::path::{Path, PathBuf};

const SAMPLE_RATE: u32 = 44_100;
const TONE_SAMPLES: usize = SAMPLE_RATE as usize / 4;

/// Write a tone WAV at `path`
pub fn write_tone_wav(path: &Path) -> anyhow::Result<PathBuf> {
    let wav_spec = hound::WavSpec {
        channels: 2,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut wav = hound::WavWriter::create(path, wav_spec)?;
    let step = 2.0 * std::f32::consts::PI * 440.0 / SAMPLE_RATE as f32;
    for n in 0..TONE_SAMPLES {
        let value = ((n as f32 * step).sin() * 0.3 * i16::MAX as f32) as i16;
        wav.write_sample(value)?;
        wav.write_sample(value)?;
    }
    wav.finalize()?;
    Ok(path.to_path_buf())
}

/// Write one tone WAV per name inside `dir`
pub fn write_tone_library(dir: &Path, names: &[&str]) -> anyhow::Result<Vec<PathBuf>> {
    names
        .iter()
        .map(|name| write_tone_wav(&dir.join(name)))
        .collect()
}
