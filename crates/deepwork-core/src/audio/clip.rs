use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::error::AudioError;

/// A decoded cue asset: interleaved `f32` samples in `[-1, 1]`.
#[derive(Debug, Clone)]
pub struct CueClip {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl CueClip {
    /// Decode a WAV file into memory.
    ///
    /// # Errors
    /// `AssetMissing` when the file does not exist, `Decode` when it is not a
    /// readable WAV or holds no audio.
    pub fn decode(path: &Path) -> Result<Self, AudioError> {
        if !path.exists() {
            return Err(AudioError::AssetMissing(path.to_path_buf()));
        }
        let decode_err = |message: String| AudioError::Decode {
            path: path.to_path_buf(),
            message,
        };

        let mut reader = WavReader::open(path).map_err(|e| decode_err(e.to_string()))?;
        let spec = reader.spec();
        let samples: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| decode_err(e.to_string()))?,
            SampleFormat::Int => {
                let scale = (1_i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()
                    .map_err(|e| decode_err(e.to_string()))?
            }
        };

        if samples.is_empty() || spec.channels == 0 || spec.sample_rate == 0 {
            return Err(decode_err("no audio frames".into()));
        }

        Ok(Self {
            samples,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
        })
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }
}

#[cfg(test)]
pub(crate) fn write_test_wav(path: &Path, samples: &[i16], channels: u16, sample_rate: u32) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for s in samples {
        writer.write_sample(*s).unwrap();
    }
    writer.finalize().unwrap();
}
