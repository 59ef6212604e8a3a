//! Output stream on the default device (cpal).

use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};

use super::clip::CueClip;
use super::playback::PlaybackState;
use crate::error::AudioError;

/// Keeps the cpal stream alive. Dropping it stops output.
///
/// `cpal::Stream` is not `Send`; the owner must stay on the thread that
/// opened it.
pub struct OutputStream {
    _stream: cpal::Stream,
}

/// Open the default output device and start a stream that renders `clip`
/// through `state`. The stream runs continuously and writes silence while
/// the state is stopped.
pub fn open(clip: Arc<CueClip>, state: Arc<PlaybackState>) -> Result<OutputStream, AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(AudioError::NoDevice)?;

    let supported = device
        .default_output_config()
        .map_err(|e| AudioError::Stream(e.to_string()))?;
    let sample_format = supported.sample_format();
    let config = supported.config();

    let stream = match sample_format {
        cpal::SampleFormat::F32 => build::<f32>(&device, &config, clip, state),
        cpal::SampleFormat::I16 => build::<i16>(&device, &config, clip, state),
        cpal::SampleFormat::U16 => build::<u16>(&device, &config, clip, state),
        other => Err(AudioError::Stream(format!(
            "unsupported sample format: {other:?}"
        ))),
    }?;

    stream
        .play()
        .map_err(|e| AudioError::Stream(e.to_string()))?;
    Ok(OutputStream { _stream: stream })
}

fn build<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    clip: Arc<CueClip>,
    state: Arc<PlaybackState>,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels;
    let rate = config.sample_rate.0;
    let mut scratch: Vec<f32> = Vec::new();

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _info: &cpal::OutputCallbackInfo| {
                scratch.resize(data.len(), 0.0);
                state.render(&clip, &mut scratch, channels, rate);
                for (dst, src) in data.iter_mut().zip(scratch.iter()) {
                    *dst = T::from_sample(*src);
                }
            },
            |err| tracing::warn!(error = %err, "audio output stream error"),
            None,
        )
        .map_err(|e| AudioError::Stream(e.to_string()))
}
