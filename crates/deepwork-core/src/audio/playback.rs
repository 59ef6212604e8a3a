use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use super::clip::CueClip;

/// Playback position and controls shared with the output callback.
///
/// The callback runs on the audio thread, so everything here is atomic.
#[derive(Debug)]
pub struct PlaybackState {
    playing: AtomicBool,
    /// Output frames rendered since the last rewind.
    position: AtomicU64,
    /// `f32` bits of the linear gain.
    volume: AtomicU32,
}

impl PlaybackState {
    pub fn new(volume: f32) -> Self {
        Self {
            playing: AtomicBool::new(false),
            position: AtomicU64::new(0),
            volume: AtomicU32::new(volume.to_bits()),
        }
    }

    pub fn play(&self) {
        self.playing.store(true, Ordering::Release);
    }

    /// Stop and rewind to the first frame.
    pub fn stop(&self) {
        self.playing.store(false, Ordering::Release);
        self.position.store(0, Ordering::Release);
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    pub fn position(&self) -> u64 {
        self.position.load(Ordering::Acquire)
    }

    pub fn set_volume(&self, volume: f32) {
        self.volume.store(volume.to_bits(), Ordering::Release);
    }

    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume.load(Ordering::Acquire))
    }

    /// Fill `out` (interleaved, `out_channels` wide, at `out_rate` Hz) from
    /// `clip`, looping forever. Writes silence while stopped.
    ///
    /// Rate conversion is nearest-frame; channels wrap onto the clip's.
    pub fn render(&self, clip: &CueClip, out: &mut [f32], out_channels: u16, out_rate: u32) {
        let out_channels = out_channels.max(1) as usize;
        let clip_frames = clip.frames() as u64;
        if !self.is_playing() || clip_frames == 0 || out_rate == 0 {
            out.fill(0.0);
            return;
        }

        let gain = self.volume();
        let frames = (out.len() / out_channels) as u64;
        let start = self.position.fetch_add(frames, Ordering::AcqRel);
        let clip_channels = clip.channels.max(1) as usize;

        for (i, frame) in out.chunks_mut(out_channels).enumerate() {
            let out_pos = start + i as u64;
            let src = (out_pos * clip.sample_rate as u64 / out_rate as u64) % clip_frames;
            let base = src as usize * clip_channels;
            for (ch, sample) in frame.iter_mut().enumerate() {
                *sample = clip.samples[base + ch % clip_channels] * gain;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> CueClip {
        CueClip {
            samples: vec![0.1, 0.2, 0.3],
            channels: 1,
            sample_rate: 100,
        }
    }

    #[test]
    fn renders_silence_while_stopped() {
        let state = PlaybackState::new(1.0);
        let mut out = [9.0; 4];
        state.render(&clip(), &mut out, 1, 100);
        assert_eq!(out, [0.0; 4]);
        assert_eq!(state.position(), 0);
    }

    #[test]
    fn loops_over_the_clip() {
        let state = PlaybackState::new(1.0);
        state.play();
        let mut out = [0.0; 5];
        state.render(&clip(), &mut out, 1, 100);
        assert_eq!(out, [0.1, 0.2, 0.3, 0.1, 0.2]);
        assert_eq!(state.position(), 5);
    }

    #[test]
    fn stop_rewinds() {
        let state = PlaybackState::new(1.0);
        state.play();
        let mut out = [0.0; 2];
        state.render(&clip(), &mut out, 1, 100);
        state.stop();
        assert_eq!(state.position(), 0);
        state.play();
        state.render(&clip(), &mut out, 1, 100);
        assert_eq!(out, [0.1, 0.2]);
    }

    #[test]
    fn applies_gain_and_duplicates_mono_to_stereo() {
        let state = PlaybackState::new(0.5);
        state.play();
        let mut out = [0.0; 4];
        state.render(&clip(), &mut out, 2, 100);
        assert_eq!(out, [0.05, 0.05, 0.1, 0.1]);
    }

    #[test]
    fn higher_output_rate_repeats_frames() {
        let state = PlaybackState::new(1.0);
        state.play();
        let mut out = [0.0; 4];
        state.render(&clip(), &mut out, 1, 200);
        assert_eq!(out, [0.1, 0.1, 0.2, 0.2]);
    }
}
