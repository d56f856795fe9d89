use std::sync::Arc;

/// One in-flight playback of the click sample.
///
/// Only the audio callback touches a voice, so the cursor is plain state.
#[derive(Debug)]
pub struct Voice {
    audio: Arc<[f32]>,
    /// frame cursor into `audio`; starts negative to delay the first sample
    /// into the middle of a buffer
    idx: isize,
}

impl Voice {
    #[must_use]
    pub fn new(audio: Arc<[f32]>, delay_frames: usize) -> Self {
        Self {
            audio,
            idx: -(delay_frames as isize),
        }
    }

    /// Mix into an interleaved buffer of `channels` channels, advancing the
    /// cursor by one buffer's worth of frames.
    pub fn mix(&mut self, buf: &mut [f32], channels: usize) {
        for frame in buf.chunks_exact_mut(channels) {
            if let Ok(idx) = usize::try_from(self.idx) {
                if let Some(&sample) = self.audio.get(idx) {
                    for out in frame {
                        *out += sample;
                    }
                }
            }
            self.idx += 1;
        }
    }

    #[must_use]
    pub fn over(&self) -> bool {
        usize::try_from(self.idx).is_ok_and(|idx| idx >= self.audio.len())
    }
}
