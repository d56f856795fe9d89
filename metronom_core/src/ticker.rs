use crate::{
    click::render_click,
    tempo::{ms_per_tick, Tempo},
    voice::Voice,
};
use log::trace;
use std::sync::Arc;

/// Drives the tick loop from inside the audio callback.
///
/// The gui only ever flips the shared [`Tempo`] flags; all scheduling state
/// lives here, owned by the callback. A pending tick exists exactly while
/// the loop is unmuted, and there is never more than one.
///
/// Muting never cancels the pending tick directly. The tick is dropped at
/// its own fire-time check instead, so a tick armed before muting can never
/// produce audio.
#[derive(Debug)]
pub struct Ticker {
    tempo: Arc<Tempo>,
    sample_rate: u32,
    click: Arc<[f32]>,
    /// absolute frame index of the pending tick, if the loop is armed
    next_tick: Option<u64>,
    /// absolute frame index of the start of the next buffer
    now: u64,
    voices: Vec<Voice>,
}

impl Ticker {
    #[must_use]
    pub fn new(tempo: Arc<Tempo>, sample_rate: u32) -> Self {
        Self {
            tempo,
            sample_rate,
            click: render_click(sample_rate),
            next_tick: None,
            now: 0,
            voices: Vec::new(),
        }
    }

    /// The current inter-tick delay in frames, re-read from the shared bpm
    /// so a rate change applies from the next tick boundary.
    fn interval(&self) -> u64 {
        let ms = u64::from(ms_per_tick(self.tempo.bpm()));
        (ms * u64::from(self.sample_rate) + 500) / 1000
    }

    /// Mix the ticks due within the next `buf.len() / channels` frames into
    /// `buf`, which is interleaved and already holds whatever should play
    /// underneath.
    pub fn process(&mut self, buf: &mut [f32], channels: usize) {
        let frames = (buf.len() / channels) as u64;

        if self.tempo.muted() {
            if self.next_tick.take().is_some() {
                trace!("dropped pending tick after mute");
            }
        } else if self.next_tick.is_none() {
            let due = self.now + self.interval();
            self.next_tick = Some(due);
            trace!("armed, first tick due at frame {due}");
        }

        while let Some(due) = self.next_tick {
            if due >= self.now + frames {
                break;
            }

            // fire-time guard: the gui may have muted since this buffer began
            if self.tempo.muted() {
                self.next_tick = None;
                break;
            }

            trace!("tick at frame {due}");
            self.voices
                .push(Voice::new(self.click.clone(), (due - self.now) as usize));
            self.next_tick = Some(due + self.interval());
        }

        for voice in &mut self.voices {
            voice.mix(buf, channels);
        }
        self.voices.retain(|voice| !voice.over());

        self.now += frames;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // a sample rate of 1000 makes one frame one millisecond, so tick
    // deadlines in frames equal the delays from `ms_per_tick`
    const SAMPLE_RATE: u32 = 1000;

    fn ticker() -> (Arc<Tempo>, Ticker) {
        let tempo = Arc::new(Tempo::default());
        let ticker = Ticker::new(tempo.clone(), SAMPLE_RATE);
        (tempo, ticker)
    }

    /// Run the ticker over `frames` mono frames in small buffers, returning
    /// the concatenated output.
    fn run(ticker: &mut Ticker, frames: usize) -> Vec<f32> {
        let mut out = Vec::with_capacity(frames);
        let mut remaining = frames;
        while remaining > 0 {
            let mut buf = [0.0; 50];
            let len = remaining.min(buf.len());
            ticker.process(&mut buf[..len], 1);
            out.extend_from_slice(&buf[..len]);
            remaining -= len;
        }
        out
    }

    fn assert_silent(out: &[f32]) {
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn silent_by_default() {
        let (_tempo, mut ticker) = ticker();
        assert_silent(&run(&mut ticker, 3000));
        assert_eq!(ticker.next_tick, None);
    }

    #[test]
    fn first_tick_fires_one_interval_after_unmute() {
        let (tempo, mut ticker) = ticker();
        tempo.set_muted(false);

        // default 100 bpm: one tick every 600 frames, none before that
        let out = run(&mut ticker, 601);
        assert_silent(&out[..600]);
        assert_ne!(out[600], 0.0);
        assert_eq!(ticker.next_tick, Some(1200));
    }

    #[test]
    fn loop_reschedules_itself() {
        let (tempo, mut ticker) = ticker();
        tempo.set_muted(false);

        let out = run(&mut ticker, 1300);
        assert_ne!(out[600], 0.0);
        // the click is 100 frames long; between its end and the second
        // tick the loop is silent
        assert_silent(&out[700..1200]);
        assert_ne!(out[1200], 0.0);
    }

    #[test]
    fn mute_suppresses_the_pending_tick() {
        let (tempo, mut ticker) = ticker();
        tempo.set_muted(false);
        assert_silent(&run(&mut ticker, 100));

        tempo.set_muted(true);
        assert_silent(&run(&mut ticker, 3000));
        assert_eq!(ticker.next_tick, None);
    }

    #[test]
    fn quick_double_toggle_stays_silent() {
        let (tempo, mut ticker) = ticker();
        tempo.set_muted(false);
        tempo.set_muted(true);

        assert_silent(&run(&mut ticker, 3000));
        assert_eq!(ticker.next_tick, None);
    }

    #[test]
    fn unmute_after_mute_rearms_a_full_interval_out() {
        let (tempo, mut ticker) = ticker();
        tempo.set_muted(false);
        assert_silent(&run(&mut ticker, 100));
        tempo.set_muted(true);
        assert_silent(&run(&mut ticker, 100));

        tempo.set_muted(false);
        let out = run(&mut ticker, 601);
        assert_silent(&out[..600]);
        assert_ne!(out[600], 0.0);
    }

    #[test]
    fn rate_change_applies_from_the_next_tick() {
        let (tempo, mut ticker) = ticker();
        tempo.set_muted(false);
        assert_silent(&run(&mut ticker, 500));

        // doubling the rate mid-cycle leaves the pending deadline at frame
        // 600; only the delay after it shrinks to 300
        tempo.set_bpm(200);
        let out = run(&mut ticker, 500);
        assert_silent(&out[..100]);
        assert_ne!(out[100], 0.0);
        assert_silent(&out[200..400]);
        assert_ne!(out[400], 0.0);
        assert_eq!(ticker.next_tick, Some(1200));
    }

    #[test]
    fn mid_buffer_ticks_land_on_the_right_frame() {
        let (tempo, mut ticker) = ticker();
        tempo.set_muted(false);

        // one big stereo buffer spanning the deadline
        let mut buf = vec![0.0; 1300 * 2];
        ticker.process(&mut buf, 2);

        assert!(buf[..600 * 2].iter().all(|&s| s == 0.0));
        assert_ne!(buf[600 * 2], 0.0);
        assert_eq!(buf[600 * 2], buf[600 * 2 + 1]);
    }
}
