use std::sync::atomic::{
    AtomicBool, AtomicU16,
    Ordering::{AcqRel, Acquire, Release},
};

/// Delay between consecutive ticks at `bpm`, in milliseconds.
#[must_use]
pub fn ms_per_tick(bpm: u16) -> u32 {
    (60_000.0 / f64::from(bpm)).round() as u32
}

/// Shared state of one metronome instance.
///
/// Written by the gui thread, read by the audio callback at fire time.
#[derive(Debug)]
pub struct Tempo {
    /// rate of the tick loop, in beats per minute, in the `40..=256` range
    bpm: AtomicU16,
    /// whether the tick loop is currently silenced
    muted: AtomicBool,
}

impl Default for Tempo {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BPM)
    }
}

impl Tempo {
    pub const MIN_BPM: u16 = 40;
    pub const MAX_BPM: u16 = 256;
    pub const DEFAULT_BPM: u16 = 100;

    /// Create a new instance, muted, at `bpm` clamped to the valid range.
    #[must_use]
    pub fn new(bpm: u16) -> Self {
        Self {
            bpm: AtomicU16::new(bpm.clamp(Self::MIN_BPM, Self::MAX_BPM)),
            muted: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn bpm(&self) -> u16 {
        self.bpm.load(Acquire)
    }

    pub fn set_bpm(&self, bpm: u16) {
        self.bpm
            .store(bpm.clamp(Self::MIN_BPM, Self::MAX_BPM), Release);
    }

    #[must_use]
    pub fn muted(&self) -> bool {
        self.muted.load(Acquire)
    }

    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Release);
    }

    /// Flip the muted flag, returning the new value.
    pub fn toggle_muted(&self) -> bool {
        !self.muted.fetch_not(AcqRel)
    }
}
