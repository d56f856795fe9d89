use std::{f32::consts::TAU, sync::Arc};

/// frequency of the tick tone
const FREQ: f32 = 2_500.0;
/// time for the tone to decay down to `MIN_ENVELOPE`
const DECAY_MS: f32 = 100.0;
/// length of the noise transient layered on top of the tone
const TRANSIENT_MS: f32 = 15.0;
const MIN_ENVELOPE: f32 = 0.001;

/// Render the tick sound at `sample_rate` as one mono buffer.
///
/// A short sine burst with an exponentially decaying envelope, plus a noise
/// transient for attack. Rendered once per stream, the result is shared with
/// every playback.
#[must_use]
pub fn render_click(sample_rate: u32) -> Arc<[f32]> {
    let sample_rate = sample_rate as f32;
    let len = (sample_rate * DECAY_MS / 1000.0) as usize;

    let decay_rate = MIN_ENVELOPE.powf(1.0 / (sample_rate * DECAY_MS / 1000.0));
    let transient_rate = MIN_ENVELOPE.powf(1.0 / (sample_rate * TRANSIENT_MS / 1000.0));
    let phase_inc = FREQ * TAU / sample_rate;

    let mut envelope = 1.0;
    let mut transient = 1.0;
    let mut noise_seed = 12345_u32;

    (0..len)
        .map(|i| {
            noise_seed = noise_seed.wrapping_mul(1103515245).wrapping_add(12345) & 0x7FFF_FFFF;
            let noise = (noise_seed as f32 / 2147483648.0) - 1.0;

            let sample = (i as f32 * phase_inc).sin() * 0.5 * envelope
                + noise * 0.25 * transient;

            envelope *= decay_rate;
            transient *= transient_rate;

            sample
        })
        .collect()
}
