use cpal::{
    traits::{DeviceTrait as _, HostTrait as _, StreamTrait as _},
    StreamConfig,
};
use log::{error, info};
use std::sync::Arc;

mod click;
mod tempo;
mod ticker;
mod voice;

pub use cpal::Stream;
pub use tempo::{ms_per_tick, Tempo};
pub use ticker::Ticker;

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("no output device available")]
    NoOutputDevice,
    #[error("failed to enumerate output devices: {0}")]
    Devices(#[from] cpal::DevicesError),
    #[error("failed to query the output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build the output stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("failed to start the output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
}

/// Build and start an output stream that plays the tick loop for `tempo`.
///
/// The returned [`Stream`] owns the audio callback: dropping it stops the
/// callback and with it the loop, so no tick can outlive its owner.
pub fn build_output_stream(
    tempo: Arc<Tempo>,
    device_name: Option<&str>,
) -> Result<Stream, StreamError> {
    let host = cpal::default_host();

    let device = match device_name {
        Some(name) => host
            .output_devices()?
            .find(|device| device.name().is_ok_and(|n| n == name)),
        None => None,
    };
    let device = device
        .or_else(|| host.default_output_device())
        .ok_or(StreamError::NoOutputDevice)?;

    let config: StreamConfig = device.default_output_config()?.into();
    let channels = usize::from(config.channels);
    let mut ticker = Ticker::new(tempo, config.sample_rate.0);

    info!("starting output stream with config {config:#?}");

    let stream = device.build_output_stream(
        &config,
        move |buf: &mut [f32], _| {
            buf.fill(0.0);
            ticker.process(buf, channels);
        },
        // playback failures are tolerated silently, the next callback
        // carries on as usual
        |err| error!("output stream error: {err}"),
        None,
    )?;
    stream.play()?;

    Ok(stream)
}
