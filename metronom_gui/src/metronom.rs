use crate::config::Config;
use iced::{
    event::{self, Status},
    keyboard,
    widget::{button, center, column, slider, text, Text},
    Alignment::Center,
    Element, Event, Subscription, Theme,
};
use iced_fonts::{bootstrap, BOOTSTRAP_FONT};
use log::error;
use metronom_core::{build_output_stream, Stream, Tempo};
use std::sync::Arc;

#[derive(Clone, Copy, Debug)]
pub enum Message {
    BpmChanged(u16),
    ToggleMute,
}

pub struct Metronom {
    tempo: Arc<Tempo>,
    /// owns the audio callback; dropped with the app, which tears the tick
    /// loop down with it
    _stream: Option<Stream>,
    theme: Theme,
}

impl Default for Metronom {
    fn default() -> Self {
        let config = Config::read();
        let tempo = Arc::new(Tempo::new(config.bpm));

        // a missing or rejected audio device leaves the app usable, just
        // silent
        let stream = build_output_stream(tempo.clone(), config.output_device.as_deref())
            .inspect_err(|err| error!("audio unavailable: {err}"))
            .ok();

        Self {
            tempo,
            _stream: stream,
            theme: config.theme.into(),
        }
    }
}

impl Metronom {
    pub fn update(&mut self, message: Message) {
        match message {
            Message::BpmChanged(bpm) => self.tempo.set_bpm(bpm),
            Message::ToggleMute => {
                self.tempo.toggle_muted();
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let bpm = self.tempo.bpm();

        // the icon shows the action available, not the current state
        let icon = if self.tempo.muted() {
            bootstrap::Bootstrap::PlayFill
        } else {
            bootstrap::Bootstrap::PauseFill
        };

        let content = column![
            text(format!("{bpm} bpm")).size(32),
            slider(Tempo::MIN_BPM..=Tempo::MAX_BPM, bpm, Message::BpmChanged)
                .step(1u16)
                .width(300),
            button(
                Text::new(bootstrap::icon_to_string(icon))
                    .font(BOOTSTRAP_FONT)
                    .size(32)
            )
            .on_press(Message::ToggleMute),
        ]
        .spacing(20)
        .align_x(Center);

        center(content).into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|e, s, _| match s {
            Status::Ignored => match e {
                Event::Keyboard(keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(keyboard::key::Named::Space),
                    modifiers,
                    ..
                }) if modifiers.is_empty() => Some(Message::ToggleMute),
                _ => None,
            },
            Status::Captured => None,
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }
}
