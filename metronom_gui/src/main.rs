use iced::{application, Result};
use metronom::Metronom;

mod config;
mod metronom;

fn main() -> Result {
    env_logger::init();

    application("Metronom", Metronom::update, Metronom::view)
        .subscription(Metronom::subscription)
        .theme(Metronom::theme)
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .antialiasing(true)
        .run()
}
