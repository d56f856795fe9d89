use iced::Theme;
use log::warn;
use metronom_core::Tempo;
use serde::Deserialize;
use std::{fs::read_to_string, path::PathBuf, sync::LazyLock};

pub static CONFIG_PATH: LazyLock<PathBuf> =
    LazyLock::new(|| dirs::config_dir().unwrap().join("metronom.toml"));

/// Optional startup configuration, seeding the initial state.
///
/// Nothing is ever written back; the metronome itself is stateless across
/// runs.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bpm: u16,
    pub output_device: Option<String>,
    pub theme: ThemePreference,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bpm: Tempo::DEFAULT_BPM,
            output_device: None,
            theme: ThemePreference::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

impl From<ThemePreference> for Theme {
    fn from(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Dark => Self::Dark,
            ThemePreference::Light => Self::Light,
        }
    }
}

impl Config {
    #[must_use]
    pub fn read() -> Self {
        Self::parse(&read_to_string(&*CONFIG_PATH).unwrap_or_default())
    }

    fn parse(raw: &str) -> Self {
        let mut config = toml::from_str::<Self>(raw).unwrap_or_else(|err| {
            warn!("ignoring malformed {}: {err}", CONFIG_PATH.display());
            Self::default()
        });

        config.bpm = config.bpm.clamp(Tempo::MIN_BPM, Tempo::MAX_BPM);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_yields_defaults() {
        let config = Config::parse("");
        assert_eq!(config.bpm, 100);
        assert_eq!(config.output_device, None);
        assert!(matches!(config.theme, ThemePreference::Dark));
    }

    #[test]
    fn fields_are_optional() {
        let config = Config::parse("bpm = 180\ntheme = \"light\"\n");
        assert_eq!(config.bpm, 180);
        assert_eq!(config.output_device, None);
        assert!(matches!(config.theme, ThemePreference::Light));
    }

    #[test]
    fn out_of_range_bpm_is_clamped() {
        assert_eq!(Config::parse("bpm = 1").bpm, 40);
        assert_eq!(Config::parse("bpm = 9000").bpm, 256);
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let config = Config::parse("bpm = \"fast\"");
        assert_eq!(config.bpm, 100);
    }
}
