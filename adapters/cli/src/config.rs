//! Optional TOML file overriding the player's capabilities.

use std::{fs, io, path::{Path, PathBuf}};

use box_pusher_system_level::PlayerSettings;
use serde::Deserialize;
use thiserror::Error;

/// Failures raised while loading a configuration file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("failed to parse config file {path}")]
    Parse {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying TOML failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Player overrides read from disk. Absent keys keep their defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) push_strength: Option<u32>,
    pub(crate) player_effort: Option<u32>,
}

impl Config {
    /// Reads and parses the file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Layers the configured values over `settings`.
    pub(crate) fn apply(self, settings: PlayerSettings) -> PlayerSettings {
        PlayerSettings {
            push_strength: self.push_strength.unwrap_or(settings.push_strength),
            player_effort: self.player_effort.unwrap_or(settings.player_effort),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = Config::parse("push_strength = 3\n").expect("valid toml");
        let settings = config.apply(PlayerSettings::default());
        assert_eq!(settings.push_strength, 3);
        assert_eq!(settings.player_effort, PlayerSettings::default().player_effort);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("strength = 3\n").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = Config::load(Path::new("definitely/not/here.toml")).expect_err("missing");
        assert!(error.to_string().contains("definitely/not/here.toml"));
    }
}
