//! Configuration at ~/.config/appointer/config.toml
//!
//! Every key is optional. Values can be overridden from the environment
//! with an `APPOINTER_` prefix, using `__` for nesting
//! (e.g. `APPOINTER_LISTEN__ANSWER_SECS=3`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CALENDAR_ID, DEFAULT_LOCATION, DEFAULT_PROVIDER};
use crate::error::{BookingError, BookingResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointerConfig {
    /// Provider binary suffix, e.g. "google" for appointer-provider-google
    pub provider: String,
    /// Account the provider authenticated (see `appointer auth`)
    pub account: Option<String>,
    pub calendar_id: String,
    pub location: String,
    /// Proposals made before escalating to a human
    pub max_rounds: u32,
    /// Refuse fallback slots that do not fit the requested window
    pub strict_slots: bool,
    pub listen: ListenConfig,
    pub voice: VoiceConfig,
}

/// Recording windows, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub request_secs: u64,
    pub answer_secs: u64,
    pub name_secs: u64,
}

/// External commands used by the voice channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Called with the text to say as its last argument
    pub speak_command: Option<String>,
    /// Called with the recording length in seconds; prints the transcription
    pub listen_command: Option<String>,
}

impl Default for AppointerConfig {
    fn default() -> Self {
        AppointerConfig {
            provider: DEFAULT_PROVIDER.to_string(),
            account: None,
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            max_rounds: 1,
            strict_slots: false,
            listen: ListenConfig::default(),
            voice: VoiceConfig::default(),
        }
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        ListenConfig {
            request_secs: 5,
            answer_secs: 2,
            name_secs: 2,
        }
    }
}

impl AppointerConfig {
    pub fn config_path() -> BookingResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BookingError::Config("Could not determine config directory".into()))?
            .join("appointer");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, writing a commented default file on first run.
    pub fn load() -> BookingResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> BookingResult<Self> {
        let path = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());

        let config: AppointerConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("APPOINTER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| BookingError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| BookingError::Config(e.to_string()))?;

        if config.max_rounds == 0 {
            return Err(BookingError::Config(
                "max_rounds must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    /// The configured account, or an error telling the user how to get one.
    pub fn require_account(&self) -> BookingResult<&str> {
        self.account.as_deref().ok_or_else(|| {
            BookingError::Config(format!(
                "No account configured.\n\n\
                Authenticate first with:\n  \
                appointer auth {}\n\
                then set `account` in {}",
                self.provider,
                Self::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "config.toml".to_string())
            ))
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> BookingResult<()> {
        let contents = format!(
            "\
# appointer configuration

# Calendar provider and the account it authenticated:
# provider = \"{DEFAULT_PROVIDER}\"
# account = \"you@example.com\"
# calendar_id = \"{DEFAULT_CALENDAR_ID}\"

# Where appointments take place:
# location = \"{DEFAULT_LOCATION}\"

# Proposals made before handing over to a human:
# max_rounds = 1

# Refuse slots that would run past the requested window:
# strict_slots = false

# [listen]
# request_secs = 5
# answer_secs = 2
# name_secs = 2

# [voice]
# speak_command = \"espeak\"
# listen_command = \"transcribe-mic\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BookingError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| BookingError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppointerConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, AppointerConfig::default());
        assert_eq!(config.max_rounds, 1);
        assert_eq!(config.listen.request_secs, 5);
    }

    #[test]
    fn default_file_is_all_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        AppointerConfig::create_default_config(&path).unwrap();
        let config = AppointerConfig::load_from(&path).unwrap();

        assert_eq!(config, AppointerConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "account = \"clinic@example.com\"\n\
             max_rounds = 3\n\
             [listen]\n\
             answer_secs = 4\n",
        )
        .unwrap();

        let config = AppointerConfig::load_from(&path).unwrap();

        assert_eq!(config.account.as_deref(), Some("clinic@example.com"));
        assert_eq!(config.max_rounds, 3);
        assert_eq!(config.listen.answer_secs, 4);
        assert_eq!(config.listen.name_secs, 2);
        assert_eq!(config.calendar_id, "primary");
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_rounds = 0\n").unwrap();

        assert!(matches!(
            AppointerConfig::load_from(&path),
            Err(BookingError::Config(_))
        ));
    }

    #[test]
    fn missing_account_names_the_auth_command() {
        let err = AppointerConfig::default().require_account().unwrap_err();
        assert!(err.to_string().contains("appointer auth google"));
    }
}
