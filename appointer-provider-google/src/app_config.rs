//! Where the Google provider keeps its files, and the OAuth client it logs
//! in with.
//!
//! ```text
//! ~/.config/appointer/providers/google/
//!   app_config.toml           OAuth client id and secret
//!   session/<account>.toml    tokens per authenticated account
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root of the provider's files.
#[derive(Debug, Clone)]
pub struct ProviderPaths {
    root: PathBuf,
}

impl ProviderPaths {
    pub fn new(root: PathBuf) -> Self {
        ProviderPaths { root }
    }

    pub fn user() -> Result<Self> {
        let config_dir = dirs::config_dir().context("No config directory on this platform")?;
        Ok(ProviderPaths::new(
            config_dir.join("appointer").join("providers").join("google"),
        ))
    }

    pub fn app_config(&self) -> PathBuf {
        self.root.join("app_config.toml")
    }

    /// Session file for an account; path separators in the address are replaced.
    pub fn session(&self, account_email: &str) -> PathBuf {
        let file_stem = account_email.replace(['/', '\\', ':'], "_");
        self.root.join("session").join(format!("{file_stem}.toml"))
    }
}

/// The OAuth client appointer uses to act on the clinic's calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&ProviderPaths::user()?.app_config())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "appointer's Google provider has no OAuth client configured.\n\n\
                Create a Desktop OAuth client with the Calendar API enabled and save it as\n\
                {}:\n\n\
                client_id = \"...apps.googleusercontent.com\"\n\
                client_secret = \"...\"\n\n\
                Then run `appointer auth google`.",
                path.display()
            );
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let app_config: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("{} is not a valid OAuth client config", path.display()))?;

        if app_config.client_id.trim().is_empty() || app_config.client_secret.trim().is_empty() {
            anyhow::bail!(
                "{} needs both client_id and client_secret set",
                path.display()
            );
        }

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_files_live_under_the_root() {
        let paths = ProviderPaths::new(PathBuf::from("/cfg/google"));

        assert_eq!(paths.app_config(), PathBuf::from("/cfg/google/app_config.toml"));
        assert_eq!(
            paths.session("front-desk@clinic.example"),
            PathBuf::from("/cfg/google/session/front-desk@clinic.example.toml")
        );
        assert_eq!(
            paths.session("a/b:c"),
            PathBuf::from("/cfg/google/session/a_b_c.toml")
        );
    }

    #[test]
    fn loads_client_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_config.toml");
        std::fs::write(
            &path,
            "client_id = \"id.apps.googleusercontent.com\"\nclient_secret = \"s3cret\"\n",
        )
        .unwrap();

        let app_config = AppConfig::load_from(&path).unwrap();

        assert_eq!(app_config.client_id, "id.apps.googleusercontent.com");
        assert_eq!(app_config.client_secret, "s3cret");
    }

    #[test]
    fn missing_file_points_to_auth_command() {
        let dir = tempfile::tempdir().unwrap();

        let err = AppConfig::load_from(&dir.path().join("app_config.toml")).unwrap_err();

        assert!(err.to_string().contains("appointer auth google"));
    }

    #[test]
    fn blank_secret_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_config.toml");
        std::fs::write(&path, "client_id = \"id\"\nclient_secret = \" \"\n").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
