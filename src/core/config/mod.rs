//! core::config
//!
//! Settings schema and loading.
//!
//! # Sources
//!
//! Settings are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. The TOML file named by `$TYPESHAPE_CONFIG`, if set
//! 3. `$TYPESHAPE_SEED`, if set
//!
//! # Lifecycle
//!
//! The process-wide settings are resolved once, on first use. A host that
//! wants explicit settings calls [`install`] before anything samples or
//! verifies. Load failures at first use fall back to defaults with a warning.
//!
//! # Example
//!
//! ```
//! use typeshape::core::config::Settings;
//!
//! let settings = Settings::from_toml_str("seed = 3\n[forall]\nattempts = 64\n").unwrap();
//! assert_eq!(settings.seed, Some(3));
//! assert_eq!(settings.forall.attempts, 64);
//! ```

pub mod schema;

pub use schema::{ForallSettings, Settings, VerificationSettings};

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use thiserror::Error;

/// Environment variable naming a settings file.
pub const CONFIG_ENV: &str = "TYPESHAPE_CONFIG";

/// Environment variable overriding the sampling seed.
pub const SEED_ENV: &str = "TYPESHAPE_SEED";

static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Errors from settings operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid settings value: {0}")]
    InvalidValue(String),

    #[error("settings already resolved; install must run before first use")]
    AlreadyInstalled,
}

impl Settings {
    /// Resolve settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the named file cannot be read or parsed, or if a
    /// value is invalid. A missing `$TYPESHAPE_CONFIG` is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let seed = std::env::var(SEED_ENV).ok();
        Self::load_from(path.as_deref(), seed.as_deref())
    }

    /// Resolve settings from an optional file and an optional seed override.
    pub fn load_from(path: Option<&Path>, seed: Option<&str>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::read(path)?,
            None => Settings::default(),
        };

        if let Some(raw) = seed {
            let seed = raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue(format!("invalid {} '{}': {}", SEED_ENV, raw, e))
            })?;
            settings.seed = Some(seed);
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a settings file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Install process-wide settings.
///
/// # Errors
///
/// Returns `ConfigError::AlreadyInstalled` if settings were already resolved,
/// or `ConfigError::InvalidValue` if `settings` fail validation.
pub fn install(settings: Settings) -> Result<(), ConfigError> {
    settings.validate()?;
    SETTINGS
        .set(settings)
        .map_err(|_| ConfigError::AlreadyInstalled)
}

/// The process-wide settings, resolving them on first call.
pub fn current() -> &'static Settings {
    SETTINGS.get_or_init(|| match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(error = %err, "falling back to default settings");
            Settings::default()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_without_sources_gives_defaults() {
        let settings = Settings::load_from(None, None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn seed_override_applies() {
        let settings = Settings::load_from(None, Some(" 1234 ")).unwrap();
        assert_eq!(settings.seed, Some(1234));
    }

    #[test]
    fn bad_seed_rejected() {
        let err = Settings::load_from(None, Some("abc")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 5\n[verification]\nstatic_iterations = 64").unwrap();

        let settings = Settings::load_from(Some(file.path()), None).unwrap();
        assert_eq!(settings.seed, Some(5));
        assert_eq!(settings.verification.static_iterations, 64);
        assert_eq!(settings.verification.dynamic_iterations, 1);
    }

    #[test]
    fn seed_env_overrides_file_seed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 5").unwrap();

        let settings = Settings::load_from(Some(file.path()), Some("6")).unwrap();
        assert_eq!(settings.seed, Some(6));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(Some(&dir.path().join("nope.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = [").unwrap();
        let err = Settings::load_from(Some(file.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn invalid_inline_settings_rejected() {
        let err = Settings::from_toml_str("[forall]\nattempts = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }
}
