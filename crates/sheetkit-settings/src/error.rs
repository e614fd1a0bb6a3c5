//! Settings errors.
//!
//! File problems carry the offending path; validation problems carry the
//! dotted key of the rejected field.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write settings file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    /// The platform reports no per-user configuration directory
    #[error("no configuration directory on this platform")]
    NoConfigDir,

    #[error("cannot create settings directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("malformed JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed TOML settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("settings not representable as TOML: {0}")]
    TomlEmit(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Rejected settings content
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Extension other than `.json` or `.toml`
    #[error("settings format '{0}' is not supported (use .json or .toml)")]
    UnsupportedFormat(String),

    #[error("{key} = {value} is outside the accepted range")]
    ValueOutOfRange { key: String, value: String },
}

impl ConfigError {
    pub(crate) fn out_of_range(key: &str, value: impl ToString) -> Self {
        Self::ValueOutOfRange {
            key: key.to_owned(),
            value: value.to_string(),
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_path_and_key() {
        let err = SettingsError::Read {
            path: PathBuf::from("/tmp/sheet.toml"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "cannot read settings file /tmp/sheet.toml: gone");

        let err = ConfigError::out_of_range("snap.radius_mm", -1.0);
        assert_eq!(err.to_string(), "snap.radius_mm = -1 is outside the accepted range");
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: SettingsError = ConfigError::UnsupportedFormat("ini".into()).into();
        assert!(matches!(err, SettingsError::Config(ConfigError::UnsupportedFormat(_))));
        assert_eq!(
            err.to_string(),
            "settings format 'ini' is not supported (use .json or .toml)"
        );
    }
}
