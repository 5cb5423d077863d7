//! Reading and initialising `~/.resmap/config.ini`.

use std::io;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::settings::ConfigFile;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: ini::Error },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// Whether [`ConfigFile::init`] wrote a new file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyPresent,
}

impl ConfigFile {
    /// Load `~/.resmap/config.ini`, or defaults when it is absent.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load a config file, or defaults when `path` does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        super::parser::parse_ini(&ini)
    }

    /// Write this configuration as a commented file, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        let write_err = |source| ConfigFileError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, super::writer::to_config_string(self)).map_err(write_err)
    }

    /// Write a default config to `path` unless one is already there.
    ///
    /// An existing file is left untouched, even if it fails validation.
    pub fn init(path: &Path) -> Result<InitOutcome, ConfigFileError> {
        if path.exists() {
            return Ok(InitOutcome::AlreadyPresent);
        }
        Self::default().write_to(path)?;
        Ok(InitOutcome::Created)
    }
}

/// Path to the config directory (~/.resmap).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".resmap")
}

/// Path to the config file (~/.resmap/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
