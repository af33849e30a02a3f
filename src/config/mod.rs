//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the theme, log level, and modal presentation defaults.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::modal::{Placement, ReplacePolicy, SizeHint};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/tracker-tui";

/// Presentation and replacement defaults for the modal host.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalSettings {
    pub replace_policy: ReplacePolicy,
    pub default_placement: Placement,
    pub default_size: SizeHint,
}

impl Default for ModalSettings {
    fn default() -> Self {
        ModalSettings {
            replace_policy: ReplacePolicy::Supersede,
            default_placement: Placement::Default,
            default_size: SizeHint::Medium,
        }
    }
}

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub theme_name: String,
    pub log_level: LevelFilter,
    pub modal: ModalSettings,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub modal: ModalSettings,
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance with default values and no file path.
    ///
    pub fn new() -> Config {
        Config {
            theme_name: default_theme_name(),
            log_level: LevelFilter::Info,
            modal: ModalSettings::default(),
            file_path: None,
        }
    }

    /// Return the default configuration bound to the file in the custom
    /// directory if provided. Nothing is read from disk.
    ///
    pub fn at(custom_path: Option<&str>) -> Result<Config, AppError> {
        Ok(Config {
            file_path: Some(Config::file_in(custom_path)?),
            ..Config::new()
        })
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. A missing file leaves the defaults in place.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let file_path = Config::file_in(custom_path)?;
        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::Read {
                path: file_path.clone(),
                source: e,
            })?;
            let data: FileSpec =
                serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
                    path: file_path.clone(),
                    message: e.to_string(),
                })?;
            self.log_level = LevelFilter::from_str(&data.log_level)
                .map_err(|_| ConfigError::InvalidLogLevel(data.log_level.clone()))?;
            self.theme_name = data.theme_name;
            self.modal = data.modal;
        }
        self.file_path = Some(file_path);

        Ok(())
    }

    /// Serialize the current configuration and write it to disk, creating
    /// the parent directory if needed.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::NotLoaded)?;
        let data = FileSpec {
            theme_name: self.theme_name.clone(),
            log_level: self.log_level.to_string().to_lowercase(),
            modal: self.modal,
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::Encode(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::Write {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::Write {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::Write {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn file_in(custom_path: Option<&str>) -> Result<PathBuf, AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };
        Ok(dir_path.join(Path::new(FILE_NAME)))
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
