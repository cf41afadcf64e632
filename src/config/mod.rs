//! Configuration management module.
//!
//! This module handles loading and saving the host configuration: where the
//! site lives, which page to start on, where the identity slot is persisted,
//! and presentation preferences.

mod error;
pub mod hotkeys;

pub use error::ConfigError;
pub use hotkeys::ModeHotkeys;

use crate::error::AppError;
use crate::nav::DEFAULT_SUITE_NAME;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const STORAGE_FILE_NAME: &str = "storage.json";
const DEFAULT_DIRECTORY_PATH: &str = ".config/fundmon-shell";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub site_dir: PathBuf,
    pub start_page: String,
    pub suite_name: String,
    pub storage_file: Option<PathBuf>,
    pub cell_width: u32,
    pub log_level: String,
    pub theme_name: String,
    pub hotkeys: ModeHotkeys,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_site_dir")]
    pub site_dir: PathBuf,
    #[serde(default = "default_start_page")]
    pub start_page: String,
    #[serde(default = "default_suite_name")]
    pub suite_name: String,
    #[serde(default)]
    pub storage_file: Option<PathBuf>,
    #[serde(default = "default_cell_width")]
    pub cell_width: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default)]
    pub hotkeys: ModeHotkeys,
}

fn default_site_dir() -> PathBuf {
    PathBuf::from("site")
}

fn default_start_page() -> String {
    "/index.html".to_string()
}

fn default_suite_name() -> String {
    DEFAULT_SUITE_NAME.to_string()
}

fn default_cell_width() -> u32 {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config {
            site_dir: default_site_dir(),
            start_page: default_start_page(),
            suite_name: default_suite_name(),
            storage_file: None,
            cell_width: default_cell_width(),
            log_level: default_log_level(),
            theme_name: default_theme_name(),
            hotkeys: ModeHotkeys::default(),
            file_path: None,
        }
    }

    /// Load an existing configuration from the disk using the custom path if
    /// provided. When no file exists yet one is written with the defaults.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if !file_path.exists() {
            return self.save();
        }

        let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
            path: file_path.clone(),
            message: format!("IO error: {}", e),
        })?;
        let data: FileSpec = serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        self.site_dir = data.site_dir;
        self.start_page = data.start_page;
        self.suite_name = data.suite_name;
        self.storage_file = data.storage_file;
        self.cell_width = data.cell_width.max(1);
        self.log_level = data.log_level;
        self.theme_name = data.theme_name;
        self.hotkeys = data.hotkeys;
        Ok(())
    }

    /// Serialize the configuration data and write it to the disk, creating
    /// the parent directory when needed.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            site_dir: self.site_dir.clone(),
            start_page: self.start_page.clone(),
            suite_name: self.suite_name.clone(),
            storage_file: self.storage_file.clone(),
            cell_width: self.cell_width,
            log_level: self.log_level.clone(),
            theme_name: self.theme_name.clone(),
            hotkeys: self.hotkeys.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Path of the configuration file, once loaded.
    ///
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Return the file holding persisted slots: the configured one, or a
    /// file next to the configuration.
    ///
    pub fn storage_path(&self) -> Result<PathBuf, AppError> {
        if let Some(path) = &self.storage_file {
            return Ok(path.clone());
        }
        let dir = match self.file_path.as_ref().and_then(|path| path.parent()) {
            Some(dir) => dir.to_path_buf(),
            None => Config::default_path()?,
        };
        Ok(dir.join(STORAGE_FILE_NAME))
    }

    /// Parse the configured log level.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::hotkeys::HotkeyAction;
    use crossterm::event::KeyCode;

    #[test]
    fn first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        let file_path = dir.path().join(FILE_NAME);
        assert!(file_path.exists());
        assert_eq!(config.file_path(), Some(file_path.as_path()));

        let mut reloaded = Config::new();
        reloaded.start_page = "/elsewhere.html".to_string();
        reloaded.load(dir.path().to_str()).unwrap();
        assert_eq!(reloaded.start_page, "/index.html");
        assert_eq!(reloaded.suite_name, DEFAULT_SUITE_NAME);
        assert_eq!(reloaded.hotkeys, ModeHotkeys::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(FILE_NAME),
            "suite_name: Fund Monitor (staging)\ncell_width: 0\nlog_level: debug\n",
        )
        .unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        assert_eq!(config.suite_name, "Fund Monitor (staging)");
        assert_eq!(config.cell_width, 1);
        assert_eq!(config.site_dir, PathBuf::from("site"));
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn custom_hotkeys_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        if let Some(hotkey) = config.hotkeys.page.get_mut(&HotkeyAction::Quit) {
            hotkey.code = KeyCode::Char('x');
        }
        config.save().unwrap();

        let mut reloaded = Config::new();
        reloaded.load(dir.path().to_str()).unwrap();
        assert_eq!(
            reloaded.hotkeys.page[&HotkeyAction::Quit].code,
            KeyCode::Char('x')
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "cell_width: [not, a, number]\n").unwrap();
        let mut config = Config::new();
        let result = config.load(dir.path().to_str());
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::DeserializationFailed(_)))
        ));
    }

    #[test]
    fn storage_sits_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        assert_eq!(config.storage_path().unwrap(), dir.path().join(STORAGE_FILE_NAME));

        config.storage_file = Some(PathBuf::from("/tmp/slots.json"));
        assert_eq!(config.storage_path().unwrap(), PathBuf::from("/tmp/slots.json"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let config = Config {
            log_level: "chatty".to_string(),
            ..Config::new()
        };
        assert!(matches!(
            config.level_filter(),
            Err(ConfigError::InvalidLogLevel(level)) if level == "chatty"
        ));
    }

    #[test]
    fn save_without_load_fails() {
        let result = Config::new().save();
        assert!(matches!(result, Err(AppError::Config(ConfigError::FilePathNotSet))));
    }
}
