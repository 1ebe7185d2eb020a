use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE_NAME: &str = "corkboard.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorkboardConfigToml {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    /// Holds the organizer page and, unless overridden, the persisted state.
    pub root: PathBuf,
    pub organizer_page: String,
    /// Relative paths are resolved against `root`.
    pub upload_dir: PathBuf,
    /// Relative paths are resolved against `root`.
    pub assignments_file: PathBuf,
    pub cors_permissive: bool,
    pub max_assignments_bytes: usize,
}

impl Default for CorkboardConfigToml {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            debug: false,
            root: PathBuf::from("."),
            organizer_page: "image-organizer.html".to_string(),
            upload_dir: PathBuf::from("images"),
            assignments_file: PathBuf::from("image-assignments.json"),
            cors_permissive: true,
            max_assignments_bytes: 64 * 1024 * 1024,
        }
    }
}

#[derive(Debug)]
pub enum ConfigFileError {
    IOError(std::io::Error),
    Toml(toml::de::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigFileError::IOError(e) => write!(f, "cannot read config file: {}", e),
            ConfigFileError::Toml(e) => write!(f, "invalid config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigFileError {}

impl CorkboardConfigToml {
    pub fn parse(s: &str) -> Result<Self, ConfigFileError> {
        toml::from_str(s).map_err(ConfigFileError::Toml)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let s = std::fs::read_to_string(path).map_err(ConfigFileError::IOError)?;
        Self::parse(&s)
    }

    /// Loads `path` if given, else `corkboard.toml` in the working directory
    /// if present, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigFileError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE_NAME);
                if path.exists() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn upload_dir_path(&self) -> PathBuf {
        self.root.join(&self.upload_dir)
    }

    pub fn assignments_file_path(&self) -> PathBuf {
        self.root.join(&self.assignments_file)
    }
}
