use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Words that flag a correlation-report note as a station problem.
pub const DEFAULT_PROBLEM_KEYWORDS: [&str; 11] = [
    "pcal",
    "phase",
    "bad",
    "lost",
    "clock",
    "error",
    " late ",
    "issue",
    "sensitivity",
    "minus",
    "removed",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_station")]
    pub default_station: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_api_timeout")]
    pub api_timeout_secs: u64,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_problem_keywords")]
    pub problem_keywords: Vec<String>,
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
    #[serde(default)]
    pub debug: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_station() -> String {
    "Nn".to_string()
}
fn default_api_url() -> String {
    "https://glovdh.ethz.ch/api/v1".to_string()
}
fn default_api_timeout() -> u64 {
    30
}
fn default_output_dir() -> String {
    ".".to_string()
}
fn default_problem_keywords() -> Vec<String> {
    DEFAULT_PROBLEM_KEYWORDS
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_wrap_width() -> usize {
    160
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_station: default_station(),
            api_url: default_api_url(),
            api_timeout_secs: default_api_timeout(),
            output_dir: default_output_dir(),
            problem_keywords: default_problem_keywords(),
            wrap_width: default_wrap_width(),
            debug: false,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or(home)
                .join("vlbisummary")
        } else {
            home.join(".vlbisummary")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("vlbisummary.conf")
    }

    /// Return the default path of the station database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("stations.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
        } else {
            Ok(Config::default())
        }
    }

    /// Write the default configuration file (and its directory).
    ///
    /// An existing file is left alone unless `force` is set.
    pub fn init_all(database: Option<String>, force: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let path = Self::config_file();
        if path.exists() && !force {
            return Err(AppError::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        let mut config = Config::default();
        if let Some(db) = database {
            config.database = db;
        }

        let yaml = serde_yaml::to_string(&config).map_err(|e| AppError::Config(e.to_string()))?;
        let mut file = fs::File::create(&path)?;
        file.write_all(yaml.as_bytes())?;

        Ok(path)
    }
}
