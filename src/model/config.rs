use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default: data file in the working directory
pub const DEFAULT_DATA_FILE: &str = "todos.csv";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Optional settings read from a TOML config file. Every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

/// Fully resolved runtime configuration.
///
/// Resolved once at startup; later changes to the environment are not
/// observed until the process restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Path of the CSV file backing the task list
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Layer explicit overrides over a file config over the defaults.
    /// `Some` in `overrides` always wins.
    pub fn resolve(file: FileConfig, overrides: FileConfig) -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            data_file: overrides
                .data_file
                .or(file.data_file)
                .unwrap_or(defaults.data_file),
            host: overrides.host.or(file.host).unwrap_or(defaults.host),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
        }
    }

    /// `host:port` for binding the listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
