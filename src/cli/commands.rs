use std::path::PathBuf;

use clap::Parser;

use crate::io::config_io::{self, ConfigError};
use crate::model::config::{AppConfig, FileConfig};

#[derive(Parser, Debug)]
#[command(name = "tasklist", about = concat!("tasklist v", env!("CARGO_PKG_VERSION"), " - a to-do list with one-step undo, kept in a CSV file"), version)]
pub struct Cli {
    /// TOML file with data_file / host / port defaults
    #[arg(short = 'c', long, env = "TODO_CONFIG")]
    pub config: Option<PathBuf>,

    /// CSV file holding the tasks [default: todos.csv]
    #[arg(short = 'f', long, env = "TODO_FILE")]
    pub data_file: Option<PathBuf>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(long, env = "TODO_HOST")]
    pub host: Option<String>,

    /// Port to listen on [default: 8000]
    #[arg(short = 'p', long, env = "TODO_PORT")]
    pub port: Option<u16>,
}

impl Cli {
    /// Resolve the runtime config: flags and environment first, then the
    /// config file if one was given, then built-in defaults.
    pub fn resolve(&self) -> Result<AppConfig, ConfigError> {
        let file = match &self.config {
            Some(path) => config_io::read_config(path)?,
            None => FileConfig::default(),
        };
        let overrides = FileConfig {
            data_file: self.data_file.clone(),
            host: self.host.clone(),
            port: self.port,
        };
        Ok(AppConfig::resolve(file, overrides))
    }
}
