//! Logging configuration and initialization.

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Deserialize;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn default_level() -> String {
    "info".into()
}

fn default_format() -> String {
    "pretty".into()
}

const fn default_true() -> bool {
    true
}

fn default_directory() -> PathBuf {
    PathBuf::from("logs")
}

fn default_file_name() -> String {
    "lotwatch.log".into()
}

/// Logging configuration.
///
/// Console output is always on. File output appends plain text to
/// `<directory>/<file_name>`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_level")]
    pub level: String,
    /// `pretty` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub file: bool,
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// A log directory that cannot be created disables file output only.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let console = match self.format.as_str() {
            "json" => fmt::layer().json().boxed(),
            _ => fmt::layer().boxed(),
        };

        let file = self.open_log_file().map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .boxed()
        });

        if let Err(e) = tracing_subscriber::registry()
            .with(console)
            .with(file)
            .with(filter)
            .try_init()
        {
            eprintln!("logging already initialized: {e}");
        }
    }

    fn open_log_file(&self) -> Option<File> {
        if !self.file {
            return None;
        }
        if let Err(e) = fs::create_dir_all(&self.directory) {
            eprintln!(
                "failed to create log directory {}: {e}",
                self.directory.display()
            );
            return None;
        }

        let path = self.directory.join(&self.file_name);
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("failed to open log file {}: {e}", path.display());
                None
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            file: default_true(),
            directory: default_directory(),
            file_name: default_file_name(),
        }
    }
}
