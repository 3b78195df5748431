//! Configuration management for Librarion
//!
//! Configuration is layered the usual way: an optional TOML file merged
//! with `LIBRARION_`-prefixed environment variables. Every field has a
//! default so a bare `librarion start` works against `./artifacts`.

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LibrarionError, Result};

/// File name of the book metadata artifact inside `artifact_dir`.
pub const BOOKS_FILE: &str = "books.json";

/// File name of the similarity matrix artifact inside `artifact_dir`.
pub const SIMILARITY_FILE: &str = "similarity.json";

/// File name of the top-50 popularity artifact inside `artifact_dir`.
pub const POPULAR_FILE: &str = "top_books.json";

/// Configuration structure for the Librarion server
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Address the HTTP server binds to
    #[serde(default = "default_address")]
    pub address: IpAddr,

    /// Port the HTTP server binds to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the three precomputed artifacts
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,

    /// Log filter directive (tracing EnvFilter syntax)
    #[serde(default = "default_log")]
    pub log: String,

    /// Seconds of inactivity after which a browsing session is destroyed
    #[serde(default = "default_session_idle_timeout_s")]
    pub session_idle_timeout_s: u64,

    /// Interval in seconds between idle-session sweeps
    #[serde(default = "default_session_sweep_interval_s")]
    pub session_sweep_interval_s: u64,
}

fn default_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8080
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_log() -> String {
    "info".to_owned()
}

fn default_session_idle_timeout_s() -> u64 {
    3600
}

fn default_session_sweep_interval_s() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            artifact_dir: default_artifact_dir(),
            log: default_log(),
            session_idle_timeout_s: default_session_idle_timeout_s(),
            session_sweep_interval_s: default_session_sweep_interval_s(),
        }
    }
}

impl Config {
    /// Loads configuration from an optional TOML file merged with
    /// `LIBRARION_`-prefixed environment variables, then validates it.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }

        let config: Config = figment
            .merge(Env::prefixed("LIBRARION_"))
            .extract()
            .map_err(|e| LibrarionError::Config(e.to_string()))?;

        config.validate()?;
        info!("✅ Configuration loaded successfully");
        Ok(config)
    }

    /// Validates the configuration, failing fast on nonsense values.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(LibrarionError::Config("Port cannot be 0".into()));
        }

        if self.artifact_dir.as_os_str().is_empty() {
            return Err(LibrarionError::Config(
                "Artifact directory cannot be empty".into(),
            ));
        }

        if self.log.is_empty() {
            return Err(LibrarionError::Config(
                "Log filter directive cannot be empty".into(),
            ));
        }

        if self.session_idle_timeout_s == 0 {
            return Err(LibrarionError::Config(
                "Session idle timeout must be at least 1 second".into(),
            ));
        }

        if self.session_sweep_interval_s == 0 {
            return Err(LibrarionError::Config(
                "Session sweep interval must be at least 1 second".into(),
            ));
        }

        Ok(())
    }

    /// Path of the book metadata artifact.
    pub fn books_path(&self) -> PathBuf {
        self.artifact_dir.join(BOOKS_FILE)
    }

    /// Path of the similarity matrix artifact.
    pub fn similarity_path(&self) -> PathBuf {
        self.artifact_dir.join(SIMILARITY_FILE)
    }

    /// Path of the popularity list artifact.
    pub fn popular_path(&self) -> PathBuf {
        self.artifact_dir.join(POPULAR_FILE)
    }
}
