//! Server configuration
//!
//! Loaded from a YAML file (path in `TURNSTILE_CONFIG`, default
//! `turnstile.yaml`). Every section has a default so an absent file still
//! yields a runnable server. `LISTEN` overrides the listen address.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "turnstile.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
    #[serde(default = "default_users")]
    pub users: Vec<UserConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Seconds a connection may stay silent mid-request before it is dropped.
    #[serde(default)]
    pub read_timeout_secs: Option<u64>,
    #[serde(default = "default_max_header_bytes")]
    pub max_header_bytes: usize,
    /// Largest `Content-Length` a request may declare.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    #[serde(default = "default_static_root")]
    pub root: PathBuf,
}

/// A user seeded into the in-memory repository at startup.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserConfig {
    pub account: String,
    pub password: String,
    pub email: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_max_header_bytes() -> usize {
    64 * 1024
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_static_root() -> PathBuf {
    PathBuf::from("static")
}

fn default_users() -> Vec<UserConfig> {
    vec![UserConfig {
        account: "gugu".to_string(),
        password: "password".to_string(),
        email: "hkkang@woowahan.com".to_string(),
    }]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            read_timeout_secs: None,
            max_header_bytes: default_max_header_bytes(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: default_static_root(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            static_files: StaticFilesConfig::default(),
            users: default_users(),
        }
    }
}

impl Config {
    /// Loads the configuration from the environment.
    ///
    /// An explicit `TURNSTILE_CONFIG` path must exist; the default path is
    /// optional.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("TURNSTILE_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(listen) = std::env::var("LISTEN") {
            cfg.server.listen_addr = listen;
        }

        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(text).context("Failed to parse YAML config")?;
        Ok(cfg)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.server.read_timeout_secs.map(Duration::from_secs)
    }
}
