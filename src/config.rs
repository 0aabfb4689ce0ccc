use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::DEFAULT_LOG_FILE;

pub const DEFAULT_CONFIG_FILE: &str = "hackathon-finder.json";

const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub readme_path: PathBuf,
    pub archive_path: PathBuf,
    pub region: RegionConfig,
    pub live: bool,
    pub request_timeout_secs: u64,
    pub keys: SourceKeys,
    /// Append-only run log kept next to stderr output; `null` disables it.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("hackathons.json"),
            readme_path: PathBuf::from("README.md"),
            archive_path: PathBuf::from("ARCHIVE.md"),
            region: RegionConfig::default(),
            live: false,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            keys: SourceKeys::default(),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegionConfig {
    pub label: String,
    pub aliases: Vec<String>,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            label: "California".to_string(),
            aliases: vec!["CA".to_string()],
        }
    }
}

/// Per-source access tokens. Blank values count as absent.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SourceKeys {
    pub devpost: Option<String>,
    pub mlh: Option<String>,
    pub luma: Option<String>,
    pub dev_events: Option<String>,
}

impl AppConfig {
    /// Defaults, then the JSON file (explicit path, or the default file when
    /// present), then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => read_config(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    read_config(fallback)?
                } else {
                    AppConfig::default()
                }
            }
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = |name: &str, current: &mut Option<String>| {
            if let Some(value) = lookup(name).and_then(non_blank) {
                *current = Some(value);
            }
        };
        token("DEVPOST_API_KEY", &mut self.keys.devpost);
        token("MLH_API_KEY", &mut self.keys.mlh);
        token("LUMA_API_KEY", &mut self.keys.luma);
        token("DEV_EVENTS_API_KEY", &mut self.keys.dev_events);

        if let Some(flag) = lookup("HACKATHON_FINDER_LIVE") {
            self.live = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(path) = lookup("HACKATHON_FINDER_LOG_FILE") {
            self.log_file = non_blank(path).map(PathBuf::from);
        }
    }
}

impl SourceKeys {
    pub fn devpost(&self) -> Option<&str> {
        non_blank_ref(&self.devpost)
    }

    pub fn mlh(&self) -> Option<&str> {
        non_blank_ref(&self.mlh)
    }

    pub fn luma(&self) -> Option<&str> {
        non_blank_ref(&self.luma)
    }

    pub fn dev_events(&self) -> Option<&str> {
        non_blank_ref(&self.dev_events)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn non_blank_ref(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
