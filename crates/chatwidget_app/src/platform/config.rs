use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chatwidget_engine::ChatSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use widget_logging::widget_info;

use super::cli::Cli;

pub(crate) const DEFAULT_CONFIG_FILENAME: &str = "chatwidget.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub base_url: String,
    pub endpoint_path: String,
    pub csrf_cookie_name: String,
    pub csrf_header_name: String,
    pub csrf_token: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub prime_session: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        let settings = ChatSettings::default();
        Self {
            base_url: settings.base_url,
            endpoint_path: settings.endpoint_path,
            csrf_cookie_name: settings.csrf_cookie_name,
            csrf_header_name: settings.csrf_header_name,
            csrf_token: None,
            request_timeout_secs: None,
            prime_session: true,
        }
    }
}

impl ChatConfig {
    /// Loads `path`, falling back to defaults when the file is absent and
    /// `required` is false.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        widget_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Resolves the config file from the command line and applies overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path, true)?,
            None => Self::load(Path::new(DEFAULT_CONFIG_FILENAME), false)?,
        };
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(secs) = cli.timeout_secs {
            self.request_timeout_secs = Some(secs);
        }
        if let Some(token) = &cli.csrf_token {
            self.csrf_token = Some(token.clone());
        }
        if cli.no_prime {
            self.prime_session = false;
        }
    }

    pub fn to_settings(&self) -> ChatSettings {
        ChatSettings {
            base_url: self.base_url.clone(),
            endpoint_path: self.endpoint_path.clone(),
            csrf_cookie_name: self.csrf_cookie_name.clone(),
            csrf_header_name: self.csrf_header_name.clone(),
            csrf_token: self.csrf_token.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..ChatSettings::default()
        }
    }
}
