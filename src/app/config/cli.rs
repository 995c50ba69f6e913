use super::{ConfigError, LogFormat, LogLevel};
use crate::delivery::DeliveryMode;
use crate::domain::{DEFAULT_BASE_URL, Endpoint};
use crate::sender::ClientConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
#[serde(default)]
pub struct Config {
    /// File to read messages from, one message per line
    #[arg(long, env = "NOTIFIER_FILE", default_value = "./log.txt")]
    pub file: PathBuf,

    /// Webhook path appended to the base URL (e.g. T000/B000/XXXX)
    #[arg(long, env = "WEBHOOK_ENDPOINT", default_value = "")]
    pub endpoint: String,

    /// Webhook base URL
    #[arg(long, env = "WEBHOOK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Send messages one by one and stop at the first failure
    #[arg(long, env = "NOTIFIER_SYNC")]
    pub sync: bool,

    /// Per-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[arg(long, env = "CONNECT_TIMEOUT_SECS", default_value = "10")]
    pub connect_timeout_secs: u64,

    /// Maximum number of messages in flight in concurrent mode (unbounded if unset)
    #[arg(long, env = "MAX_IN_FLIGHT")]
    pub max_in_flight: Option<usize>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", default_value = "compact")]
    pub log_format: LogFormat,

    /// Configuration file path (optional, replaces command line values)
    #[arg(long, env = "CONFIG_FILE")]
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("./log.txt"),
            endpoint: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            sync: false,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_in_flight: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Compact,
            config_file: None,
        }
    }
}

impl Config {
    /// Parse command line (with environment fallbacks) and, when
    /// `--config-file` is given, load that file instead.
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::parse_from(args);

        if let Some(config_file) = &config.config_file {
            return Self::from_file(config_file);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = toml::from_str(&content)?;
        config.config_file = Some(path.as_ref().to_path_buf());
        config.validate()?;
        Ok(config)
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::with_base_url(self.base_url.clone(), self.endpoint.clone())
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        DeliveryMode::from_sync_flag(self.sync)
    }

    pub fn max_in_flight(&self) -> Option<NonZeroUsize> {
        self.max_in_flight.and_then(NonZeroUsize::new)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            connection_timeout: Duration::from_secs(self.connect_timeout_secs),
            ..ClientConfig::default()
        }
    }
}
