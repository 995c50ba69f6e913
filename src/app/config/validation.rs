use super::{Config, ConfigError};
use url::Url;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Webhook endpoint must be set (--endpoint or WEBHOOK_ENDPOINT)".to_string(),
            ));
        }

        Url::parse(&self.base_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;

        let full_url = self.endpoint().url();
        Url::parse(&full_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid webhook URL '{full_url}': {e}"))
        })?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "Connection timeout must be greater than 0".to_string(),
            ));
        }

        if self.max_in_flight == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "Max in-flight messages must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
