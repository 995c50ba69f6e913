pub mod config;
pub mod initialization;
pub mod logging_system;

pub use config::{Config, ConfigError, LogFormat, LogLevel};
pub use initialization::InitializationError;
pub use logging_system::{LoggingSystem, setup_logging_safe};

use crate::delivery::{DeliveryCoordinator, DeliveryReport};
use crate::domain::NotifierError;
use crate::sender::WebhookClient;
use crate::source;
use std::process;
use tracing::{error, info};

pub struct App {
    config: Config,
    coordinator: DeliveryCoordinator<WebhookClient>,
}

impl App {
    pub fn from_args<I, T>(args: I) -> Result<Self, NotifierError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::from_args(args)?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, NotifierError> {
        config.validate()?;

        let client = WebhookClient::new(config.endpoint(), config.client_config())?;
        let coordinator =
            DeliveryCoordinator::new(client).with_max_in_flight(config.max_in_flight());

        Ok(Self {
            config,
            coordinator,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &WebhookClient {
        self.coordinator.sender()
    }

    /// Read the message file and deliver it. A file that cannot be read
    /// aborts the run before anything is sent; delivery failures end up in
    /// the report.
    pub async fn run(&self) -> Result<DeliveryReport, NotifierError> {
        let messages = source::read_lines(&self.config.file).await?;

        info!(
            file = %self.config.file.display(),
            messages = messages.len(),
            mode = %self.config.delivery_mode(),
            "Forwarding log lines to webhook"
        );

        let report = self
            .coordinator
            .deliver(self.config.delivery_mode(), &messages)
            .await;

        let stats = self.client().connection_stats();
        info!(
            total_requests = stats.total_requests,
            successful_requests = stats.successful_requests,
            failed_requests = stats.failed_requests,
            average_response_time_ms = stats.average_response_time.as_millis() as u64,
            "Webhook connection statistics"
        );

        Ok(report)
    }
}

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Main entry point for the application
pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = match Config::from_args(std::env::args()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = setup_logging_safe(config.log_level, config.log_format) {
        eprintln!("Warning: {e}, continuing without structured logging");
    }

    info!("Starting rask-log-notifier v{}", get_version());

    let app = match App::from_config(config) {
        Ok(app) => app,
        Err(e) => {
            error!("Initialization error: {}", e);
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let report = match app.run().await {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if !report.is_success() {
        for failure in &report.failures {
            error!(error = %failure, "Message not delivered");
            eprintln!("{failure}");
        }
        process::exit(1);
    }

    Ok(())
}
