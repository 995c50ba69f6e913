use super::config::{LogFormat, LogLevel};
use super::initialization::{FallbackStrategy, InitializationError, LogDirective};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Builds the tracing filter from a default level plus per-target
/// directives, then installs the global subscriber.
pub struct LoggingSystem {
    directives: Arc<RwLock<Vec<LogDirective>>>,
    fallback_level: LogLevel,
}

impl LoggingSystem {
    pub fn new() -> Self {
        Self {
            directives: Arc::new(RwLock::new(Vec::new())),
            fallback_level: LogLevel::Info,
        }
    }

    /// Add a `target=level` directive, or a bare level that replaces the
    /// default level. Malformed directives are skipped and unknown levels
    /// fall back to the default level, both with a warning on stderr since
    /// tracing is not up yet.
    pub fn add_directive(&self, directive_str: &str) -> Result<(), InitializationError> {
        match LogDirective::parse(directive_str) {
            Ok(directive) => {
                self.directives.write().push(directive);
                Ok(())
            }
            Err(e) => match e.fallback_strategy() {
                Some(FallbackStrategy::UseDefaultLevel) => {
                    eprintln!("Warning: {e}, using default level");
                    let target = directive_str.split('=').next().unwrap_or_default().trim();
                    self.directives
                        .write()
                        .push(LogDirective::new(target, self.fallback_level));
                    Ok(())
                }
                Some(FallbackStrategy::SkipDirective) | None => {
                    eprintln!("Warning: {e}, skipping directive");
                    Ok(())
                }
            },
        }
    }

    /// HTTP stack crates are noisy at debug level.
    pub fn add_default_directives(&self) {
        let mut directives = self.directives.write();
        for target in ["hyper", "hyper_util", "reqwest", "h2", "rustls"] {
            directives.push(LogDirective::new(target, LogLevel::Warn));
        }
    }

    pub fn build_filter_string(&self, default_level: LogLevel) -> String {
        let directives = self.directives.read();

        // The last bare level wins over the configured one.
        let level = directives
            .iter()
            .rev()
            .find(|d| d.is_global())
            .map_or(default_level, |d| d.level);

        let mut filter_parts = Vec::with_capacity(directives.len() + 1);
        filter_parts.push(level.as_str().to_string());
        filter_parts.extend(
            directives
                .iter()
                .filter(|d| !d.is_global())
                .map(LogDirective::to_filter_string),
        );

        filter_parts.join(",")
    }

    pub fn initialize_tracing(
        &self,
        default_level: LogLevel,
        format: LogFormat,
    ) -> Result<(), InitializationError> {
        let filter_string = self.build_filter_string(default_level);

        let env_filter =
            EnvFilter::try_new(&filter_string).map_err(|e| InitializationError::LoggingInitFailed {
                details: format!("Failed to create EnvFilter with '{filter_string}'"),
                source: Box::new(e),
            })?;

        let result = match format {
            LogFormat::Compact => tracing::subscriber::set_global_default(
                tracing_subscriber::registry().with(env_filter).with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true)
                        .compact(),
                ),
            ),
            LogFormat::Json => tracing::subscriber::set_global_default(
                tracing_subscriber::registry().with(env_filter).with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .flatten_event(true)
                        .with_current_span(true),
                ),
            ),
        };

        result.map_err(|e| InitializationError::LoggingInitFailed {
            details: "Failed to set global tracing subscriber".to_string(),
            source: Box::new(e),
        })
    }

    pub fn directive_count(&self) -> usize {
        self.directives.read().len()
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global subscriber once per process. `RUST_LOG`, when set,
/// adds its directives on top of the defaults; a bare level in it replaces
/// `level`. Later calls return the
/// outcome of the first one.
pub fn setup_logging_safe(level: LogLevel, format: LogFormat) -> Result<(), InitializationError> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();

    let outcome = INIT.get_or_init(|| {
        let logging_system = LoggingSystem::new();
        logging_system.add_default_directives();

        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            for directive in rust_log.split(',').filter(|d| !d.trim().is_empty()) {
                logging_system
                    .add_directive(directive)
                    .map_err(|e| e.to_string())?;
            }
        }

        logging_system
            .initialize_tracing(level, format)
            .map_err(|e| e.to_string())
    });

    outcome.clone().map_err(|details| {
        let source = Box::new(std::io::Error::other(details.clone()));
        InitializationError::LoggingInitFailed { details, source }
    })
}
