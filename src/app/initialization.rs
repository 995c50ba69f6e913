use super::config::LogLevel;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitializationError {
    #[error("Invalid log level '{input}'. Valid levels: error, warn, info, debug, trace")]
    InvalidLogLevel { input: String },

    #[error("Invalid directive format '{input}'. Expected: 'target=level'")]
    InvalidDirectiveFormat { input: String },

    #[error("Empty target in directive '{input}'")]
    EmptyTarget { input: String },

    #[error("Logging system initialization failed: {details}")]
    LoggingInitFailed {
        details: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl InitializationError {
    /// How a bad directive is recovered from. `None` when the error is not
    /// about a directive and cannot be worked around.
    pub fn fallback_strategy(&self) -> Option<FallbackStrategy> {
        match self {
            InitializationError::InvalidLogLevel { .. } => Some(FallbackStrategy::UseDefaultLevel),
            InitializationError::InvalidDirectiveFormat { .. }
            | InitializationError::EmptyTarget { .. } => Some(FallbackStrategy::SkipDirective),
            InitializationError::LoggingInitFailed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStrategy {
    UseDefaultLevel,
    SkipDirective,
}

/// A single entry of the tracing filter: `target=level`, or a bare `level`
/// that replaces the default level. A bare level has an empty target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDirective {
    pub target: String,
    pub level: LogLevel,
}

impl LogDirective {
    pub fn new(target: impl Into<String>, level: LogLevel) -> Self {
        Self {
            target: target.into(),
            level,
        }
    }

    pub fn global(level: LogLevel) -> Self {
        Self::new(String::new(), level)
    }

    pub fn is_global(&self) -> bool {
        self.target.is_empty()
    }

    pub fn parse(directive: &str) -> Result<Self, InitializationError> {
        let Some((target, level)) = directive.split_once('=') else {
            return directive
                .parse::<LogLevel>()
                .map(LogDirective::global)
                .map_err(|_| InitializationError::InvalidDirectiveFormat {
                    input: directive.to_string(),
                });
        };

        if level.contains('=') {
            return Err(InitializationError::InvalidDirectiveFormat {
                input: directive.to_string(),
            });
        }

        let target = target.trim();
        if target.is_empty() {
            return Err(InitializationError::EmptyTarget {
                input: directive.to_string(),
            });
        }

        let level = level
            .parse::<LogLevel>()
            .map_err(|input| InitializationError::InvalidLogLevel { input })?;

        Ok(LogDirective::new(target, level))
    }

    pub fn to_filter_string(&self) -> String {
        if self.is_global() {
            self.level.as_str().to_string()
        } else {
            format!("{}={}", self.target, self.level.as_str())
        }
    }
}
