//! Structured logging via `tracing`.
//!
//! Initialization is idempotent: the first call installs the global
//! subscriber, later calls are no-ops. `RUST_LOG` overrides the configured
//! filter when set.

use std::sync::Once;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Log verbosity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-tick water and player detail.
    Trace,
    /// Per-pass generation detail and edits.
    Debug,
    /// Summaries.
    #[default]
    Info,
    /// Dropped events and other oddities.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Filter directive name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level for everything without a module filter.
    pub level: LogLevel,
    /// Per-module overrides, e.g. `("delve_world::water", Trace)`.
    pub module_filters: Vec<(String, LogLevel)>,
    /// Print the event target.
    pub show_targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            module_filters: vec![("delve_world::water".to_owned(), LogLevel::Info)],
            show_targets: true,
        }
    }
}

impl LogConfig {
    /// The config as an `EnvFilter` directive string.
    #[must_use]
    pub fn to_env_filter_string(&self) -> String {
        std::iter::once(self.level.as_str().to_owned())
            .chain(
                self.module_filters
                    .iter()
                    .map(|(module, level)| format!("{module}={}", level.as_str())),
            )
            .collect::<Vec<_>>()
            .join(",")
    }
}

static TRACING_INIT: Once = Once::new();

/// Installs the global subscriber. First call wins.
pub fn init_tracing(config: &LogConfig) {
    let directives = config.to_env_filter_string();
    let show_targets = config.show_targets;
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(show_targets)
            .with_thread_ids(false)
            .compact();

        // Someone else may already own the global subscriber (test harness).
        let _ = subscriber.try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_string() {
        let config = LogConfig {
            level: LogLevel::Warn,
            module_filters: vec![
                ("delve_world::generation".into(), LogLevel::Debug),
                ("delve::session".into(), LogLevel::Trace),
            ],
            show_targets: false,
        };
        assert_eq!(
            config.to_env_filter_string(),
            "warn,delve_world::generation=debug,delve::session=trace"
        );
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(&LogConfig::default());
        init_tracing(&LogConfig::default());
    }
}
