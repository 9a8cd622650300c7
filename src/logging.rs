//! `tracing` subscriber setup for the `routeway` binary
//!
//! The library only emits `tracing` events. Embedding applications install their own
//! subscriber; the binary installs one from [`LogConfig`], which starts from
//! [`LogConfig::default`] and is overridden by `ROUTEWAY_LOG_*` variables. `RUST_LOG`
//! takes precedence over the configured level when present.

use anyhow::{Context, Result};
use std::env;
use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Output encoding of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    /// Anything other than `pretty` selects JSON.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("pretty") {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// trace/debug/info/warn/error; unknown values mean `info`
    pub log_level: String,
    pub format: LogFormat,
    /// Write through a `tracing-appender` worker thread instead of stdout directly
    pub async_logging: bool,
    /// Extra comma-separated directives, e.g. `routeway::router=debug`
    pub target_filter: Option<String>,
    /// Add file and line to each event
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            async_logging: true,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// [`LogConfig::default`] with any `ROUTEWAY_LOG_*` variable applied on top.
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            log_level: env::var("ROUTEWAY_LOG_LEVEL").unwrap_or(base.log_level),
            format: env::var("ROUTEWAY_LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or(base.format),
            async_logging: env_flag("ROUTEWAY_LOG_ASYNC").unwrap_or(base.async_logging),
            target_filter: env::var("ROUTEWAY_LOG_TARGET_FILTER")
                .ok()
                .or(base.target_filter),
            include_location: env_flag("ROUTEWAY_LOG_INCLUDE_LOCATION")
                .unwrap_or(base.include_location),
        }
    }

    fn level(&self) -> Level {
        self.log_level.trim().parse().unwrap_or(Level::INFO)
    }

    /// Invalid target directives are reported on stderr and skipped.
    fn env_filter(&self) -> EnvFilter {
        let base = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        self.target_filter
            .iter()
            .flat_map(|filters| filters.split(','))
            .map(str::trim)
            .filter(|directive| !directive.is_empty())
            .fold(base, |filter, directive| match directive.parse() {
                Ok(parsed) => filter.add_directive(parsed),
                Err(_) => {
                    eprintln!("Warning: Invalid log filter directive: {directive}");
                    filter
                }
            })
    }

    fn fmt_layer<S, W>(&self, writer: W) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_writer(writer);
        match self.format {
            LogFormat::Json => layer
                .json()
                .with_current_span(true)
                .with_thread_ids(true)
                .boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

/// Initialize logging with the configuration found in the environment.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LogConfig::from_env())
}

/// Install a global subscriber built from `config`.
///
/// ```no_run
/// use routeway::logging::{init_logging_with_config, LogConfig};
///
/// let config = LogConfig { log_level: "debug".into(), ..LogConfig::from_env() };
/// init_logging_with_config(&config).expect("logging");
/// ```
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    if config.async_logging {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        registry
            .with(config.fmt_layer(writer))
            .try_init()
            .context("Failed to initialize async logging")?;
        // The worker flushes until the guard drops; keep it for the process lifetime.
        std::mem::forget(guard);
    } else {
        registry
            .with(config.fmt_layer(std::io::stdout))
            .try_init()
            .context("Failed to initialize logging")?;
    }
    Ok(())
}
