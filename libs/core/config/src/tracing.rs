use crate::{ConfigError, Environment};
use serde::Deserialize;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{prelude::*, EnvFilter, Layer, Registry};

/// Log line format.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON in production (`APP_ENV=production`), pretty otherwise.
    #[default]
    Auto,
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Resolve `Auto` against the running environment.
    pub fn resolve(self, environment: &Environment) -> Self {
        match self {
            LogFormat::Auto if environment.is_production() => LogFormat::Json,
            LogFormat::Auto => LogFormat::Pretty,
            other => other,
        }
    }
}

/// Logging options, usually the `logging` section of a service config file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (`debug`, `info`, `warn`, `error`, or a full
    /// `EnvFilter` string). `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
    /// `stdout`, `stderr`, or a file path opened in append mode.
    pub output: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Auto,
            output: "stdout".to_string(),
        }
    }
}

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in the main() before any fallible operations to ensure
/// colored error output. Safe to call multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing from a [`LoggingConfig`].
///
/// Sets up `tracing-subscriber` with an `EnvFilter`, the configured output
/// and format, and `tracing_error::ErrorLayer` so eyre reports carry span
/// traces.
///
/// Safe to call more than once: if a global subscriber is already installed
/// (common in tests) the call is a no-op.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when the level directive cannot be parsed
/// or the output file cannot be opened.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ConfigError> {
    let environment = Environment::from_env();

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| ConfigError::Invalid {
            origin: "logging.level".to_string(),
            details: e.to_string(),
        })?,
    };

    let writer = make_writer(&config.output)?;
    let format = config.format.resolve(&environment);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false);
    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match format {
        LogFormat::Json => fmt_layer.json().flatten_event(true).boxed(),
        LogFormat::Compact => fmt_layer.compact().boxed(),
        LogFormat::Pretty | LogFormat::Auto => fmt_layer
            .with_file(false)
            .with_line_number(false)
            .pretty()
            .boxed(),
    };

    let result = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .with(filter)
        .try_init();

    match result {
        Ok(()) => info!(?environment, ?format, output = %config.output, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }

    Ok(())
}

fn make_writer(output: &str) -> Result<BoxMakeWriter, ConfigError> {
    match output {
        "stdout" | "" => Ok(BoxMakeWriter::new(std::io::stdout)),
        "stderr" => Ok(BoxMakeWriter::new(std::io::stderr)),
        path => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| ConfigError::Invalid {
                    origin: "logging.output".to_string(),
                    details: format!("{}: {}", path, e),
                })?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
    }
}
