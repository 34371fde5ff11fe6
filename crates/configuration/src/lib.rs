use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

#[cfg(feature = "clap")]
pub mod cli;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsSettings, Dashboard, DataSettings, LoggingSettings};
pub use telemetry::init_tracing;

#[cfg(feature = "clap")]
pub use cli::ConfigOverrides;

/// The file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of environment overrides, e.g. `TANDEM__DASHBOARD__YEARS=3`.
pub const ENV_PREFIX: &str = "TANDEM";

/// Loads the application configuration.
///
/// With `Some(path)` the file must exist. With `None` the default
/// `config.toml` is read when present and the built-in defaults are used
/// otherwise. `TANDEM__*` environment variables are layered on top in both
/// cases, and the result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_with_environment(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_with_environment(
    path: Option<&Path>,
    env: config::Environment,
) -> Result<Config, ConfigError> {
    let file = match path {
        Some(p) => config::File::from(p).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}
