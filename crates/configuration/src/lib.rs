use crate::error::ConfigError;
use crate::settings::Settings;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{FilterDefaults, LogFormat, LoggingSettings, RankingSettings};

/// The default file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "vantage.toml";

/// Prefix of the environment variables that override file values,
/// e.g. `VANTAGE__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "VANTAGE";

/// Loads the application settings.
///
/// Layers, lowest precedence first: built-in defaults, the TOML file at `path`
/// (optional, missing files are skipped), then `VANTAGE__*` environment
/// variables. The result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(settings)
}
