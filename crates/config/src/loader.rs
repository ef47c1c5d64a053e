//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, Environment, File};

/// Prefix of environment overrides, e.g. `SOLAR_ROI__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "SOLAR_ROI";

/// Load configuration from `config/config.{toml,json,yaml}` and the environment
pub fn load_config() -> Result<Settings, ConfigError> {
	load_config_from("config/config")
}

/// Load configuration from the given file stem (optional) and the environment
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix(ENV_PREFIX)
				.separator("__")
				.try_parsing(true),
		)
		.build()?;

	s.try_deserialize()
}
