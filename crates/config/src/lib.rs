//! Solar ROI Configuration
//!
//! Settings loading, secret resolution and startup logging for the solar ROI service.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, ENV_PREFIX};
pub use settings::{
	CompletionSettings, ConfigValidationError, EnvironmentProfile, EnvironmentSettings,
	GeocodingSettings, LogFormat, LoggingSettings, ProductionSettings, ProviderSettings,
	RateLimitSettings, RetrySettings, SearchSettings, ServerSettings, Settings, TimeoutSettings,
};
pub use startup_logger::{
	log_provider_endpoints, log_service_info, log_service_shutdown, log_startup_complete,
};
