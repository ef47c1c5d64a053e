//! Configuration settings structures

use crate::configurable_value::{ConfigurableValue, ConfigurableValueError};
use serde::{Deserialize, Serialize};
use solar_roi_types::production::DEFAULT_SYSTEM_LOSS_PERCENT;
use solar_roi_types::{
	CallPolicy, CompletionRuntimeConfig, GeocodingRuntimeConfig, ProductionRuntimeConfig,
	SearchRuntimeConfig,
};
use thiserror::Error;

/// Main application settings
///
/// Every section has defaults, so an empty configuration is runnable once the
/// provider credentials are present in the environment.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub providers: ProviderSettings,
	pub timeouts: TimeoutSettings,
	pub retries: RetrySettings,
	pub environment: EnvironmentSettings,
	pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 5000,
		}
	}
}

/// External provider configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ProviderSettings {
	pub geocoding: GeocodingSettings,
	pub production: ProductionSettings,
	pub search: SearchSettings,
	pub completion: CompletionSettings,
}

/// Google Geocoding API
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GeocodingSettings {
	pub endpoint: String,
	pub api_key: ConfigurableValue,
}

impl Default for GeocodingSettings {
	fn default() -> Self {
		Self {
			endpoint: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
			api_key: ConfigurableValue::from_env("GOOGLE_MAPS_API_KEY"),
		}
	}
}

/// PVGIS PVcalc API
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProductionSettings {
	pub endpoint: String,
	/// System loss passed to the production model, in percent
	pub system_loss_percent: f64,
}

impl Default for ProductionSettings {
	fn default() -> Self {
		Self {
			endpoint: "https://re.jrc.ec.europa.eu/api/PVcalc".to_string(),
			system_loss_percent: DEFAULT_SYSTEM_LOSS_PERCENT,
		}
	}
}

/// Google Custom Search API
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SearchSettings {
	pub endpoint: String,
	pub api_key: ConfigurableValue,
	/// Engine used for general queries
	pub engine_id: ConfigurableValue,
	/// Engine used for electricity price queries
	pub electricity_engine_id: ConfigurableValue,
}

impl Default for SearchSettings {
	fn default() -> Self {
		Self {
			endpoint: "https://www.googleapis.com/customsearch/v1".to_string(),
			api_key: ConfigurableValue::from_env("GOOGLE_API_KEY"),
			engine_id: ConfigurableValue::from_env("GOOGLE_SEARCH_ENGINE_ID"),
			electricity_engine_id: ConfigurableValue::from_env(
				"GOOGLE_SEARCH_ENGINE_ID_ELECTRICITY",
			),
		}
	}
}

/// OpenAI chat completions API
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CompletionSettings {
	pub endpoint: String,
	pub api_key: ConfigurableValue,
	pub model: String,
	pub max_tokens: u32,
}

impl Default for CompletionSettings {
	fn default() -> Self {
		Self {
			endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
			api_key: ConfigurableValue::from_env("OPENAI_API_KEY"),
			model: "gpt-4o".to_string(),
			max_tokens: 200,
		}
	}
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TimeoutSettings {
	/// Upper bound for each outbound provider call
	pub request_ms: u64,
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self { request_ms: 15_000 }
	}
}

/// Retry policy for transient provider failures
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RetrySettings {
	pub max_retries: u32,
	/// First backoff delay; doubled for each further retry
	pub backoff_ms: u64,
}

impl Default for RetrySettings {
	fn default() -> Self {
		Self {
			max_retries: 2,
			backoff_ms: 250,
		}
	}
}

/// Environment-specific settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EnvironmentSettings {
	pub profile: EnvironmentProfile,
	pub debug: bool,
	pub rate_limiting: RateLimitSettings,
}

impl Default for EnvironmentSettings {
	fn default() -> Self {
		Self {
			profile: EnvironmentProfile::Development,
			debug: true,
			rate_limiting: RateLimitSettings::default(),
		}
	}
}

/// Environment profiles
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentProfile {
	Development,
	Staging,
	Production,
}

/// Rate limiting configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RateLimitSettings {
	pub enabled: bool,
	pub requests_per_minute: u32,
}

impl Default for RateLimitSettings {
	fn default() -> Self {
		Self {
			enabled: false,
			requests_per_minute: 60,
		}
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Settings that cannot produce a working service
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
	#[error("Invalid setting {field}: {reason}")]
	InvalidSetting { field: String, reason: String },

	#[error("Secret {field} could not be resolved: {source}")]
	Secret {
		field: String,
		#[source]
		source: ConfigurableValueError,
	},
}

impl ConfigValidationError {
	fn invalid(field: &str, reason: impl Into<String>) -> Self {
		Self::InvalidSetting {
			field: field.to_string(),
			reason: reason.into(),
		}
	}
}

fn resolve_secret(
	field: &str,
	value: &ConfigurableValue,
) -> Result<solar_roi_types::SecretString, ConfigValidationError> {
	value
		.resolve_secret()
		.map_err(|source| ConfigValidationError::Secret {
			field: field.to_string(),
			source,
		})
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Check if running in production
	pub fn is_production(&self) -> bool {
		self.environment.profile == EnvironmentProfile::Production
	}

	/// Check if debug mode is enabled
	pub fn is_debug(&self) -> bool {
		self.environment.debug && !self.is_production()
	}

	/// Timeout and retry policy shared by all provider adapters
	pub fn call_policy(&self) -> CallPolicy {
		CallPolicy::new(
			self.timeouts.request_ms,
			self.retries.max_retries,
			self.retries.backoff_ms,
		)
	}

	/// Check values that would only fail at request time
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.timeouts.request_ms == 0 {
			return Err(ConfigValidationError::invalid(
				"timeouts.request_ms",
				"must be greater than 0",
			));
		}

		let loss = self.providers.production.system_loss_percent;
		if !(0.0..100.0).contains(&loss) {
			return Err(ConfigValidationError::invalid(
				"providers.production.system_loss_percent",
				format!("{} is outside [0, 100)", loss),
			));
		}

		let endpoints = [
			("providers.geocoding.endpoint", &self.providers.geocoding.endpoint),
			("providers.production.endpoint", &self.providers.production.endpoint),
			("providers.search.endpoint", &self.providers.search.endpoint),
			("providers.completion.endpoint", &self.providers.completion.endpoint),
		];
		for (field, endpoint) in endpoints {
			if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
				return Err(ConfigValidationError::invalid(
					field,
					format!("'{}' is not an http(s) URL", endpoint),
				));
			}
		}

		if self.providers.completion.model.trim().is_empty() {
			return Err(ConfigValidationError::invalid(
				"providers.completion.model",
				"must not be empty",
			));
		}
		if self.providers.completion.max_tokens == 0 {
			return Err(ConfigValidationError::invalid(
				"providers.completion.max_tokens",
				"must be greater than 0",
			));
		}

		let rate_limiting = &self.environment.rate_limiting;
		if rate_limiting.enabled && rate_limiting.requests_per_minute == 0 {
			return Err(ConfigValidationError::invalid(
				"environment.rate_limiting.requests_per_minute",
				"must be greater than 0 when rate limiting is enabled",
			));
		}

		Ok(())
	}

	pub fn geocoding_runtime(&self) -> Result<GeocodingRuntimeConfig, ConfigValidationError> {
		let geocoding = &self.providers.geocoding;
		Ok(GeocodingRuntimeConfig {
			endpoint: geocoding.endpoint.clone(),
			api_key: resolve_secret("providers.geocoding.api_key", &geocoding.api_key)?,
			policy: self.call_policy(),
		})
	}

	pub fn production_runtime(&self) -> ProductionRuntimeConfig {
		ProductionRuntimeConfig {
			endpoint: self.providers.production.endpoint.clone(),
			policy: self.call_policy(),
		}
	}

	pub fn search_runtime(&self) -> Result<SearchRuntimeConfig, ConfigValidationError> {
		let search = &self.providers.search;
		Ok(SearchRuntimeConfig {
			endpoint: search.endpoint.clone(),
			api_key: resolve_secret("providers.search.api_key", &search.api_key)?,
			engine_id: resolve_secret("providers.search.engine_id", &search.engine_id)?,
			electricity_engine_id: resolve_secret(
				"providers.search.electricity_engine_id",
				&search.electricity_engine_id,
			)?,
			policy: self.call_policy(),
		})
	}

	pub fn completion_runtime(&self) -> Result<CompletionRuntimeConfig, ConfigValidationError> {
		let completion = &self.providers.completion;
		Ok(CompletionRuntimeConfig {
			endpoint: completion.endpoint.clone(),
			api_key: resolve_secret("providers.completion.api_key", &completion.api_key)?,
			model: completion.model.clone(),
			max_tokens: completion.max_tokens,
			policy: self.call_policy(),
		})
	}
}
