//! Runtime configuration handed to the provider adapters
//!
//! These are the resolved forms of the settings file: secrets are already
//! read from their source and wrapped in `SecretString`, so adapters never
//! touch the process environment.

use crate::models::SecretString;
use crate::pricing::SearchMode;
use std::time::Duration;

/// Timeout and retry policy applied to every outbound call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPolicy {
	/// Upper bound for a single attempt
	pub timeout_ms: u64,
	/// Additional attempts after the first one
	pub max_retries: u32,
	/// Delay before the first retry; doubled for each further retry
	pub backoff_ms: u64,
}

impl Default for CallPolicy {
	fn default() -> Self {
		Self {
			timeout_ms: 15_000,
			max_retries: 2,
			backoff_ms: 250,
		}
	}
}

impl CallPolicy {
	pub fn new(timeout_ms: u64, max_retries: u32, backoff_ms: u64) -> Self {
		Self {
			timeout_ms,
			max_retries,
			backoff_ms,
		}
	}

	/// Policy with a single attempt
	pub fn no_retries(timeout_ms: u64) -> Self {
		Self::new(timeout_ms, 0, 0)
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}

	/// Delay before retry number `attempt` (0-based)
	pub fn backoff_for(&self, attempt: u32) -> Duration {
		let factor = 1u64 << attempt.min(16);
		Duration::from_millis(self.backoff_ms.saturating_mul(factor))
	}
}

/// Google Geocoding API
#[derive(Debug, Clone)]
pub struct GeocodingRuntimeConfig {
	pub endpoint: String,
	pub api_key: SecretString,
	pub policy: CallPolicy,
}

/// PVGIS PVcalc API (no credentials)
#[derive(Debug, Clone)]
pub struct ProductionRuntimeConfig {
	pub endpoint: String,
	pub policy: CallPolicy,
}

/// Google Custom Search API with one engine per search mode
#[derive(Debug, Clone)]
pub struct SearchRuntimeConfig {
	pub endpoint: String,
	pub api_key: SecretString,
	pub engine_id: SecretString,
	pub electricity_engine_id: SecretString,
	pub policy: CallPolicy,
}

impl SearchRuntimeConfig {
	/// Search engine identifier (`cx`) used for `mode`
	pub fn engine_for(&self, mode: SearchMode) -> &SecretString {
		match mode {
			SearchMode::General => &self.engine_id,
			SearchMode::Electricity => &self.electricity_engine_id,
		}
	}
}

/// OpenAI chat completions API
#[derive(Debug, Clone)]
pub struct CompletionRuntimeConfig {
	pub endpoint: String,
	pub api_key: SecretString,
	pub model: String,
	pub max_tokens: u32,
	pub policy: CallPolicy,
}
