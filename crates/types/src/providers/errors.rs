//! Error type shared by every external provider adapter

use thiserror::Error;

/// Provider operation errors
///
/// Every adapter reports failures through this one type, so the orchestrator
/// and the HTTP layer can treat geocoding, production, search and completion
/// failures uniformly.
#[derive(Error, Debug)]
pub enum ProviderError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatus { status_code: u16, reason: String },

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("No results from {provider} for '{query}'")]
	NoResults { provider: String, query: String },

	#[error("Data unavailable: {reason}")]
	DataUnavailable { reason: String },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Extraction failed: {reason}")]
	ExtractionFailed { reason: String },

	#[error("Configuration error: {reason}")]
	Configuration { reason: String },

	#[error("Unsupported operation: {operation} for provider {provider}")]
	UnsupportedOperation { operation: String, provider: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl ProviderError {
	/// Upstream HTTP status code, when the failure carries one
	pub fn status_code(&self) -> Option<u16> {
		match self {
			ProviderError::HttpStatus { status_code, .. } => Some(*status_code),
			ProviderError::Http(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	/// Whether another attempt may succeed (transport failures, timeouts, 429 and 5xx)
	pub fn is_retryable(&self) -> bool {
		match self {
			ProviderError::Http(e) => match e.status() {
				Some(status) => status.as_u16() == 429 || status.is_server_error(),
				None => e.is_timeout() || e.is_connect() || e.is_request(),
			},
			ProviderError::HttpStatus { status_code, .. } => {
				*status_code == 429 || (500..600).contains(status_code)
			},
			ProviderError::Timeout { .. } => true,
			_ => false,
		}
	}

	pub fn no_results(provider: &str, query: impl Into<String>) -> Self {
		Self::NoResults {
			provider: provider.to_string(),
			query: query.into(),
		}
	}

	pub fn invalid_response(reason: impl Into<String>) -> Self {
		Self::InvalidResponse {
			reason: reason.into(),
		}
	}

	/// Create an HTTP failure error with the given status code and reason
	pub fn http_failure(status_code: u16, reason: impl Into<String>) -> Self {
		Self::HttpStatus {
			status_code,
			reason: reason.into(),
		}
	}

	/// Create an HTTP failure error from a response status with a default reason
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request",
			401 => "Unauthorized",
			403 => "Forbidden",
			404 => "Not Found",
			408 => "Request Timeout",
			429 => "Too Many Requests",
			500 => "Internal Server Error",
			502 => "Bad Gateway",
			503 => "Service Unavailable",
			504 => "Gateway Timeout",
			_ => return Self::http_failure(status_code, format!("HTTP Error {}", status_code)),
		};

		Self::http_failure(status_code, reason)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_code_extraction() {
		let error = ProviderError::http_failure(403, "REQUEST_DENIED");
		assert_eq!(error.status_code(), Some(403));

		let error = ProviderError::from_http_failure(429);
		assert_eq!(error.status_code(), Some(429));
		assert!(error.to_string().contains("Too Many Requests"));

		let error = ProviderError::no_results("google-geocoding", "nowhere");
		assert_eq!(error.status_code(), None);
	}

	#[test]
	fn test_unknown_status_gets_generic_reason() {
		let error = ProviderError::from_http_failure(418);
		assert_eq!(error.to_string(), "HTTP 418: HTTP Error 418");
	}

	#[test]
	fn test_retryable_classification() {
		assert!(ProviderError::from_http_failure(503).is_retryable());
		assert!(ProviderError::from_http_failure(429).is_retryable());
		assert!(ProviderError::Timeout { timeout_ms: 100 }.is_retryable());

		assert!(!ProviderError::from_http_failure(400).is_retryable());
		assert!(!ProviderError::from_http_failure(404).is_retryable());
		assert!(!ProviderError::invalid_response("bad json").is_retryable());
		assert!(!ProviderError::DataUnavailable {
			reason: "no outputs".to_string()
		}
		.is_retryable());
	}
}
