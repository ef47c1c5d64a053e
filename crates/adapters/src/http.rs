//! Shared HTTP plumbing for provider adapters
//!
//! Every adapter builds one pooled `reqwest::Client`, builds request URLs with
//! `url::Url`, and runs each call through [`execute_with_policy`], which bounds
//! attempts with a timeout and retries transient failures with doubling backoff.

use reqwest::{
	header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
	Client, Response, StatusCode,
};
use serde::Deserialize;
use solar_roi_types::{CallPolicy, ProviderError, ProviderResult};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const CLIENT_USER_AGENT: &str = concat!("solar-roi/", env!("CARGO_PKG_VERSION"));

/// Build a pooled client with the headers every provider call carries
pub fn build_client() -> ProviderResult<Client> {
	let mut headers = HeaderMap::new();
	headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
	headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

	Client::builder()
		.default_headers(headers)
		.pool_idle_timeout(Duration::from_secs(90))
		.pool_max_idle_per_host(10)
		.build()
		.map_err(ProviderError::Http)
}

/// Endpoint with the given query parameters appended
pub fn build_url(endpoint: &str, params: &[(&str, &str)]) -> ProviderResult<Url> {
	let mut url = Url::parse(endpoint).map_err(|e| ProviderError::Configuration {
		reason: format!("Invalid endpoint URL '{}': {}", endpoint, e),
	})?;

	if !params.is_empty() {
		let mut pairs = url.query_pairs_mut();
		for (key, value) in params {
			pairs.append_pair(key, value);
		}
	}

	Ok(url)
}

/// Run `call` under the timeout and retry policy
///
/// Each attempt is bounded by `policy.timeout()`. Failures for which
/// [`ProviderError::is_retryable`] holds are retried up to
/// `policy.max_retries` times; anything else is returned immediately.
pub async fn execute_with_policy<T, F, Fut>(
	provider: &str,
	policy: &CallPolicy,
	mut call: F,
) -> ProviderResult<T>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = ProviderResult<T>>,
{
	let mut attempt = 0u32;
	loop {
		let outcome = match tokio::time::timeout(policy.timeout(), call()).await {
			Ok(result) => result,
			Err(_) => Err(ProviderError::Timeout {
				timeout_ms: policy.timeout_ms,
			}),
		};

		match outcome {
			Ok(value) => {
				if attempt > 0 {
					debug!("{} call succeeded after {} retries", provider, attempt);
				}
				return Ok(value);
			},
			Err(error) if error.is_retryable() && attempt < policy.max_retries => {
				let delay = policy.backoff_for(attempt);
				warn!(
					"{} call failed (attempt {}/{}): {}; retrying in {}ms",
					provider,
					attempt + 1,
					policy.max_retries + 1,
					error,
					delay.as_millis()
				);
				tokio::time::sleep(delay).await;
				attempt += 1;
			},
			Err(error) => return Err(error),
		}
	}
}

/// Status and body text of a response
pub async fn read_body(response: Response) -> ProviderResult<(StatusCode, String)> {
	let status = response.status();
	let body = response.text().await?;
	Ok((status, body))
}

/// Error for a non-2xx response, keeping the provider's own message when it sent one
pub fn status_error(status: StatusCode, body: &str) -> ProviderError {
	match error_detail(body) {
		Some(detail) => ProviderError::http_failure(status.as_u16(), detail),
		None => ProviderError::from_http_failure(status.as_u16()),
	}
}

#[derive(Deserialize)]
struct ErrorEnvelope {
	error: Option<ErrorDetail>,
	message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorDetail {
	message: Option<String>,
}

/// Message from `{"error": {"message": ..}}` (Google, OpenAI) or `{"message": ..}` (PVGIS)
pub fn error_detail(body: &str) -> Option<String> {
	let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
	envelope
		.error
		.and_then(|detail| detail.message)
		.or(envelope.message)
		.filter(|message| !message.trim().is_empty())
}
