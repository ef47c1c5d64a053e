//! Per-request rate limiting

use std::sync::{Arc, Mutex};

use axum::{
	extract::{Request, State},
	http::StatusCode,
	middleware::{self, Next},
	response::Response,
	Router,
};
use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::handlers::common::{error_response, ApiError};

#[derive(Debug)]
struct RequestCounter {
	/// Requests admitted in the current window
	count: u32,
	window_start: DateTime<Utc>,
}

/// Fixed-window limiter shared by every request the router serves
#[derive(Debug)]
pub struct RequestRateLimiter {
	limit: u32,
	window: Duration,
	counter: Mutex<RequestCounter>,
}

impl RequestRateLimiter {
	pub fn new(limit: u32, window: Duration) -> Self {
		Self {
			limit,
			window,
			counter: Mutex::new(RequestCounter {
				count: 0,
				window_start: Utc::now(),
			}),
		}
	}

	pub fn per_minute(requests_per_minute: u32) -> Self {
		Self::new(requests_per_minute, Duration::minutes(1))
	}

	/// Admit one request, or return the seconds until the window resets
	pub fn check(&self) -> Result<(), i64> {
		let now = Utc::now();
		let mut counter = self.counter.lock().unwrap_or_else(|e| e.into_inner());

		if now >= counter.window_start + self.window {
			counter.count = 0;
			counter.window_start = now;
		}

		if counter.count >= self.limit {
			let reset = counter.window_start + self.window - now;
			return Err(reset.num_seconds().max(1));
		}

		counter.count += 1;
		Ok(())
	}
}

async fn enforce_rate_limit(
	State(limiter): State<Arc<RequestRateLimiter>>,
	request: Request,
	next: Next,
) -> Result<Response, ApiError> {
	if let Err(retry_after) = limiter.check() {
		warn!(
			"Rate limit exceeded for {} {}",
			request.method(),
			request.uri().path()
		);
		return Err(error_response(
			StatusCode::TOO_MANY_REQUESTS,
			"RATE_LIMITED",
			format!("Too many requests, retry in {} seconds", retry_after),
		));
	}

	Ok(next.run(request).await)
}

/// Limit `router` to `requests_per_minute` requests across all clients
pub fn with_rate_limit<S>(router: Router<S>, requests_per_minute: u32) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
{
	let limiter = Arc::new(RequestRateLimiter::per_minute(requests_per_minute));
	router.layer(middleware::from_fn_with_state(limiter, enforce_rate_limit))
}
