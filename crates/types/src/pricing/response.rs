//! Search and completion response bodies

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SearchResponse {
	pub status: String,
	pub html_snippet: String,
}

impl SearchResponse {
	pub fn success(html_snippet: impl Into<String>) -> Self {
		Self {
			status: "success".to_string(),
			html_snippet: html_snippet.into(),
		}
	}
}

/// Generated text returned by the completion and describe endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ContentResponse {
	pub status: String,
	pub content: String,
}

impl ContentResponse {
	pub fn success(content: impl Into<String>) -> Self {
		Self {
			status: "success".to_string(),
			content: content.into(),
		}
	}
}
