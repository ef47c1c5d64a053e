//! Search and completion request bodies

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::SearchMode;
use crate::validation::{require_text, ValidationResult};

/// Body of `POST /search-google`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SearchRequest {
	pub query: Option<String>,
	/// Search engine to use; inferred from the query text when absent
	pub mode: Option<SearchMode>,
}

impl SearchRequest {
	/// Trimmed query and the effective search mode
	pub fn validate(&self) -> ValidationResult<(&str, SearchMode)> {
		let query = require_text(self.query.as_deref(), "query")?;
		let mode = self.mode.unwrap_or_else(|| SearchMode::from_query(query));
		Ok((query, mode))
	}
}

/// Body of `POST /api/openai/completion`
///
/// The prompt is used as a search query; the completion extracts a price
/// figure from the first result.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CompletionRequest {
	pub prompt: Option<String>,
	pub mode: Option<SearchMode>,
}

impl CompletionRequest {
	pub fn validate(&self) -> ValidationResult<(&str, SearchMode)> {
		let prompt = require_text(self.prompt.as_deref(), "prompt")?;
		let mode = self.mode.unwrap_or_else(|| SearchMode::from_query(prompt));
		Ok((prompt, mode))
	}
}
