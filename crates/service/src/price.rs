//! Price extraction
//!
//! A price is looked up by searching for a country-specific query and asking
//! the completion provider to pull the bare figure out of the first snippet.
//! The completion is free text, so it is held to a strict numeric contract
//! and logged verbatim.

use std::sync::Arc;

use solar_roi_types::{
	PriceKind, PriceQuote, ProviderError, SearchMode, SnippetSearch, TextCompletion,
};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum PriceError {
	#[error("{0}")]
	Provider(#[from] ProviderError),
	#[error("extracted text is not a plain number: '{raw}'")]
	Parse { raw: String },
	#[error("extracted figure {value} is not a positive amount")]
	InvalidFigure { value: f64 },
}

/// Prompt asking for the bare figure in the unit of `kind`
pub fn extraction_prompt(kind: PriceKind, snippet: &str) -> String {
	format!(
		"Use the following information to parse the {} and only but only return the price but nothing else. Here is the info to parse: {}",
		kind.unit(),
		snippet
	)
}

/// Parse an extracted figure
///
/// Accepts surrounding whitespace and one optional leading `$`, followed by a
/// plain decimal number. Exponents, signs, units and words are rejected.
pub fn parse_price(raw: &str) -> Result<f64, PriceError> {
	let text = raw.trim();
	let number = text.strip_prefix('$').unwrap_or(text);

	let mut digits = 0usize;
	let mut dots = 0usize;
	for c in number.chars() {
		match c {
			'0'..='9' => digits += 1,
			'.' => dots += 1,
			_ => {
				return Err(PriceError::Parse {
					raw: raw.to_string(),
				})
			},
		}
	}
	if digits == 0 || dots > 1 {
		return Err(PriceError::Parse {
			raw: raw.to_string(),
		});
	}

	let value: f64 = number.parse().map_err(|_| PriceError::Parse {
		raw: raw.to_string(),
	})?;
	if !value.is_finite() || value <= 0.0 {
		return Err(PriceError::InvalidFigure { value });
	}

	Ok(value)
}

/// Search + completion pipeline for price figures
#[derive(Debug, Clone)]
pub struct PriceExtractor {
	search: Arc<dyn SnippetSearch>,
	completion: Arc<dyn TextCompletion>,
}

impl PriceExtractor {
	pub fn new(search: Arc<dyn SnippetSearch>, completion: Arc<dyn TextCompletion>) -> Self {
		Self { search, completion }
	}

	/// First search snippet for `query`
	pub async fn snippet(&self, query: &str, mode: SearchMode) -> Result<String, ProviderError> {
		let snippet = self.search.search(query, mode).await?;
		debug!("Snippet for '{}' ({} engine): {}", query, mode, snippet);
		Ok(snippet)
	}

	/// Raw completion for a price found by searching `snippet`
	pub async fn extract_from_snippet(
		&self,
		kind: PriceKind,
		snippet: &str,
	) -> Result<String, ProviderError> {
		self.completion
			.complete(&extraction_prompt(kind, snippet))
			.await
	}

	/// Quote for `kind` in `country`, parsed under the numeric contract
	pub async fn quote(&self, kind: PriceKind, country: &str) -> Result<PriceQuote, PriceError> {
		let query = kind.query_for(country);
		let snippet = self.snippet(&query, kind.search_mode()).await?;
		let raw = self.extract_from_snippet(kind, &snippet).await?;

		match parse_price(&raw) {
			Ok(value_usd) => {
				info!(
					"Extracted {} for '{}': raw='{}' parsed={}",
					kind, query, raw, value_usd
				);
				Ok(PriceQuote {
					kind,
					query,
					raw,
					value_usd,
				})
			},
			Err(error) => {
				warn!(
					"Rejected {} for '{}': raw='{}' ({})",
					kind, query, raw, error
				);
				Err(error)
			},
		}
	}
}
