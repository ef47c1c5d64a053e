//! Price lookup domain model
//!
//! Installation cost and electricity price are both obtained the same way:
//! a web search for a country-specific query, followed by a completion that
//! pulls a bare number out of the returned snippet. `PriceKind` carries what
//! differs between the two lookups.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub mod request;
pub mod response;

pub use request::{CompletionRequest, SearchRequest};
pub use response::{ContentResponse, SearchResponse};

/// Search engine selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
	#[default]
	General,
	Electricity,
}

impl SearchMode {
	/// Mode inferred from free text for callers that do not pass one:
	/// any query mentioning "electricity" (any case) uses the electricity engine
	pub fn from_query(query: &str) -> Self {
		if query.to_lowercase().contains("electricity") {
			SearchMode::Electricity
		} else {
			SearchMode::General
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			SearchMode::General => "general",
			SearchMode::Electricity => "electricity",
		}
	}
}

impl fmt::Display for SearchMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The two figures looked up per country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum PriceKind {
	/// Installed system cost in USD per watt of capacity
	InstallationPerWatt,
	/// Retail electricity price in USD per kWh
	ElectricityPerKwh,
}

impl PriceKind {
	pub fn query_for(&self, country: &str) -> String {
		match self {
			PriceKind::InstallationPerWatt => format!("solar installation cost in {}", country),
			PriceKind::ElectricityPerKwh => format!("electricity cost in {}", country),
		}
	}

	pub fn search_mode(&self) -> SearchMode {
		match self {
			PriceKind::InstallationPerWatt => SearchMode::General,
			PriceKind::ElectricityPerKwh => SearchMode::Electricity,
		}
	}

	/// Unit the extraction prompt asks for
	pub fn unit(&self) -> &'static str {
		match self {
			PriceKind::InstallationPerWatt => "$ per watt",
			PriceKind::ElectricityPerKwh => "$ per kWh",
		}
	}

	/// Kind whose search engine matches `mode`
	pub fn for_mode(mode: SearchMode) -> Self {
		match mode {
			SearchMode::General => PriceKind::InstallationPerWatt,
			SearchMode::Electricity => PriceKind::ElectricityPerKwh,
		}
	}
}

impl fmt::Display for PriceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PriceKind::InstallationPerWatt => f.write_str("installation cost per watt"),
			PriceKind::ElectricityPerKwh => f.write_str("electricity price per kWh"),
		}
	}
}

/// A figure extracted from search text, with the text it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PriceQuote {
	pub kind: PriceKind,
	pub query: String,
	/// Completion text exactly as returned
	pub raw: String,
	pub value_usd: f64,
}
