//! Core provider traits
//!
//! Each external collaborator of the ROI pipeline sits behind one of these
//! traits. The HTTP adapters implement them for the real services; tests and
//! demos implement them with in-memory fakes.

use super::ProviderResult;
use crate::geocoding::GeoResult;
use crate::pricing::SearchMode;
use crate::production::{ProductionEstimate, ProductionRequest};
use crate::ProviderError;
use async_trait::async_trait;
use std::fmt::Debug;

/// Address to coordinates (and country) lookup
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
	/// Identifier used in logs and error messages
	fn name(&self) -> &'static str;

	/// Resolve an address to the first matching location
	///
	/// Returns `ProviderError::NoResults` when the provider has no match.
	async fn geocode(&self, address: &str) -> ProviderResult<GeoResult>;

	/// Resolve the country containing a coordinate pair
	///
	/// Default implementation returns UnsupportedOperation error.
	async fn country_for_coordinates(
		&self,
		_latitude: f64,
		_longitude: f64,
	) -> ProviderResult<Option<String>> {
		Err(ProviderError::UnsupportedOperation {
			operation: "country_for_coordinates".to_string(),
			provider: self.name().to_string(),
		})
	}
}

/// Modeled photovoltaic energy yield for a location
#[async_trait]
pub trait ProductionEstimator: Send + Sync + Debug {
	fn name(&self) -> &'static str;

	/// Estimate yearly and monthly production of a fixed-mount system
	///
	/// Returns `ProviderError::DataUnavailable` when the provider response does
	/// not carry the fixed-mount figures.
	async fn estimate(&self, request: &ProductionRequest) -> ProviderResult<ProductionEstimate>;
}

/// Web search returning the snippet of the best match
#[async_trait]
pub trait SnippetSearch: Send + Sync + Debug {
	fn name(&self) -> &'static str;

	/// HTML snippet of the first result for `query`, searched with the engine
	/// configured for `mode`
	async fn search(&self, query: &str, mode: SearchMode) -> ProviderResult<String>;
}

/// Single-turn generative text completion
#[async_trait]
pub trait TextCompletion: Send + Sync + Debug {
	fn name(&self) -> &'static str;

	/// Text content of the first completion choice for `prompt`
	async fn complete(&self, prompt: &str) -> ProviderResult<String>;
}
