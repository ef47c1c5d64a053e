//! Solar ROI Types
//!
//! Shared models and traits for the solar ROI service.
//! This crate contains the domain entities organized by pipeline stage,
//! the provider traits the adapters implement and the unified provider error.

pub mod geocoding;
pub mod models;
pub mod pricing;
pub mod production;
pub mod providers;
pub mod roi;
pub mod validation;

// Re-export serde_json for convenience
pub use serde_json;

pub use geocoding::{CoordinatesRequest, CountryResponse, GeoResult};

pub use production::{EnergyProductionData, ProductionEstimate, ProductionRequest, ProductionResponse};

pub use pricing::{
	ContentResponse, CompletionRequest, PriceKind, PriceQuote, SearchMode, SearchRequest,
	SearchResponse,
};

pub use roi::{BrowseRequest, DescribeRequest, NarrativeContext, RoiFigures, RoiReport, RoiRequest};

pub use providers::{
	CallPolicy, CompletionRuntimeConfig, Geocoder, GeocodingRuntimeConfig, ProductionEstimator,
	ProductionRuntimeConfig, ProviderError, ProviderResult, SearchRuntimeConfig, SnippetSearch,
	TextCompletion,
};

pub use models::SecretString;

pub use validation::{ValidationError, ValidationResult};
