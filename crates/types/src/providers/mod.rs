//! External provider seams: traits, errors and runtime configuration

pub mod config;
pub mod errors;
pub mod traits;

pub use config::{
	CallPolicy, CompletionRuntimeConfig, GeocodingRuntimeConfig, ProductionRuntimeConfig,
	SearchRuntimeConfig,
};
pub use errors::ProviderError;
pub use traits::{Geocoder, ProductionEstimator, SnippetSearch, TextCompletion};

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
