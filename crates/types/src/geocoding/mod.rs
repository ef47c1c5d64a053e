//! Geocoding domain model

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub mod request;
pub mod response;

pub use request::CoordinatesRequest;
pub use response::CountryResponse;

/// First match of a forward geocoding lookup
///
/// `country` is `None` when the provider returned a location without a
/// country component; callers that need it must treat that as "not found".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct GeoResult {
	/// Address as submitted by the caller
	pub address: String,
	pub latitude: f64,
	pub longitude: f64,
	pub country: Option<String>,
}

impl GeoResult {
	pub fn new(
		address: impl Into<String>,
		latitude: f64,
		longitude: f64,
		country: Option<String>,
	) -> Self {
		Self {
			address: address.into(),
			latitude,
			longitude,
			country,
		}
	}
}
