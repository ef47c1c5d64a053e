//! Reverse geocoding response for the API layer

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Response body of `GET /api/country/{lat}/{lon}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CountryResponse {
	pub status: String,
	pub latitude: f64,
	pub longitude: f64,
	pub country: String,
}

impl CountryResponse {
	pub fn success(latitude: f64, longitude: f64, country: impl Into<String>) -> Self {
		Self {
			status: "success".to_string(),
			latitude,
			longitude,
			country: country.into(),
		}
	}
}
