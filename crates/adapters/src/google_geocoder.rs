//! Google Geocoding API adapter
//!
//! Forward lookups send `address` + `key`, reverse lookups send `latlng` + `key`.
//! Google reports most failures with HTTP 200 and a `status` field, so the
//! status is mapped onto [`ProviderError`] here.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use solar_roi_types::{
	GeoResult, Geocoder, GeocodingRuntimeConfig, ProviderError, ProviderResult,
};
use tracing::{debug, info};

use crate::http::{build_client, build_url, execute_with_policy, read_body, status_error};

const PROVIDER: &str = "google-geocoding";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
	status: String,
	#[serde(default)]
	results: Vec<GeocodeResult>,
	error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
	#[serde(default)]
	address_components: Vec<AddressComponent>,
	geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
	long_name: String,
	#[serde(default)]
	types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
	location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
	lat: f64,
	lng: f64,
}

impl GeocodeResult {
	fn country(&self) -> Option<String> {
		self.address_components
			.iter()
			.find(|component| component.types.iter().any(|t| t == "country"))
			.map(|component| component.long_name.clone())
	}
}

/// Results of an `OK` response, an empty list for `ZERO_RESULTS`
fn parse_geocode_body(body: &str) -> ProviderResult<Vec<GeocodeResult>> {
	let response: GeocodeResponse =
		serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse {
			reason: format!("Failed to parse geocoding response: {}", e),
		})?;

	let detail = response
		.error_message
		.unwrap_or_else(|| response.status.clone());
	match response.status.as_str() {
		"OK" => Ok(response.results),
		"ZERO_RESULTS" => Ok(Vec::new()),
		"OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Err(ProviderError::http_failure(429, detail)),
		"REQUEST_DENIED" => Err(ProviderError::http_failure(403, detail)),
		"INVALID_REQUEST" => Err(ProviderError::http_failure(400, detail)),
		"UNKNOWN_ERROR" => Err(ProviderError::http_failure(503, detail)),
		other => Err(ProviderError::invalid_response(format!(
			"Unexpected geocoding status '{}'",
			other
		))),
	}
}

/// Geocoder backed by the Google Geocoding API
#[derive(Debug)]
pub struct GoogleGeocoder {
	config: GeocodingRuntimeConfig,
	client: Client,
}

impl GoogleGeocoder {
	pub fn new(config: GeocodingRuntimeConfig) -> ProviderResult<Self> {
		Ok(Self::with_client(config, build_client()?))
	}

	pub fn with_client(config: GeocodingRuntimeConfig, client: Client) -> Self {
		Self { config, client }
	}

	async fn lookup(&self, params: &[(&str, &str)]) -> ProviderResult<Vec<GeocodeResult>> {
		let url = build_url(&self.config.endpoint, params)?;

		execute_with_policy(PROVIDER, &self.config.policy, || {
			let request = self.client.get(url.clone());
			async move {
				let (status, body) = read_body(request.send().await?).await?;
				if !status.is_success() {
					return Err(status_error(status, &body));
				}
				parse_geocode_body(&body)
			}
		})
		.await
	}
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
	fn name(&self) -> &'static str {
		PROVIDER
	}

	async fn geocode(&self, address: &str) -> ProviderResult<GeoResult> {
		debug!("Geocoding address '{}'", address);

		let results = self
			.lookup(&[("address", address), ("key", self.config.api_key.expose_secret())])
			.await?;
		let first = results
			.into_iter()
			.next()
			.ok_or_else(|| ProviderError::no_results(PROVIDER, address))?;

		let result = GeoResult::new(
			address,
			first.geometry.location.lat,
			first.geometry.location.lng,
			first.country(),
		);
		info!(
			"Geocoded '{}' to ({}, {}) in {}",
			address,
			result.latitude,
			result.longitude,
			result.country.as_deref().unwrap_or("<unknown country>")
		);

		Ok(result)
	}

	async fn country_for_coordinates(
		&self,
		latitude: f64,
		longitude: f64,
	) -> ProviderResult<Option<String>> {
		let latlng = format!("{},{}", latitude, longitude);
		debug!("Reverse geocoding {}", latlng);

		let results = self
			.lookup(&[("latlng", latlng.as_str()), ("key", self.config.api_key.expose_secret())])
			.await?;

		Ok(results.first().and_then(GeocodeResult::country))
	}
}
