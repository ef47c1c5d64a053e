use axum::{
	extract::rejection::{JsonRejection, PathRejection},
	extract::{Path, State},
	response::Json,
};
use tracing::info;

use crate::handlers::common::{json_body, path_params, service_error, validation_error, ApiError};
#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::state::AppState;
use solar_roi_types::validation::require_coordinates;
use solar_roi_types::{CoordinatesRequest, CountryResponse, GeoResult};

/// Coordinates and country of an address
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/get_coordinates",
	request_body = CoordinatesRequest,
	responses(
		(status = 200, description = "First geocoding match", body = GeoResult),
		(status = 400, description = "Missing address", body = ErrorResponse),
		(status = 404, description = "Address not found", body = ErrorResponse)
	),
	tag = "geocoding"
))]
pub async fn post_get_coordinates(
	State(state): State<AppState>,
	payload: Result<Json<CoordinatesRequest>, JsonRejection>,
) -> Result<Json<GeoResult>, ApiError> {
	let request = json_body(payload)?;
	let address = request.validate().map_err(|e| validation_error(&e))?;

	let location = state
		.roi_service
		.geocode(address)
		.await
		.map_err(|e| service_error(&e))?;

	info!(
		"Geocoded '{}' to ({}, {})",
		address, location.latitude, location.longitude
	);
	Ok(Json(location))
}

/// Country containing a coordinate pair
#[cfg_attr(feature = "openapi", utoipa::path(
	get,
	path = "/api/country/{lat}/{lon}",
	params(
		("lat" = f64, Path, description = "Latitude in decimal degrees"),
		("lon" = f64, Path, description = "Longitude in decimal degrees")
	),
	responses(
		(status = 200, description = "Country of the location", body = CountryResponse),
		(status = 400, description = "Invalid coordinates", body = ErrorResponse),
		(status = 404, description = "No country at this location", body = ErrorResponse)
	),
	tag = "geocoding"
))]
pub async fn get_country(
	State(state): State<AppState>,
	params: Result<Path<(f64, f64)>, PathRejection>,
) -> Result<Json<CountryResponse>, ApiError> {
	let (latitude, longitude) = path_params(params)?;
	require_coordinates(latitude, longitude).map_err(|e| validation_error(&e))?;

	let country = state
		.roi_service
		.country_for_coordinates(latitude, longitude)
		.await
		.map_err(|e| service_error(&e))?;

	Ok(Json(CountryResponse::success(latitude, longitude, country)))
}
