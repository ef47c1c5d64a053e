use axum::{
	extract::rejection::PathRejection,
	extract::{Path, State},
	response::Json,
};
use tracing::info;

use crate::handlers::common::{path_params, service_error, ApiError};
#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::state::AppState;
use solar_roi_types::ProductionResponse;

/// Modeled yearly and monthly energy production of a fixed-mount system
#[cfg_attr(feature = "openapi", utoipa::path(
	get,
	path = "/api/pvgis/{lat}/{lon}/{peakpower}",
	params(
		("lat" = f64, Path, description = "Latitude in decimal degrees"),
		("lon" = f64, Path, description = "Longitude in decimal degrees"),
		("peakpower" = f64, Path, description = "Installed peak power in kW")
	),
	responses(
		(status = 200, description = "Production estimate", body = ProductionResponse),
		(status = 400, description = "Invalid parameters or data unavailable", body = ErrorResponse)
	),
	tag = "production"
))]
pub async fn get_pvgis(
	State(state): State<AppState>,
	params: Result<Path<(f64, f64, f64)>, PathRejection>,
) -> Result<Json<ProductionResponse>, ApiError> {
	let (latitude, longitude, peak_power_kw) = path_params(params)?;

	info!(
		"Estimating production at ({}, {}) for {} kW",
		latitude, longitude, peak_power_kw
	);

	let estimate = state
		.roi_service
		.estimate_production(latitude, longitude, peak_power_kw)
		.await
		.map_err(|e| service_error(&e))?;

	Ok(Json(ProductionResponse::success(estimate)))
}
