use axum::{extract::rejection::JsonRejection, extract::State, response::Json};
use tracing::info;

use crate::handlers::common::{json_body, service_error, validation_error, ApiError};
#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::state::AppState;
use solar_roi_types::{BrowseRequest, RoiReport};

/// Full ROI estimate for an address and installed peak power
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/browse",
	request_body = BrowseRequest,
	responses(
		(status = 200, description = "ROI report", body = RoiReport),
		(status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
		(status = 404, description = "Address or country not found", body = ErrorResponse),
		(status = 422, description = "ROI undefined for this location", body = ErrorResponse),
		(status = 500, description = "Price extraction or narrative failed", body = ErrorResponse)
	),
	tag = "roi"
))]
pub async fn post_browse(
	State(state): State<AppState>,
	payload: Result<Json<BrowseRequest>, JsonRejection>,
) -> Result<Json<RoiReport>, ApiError> {
	let request = json_body(payload)?;
	let request = request.validate().map_err(|e| validation_error(&e))?;

	info!(
		"Estimating ROI for '{}' with {} kW peak power",
		request.address, request.peak_power_kw
	);

	let report = state
		.roi_service
		.estimate_roi(&request)
		.await
		.map_err(|e| service_error(&e))?;

	info!(
		"ROI for '{}' ({}): {} years",
		report.address, report.country, report.roi_years
	);
	Ok(Json(report))
}
