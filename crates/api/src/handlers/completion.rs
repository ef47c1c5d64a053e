use axum::{extract::rejection::JsonRejection, extract::State, response::Json};
use tracing::info;

use crate::handlers::common::{json_body, service_error, validation_error, ApiError};
#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::state::AppState;
use solar_roi_types::{CompletionRequest, ContentResponse, DescribeRequest};

/// Narrative description of externally computed ROI figures
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/openai/describe",
	request_body = DescribeRequest,
	responses(
		(status = 200, description = "Generated narrative", body = ContentResponse),
		(status = 400, description = "Missing or unsupported prompt", body = ErrorResponse),
		(status = 500, description = "Narrative generation failed", body = ErrorResponse)
	),
	tag = "completion"
))]
pub async fn post_describe(
	State(state): State<AppState>,
	payload: Result<Json<DescribeRequest>, JsonRejection>,
) -> Result<Json<ContentResponse>, ApiError> {
	let request = json_body(payload)?;
	let context = request.validate().map_err(|e| validation_error(&e))?;

	info!(
		"Describing ROI of {} years for {}",
		context.roi_years, context.country
	);

	let content = state
		.roi_service
		.describe(&context)
		.await
		.map_err(|e| service_error(&e))?;

	Ok(Json(ContentResponse::success(content)))
}

/// Price figure extracted from the first search result for the prompt
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/openai/completion",
	request_body = CompletionRequest,
	responses(
		(status = 200, description = "Raw extracted figure", body = ContentResponse),
		(status = 400, description = "Missing prompt", body = ErrorResponse),
		(status = 404, description = "No search results", body = ErrorResponse),
		(status = 500, description = "Extraction failed", body = ErrorResponse)
	),
	tag = "completion"
))]
pub async fn post_completion(
	State(state): State<AppState>,
	payload: Result<Json<CompletionRequest>, JsonRejection>,
) -> Result<Json<ContentResponse>, ApiError> {
	let request = json_body(payload)?;
	let (prompt, mode) = request.validate().map_err(|e| validation_error(&e))?;

	let content = state
		.roi_service
		.extract_price_text(prompt, mode)
		.await
		.map_err(|e| service_error(&e))?;

	info!("Extracted '{}' for '{}'", content, prompt);
	Ok(Json(ContentResponse::success(content)))
}
