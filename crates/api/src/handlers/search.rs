use axum::{extract::rejection::JsonRejection, extract::State, response::Json};
use tracing::info;

use crate::handlers::common::{json_body, service_error, validation_error, ApiError};
#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::state::AppState;
use solar_roi_types::{SearchRequest, SearchResponse};

/// First search result snippet for a query
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/search-google",
	request_body = SearchRequest,
	responses(
		(status = 200, description = "Snippet of the first result", body = SearchResponse),
		(status = 400, description = "Missing query", body = ErrorResponse),
		(status = 404, description = "No search results", body = ErrorResponse),
		(status = 502, description = "Search provider failure", body = ErrorResponse)
	),
	tag = "pricing"
))]
pub async fn post_search_google(
	State(state): State<AppState>,
	payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
	let request = json_body(payload)?;
	let (query, mode) = request.validate().map_err(|e| validation_error(&e))?;

	info!("Searching '{}' with the {} engine", query, mode);

	let snippet = state
		.roi_service
		.search_snippet(query, mode)
		.await
		.map_err(|e| service_error(&e))?;

	Ok(Json(SearchResponse::success(snippet)))
}
