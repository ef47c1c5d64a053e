//! Error envelope and error-to-status mapping shared by handlers

use axum::{
	extract::rejection::{JsonRejection, PathRejection},
	extract::{Json as JsonExtractor, Path},
	http::StatusCode,
	response::Json,
};
use serde::{Deserialize, Serialize};
use solar_roi_service::{NarrativeError, PriceError, RoiCalculationError, RoiServiceError};
use solar_roi_types::{ProviderError, ValidationError};
use tracing::{error, warn};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Error response format shared by handlers
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
	/// Always "error"
	pub status: String,
	/// Machine-readable error code
	pub error: String,
	pub message: String,
	pub timestamp: i64,
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> ApiError {
	(
		status,
		Json(ErrorResponse {
			status: "error".to_string(),
			error: error.to_string(),
			message: message.into(),
			timestamp: chrono::Utc::now().timestamp(),
		}),
	)
}

pub fn validation_error(error: &ValidationError) -> ApiError {
	let code = match error {
		ValidationError::UnsupportedPrompt { .. } => "UNSUPPORTED_PROMPT",
		_ => "VALIDATION_ERROR",
	};
	error_response(StatusCode::BAD_REQUEST, code, error.to_string())
}

/// JSON body, with malformed or missing bodies reported in the error envelope
pub fn json_body<T>(payload: Result<JsonExtractor<T>, JsonRejection>) -> Result<T, ApiError> {
	payload.map(|JsonExtractor(body)| body).map_err(|rejection| {
		error_response(
			StatusCode::BAD_REQUEST,
			"VALIDATION_ERROR",
			format!("Invalid request body: {}", rejection.body_text()),
		)
	})
}

/// Path parameters, with unparsable segments reported in the error envelope
pub fn path_params<T>(params: Result<Path<T>, PathRejection>) -> Result<T, ApiError> {
	params.map(|Path(values)| values).map_err(|rejection| {
		error_response(
			StatusCode::BAD_REQUEST,
			"VALIDATION_ERROR",
			format!("Invalid path parameters: {}", rejection.body_text()),
		)
	})
}

/// Status and code for a provider failure
fn provider_status(error: &ProviderError) -> (StatusCode, &'static str) {
	match error {
		ProviderError::HttpStatus { status_code, .. } => (
			StatusCode::from_u16(*status_code).unwrap_or(StatusCode::BAD_GATEWAY),
			"PROVIDER_ERROR",
		),
		ProviderError::Http(e) => match e.status() {
			Some(status) => (
				StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
				"PROVIDER_ERROR",
			),
			None if e.is_timeout() => (StatusCode::GATEWAY_TIMEOUT, "PROVIDER_TIMEOUT"),
			None => (StatusCode::BAD_GATEWAY, "PROVIDER_UNREACHABLE"),
		},
		ProviderError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "PROVIDER_TIMEOUT"),
		ProviderError::NoResults { .. } => (StatusCode::NOT_FOUND, "NO_RESULTS"),
		ProviderError::DataUnavailable { .. } => (StatusCode::BAD_REQUEST, "DATA_UNAVAILABLE"),
		ProviderError::InvalidResponse { .. } => {
			(StatusCode::BAD_GATEWAY, "INVALID_PROVIDER_RESPONSE")
		},
		ProviderError::ExtractionFailed { .. } => {
			(StatusCode::INTERNAL_SERVER_ERROR, "EXTRACTION_FAILED")
		},
		ProviderError::UnsupportedOperation { .. } => {
			(StatusCode::NOT_IMPLEMENTED, "UNSUPPORTED_OPERATION")
		},
		ProviderError::Configuration { .. } | ProviderError::Serialization(_) => {
			(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
		},
	}
}

fn price_status(error: &PriceError) -> (StatusCode, &'static str) {
	match error {
		PriceError::Provider(provider) => provider_status(provider),
		PriceError::Parse { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "PRICE_PARSE_ERROR"),
		PriceError::InvalidFigure { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_PRICE"),
	}
}

/// Status, code and message for a pipeline failure
pub fn service_error(error: &RoiServiceError) -> ApiError {
	let (status, code) = match error {
		RoiServiceError::Validation(validation) => return validation_error(validation),
		RoiServiceError::CountryNotFound { .. } => (StatusCode::NOT_FOUND, "COUNTRY_NOT_FOUND"),
		RoiServiceError::Geocoding(provider)
		| RoiServiceError::Production(provider)
		| RoiServiceError::Search(provider)
		| RoiServiceError::PriceExtraction(provider) => provider_status(provider),
		RoiServiceError::InstallationCost(price) | RoiServiceError::ElectricityPrice(price) => {
			price_status(price)
		},
		RoiServiceError::Roi(RoiCalculationError::UndefinedRoi { .. }) => {
			(StatusCode::UNPROCESSABLE_ENTITY, "UNDEFINED_ROI")
		},
		RoiServiceError::Narrative(NarrativeError::Provider(provider)) => provider_status(provider),
		RoiServiceError::Narrative(NarrativeError::Empty) => {
			(StatusCode::INTERNAL_SERVER_ERROR, "EXTRACTION_FAILED")
		},
	};

	if status.is_server_error() {
		error!("{} stage failed with {}: {}", error.stage(), status, error);
	} else {
		warn!("{} stage failed with {}: {}", error.stage(), status, error);
	}

	error_response(status, code, error.to_string())
}
