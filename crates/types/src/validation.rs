//! Request validation errors shared by every endpoint

use thiserror::Error;

/// Client input errors (always reported as HTTP 400)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
	#[error("Missing required field: {field}")]
	MissingField { field: String },

	#[error("Invalid value for {field}: {reason}")]
	InvalidValue { field: String, reason: String },

	#[error("Unsupported prompt: {reason}")]
	UnsupportedPrompt { reason: String },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

impl ValidationError {
	pub fn missing(field: &str) -> Self {
		Self::MissingField {
			field: field.to_string(),
		}
	}

	pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
		Self::InvalidValue {
			field: field.to_string(),
			reason: reason.into(),
		}
	}
}

/// Returns the trimmed text when present and non-blank
pub fn require_text<'a>(value: Option<&'a str>, field: &str) -> ValidationResult<&'a str> {
	match value.map(str::trim) {
		Some(text) if !text.is_empty() => Ok(text),
		_ => Err(ValidationError::missing(field)),
	}
}

/// Checks that a coordinate pair lies on the globe
pub fn require_coordinates(latitude: f64, longitude: f64) -> ValidationResult<()> {
	if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
		return Err(ValidationError::invalid(
			"latitude",
			format!("{} is outside [-90, 90]", latitude),
		));
	}
	if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
		return Err(ValidationError::invalid(
			"longitude",
			format!("{} is outside [-180, 180]", longitude),
		));
	}
	Ok(())
}
