//! Geocoding request bodies

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::validation::{require_text, ValidationResult};

/// Body of `POST /get_coordinates`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CoordinatesRequest {
	pub address: Option<String>,
}

impl CoordinatesRequest {
	/// Trimmed address, or a validation error when it is missing or blank
	pub fn validate(&self) -> ValidationResult<&str> {
		require_text(self.address.as_deref(), "address")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ValidationError;

	#[test]
	fn test_missing_address_is_rejected() {
		let request: CoordinatesRequest = serde_json::from_str("{}").unwrap();
		assert_eq!(
			request.validate(),
			Err(ValidationError::missing("address"))
		);
	}

	#[test]
	fn test_address_is_trimmed() {
		let request = CoordinatesRequest {
			address: Some(" 1600 Amphitheatre Parkway ".to_string()),
		};
		assert_eq!(request.validate(), Ok("1600 Amphitheatre Parkway"));
	}
}
