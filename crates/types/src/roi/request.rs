//! ROI request bodies and validation

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::NarrativeContext;
use crate::validation::{require_text, ValidationError, ValidationResult};

/// Body of `POST /api/browse`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BrowseRequest {
	pub address: Option<String>,
	/// Peak power in kW
	pub peakpower: Option<f64>,
}

/// Validated browse input
#[derive(Debug, Clone, PartialEq)]
pub struct RoiRequest {
	pub address: String,
	pub peak_power_kw: f64,
}

impl BrowseRequest {
	pub fn validate(&self) -> ValidationResult<RoiRequest> {
		let address = require_text(self.address.as_deref(), "address")?;
		let peak_power_kw = self
			.peakpower
			.ok_or_else(|| ValidationError::missing("peakpower"))?;

		if !peak_power_kw.is_finite() || peak_power_kw <= 0.0 {
			return Err(ValidationError::invalid(
				"peakpower",
				"peak power must be a positive number of kW",
			));
		}

		Ok(RoiRequest {
			address: address.to_string(),
			peak_power_kw,
		})
	}
}

/// Body of `POST /api/openai/describe`
///
/// Every figure defaults to zero and the country to an empty string, so a
/// caller may describe partial results.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DescribeRequest {
	pub prompt: Option<String>,
	#[serde(default)]
	pub roi_int: i64,
	#[serde(default)]
	pub yearly_production: f64,
	#[serde(default)]
	pub peakpower: f64,
	#[serde(default)]
	pub yearly_production_in_dollars: f64,
	#[serde(default)]
	pub total_solar_cost: f64,
	#[serde(default)]
	pub country: String,
}

impl DescribeRequest {
	/// Narrative inputs, provided the prompt asks for a description
	pub fn validate(&self) -> ValidationResult<NarrativeContext> {
		let prompt = require_text(self.prompt.as_deref(), "prompt")?;
		if !prompt.to_lowercase().contains("describe") {
			return Err(ValidationError::UnsupportedPrompt {
				reason: "only prompts asking to describe the ROI are supported".to_string(),
			});
		}

		Ok(NarrativeContext {
			roi_years: self.roi_int,
			yearly_kwh: self.yearly_production,
			peak_power_kw: self.peakpower,
			yearly_production_usd: self.yearly_production_in_dollars,
			total_cost_usd: self.total_solar_cost,
			country: self.country.clone(),
		})
	}
}
