//! Production response for the API layer

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::ProductionEstimate;

/// Yearly and monthly yield in the legacy field names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EnergyProductionData {
	pub yearly_energy_production: f64,
	pub monthly_energy_production: BTreeMap<u8, f64>,
}

impl From<ProductionEstimate> for EnergyProductionData {
	fn from(estimate: ProductionEstimate) -> Self {
		Self {
			yearly_energy_production: estimate.yearly_kwh,
			monthly_energy_production: estimate.monthly_kwh,
		}
	}
}

/// Response body of `GET /api/pvgis/{lat}/{lon}/{peakpower}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProductionResponse {
	pub status: String,
	pub data: EnergyProductionData,
}

impl ProductionResponse {
	pub fn success(estimate: ProductionEstimate) -> Self {
		Self {
			status: "success".to_string(),
			data: estimate.into(),
		}
	}
}
