//! ROI report returned by `POST /api/browse`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::RoiFigures;
use crate::{GeoResult, ProductionEstimate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RoiReport {
	pub solar_cost_usd: f64,
	pub yearly_production_usd: f64,
	pub roi_years: u64,
	pub yearly_kwh: f64,
	/// Month number (1-12) to kWh
	pub monthly_kwh: BTreeMap<u8, f64>,
	/// Peak power in kW
	pub peak_power: f64,
	pub address: String,
	pub latitude: f64,
	pub longitude: f64,
	pub country: String,
	pub cost_per_watt_usd: f64,
	pub price_per_kwh_usd: f64,
	/// Generated advisory text
	pub comment: String,
}

impl RoiReport {
	pub fn assemble(
		location: &GeoResult,
		country: &str,
		production: &ProductionEstimate,
		figures: &RoiFigures,
		comment: String,
	) -> Self {
		Self {
			solar_cost_usd: figures.total_cost_usd,
			yearly_production_usd: figures.yearly_production_usd,
			roi_years: figures.roi_years,
			yearly_kwh: figures.yearly_kwh,
			monthly_kwh: production.monthly_kwh.clone(),
			peak_power: figures.peak_power_kw,
			address: location.address.clone(),
			latitude: location.latitude,
			longitude: location.longitude,
			country: country.to_string(),
			cost_per_watt_usd: figures.cost_per_watt_usd,
			price_per_kwh_usd: figures.price_per_kwh_usd,
			comment,
		}
	}
}
