//! ROI domain model

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub mod request;
pub mod response;

pub use request::{BrowseRequest, DescribeRequest, RoiRequest};
pub use response::RoiReport;

/// Numbers computed by the ROI stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RoiFigures {
	pub peak_power_kw: f64,
	pub cost_per_watt_usd: f64,
	/// Installed cost of the whole system
	pub total_cost_usd: f64,
	pub price_per_kwh_usd: f64,
	pub yearly_kwh: f64,
	/// Value of one year of production at the local electricity price
	pub yearly_production_usd: f64,
	/// Whole years until production value covers the installed cost
	pub roi_years: u64,
}

/// Figures embedded in the narrative prompt
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeContext {
	pub roi_years: i64,
	pub yearly_kwh: f64,
	pub peak_power_kw: f64,
	pub yearly_production_usd: f64,
	pub total_cost_usd: f64,
	pub country: String,
}

impl NarrativeContext {
	pub fn from_figures(figures: &RoiFigures, country: impl Into<String>) -> Self {
		Self {
			roi_years: i64::try_from(figures.roi_years).unwrap_or(i64::MAX),
			yearly_kwh: figures.yearly_kwh,
			peak_power_kw: figures.peak_power_kw,
			yearly_production_usd: figures.yearly_production_usd,
			total_cost_usd: figures.total_cost_usd,
			country: country.into(),
		}
	}
}
