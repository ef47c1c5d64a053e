//! Solar production domain model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::validation::{require_coordinates, ValidationError, ValidationResult};

pub mod response;

pub use response::{EnergyProductionData, ProductionResponse};

/// System loss applied when none is configured, in percent
pub const DEFAULT_SYSTEM_LOSS_PERCENT: f64 = 14.0;

/// Inputs of a production estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionRequest {
	pub latitude: f64,
	pub longitude: f64,
	/// Nameplate capacity in kW
	pub peak_power_kw: f64,
	pub system_loss_percent: f64,
}

impl ProductionRequest {
	pub fn new(latitude: f64, longitude: f64, peak_power_kw: f64) -> Self {
		Self {
			latitude,
			longitude,
			peak_power_kw,
			system_loss_percent: DEFAULT_SYSTEM_LOSS_PERCENT,
		}
	}

	pub fn with_system_loss(mut self, system_loss_percent: f64) -> Self {
		self.system_loss_percent = system_loss_percent;
		self
	}

	pub fn validate(&self) -> ValidationResult<()> {
		require_coordinates(self.latitude, self.longitude)?;
		if !self.peak_power_kw.is_finite() || self.peak_power_kw <= 0.0 {
			return Err(ValidationError::invalid(
				"peakpower",
				"peak power must be a positive number of kW",
			));
		}
		if !(0.0..100.0).contains(&self.system_loss_percent) {
			return Err(ValidationError::invalid(
				"loss",
				format!(
					"system loss {}% is outside [0, 100)",
					self.system_loss_percent
				),
			));
		}
		Ok(())
	}
}

/// Modeled yield of a fixed-mount system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProductionEstimate {
	pub yearly_kwh: f64,
	/// Month number (1-12) to kWh
	pub monthly_kwh: BTreeMap<u8, f64>,
}

impl ProductionEstimate {
	pub fn new(yearly_kwh: f64, monthly_kwh: BTreeMap<u8, f64>) -> Self {
		Self {
			yearly_kwh,
			monthly_kwh,
		}
	}

	/// True when every month 1..=12 has a figure
	pub fn is_complete(&self) -> bool {
		(1..=12).all(|month| self.monthly_kwh.contains_key(&month))
	}
}
