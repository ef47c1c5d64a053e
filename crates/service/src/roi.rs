//! ROI arithmetic

use solar_roi_types::RoiFigures;
use thiserror::Error;

const WATTS_PER_KILOWATT: f64 = 1000.0;

#[derive(Debug, Error, PartialEq)]
pub enum RoiCalculationError {
	#[error("ROI is undefined: yearly production is worth {yearly_production_usd} USD")]
	UndefinedRoi { yearly_production_usd: f64 },
}

/// Compute installed cost, yearly production value and whole years to break even
///
/// `roi_years` is truncated toward zero.
pub fn compute_roi(
	peak_power_kw: f64,
	cost_per_watt_usd: f64,
	price_per_kwh_usd: f64,
	yearly_kwh: f64,
) -> Result<RoiFigures, RoiCalculationError> {
	let cost_per_kw = cost_per_watt_usd * WATTS_PER_KILOWATT;
	let total_cost_usd = cost_per_kw * peak_power_kw;
	let yearly_production_usd = yearly_kwh * price_per_kwh_usd;

	if !yearly_production_usd.is_finite() || yearly_production_usd <= 0.0 {
		return Err(RoiCalculationError::UndefinedRoi {
			yearly_production_usd,
		});
	}

	let years = total_cost_usd / yearly_production_usd;
	if !years.is_finite() || years < 0.0 {
		return Err(RoiCalculationError::UndefinedRoi {
			yearly_production_usd,
		});
	}

	Ok(RoiFigures {
		peak_power_kw,
		cost_per_watt_usd,
		total_cost_usd,
		price_per_kwh_usd,
		yearly_kwh,
		yearly_production_usd,
		roi_years: years.trunc() as u64,
	})
}
