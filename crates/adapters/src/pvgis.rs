//! PVGIS PVcalc adapter
//!
//! Only the fixed-mount scenario is read: `outputs.monthly.fixed[].E_m` keyed by
//! `month`, and `outputs.totals.fixed.E_y`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use solar_roi_types::{
	ProductionEstimate, ProductionEstimator, ProductionRequest, ProductionRuntimeConfig,
	ProviderError, ProviderResult,
};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::http::{
	build_client, build_url, error_detail, execute_with_policy, read_body, status_error,
};

const PROVIDER: &str = "pvgis";

#[derive(Debug, Deserialize)]
struct PvcalcResponse {
	outputs: Option<PvcalcOutputs>,
}

#[derive(Debug, Deserialize)]
struct PvcalcOutputs {
	monthly: Option<MonthlyOutputs>,
	totals: Option<TotalOutputs>,
}

#[derive(Debug, Deserialize)]
struct MonthlyOutputs {
	fixed: Option<Vec<MonthlyFigure>>,
}

#[derive(Debug, Deserialize)]
struct MonthlyFigure {
	month: u8,
	#[serde(rename = "E_m")]
	energy_kwh: f64,
}

#[derive(Debug, Deserialize)]
struct TotalOutputs {
	fixed: Option<FixedTotals>,
}

#[derive(Debug, Deserialize)]
struct FixedTotals {
	#[serde(rename = "E_y")]
	yearly_kwh: Option<f64>,
}

fn unavailable(reason: impl Into<String>) -> ProviderError {
	ProviderError::DataUnavailable {
		reason: reason.into(),
	}
}

fn parse_pvcalc_body(body: &str) -> ProviderResult<ProductionEstimate> {
	let response: PvcalcResponse = serde_json::from_str(body)
		.map_err(|e| unavailable(format!("Failed to parse PVcalc response: {}", e)))?;

	let outputs = response
		.outputs
		.ok_or_else(|| unavailable("response has no outputs"))?;

	let monthly = outputs
		.monthly
		.and_then(|monthly| monthly.fixed)
		.ok_or_else(|| unavailable("response has no outputs.monthly.fixed"))?;
	let yearly_kwh = outputs
		.totals
		.and_then(|totals| totals.fixed)
		.and_then(|fixed| fixed.yearly_kwh)
		.ok_or_else(|| unavailable("response has no outputs.totals.fixed.E_y"))?;

	let monthly_kwh: BTreeMap<u8, f64> = monthly
		.into_iter()
		.filter(|figure| (1..=12).contains(&figure.month))
		.map(|figure| (figure.month, figure.energy_kwh))
		.collect();

	let estimate = ProductionEstimate::new(yearly_kwh, monthly_kwh);
	if !estimate.is_complete() {
		return Err(unavailable(format!(
			"expected 12 monthly figures, got {}",
			estimate.monthly_kwh.len()
		)));
	}

	Ok(estimate)
}

/// Production estimator backed by the PVGIS PVcalc service
#[derive(Debug)]
pub struct PvgisEstimator {
	config: ProductionRuntimeConfig,
	client: Client,
}

impl PvgisEstimator {
	pub fn new(config: ProductionRuntimeConfig) -> ProviderResult<Self> {
		Ok(Self::with_client(config, build_client()?))
	}

	pub fn with_client(config: ProductionRuntimeConfig, client: Client) -> Self {
		Self { config, client }
	}
}

#[async_trait]
impl ProductionEstimator for PvgisEstimator {
	fn name(&self) -> &'static str {
		PROVIDER
	}

	async fn estimate(&self, request: &ProductionRequest) -> ProviderResult<ProductionEstimate> {
		let latitude = request.latitude.to_string();
		let longitude = request.longitude.to_string();
		let peak_power = request.peak_power_kw.to_string();
		let loss = request.system_loss_percent.to_string();
		let url = build_url(
			&self.config.endpoint,
			&[
				("lat", latitude.as_str()),
				("lon", longitude.as_str()),
				("peakpower", peak_power.as_str()),
				("loss", loss.as_str()),
				("outputformat", "json"),
			],
		)?;

		debug!(
			"Requesting PVcalc for ({}, {}) at {} kW, {}% loss",
			latitude, longitude, peak_power, loss
		);

		let estimate = execute_with_policy(PROVIDER, &self.config.policy, || {
			let request = self.client.get(url.clone());
			async move {
				let (status, body) = read_body(request.send().await?).await?;
				if status.is_client_error() && status.as_u16() != 429 {
					let reason = error_detail(&body)
						.unwrap_or_else(|| format!("PVcalc returned HTTP {}", status.as_u16()));
					return Err(unavailable(reason));
				}
				if !status.is_success() {
					return Err(status_error(status, &body));
				}
				parse_pvcalc_body(&body)
			}
		})
		.await
		.map_err(|error| match error {
			ProviderError::HttpStatus {
				status_code,
				reason,
			} => unavailable(format!("PVcalc returned HTTP {}: {}", status_code, reason)),
			other => other,
		})?;

		info!(
			"PVcalc estimate for ({}, {}): {:.1} kWh/year",
			latitude, longitude, estimate.yearly_kwh
		);

		Ok(estimate)
	}
}
