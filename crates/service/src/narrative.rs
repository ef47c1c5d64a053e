//! Narrative generation for computed ROI figures

use std::sync::Arc;

use solar_roi_types::{NarrativeContext, ProviderError, TextCompletion};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum NarrativeError {
	#[error("{0}")]
	Provider(#[from] ProviderError),
	#[error("completion returned an empty narrative")]
	Empty,
}

/// Advisory prompt embedding the figures
pub fn narrative_prompt(context: &NarrativeContext) -> String {
	format!(
		"Approach like an advisor and be cheerful. Start as if you are introducing the numbers to me. \
		 Do not answer me directly, just do what follows. Describe the return on investment for a \
		 solar panel installation based on these parameters and comment on whether the person \
		 should invest or not. \
		 Years until the investment is returned: {}, yearly production: {:.2} kWh, \
		 peak power: {:.2} kW, yearly production in dollars: ${:.2}, total solar cost: ${:.2}, \
		 country: {}.",
		context.roi_years,
		context.yearly_kwh,
		context.peak_power_kw,
		context.yearly_production_usd,
		context.total_cost_usd,
		context.country
	)
}

#[derive(Debug, Clone)]
pub struct NarrativeService {
	completion: Arc<dyn TextCompletion>,
}

impl NarrativeService {
	pub fn new(completion: Arc<dyn TextCompletion>) -> Self {
		Self { completion }
	}

	pub async fn describe(&self, context: &NarrativeContext) -> Result<String, NarrativeError> {
		let comment = self.completion.complete(&narrative_prompt(context)).await?;
		if comment.trim().is_empty() {
			return Err(NarrativeError::Empty);
		}

		debug!("Narrative for {}: {} chars", context.country, comment.len());
		Ok(comment)
	}
}
