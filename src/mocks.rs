//! In-memory providers for demos and testing
//!
//! Each fake counts its calls so tests can assert which pipeline stages ran.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use solar_roi_types::{
	GeoResult, Geocoder, ProductionEstimate, ProductionEstimator, ProductionRequest,
	ProviderError, ProviderResult, SearchMode, SnippetSearch, TextCompletion,
};

/// Shared call counter
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
	pub fn hit(&self) {
		self.0.fetch_add(1, Ordering::SeqCst);
	}

	pub fn count(&self) -> usize {
		self.0.load(Ordering::SeqCst)
	}
}

/// Geocoder resolving every address to one fixed location
#[derive(Debug, Clone)]
pub struct MockGeocoder {
	pub location: Option<GeoResult>,
	pub calls: CallCounter,
}

impl MockGeocoder {
	pub fn new(latitude: f64, longitude: f64, country: Option<&str>) -> Self {
		Self {
			location: Some(GeoResult::new(
				"",
				latitude,
				longitude,
				country.map(str::to_string),
			)),
			calls: CallCounter::default(),
		}
	}

	/// Geocoder without any match
	pub fn empty() -> Self {
		Self {
			location: None,
			calls: CallCounter::default(),
		}
	}
}

impl Default for MockGeocoder {
	fn default() -> Self {
		Self::new(37.4224, -122.0842, Some("United States"))
	}
}

#[async_trait]
impl Geocoder for MockGeocoder {
	fn name(&self) -> &'static str {
		"mock-geocoder"
	}

	async fn geocode(&self, address: &str) -> ProviderResult<GeoResult> {
		self.calls.hit();
		match &self.location {
			Some(location) => Ok(GeoResult {
				address: address.to_string(),
				..location.clone()
			}),
			None => Err(ProviderError::no_results(self.name(), address)),
		}
	}

	async fn country_for_coordinates(
		&self,
		_latitude: f64,
		_longitude: f64,
	) -> ProviderResult<Option<String>> {
		self.calls.hit();
		Ok(self
			.location
			.as_ref()
			.and_then(|location| location.country.clone()))
	}
}

/// Production model with a flat monthly yield
#[derive(Debug, Clone)]
pub struct MockEstimator {
	/// Yearly kWh per installed kW
	pub yield_per_kw: f64,
	pub calls: CallCounter,
}

impl MockEstimator {
	pub fn new(yield_per_kw: f64) -> Self {
		Self {
			yield_per_kw,
			calls: CallCounter::default(),
		}
	}
}

impl Default for MockEstimator {
	fn default() -> Self {
		Self::new(1400.0)
	}
}

#[async_trait]
impl ProductionEstimator for MockEstimator {
	fn name(&self) -> &'static str {
		"mock-estimator"
	}

	async fn estimate(&self, request: &ProductionRequest) -> ProviderResult<ProductionEstimate> {
		self.calls.hit();
		let yearly_kwh = self.yield_per_kw * request.peak_power_kw;
		let monthly: BTreeMap<u8, f64> = (1..=12).map(|month| (month, yearly_kwh / 12.0)).collect();
		Ok(ProductionEstimate::new(yearly_kwh, monthly))
	}
}

/// Search answering a canned snippet per mode
#[derive(Debug, Clone, Default)]
pub struct MockSearch {
	pub calls: CallCounter,
}

#[async_trait]
impl SnippetSearch for MockSearch {
	fn name(&self) -> &'static str {
		"mock-search"
	}

	async fn search(&self, query: &str, mode: SearchMode) -> ProviderResult<String> {
		self.calls.hit();
		Ok(match mode {
			SearchMode::General => format!("<b>{}</b>: about $2.50 per watt installed", query),
			SearchMode::Electricity => format!("<b>{}</b>: average $0.15 per kWh", query),
		})
	}
}

/// Completion replying by prompt content
///
/// Installation prompts get `installation_reply`, electricity prompts get
/// `electricity_reply`, everything else gets a fixed narrative.
#[derive(Debug, Clone)]
pub struct MockCompletion {
	pub installation_reply: String,
	pub electricity_reply: String,
	pub calls: CallCounter,
}

impl MockCompletion {
	pub fn new(installation_reply: &str, electricity_reply: &str) -> Self {
		Self {
			installation_reply: installation_reply.to_string(),
			electricity_reply: electricity_reply.to_string(),
			calls: CallCounter::default(),
		}
	}
}

impl Default for MockCompletion {
	fn default() -> Self {
		Self::new("2.50", "0.15")
	}
}

#[async_trait]
impl TextCompletion for MockCompletion {
	fn name(&self) -> &'static str {
		"mock-completion"
	}

	async fn complete(&self, prompt: &str) -> ProviderResult<String> {
		self.calls.hit();
		let reply = if prompt.contains("$ per watt") {
			self.installation_reply.clone()
		} else if prompt.contains("$ per kWh") {
			self.electricity_reply.clone()
		} else {
			"A solid long-term investment with a payback well inside the panel lifetime."
				.to_string()
		};
		Ok(reply)
	}
}
