//! ROI estimation pipeline
//!
//! Geocoding runs first because every later stage needs its output. The
//! production estimate (needs coordinates) and both price lookups (need only
//! the country) then run concurrently; the first failure cancels the others.
//! The narrative is generated last from a copy of the computed figures.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use solar_roi_types::production::DEFAULT_SYSTEM_LOSS_PERCENT;
use solar_roi_types::{
	GeoResult, Geocoder, NarrativeContext, PriceKind, ProductionEstimate, ProductionEstimator,
	ProductionRequest, ProviderError, RoiReport, RoiRequest, SearchMode, SnippetSearch,
	TextCompletion, ValidationError,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::narrative::{NarrativeError, NarrativeService};
use crate::price::{PriceError, PriceExtractor};
use crate::roi::{compute_roi, RoiCalculationError};

/// Failures of the estimation pipeline, tagged with the stage that failed
#[derive(Debug, Error)]
pub enum RoiServiceError {
	#[error("invalid request: {0}")]
	Validation(#[from] ValidationError),
	#[error("geocoding failed: {0}")]
	Geocoding(ProviderError),
	#[error("no country found for {location}")]
	CountryNotFound { location: String },
	#[error("production estimate failed: {0}")]
	Production(ProviderError),
	#[error("search failed: {0}")]
	Search(ProviderError),
	#[error("price extraction failed: {0}")]
	PriceExtraction(ProviderError),
	#[error("installation cost lookup failed: {0}")]
	InstallationCost(PriceError),
	#[error("electricity price lookup failed: {0}")]
	ElectricityPrice(PriceError),
	#[error("ROI calculation failed: {0}")]
	Roi(#[from] RoiCalculationError),
	#[error("narrative generation failed: {0}")]
	Narrative(#[from] NarrativeError),
}

impl RoiServiceError {
	/// Pipeline stage name used in logs
	pub fn stage(&self) -> &'static str {
		match self {
			RoiServiceError::Validation(_) => "validation",
			RoiServiceError::Geocoding(_) | RoiServiceError::CountryNotFound { .. } => "geocoding",
			RoiServiceError::Production(_) => "production",
			RoiServiceError::Search(_) => "search",
			RoiServiceError::PriceExtraction(_) => "price_extraction",
			RoiServiceError::InstallationCost(_) => "installation_cost",
			RoiServiceError::ElectricityPrice(_) => "electricity_price",
			RoiServiceError::Roi(_) => "roi",
			RoiServiceError::Narrative(_) => "narrative",
		}
	}

	fn price(kind: PriceKind, error: PriceError) -> Self {
		match kind {
			PriceKind::InstallationPerWatt => RoiServiceError::InstallationCost(error),
			PriceKind::ElectricityPerKwh => RoiServiceError::ElectricityPrice(error),
		}
	}
}

/// Pipeline knobs that are not provider configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimationPolicy {
	/// System loss passed to the production model, in percent
	pub system_loss_percent: f64,
}

impl Default for EstimationPolicy {
	fn default() -> Self {
		Self {
			system_loss_percent: DEFAULT_SYSTEM_LOSS_PERCENT,
		}
	}
}

/// Trait for the operations exposed over HTTP
#[async_trait]
pub trait RoiServiceTrait: Send + Sync {
	/// Forward geocode an address
	async fn geocode(&self, address: &str) -> Result<GeoResult, RoiServiceError>;

	/// Country containing a coordinate pair
	async fn country_for_coordinates(
		&self,
		latitude: f64,
		longitude: f64,
	) -> Result<String, RoiServiceError>;

	/// Production estimate with the configured system loss
	async fn estimate_production(
		&self,
		latitude: f64,
		longitude: f64,
		peak_power_kw: f64,
	) -> Result<ProductionEstimate, RoiServiceError>;

	/// First search snippet for `query`
	async fn search_snippet(&self, query: &str, mode: SearchMode) -> Result<String, RoiServiceError>;

	/// Search `query` and return the raw completion extracting its price
	async fn extract_price_text(
		&self,
		query: &str,
		mode: SearchMode,
	) -> Result<String, RoiServiceError>;

	/// Narrative for externally supplied figures
	async fn describe(&self, context: &NarrativeContext) -> Result<String, RoiServiceError>;

	/// Full pipeline from address and peak power to report
	async fn estimate_roi(&self, request: &RoiRequest) -> Result<RoiReport, RoiServiceError>;
}

#[derive(Clone)]
pub struct RoiService {
	geocoder: Arc<dyn Geocoder>,
	production: Arc<dyn ProductionEstimator>,
	prices: PriceExtractor,
	narrative: NarrativeService,
	policy: EstimationPolicy,
}

impl RoiService {
	pub fn new(
		geocoder: Arc<dyn Geocoder>,
		production: Arc<dyn ProductionEstimator>,
		search: Arc<dyn SnippetSearch>,
		completion: Arc<dyn TextCompletion>,
		policy: EstimationPolicy,
	) -> Self {
		Self {
			geocoder,
			production,
			prices: PriceExtractor::new(search, completion.clone()),
			narrative: NarrativeService::new(completion),
			policy,
		}
	}

	fn production_request(
		&self,
		latitude: f64,
		longitude: f64,
		peak_power_kw: f64,
	) -> Result<ProductionRequest, RoiServiceError> {
		let request = ProductionRequest::new(latitude, longitude, peak_power_kw)
			.with_system_loss(self.policy.system_loss_percent);
		request.validate()?;
		Ok(request)
	}
}

#[async_trait]
impl RoiServiceTrait for RoiService {
	async fn geocode(&self, address: &str) -> Result<GeoResult, RoiServiceError> {
		self.geocoder
			.geocode(address)
			.await
			.map_err(RoiServiceError::Geocoding)
	}

	async fn country_for_coordinates(
		&self,
		latitude: f64,
		longitude: f64,
	) -> Result<String, RoiServiceError> {
		solar_roi_types::validation::require_coordinates(latitude, longitude)?;

		self.geocoder
			.country_for_coordinates(latitude, longitude)
			.await
			.map_err(RoiServiceError::Geocoding)?
			.ok_or_else(|| RoiServiceError::CountryNotFound {
				location: format!("({}, {})", latitude, longitude),
			})
	}

	async fn estimate_production(
		&self,
		latitude: f64,
		longitude: f64,
		peak_power_kw: f64,
	) -> Result<ProductionEstimate, RoiServiceError> {
		let request = self.production_request(latitude, longitude, peak_power_kw)?;
		self.production
			.estimate(&request)
			.await
			.map_err(RoiServiceError::Production)
	}

	async fn search_snippet(
		&self,
		query: &str,
		mode: SearchMode,
	) -> Result<String, RoiServiceError> {
		self.prices
			.snippet(query, mode)
			.await
			.map_err(RoiServiceError::Search)
	}

	async fn extract_price_text(
		&self,
		query: &str,
		mode: SearchMode,
	) -> Result<String, RoiServiceError> {
		let snippet = self.search_snippet(query, mode).await?;
		let raw = self
			.prices
			.extract_from_snippet(PriceKind::for_mode(mode), &snippet)
			.await
			.map_err(RoiServiceError::PriceExtraction)?;

		info!("Completion for '{}' ({} engine): raw='{}'", query, mode, raw);
		Ok(raw)
	}

	async fn describe(&self, context: &NarrativeContext) -> Result<String, RoiServiceError> {
		Ok(self.narrative.describe(context).await?)
	}

	async fn estimate_roi(&self, request: &RoiRequest) -> Result<RoiReport, RoiServiceError> {
		let started = Instant::now();
		info!(
			"Estimating ROI for '{}' at {} kW",
			request.address, request.peak_power_kw
		);

		let location = self.geocode(&request.address).await?;
		let country = location
			.country
			.clone()
			.filter(|country| !country.trim().is_empty())
			.ok_or_else(|| RoiServiceError::CountryNotFound {
				location: format!("'{}'", request.address),
			})?;
		let production_request = self.production_request(
			location.latitude,
			location.longitude,
			request.peak_power_kw,
		)?;
		debug!(
			"Geocoded '{}' to ({}, {}) in {}",
			request.address, location.latitude, location.longitude, country
		);

		let (production, installation, electricity) = tokio::try_join!(
			async {
				self.production
					.estimate(&production_request)
					.await
					.map_err(RoiServiceError::Production)
			},
			async {
				let kind = PriceKind::InstallationPerWatt;
				self.prices
					.quote(kind, &country)
					.await
					.map_err(|e| RoiServiceError::price(kind, e))
			},
			async {
				let kind = PriceKind::ElectricityPerKwh;
				self.prices
					.quote(kind, &country)
					.await
					.map_err(|e| RoiServiceError::price(kind, e))
			},
		)
		.inspect_err(|e| {
			warn!(
				"ROI pipeline for '{}' failed at {}: {}",
				request.address,
				e.stage(),
				e
			)
		})?;

		let figures = compute_roi(
			request.peak_power_kw,
			installation.value_usd,
			electricity.value_usd,
			production.yearly_kwh,
		)?;

		let context = NarrativeContext::from_figures(&figures, country.as_str());
		let comment = self.describe(&context).await?;

		info!(
			"ROI for '{}': {} years (cost ${:.2}, ${:.2}/year) in {}ms",
			request.address,
			figures.roi_years,
			figures.total_cost_usd,
			figures.yearly_production_usd,
			started.elapsed().as_millis()
		);

		Ok(RoiReport::assemble(
			&location,
			&country,
			&production,
			&figures,
			comment,
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use mockall::mock;
	use solar_roi_types::ProviderResult;
	use std::collections::BTreeMap;

	mock! {
		pub TestGeocoder {}

		#[async_trait]
		impl Geocoder for TestGeocoder {
			fn name(&self) -> &'static str;
			async fn geocode(&self, address: &str) -> ProviderResult<GeoResult>;
			async fn country_for_coordinates(
				&self,
				latitude: f64,
				longitude: f64,
			) -> ProviderResult<Option<String>>;
		}
	}

	mock! {
		pub TestEstimator {}

		#[async_trait]
		impl ProductionEstimator for TestEstimator {
			fn name(&self) -> &'static str;
			async fn estimate(&self, request: &ProductionRequest) -> ProviderResult<ProductionEstimate>;
		}
	}

	mock! {
		pub TestSearch {}

		#[async_trait]
		impl SnippetSearch for TestSearch {
			fn name(&self) -> &'static str;
			async fn search(&self, query: &str, mode: SearchMode) -> ProviderResult<String>;
		}
	}

	mock! {
		pub TestCompletion {}

		#[async_trait]
		impl TextCompletion for TestCompletion {
			fn name(&self) -> &'static str;
			async fn complete(&self, prompt: &str) -> ProviderResult<String>;
		}
	}

	impl std::fmt::Debug for MockTestGeocoder {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.write_str("MockTestGeocoder")
		}
	}

	impl std::fmt::Debug for MockTestEstimator {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.write_str("MockTestEstimator")
		}
	}

	impl std::fmt::Debug for MockTestSearch {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.write_str("MockTestSearch")
		}
	}

	impl std::fmt::Debug for MockTestCompletion {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.write_str("MockTestCompletion")
		}
	}

	const ADDRESS: &str = "1600 Amphitheatre Parkway";

	fn geocoder_for_us() -> MockTestGeocoder {
		let mut geocoder = MockTestGeocoder::new();
		geocoder.expect_geocode().times(1).returning(|address| {
			Ok(GeoResult::new(
				address,
				37.42,
				-122.08,
				Some("United States".to_string()),
			))
		});
		geocoder
	}

	fn estimator_with_yearly(yearly_kwh: f64) -> MockTestEstimator {
		let mut estimator = MockTestEstimator::new();
		estimator
			.expect_estimate()
			.times(1)
			.returning(move |request| {
				assert_eq!(request.system_loss_percent, 14.0);
				assert_eq!(request.peak_power_kw, 5.0);
				let monthly: BTreeMap<u8, f64> = (1..=12).map(|m| (m, yearly_kwh / 12.0)).collect();
				Ok(ProductionEstimate::new(yearly_kwh, monthly))
			});
		estimator
	}

	fn search_by_mode() -> MockTestSearch {
		let mut search = MockTestSearch::new();
		search.expect_search().returning(|query, mode| match mode {
			SearchMode::General => {
				assert_eq!(query, "solar installation cost in United States");
				Ok("Installed cost averages <b>$2.50</b> per watt".to_string())
			},
			SearchMode::Electricity => {
				assert_eq!(query, "electricity cost in United States");
				Ok("Residential electricity averages 15 cents per kWh".to_string())
			},
		});
		search
	}

	fn completion_with(installation: &'static str, electricity: &'static str) -> MockTestCompletion {
		let mut completion = MockTestCompletion::new();
		completion.expect_complete().returning(move |prompt| {
			if prompt.contains("$ per watt") {
				Ok(installation.to_string())
			} else if prompt.contains("$ per kWh") {
				Ok(electricity.to_string())
			} else {
				Ok(format!("Great investment! {}", prompt.len()))
			}
		});
		completion
	}

	fn service(
		geocoder: MockTestGeocoder,
		estimator: MockTestEstimator,
		search: MockTestSearch,
		completion: MockTestCompletion,
	) -> RoiService {
		RoiService::new(
			Arc::new(geocoder),
			Arc::new(estimator),
			Arc::new(search),
			Arc::new(completion),
			EstimationPolicy::default(),
		)
	}

	fn request() -> RoiRequest {
		RoiRequest {
			address: ADDRESS.to_string(),
			peak_power_kw: 5.0,
		}
	}

	#[tokio::test]
	async fn test_reference_scenario_end_to_end() {
		let service = service(
			geocoder_for_us(),
			estimator_with_yearly(7000.0),
			search_by_mode(),
			completion_with("2.50", "0.15"),
		);

		let report = service.estimate_roi(&request()).await.unwrap();

		assert_eq!(report.solar_cost_usd, 12500.0);
		assert!((report.yearly_production_usd - 1050.0).abs() < 1e-9);
		assert_eq!(report.roi_years, 11);
		assert_eq!(report.yearly_kwh, 7000.0);
		assert_eq!(report.monthly_kwh.len(), 12);
		assert_eq!(report.peak_power, 5.0);
		assert_eq!(report.address, ADDRESS);
		assert_eq!(report.country, "United States");
		assert_eq!(report.cost_per_watt_usd, 2.5);
		assert_eq!(report.price_per_kwh_usd, 0.15);
		assert!(report.comment.starts_with("Great investment!"));
	}

	#[tokio::test]
	async fn test_narrative_does_not_change_figures() {
		let mut completion = MockTestCompletion::new();
		completion.expect_complete().returning(|prompt| {
			if prompt.contains("$ per watt") {
				Ok("$2.50".to_string())
			} else if prompt.contains("$ per kWh") {
				Ok("0.15".to_string())
			} else {
				Ok("ROI is 2 years and it costs $1".to_string())
			}
		});
		let service = service(
			geocoder_for_us(),
			estimator_with_yearly(7000.0),
			search_by_mode(),
			completion,
		);

		let report = service.estimate_roi(&request()).await.unwrap();
		assert_eq!(report.roi_years, 11);
		assert_eq!(report.solar_cost_usd, 12500.0);
		assert_eq!(report.comment, "ROI is 2 years and it costs $1");
	}

	#[tokio::test]
	async fn test_non_numeric_cost_is_typed_parse_error() {
		let service = service(
			geocoder_for_us(),
			estimator_with_yearly(7000.0),
			search_by_mode(),
			completion_with("around $2.50", "0.15"),
		);

		let error = service.estimate_roi(&request()).await.unwrap_err();
		match error {
			RoiServiceError::InstallationCost(PriceError::Parse { raw }) => {
				assert_eq!(raw, "around $2.50")
			},
			other => panic!("unexpected error: {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_zero_production_is_undefined_roi() {
		let service = service(
			geocoder_for_us(),
			estimator_with_yearly(0.0),
			search_by_mode(),
			completion_with("2.50", "0.15"),
		);

		let error = service.estimate_roi(&request()).await.unwrap_err();
		assert!(matches!(
			error,
			RoiServiceError::Roi(RoiCalculationError::UndefinedRoi { .. })
		));
		assert_eq!(error.stage(), "roi");
	}

	#[tokio::test]
	async fn test_missing_country_stops_before_other_stages() {
		let mut geocoder = MockTestGeocoder::new();
		geocoder
			.expect_geocode()
			.returning(|address| Ok(GeoResult::new(address, 0.5, -30.0, None)));
		let mut estimator = MockTestEstimator::new();
		estimator.expect_estimate().never();
		let mut search = MockTestSearch::new();
		search.expect_search().never();
		let mut completion = MockTestCompletion::new();
		completion.expect_complete().never();

		let error = service(geocoder, estimator, search, completion)
			.estimate_roi(&request())
			.await
			.unwrap_err();
		assert!(matches!(error, RoiServiceError::CountryNotFound { .. }));
	}

	#[tokio::test]
	async fn test_geocoding_failure_keeps_provider_status() {
		let mut geocoder = MockTestGeocoder::new();
		geocoder
			.expect_geocode()
			.returning(|_| Err(ProviderError::http_failure(403, "REQUEST_DENIED")));
		let mut estimator = MockTestEstimator::new();
		estimator.expect_estimate().never();

		let error = service(
			geocoder,
			estimator,
			MockTestSearch::new(),
			MockTestCompletion::new(),
		)
		.estimate_roi(&request())
		.await
		.unwrap_err();

		match error {
			RoiServiceError::Geocoding(provider) => assert_eq!(provider.status_code(), Some(403)),
			other => panic!("unexpected error: {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_production_failure_is_tagged() {
		let mut estimator = MockTestEstimator::new();
		estimator.expect_estimate().returning(|_| {
			Err(ProviderError::DataUnavailable {
				reason: "response has no outputs".to_string(),
			})
		});

		let error = service(
			geocoder_for_us(),
			estimator,
			search_by_mode(),
			completion_with("2.50", "0.15"),
		)
		.estimate_roi(&request())
		.await
		.unwrap_err();

		assert!(matches!(
			error,
			RoiServiceError::Production(ProviderError::DataUnavailable { .. })
		));
	}

	#[tokio::test]
	async fn test_extract_price_text_uses_unit_of_mode() {
		let mut search = MockTestSearch::new();
		search
			.expect_search()
			.times(1)
			.returning(|_, mode| {
				assert_eq!(mode, SearchMode::Electricity);
				Ok("15 cents per kWh".to_string())
			});
		let mut completion = MockTestCompletion::new();
		completion.expect_complete().times(1).returning(|prompt| {
			assert!(prompt.contains("$ per kWh"));
			assert!(prompt.ends_with("15 cents per kWh"));
			Ok("0.15".to_string())
		});

		let service = service(
			MockTestGeocoder::new(),
			MockTestEstimator::new(),
			search,
			completion,
		);
		let raw = service
			.extract_price_text("electricity cost in Spain", SearchMode::Electricity)
			.await
			.unwrap();
		assert_eq!(raw, "0.15");
	}

	#[tokio::test]
	async fn test_country_lookup_without_match() {
		let mut geocoder = MockTestGeocoder::new();
		geocoder
			.expect_country_for_coordinates()
			.returning(|_, _| Ok(None));

		let service = service(
			geocoder,
			MockTestEstimator::new(),
			MockTestSearch::new(),
			MockTestCompletion::new(),
		);

		assert!(matches!(
			service.country_for_coordinates(0.5, -30.0).await,
			Err(RoiServiceError::CountryNotFound { .. })
		));
		assert!(matches!(
			service.country_for_coordinates(120.0, 0.0).await,
			Err(RoiServiceError::Validation(_))
		));
	}

	#[tokio::test]
	async fn test_production_rejects_invalid_peak_power_without_calling_provider() {
		let mut estimator = MockTestEstimator::new();
		estimator.expect_estimate().never();

		let service = service(
			MockTestGeocoder::new(),
			estimator,
			MockTestSearch::new(),
			MockTestCompletion::new(),
		);

		assert!(matches!(
			service.estimate_production(37.42, -122.08, 0.0).await,
			Err(RoiServiceError::Validation(_))
		));
	}
}
