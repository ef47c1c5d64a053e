//! Solar ROI Library
//!
//! Estimates the return on investment of a residential solar installation:
//! an address is geocoded, its photovoltaic yield modeled, local installation
//! and electricity prices looked up, and the payback period narrated.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

// Core domain types
pub use solar_roi_types::{
	serde_json, BrowseRequest, DescribeRequest, GeoResult, Geocoder, NarrativeContext, PriceKind,
	PriceQuote, ProductionEstimate, ProductionEstimator, ProductionRequest, ProviderError,
	ProviderResult, RoiFigures, RoiReport, RoiRequest, SearchMode, SnippetSearch, TextCompletion,
	ValidationError,
};

// Service layer
pub use solar_roi_service::{
	compute_roi, parse_price, EstimationPolicy, PriceError, RoiCalculationError, RoiService,
	RoiServiceError, RoiServiceTrait,
};

// Adapters
pub use solar_roi_adapters::{GoogleGeocoder, GoogleSearch, OpenAiCompletion, PvgisEstimator};

// API layer
pub use solar_roi_api::{create_router, with_rate_limit, AppState};

// Config
pub use solar_roi_config::{
	load_config, load_config_from, log_provider_endpoints, log_service_info, log_service_shutdown,
	log_startup_complete, Settings, ENV_PREFIX,
};

pub mod models {
	pub use solar_roi_types::*;
}

pub mod config {
	pub use solar_roi_config::*;
}

pub mod adapters {
	pub use solar_roi_adapters::*;
}

pub mod api {
	pub use solar_roi_api::*;
}

pub mod service {
	pub use solar_roi_service::*;
}

pub mod mocks;

pub use async_trait;

/// Builder wiring settings and providers into a runnable service
///
/// Providers not set explicitly are built from the settings, which resolves
/// their credentials at `start()`.
#[derive(Default)]
pub struct RoiBuilder {
	settings: Option<Settings>,
	geocoder: Option<Arc<dyn Geocoder>>,
	production: Option<Arc<dyn ProductionEstimator>>,
	search: Option<Arc<dyn SnippetSearch>>,
	completion: Option<Arc<dyn TextCompletion>>,
}

impl RoiBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a builder from loaded configuration
	pub fn from_config(settings: Settings) -> Self {
		Self::new().with_settings(settings)
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
		self.geocoder = Some(geocoder);
		self
	}

	pub fn with_production(mut self, production: Arc<dyn ProductionEstimator>) -> Self {
		self.production = Some(production);
		self
	}

	pub fn with_search(mut self, search: Arc<dyn SnippetSearch>) -> Self {
		self.search = Some(search);
		self
	}

	pub fn with_completion(mut self, completion: Arc<dyn TextCompletion>) -> Self {
		self.completion = Some(completion);
		self
	}

	/// Initialize tracing with configuration-based settings
	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error>> {
		use solar_roi_config::LogFormat;

		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
		}

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	/// Build the service and return the configured router with state
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.unwrap_or_default();
		settings
			.validate()
			.map_err(|e| format!("Invalid configuration: {}", e))?;

		let geocoder: Arc<dyn Geocoder> = match self.geocoder {
			Some(geocoder) => geocoder,
			None => Arc::new(GoogleGeocoder::new(settings.geocoding_runtime()?)?),
		};
		let production: Arc<dyn ProductionEstimator> = match self.production {
			Some(production) => production,
			None => Arc::new(PvgisEstimator::new(settings.production_runtime())?),
		};
		let search: Arc<dyn SnippetSearch> = match self.search {
			Some(search) => search,
			None => Arc::new(GoogleSearch::new(settings.search_runtime()?)?),
		};
		let completion: Arc<dyn TextCompletion> = match self.completion {
			Some(completion) => completion,
			None => Arc::new(OpenAiCompletion::new(settings.completion_runtime()?)?),
		};

		info!(
			"Providers: geocoding={}, production={}, search={}, completion={}",
			geocoder.name(),
			production.name(),
			search.name(),
			completion.name()
		);

		let policy = EstimationPolicy {
			system_loss_percent: settings.providers.production.system_loss_percent,
		};
		let roi_service = RoiService::new(geocoder, production, search, completion, policy);
		let app_state = AppState::new(Arc::new(roi_service) as Arc<dyn RoiServiceTrait>);

		let mut router = create_router().with_state(app_state.clone());
		let rate_limiting = &settings.environment.rate_limiting;
		if rate_limiting.enabled {
			info!(
				"Rate limit: {} requests per minute",
				rate_limiting.requests_per_minute
			);
			router = with_rate_limit(router, rate_limiting.requests_per_minute);
		}

		Ok((router, app_state))
	}

	/// Start the complete server
	///
	/// Loads `.env`, the configuration file and environment overrides (unless
	/// settings were provided), initializes tracing, then binds and serves
	/// until Ctrl+C.
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		let using_provided_settings = self.settings.is_some();
		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_settings("config/config")?,
		};

		self.init_tracing_from_settings(&settings)?;

		log_service_info();
		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file or defaults"
			}
		);
		log_provider_endpoints(&settings);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		self.settings = Some(settings);
		let (app, _) = self.start().await?;

		let listener = tokio::net::TcpListener::bind(addr).await?;

		log_startup_complete(&bind_addr);
		if cfg!(feature = "openapi") {
			info!("   GET  /swagger-ui");
			info!("   GET  /api-docs/openapi.json");
		}

		axum::serve(listener, app)
			.with_graceful_shutdown(shutdown_signal())
			.await?;

		log_service_shutdown();
		Ok(())
	}
}

/// Load settings from the given file stem and `SOLAR_ROI__*` overrides
///
/// A missing file falls back to defaults; an unreadable or mistyped one is an error.
fn load_settings(path: &str) -> Result<Settings, String> {
	load_config_from(path).map_err(|e| {
		format!(
			"Failed to load configuration from '{}' and {}__* environment overrides: {}",
			path, ENV_PREFIX, e
		)
	})
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!("Failed to listen for shutdown signal: {}", e);
	}
}
