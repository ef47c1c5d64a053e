//! Service startup logging for the solar ROI service

use crate::Settings;
use std::env;
use tracing::{info, warn};

/// Logs service information at startup
pub fn log_service_info() {
	// Use the root package name, not the current crate
	let service_name = "solar-roi";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Solar ROI Service Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs provider endpoints and where each credential comes from (never the value)
pub fn log_provider_endpoints(settings: &Settings) {
	let providers = &settings.providers;

	info!(
		"🗺️ Geocoding: {} (key from {})",
		providers.geocoding.endpoint,
		providers.geocoding.api_key.description()
	);
	info!(
		"☀️ Production model: {} (loss {}%)",
		providers.production.endpoint, providers.production.system_loss_percent
	);
	info!(
		"🔎 Search: {} (engines from {} / {})",
		providers.search.endpoint,
		providers.search.engine_id.description(),
		providers.search.electricity_engine_id.description()
	);
	info!(
		"💬 Completion: {} (model {}, max_tokens {})",
		providers.completion.endpoint, providers.completion.model, providers.completion.max_tokens
	);
	info!(
		"⏱️ Call policy: timeout {}ms, {} retries, backoff {}ms",
		settings.timeouts.request_ms, settings.retries.max_retries, settings.retries.backoff_ms
	);

	let plain_secrets = [
		&providers.geocoding.api_key,
		&providers.search.api_key,
		&providers.completion.api_key,
	]
	.iter()
	.filter(|value| value.is_plain())
	.count();
	if plain_secrets > 0 && settings.is_production() {
		warn!(
			"⚠️ {} API key(s) configured as plain values in production",
			plain_secrets
		);
	}
}

/// Logs service shutdown information
pub fn log_service_shutdown() {
	info!("🛑 Solar ROI Service Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs startup completion and the served routes
pub fn log_startup_complete(bind_address: &str) {
	info!("✅ Solar ROI Service Started Successfully");
	info!("🌐 Server listening on: {}", bind_address);
	info!("📋 Endpoints:");
	info!("   POST /api/browse");
	info!("   POST /get_coordinates");
	info!("   GET  /api/country/{{lat}}/{{lon}}");
	info!("   GET  /api/pvgis/{{lat}}/{{lon}}/{{peakpower}}");
	info!("   POST /search-google");
	info!("   POST /api/openai/completion");
	info!("   POST /api/openai/describe");
	info!("   GET  /health");
	info!("📡 Ready to accept requests");
}
