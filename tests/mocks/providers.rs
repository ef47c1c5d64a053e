//! Wiremock stand-ins for the four external providers

#![allow(dead_code)]

use serde_json::{json, Value};
use solar_roi::config::ConfigurableValue;
use solar_roi::Settings;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GEOCODE_PATH: &str = "/maps/api/geocode/json";
pub const PVCALC_PATH: &str = "/api/PVcalc";
pub const SEARCH_PATH: &str = "/customsearch/v1";
pub const COMPLETION_PATH: &str = "/v1/chat/completions";

pub const MAPS_KEY: &str = "maps-test-key";
pub const SEARCH_KEY: &str = "search-test-key";
pub const GENERAL_ENGINE: &str = "cx-general";
pub const ELECTRICITY_ENGINE: &str = "cx-electricity";
pub const OPENAI_KEY: &str = "sk-test";

/// Google geocoding `OK` body with one result
pub fn geocode_body(latitude: f64, longitude: f64, country: &str) -> Value {
	json!({
		"status": "OK",
		"results": [{
			"formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA",
			"address_components": [
				{"long_name": "Mountain View", "short_name": "Mountain View", "types": ["locality", "political"]},
				{"long_name": country, "short_name": "US", "types": ["country", "political"]}
			],
			"geometry": {"location": {"lat": latitude, "lng": longitude}}
		}]
	})
}

pub fn geocode_status_body(status: &str) -> Value {
	json!({"status": status, "results": [], "error_message": format!("{} from test", status)})
}

/// PVcalc body with a flat monthly yield
pub fn pvcalc_body(yearly_kwh: f64) -> Value {
	let monthly: Vec<Value> = (1..=12)
		.map(|month| json!({"month": month, "E_d": 1.0, "E_m": yearly_kwh / 12.0}))
		.collect();
	json!({
		"inputs": {"location": {"latitude": 37.42, "longitude": -122.08}},
		"outputs": {
			"monthly": {"fixed": monthly},
			"totals": {"fixed": {"E_d": 3.0, "E_m": yearly_kwh / 12.0, "E_y": yearly_kwh}}
		}
	})
}

pub fn search_body(html_snippet: &str) -> Value {
	json!({
		"kind": "customsearch#search",
		"items": [{"title": "result", "htmlSnippet": html_snippet, "snippet": html_snippet}]
	})
}

pub fn completion_body(content: &str) -> Value {
	json!({
		"id": "chatcmpl-test",
		"object": "chat.completion",
		"choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}]
	})
}

/// One wiremock server answering for every provider
pub struct ProviderStubs {
	pub server: MockServer,
}

impl ProviderStubs {
	pub async fn start() -> Self {
		Self {
			server: MockServer::start().await,
		}
	}

	pub fn uri(&self) -> String {
		self.server.uri()
	}

	/// Settings pointing every provider at this server, with plain test keys
	/// and a short call policy
	pub fn settings(&self) -> Settings {
		let base = self.uri();
		let mut settings = Settings::default();

		settings.providers.geocoding.endpoint = format!("{}{}", base, GEOCODE_PATH);
		settings.providers.geocoding.api_key = ConfigurableValue::from_plain(MAPS_KEY);
		settings.providers.production.endpoint = format!("{}{}", base, PVCALC_PATH);
		settings.providers.search.endpoint = format!("{}{}", base, SEARCH_PATH);
		settings.providers.search.api_key = ConfigurableValue::from_plain(SEARCH_KEY);
		settings.providers.search.engine_id = ConfigurableValue::from_plain(GENERAL_ENGINE);
		settings.providers.search.electricity_engine_id =
			ConfigurableValue::from_plain(ELECTRICITY_ENGINE);
		settings.providers.completion.endpoint = format!("{}{}", base, COMPLETION_PATH);
		settings.providers.completion.api_key = ConfigurableValue::from_plain(OPENAI_KEY);

		settings.timeouts.request_ms = 2_000;
		settings.retries.max_retries = 1;
		settings.retries.backoff_ms = 10;
		settings
	}

	pub async fn mount_geocode(&self, body: Value) {
		Mock::given(method("GET"))
			.and(path(GEOCODE_PATH))
			.and(query_param("key", MAPS_KEY))
			.respond_with(ResponseTemplate::new(200).set_body_json(body))
			.mount(&self.server)
			.await;
	}

	pub async fn mount_pvcalc(&self, status: u16, body: Value) {
		Mock::given(method("GET"))
			.and(path(PVCALC_PATH))
			.and(query_param("outputformat", "json"))
			.respond_with(ResponseTemplate::new(status).set_body_json(body))
			.mount(&self.server)
			.await;
	}

	pub async fn mount_search(&self, engine: &str, body: Value) {
		Mock::given(method("GET"))
			.and(path(SEARCH_PATH))
			.and(query_param("cx", engine))
			.respond_with(ResponseTemplate::new(200).set_body_json(body))
			.mount(&self.server)
			.await;
	}

	/// Completion answering `content` for prompts containing `marker`
	pub async fn mount_completion(&self, marker: &str, content: &str) {
		Mock::given(method("POST"))
			.and(path(COMPLETION_PATH))
			.and(PromptContains(marker.to_string()))
			.respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
			.mount(&self.server)
			.await;
	}

	/// Every provider answering the reference scenario: 5 kW, 1400 kWh/kW,
	/// $2.50 per watt and $0.15 per kWh
	pub async fn mount_reference_scenario(&self) {
		self.mount_geocode(geocode_body(37.4224, -122.0842, "United States"))
			.await;
		self.mount_pvcalc(200, pvcalc_body(7000.0)).await;
		self.mount_search(GENERAL_ENGINE, search_body("Average cost is <b>$2.50</b> per watt"))
			.await;
		self.mount_search(ELECTRICITY_ENGINE, search_body("Rates average <b>15 cents</b> per kWh"))
			.await;
		self.mount_completion("$ per watt", "2.50").await;
		self.mount_completion("$ per kWh", "0.15").await;
		self.mount_completion(
			"Describe the return on investment",
			"Great news! Your panels pay for themselves in about 11 years.",
		)
		.await;
	}
}

/// Matches chat requests whose first message contains a marker
pub struct PromptContains(pub String);

impl wiremock::Match for PromptContains {
	fn matches(&self, request: &wiremock::Request) -> bool {
		serde_json::from_slice::<Value>(&request.body)
			.ok()
			.and_then(|body| {
				body["messages"][0]["content"]
					.as_str()
					.map(|content| content.contains(&self.0))
			})
			.unwrap_or(false)
	}
}
