//! Provider adapter tests against wiremock servers

mod mocks;

use mocks::providers::{
	completion_body, geocode_body, geocode_status_body, pvcalc_body, search_body, ProviderStubs,
	COMPLETION_PATH, ELECTRICITY_ENGINE, GENERAL_ENGINE, OPENAI_KEY, PVCALC_PATH, SEARCH_PATH,
};
use serde_json::json;
use solar_roi::adapters::{GoogleGeocoder, GoogleSearch, OpenAiCompletion, PvgisEstimator};
use solar_roi::{
	Geocoder, ProductionEstimator, ProductionRequest, ProviderError, SearchMode, SnippetSearch,
	TextCompletion,
};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_geocoder_forward_lookup() {
	let stubs = ProviderStubs::start().await;
	stubs
		.mount_geocode(geocode_body(37.4224, -122.0842, "United States"))
		.await;
	let geocoder = GoogleGeocoder::new(stubs.settings().geocoding_runtime().unwrap()).unwrap();

	let location = geocoder.geocode("1600 Amphitheatre Parkway").await.unwrap();
	assert_eq!(location.address, "1600 Amphitheatre Parkway");
	assert_eq!(location.latitude, 37.4224);
	assert_eq!(location.longitude, -122.0842);
	assert_eq!(location.country.as_deref(), Some("United States"));
}

#[tokio::test]
async fn test_geocoder_zero_results_is_no_results() {
	let stubs = ProviderStubs::start().await;
	stubs.mount_geocode(geocode_status_body("ZERO_RESULTS")).await;
	let geocoder = GoogleGeocoder::new(stubs.settings().geocoding_runtime().unwrap()).unwrap();

	let error = geocoder.geocode("zzzz").await.unwrap_err();
	assert!(matches!(error, ProviderError::NoResults { .. }));
}

#[tokio::test]
async fn test_geocoder_request_denied_keeps_status() {
	let stubs = ProviderStubs::start().await;
	stubs.mount_geocode(geocode_status_body("REQUEST_DENIED")).await;
	let geocoder = GoogleGeocoder::new(stubs.settings().geocoding_runtime().unwrap()).unwrap();

	let error = geocoder.geocode("Madrid").await.unwrap_err();
	assert_eq!(error.status_code(), Some(403));
	assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_geocoder_reverse_lookup_uses_latlng() {
	let stubs = ProviderStubs::start().await;
	Mock::given(method("GET"))
		.and(path("/maps/api/geocode/json"))
		.and(query_param("latlng", "40.4168,-3.7038"))
		.respond_with(ResponseTemplate::new(200).set_body_json(geocode_body(40.4168, -3.7038, "Spain")))
		.expect(1)
		.mount(&stubs.server)
		.await;
	let geocoder = GoogleGeocoder::new(stubs.settings().geocoding_runtime().unwrap()).unwrap();

	let country = geocoder.country_for_coordinates(40.4168, -3.7038).await.unwrap();
	assert_eq!(country.as_deref(), Some("Spain"));
}

#[tokio::test]
async fn test_pvgis_estimate_reads_fixed_mount_figures() {
	let stubs = ProviderStubs::start().await;
	Mock::given(method("GET"))
		.and(path(PVCALC_PATH))
		.and(query_param("lat", "37.42"))
		.and(query_param("lon", "-122.08"))
		.and(query_param("peakpower", "5"))
		.and(query_param("loss", "14"))
		.respond_with(ResponseTemplate::new(200).set_body_json(pvcalc_body(7200.0)))
		.expect(1)
		.mount(&stubs.server)
		.await;
	let estimator = PvgisEstimator::new(stubs.settings().production_runtime()).unwrap();

	let estimate = estimator
		.estimate(&ProductionRequest::new(37.42, -122.08, 5.0))
		.await
		.unwrap();
	assert_eq!(estimate.yearly_kwh, 7200.0);
	assert_eq!(estimate.monthly_kwh.len(), 12);
	assert_eq!(estimate.monthly_kwh[&1], 600.0);
	assert_eq!(estimate.monthly_kwh[&12], 600.0);
}

#[tokio::test]
async fn test_pvgis_missing_outputs_is_data_unavailable() {
	let stubs = ProviderStubs::start().await;
	stubs
		.mount_pvcalc(200, json!({"inputs": {"location": {"latitude": 0.0}}}))
		.await;
	let estimator = PvgisEstimator::new(stubs.settings().production_runtime()).unwrap();

	let error = estimator
		.estimate(&ProductionRequest::new(0.0, 0.0, 5.0))
		.await
		.unwrap_err();
	assert!(matches!(error, ProviderError::DataUnavailable { .. }));
}

#[tokio::test]
async fn test_pvgis_client_error_is_data_unavailable() {
	let stubs = ProviderStubs::start().await;
	stubs
		.mount_pvcalc(400, json!({"message": "Location over the sea. Please, select another location"}))
		.await;
	let estimator = PvgisEstimator::new(stubs.settings().production_runtime()).unwrap();

	let error = estimator
		.estimate(&ProductionRequest::new(30.0, -40.0, 5.0))
		.await
		.unwrap_err();
	match error {
		ProviderError::DataUnavailable { reason } => assert!(reason.contains("over the sea")),
		other => panic!("unexpected error: {:?}", other),
	}
}

#[tokio::test]
async fn test_search_engine_follows_mode() {
	let stubs = ProviderStubs::start().await;
	stubs
		.mount_search(GENERAL_ENGINE, search_body("about <b>$2.50</b> per watt"))
		.await;
	stubs
		.mount_search(ELECTRICITY_ENGINE, search_body("about <b>15 cents</b> per kWh"))
		.await;
	let search = GoogleSearch::new(stubs.settings().search_runtime().unwrap()).unwrap();

	let snippet = search
		.search("solar installation cost in Spain", SearchMode::General)
		.await
		.unwrap();
	assert_eq!(snippet, "about <b>$2.50</b> per watt");

	let snippet = search
		.search("electricity cost in Spain", SearchMode::Electricity)
		.await
		.unwrap();
	assert_eq!(snippet, "about <b>15 cents</b> per kWh");
}

#[tokio::test]
async fn test_search_without_items_is_no_results() {
	let stubs = ProviderStubs::start().await;
	stubs
		.mount_search(GENERAL_ENGINE, json!({"kind": "customsearch#search"}))
		.await;
	let search = GoogleSearch::new(stubs.settings().search_runtime().unwrap()).unwrap();

	let error = search.search("nothing at all", SearchMode::General).await.unwrap_err();
	assert!(matches!(error, ProviderError::NoResults { .. }));
}

#[tokio::test]
async fn test_search_retries_unavailable_provider() {
	let stubs = ProviderStubs::start().await;
	Mock::given(method("GET"))
		.and(path(SEARCH_PATH))
		.respond_with(ResponseTemplate::new(503))
		.up_to_n_times(1)
		.expect(1)
		.mount(&stubs.server)
		.await;
	stubs.mount_search(GENERAL_ENGINE, search_body("second attempt")).await;
	let search = GoogleSearch::new(stubs.settings().search_runtime().unwrap()).unwrap();

	let snippet = search.search("solar", SearchMode::General).await.unwrap();
	assert_eq!(snippet, "second attempt");
}

#[tokio::test]
async fn test_completion_sends_bearer_and_model() {
	let stubs = ProviderStubs::start().await;
	Mock::given(method("POST"))
		.and(path(COMPLETION_PATH))
		.and(header("authorization", format!("Bearer {}", OPENAI_KEY).as_str()))
		.and(wiremock::matchers::body_partial_json(json!({
			"model": "gpt-4o",
			"max_tokens": 200,
			"messages": [{"role": "system", "content": "Return 2.50"}]
		})))
		.respond_with(ResponseTemplate::new(200).set_body_json(completion_body("2.50")))
		.expect(1)
		.mount(&stubs.server)
		.await;
	let completion =
		OpenAiCompletion::new(stubs.settings().completion_runtime().unwrap()).unwrap();

	assert_eq!(completion.complete("Return 2.50").await.unwrap(), "2.50");
}

#[tokio::test]
async fn test_completion_without_choices_is_extraction_failure() {
	let stubs = ProviderStubs::start().await;
	Mock::given(method("POST"))
		.and(path(COMPLETION_PATH))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x", "choices": []})))
		.mount(&stubs.server)
		.await;
	let completion =
		OpenAiCompletion::new(stubs.settings().completion_runtime().unwrap()).unwrap();

	let error = completion.complete("anything").await.unwrap_err();
	assert!(matches!(error, ProviderError::ExtractionFailed { .. }));
}

#[tokio::test]
async fn test_completion_error_body_is_normalized() {
	let stubs = ProviderStubs::start().await;
	Mock::given(method("POST"))
		.and(path(COMPLETION_PATH))
		.respond_with(ResponseTemplate::new(401).set_body_json(json!({
			"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
		})))
		.mount(&stubs.server)
		.await;
	let completion =
		OpenAiCompletion::new(stubs.settings().completion_runtime().unwrap()).unwrap();

	let error = completion.complete("anything").await.unwrap_err();
	assert_eq!(error.status_code(), Some(401));
	assert!(error.to_string().contains("Incorrect API key"));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
	let stubs = ProviderStubs::start().await;
	Mock::given(method("POST"))
		.and(path(COMPLETION_PATH))
		.respond_with(
			ResponseTemplate::new(200)
				.set_body_json(completion_body("late"))
				.set_delay(Duration::from_millis(500)),
		)
		.mount(&stubs.server)
		.await;
	let mut settings = stubs.settings();
	settings.timeouts.request_ms = 50;
	settings.retries.max_retries = 0;
	let completion = OpenAiCompletion::new(settings.completion_runtime().unwrap()).unwrap();

	let error = completion.complete("anything").await.unwrap_err();
	assert!(matches!(error, ProviderError::Timeout { timeout_ms: 50 }));
}
