//! Google Custom Search JSON API adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use solar_roi_types::{
	ProviderError, ProviderResult, SearchMode, SearchRuntimeConfig, SnippetSearch,
};
use tracing::debug;

use crate::http::{build_client, build_url, execute_with_policy, read_body, status_error};

const PROVIDER: &str = "google-custom-search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
	#[serde(default)]
	items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
	html_snippet: Option<String>,
	snippet: Option<String>,
}

/// Snippet of the first item, preferring the HTML variant
fn parse_search_body(body: &str, query: &str) -> ProviderResult<String> {
	let response: SearchResponse =
		serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse {
			reason: format!("Failed to parse search response: {}", e),
		})?;

	response
		.items
		.into_iter()
		.next()
		.and_then(|item| item.html_snippet.or(item.snippet))
		.filter(|snippet| !snippet.trim().is_empty())
		.ok_or_else(|| ProviderError::no_results(PROVIDER, query))
}

/// Snippet search backed by Google Custom Search, one engine per [`SearchMode`]
#[derive(Debug)]
pub struct GoogleSearch {
	config: SearchRuntimeConfig,
	client: Client,
}

impl GoogleSearch {
	pub fn new(config: SearchRuntimeConfig) -> ProviderResult<Self> {
		Ok(Self::with_client(config, build_client()?))
	}

	pub fn with_client(config: SearchRuntimeConfig, client: Client) -> Self {
		Self { config, client }
	}
}

#[async_trait]
impl SnippetSearch for GoogleSearch {
	fn name(&self) -> &'static str {
		PROVIDER
	}

	async fn search(&self, query: &str, mode: SearchMode) -> ProviderResult<String> {
		let url = build_url(
			&self.config.endpoint,
			&[
				("key", self.config.api_key.expose_secret()),
				("cx", self.config.engine_for(mode).expose_secret()),
				("q", query),
			],
		)?;

		debug!("Searching '{}' with the {} engine", query, mode);

		let snippet = execute_with_policy(PROVIDER, &self.config.policy, || {
			let request = self.client.get(url.clone());
			async move {
				let (status, body) = read_body(request.send().await?).await?;
				if !status.is_success() {
					return Err(status_error(status, &body));
				}
				parse_search_body(&body, query)
			}
		})
		.await?;

		debug!("Search snippet for '{}': {}", query, snippet);
		Ok(snippet)
	}
}
