//! OpenAI chat completions adapter
//!
//! Sends the prompt as a single system message and returns the content of the
//! first choice.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use solar_roi_types::{
	CompletionRuntimeConfig, ProviderError, ProviderResult, TextCompletion,
};
use tracing::debug;

use crate::http::{build_client, execute_with_policy, read_body, status_error};

const PROVIDER: &str = "openai";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
	model: &'a str,
	messages: Vec<ChatMessage<'a>>,
	max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
	role: &'a str,
	content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
	choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
	message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
	content: Option<String>,
}

fn parse_chat_body(body: &str) -> ProviderResult<String> {
	let response: ChatResponse =
		serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse {
			reason: format!("Failed to parse completion response: {}", e),
		})?;

	let choice = response
		.choices
		.and_then(|choices| choices.into_iter().next())
		.ok_or_else(|| ProviderError::ExtractionFailed {
			reason: "completion response has no choices".to_string(),
		})?;

	choice
		.message
		.and_then(|message| message.content)
		.ok_or_else(|| ProviderError::ExtractionFailed {
			reason: "first completion choice has no message content".to_string(),
		})
}

/// Text completion backed by the OpenAI chat completions API
#[derive(Debug)]
pub struct OpenAiCompletion {
	config: CompletionRuntimeConfig,
	client: Client,
}

impl OpenAiCompletion {
	pub fn new(config: CompletionRuntimeConfig) -> ProviderResult<Self> {
		Ok(Self::with_client(config, build_client()?))
	}

	pub fn with_client(config: CompletionRuntimeConfig, client: Client) -> Self {
		Self { config, client }
	}
}

#[async_trait]
impl TextCompletion for OpenAiCompletion {
	fn name(&self) -> &'static str {
		PROVIDER
	}

	async fn complete(&self, prompt: &str) -> ProviderResult<String> {
		let payload = ChatRequest {
			model: &self.config.model,
			messages: vec![ChatMessage {
				role: "system",
				content: prompt,
			}],
			max_tokens: self.config.max_tokens,
		};
		let payload = serde_json::to_vec(&payload)?;

		debug!(
			"Requesting completion from {} ({} prompt chars)",
			self.config.model,
			prompt.len()
		);

		execute_with_policy(PROVIDER, &self.config.policy, || {
			let request = self
				.client
				.post(&self.config.endpoint)
				.bearer_auth(self.config.api_key.expose_secret())
				.header(reqwest::header::CONTENT_TYPE, "application/json")
				.body(payload.clone());
			async move {
				let (status, body) = read_body(request.send().await?).await?;
				if !status.is_success() {
					return Err(status_error(status, &body));
				}
				parse_chat_body(&body)
			}
		})
		.await
	}
}
