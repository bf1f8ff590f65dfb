//! Anthropic Messages API client, used as the listing copywriter and the
//! shipping advisor.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{check_status, IntegrationError, IntegrationResult, ListingGenerator, ShippingAdvisor};
use crate::config::AnthropicConfig;
use crate::domain::aggregates::{ListingAssets, ListingInput, ShippingAdvice, ShippingAdviceRequest, SocialPost, SocialPostRequest};

const SERVICE: &str = "Anthropic";
const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

#[derive(Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    config: Option<AnthropicConfig>,
}

#[derive(Deserialize)]
struct MessagesReply { #[serde(default)] content: Vec<ContentBlock> }

#[derive(Deserialize)]
struct ContentBlock { #[serde(default)] text: Option<String> }

impl MessagesReply {
    fn first_text(self) -> Option<String> {
        self.content.into_iter().next().and_then(|b| b.text).map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
    }
}

impl AnthropicClient {
    pub fn new(http: reqwest::Client, config: Option<AnthropicConfig>) -> Self {
        Self { http, config }
    }

    /// Sends one user turn and returns the first text block of the reply.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> IntegrationResult<String> {
        let config = self.config.as_ref().ok_or(IntegrationError::NotConfigured(SERVICE))?;
        let body = json!({
            "model": config.model,
            "max_tokens": max_tokens,
            "messages": [{ "role": "user", "content": prompt }],
        });
        let response = self.http
            .post(MESSAGES_URL)
            .header("x-api-key", &config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;
        let reply: MessagesReply = check_status(SERVICE, response).await?.json().await?;
        reply.first_text().ok_or_else(|| IntegrationError::InvalidResponse("No content returned from Anthropic API".into()))
    }
}

#[async_trait]
impl ListingGenerator for AnthropicClient {
    async fn generate_listing(&self, input: &ListingInput) -> IntegrationResult<ListingAssets> {
        let text = self.complete(&input.prompt(), 2000).await?;
        Ok(ListingAssets::from_model_text(&text)?)
    }

    async fn generate_social_posts(&self, request: &SocialPostRequest) -> IntegrationResult<Vec<SocialPost>> {
        let text = self.complete(&request.prompt(), 2000).await?;
        Ok(request.posts_from_model_text(&text)?)
    }

    async fn post_from_idea(&self, idea: &str) -> IntegrationResult<String> {
        self.complete(idea, 1000).await
    }
}

#[async_trait]
impl ShippingAdvisor for AnthropicClient {
    async fn advise(&self, request: &ShippingAdviceRequest) -> IntegrationResult<ShippingAdvice> {
        let text = self.complete(&request.prompt(), 500).await?;
        Ok(ShippingAdvice::from_model_text(&text)?)
    }
}
