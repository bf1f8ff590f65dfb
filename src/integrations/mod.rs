//! Outbound adapters for the third-party services the workbench drives.
//!
//! Each service sits behind an async trait so handlers can be exercised with
//! in-memory doubles. The reqwest-backed implementations share one pooled
//! `reqwest::Client`.
//!
//! | Trait              | Service                    |
//! |--------------------|----------------------------|
//! | [`CommerceApi`]    | WooCommerce REST API (v3)  |
//! | [`ListingGenerator`], [`ShippingAdvisor`] | Anthropic Messages API |
//! | [`ListingStore`]   | Airtable                   |
//! | [`SocialPublisher`] | Meta Graph API (Facebook pages, Instagram) |

pub mod airtable;
pub mod anthropic;
pub mod meta;
pub mod woocommerce;

pub use airtable::AirtableClient;
pub use anthropic::AnthropicClient;
pub use meta::MetaClient;
pub use woocommerce::WooCommerceClient;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::aggregates::{
    CatalogTerm, FacebookPost, InstagramPost, ListingAssets, ListingError, ListingInput, MediaUpload, ProductDetail, ProductImage,
    ProductStatus, ProductSummary, PublishedPost, ScheduledPost, ShippingAdvice, ShippingAdviceRequest, ShippingError, SocialError,
    SocialPost, SocialPostRequest, TermKind, UploadedMedia,
};
use crate::domain::variations::VariationCombination;

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx reply; `message` is the upstream's own message when it sent one.
    #[error("{service} API error {status}: {message}")]
    Upstream { service: &'static str, status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing {0} configuration")]
    NotConfigured(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error(transparent)]
    Shipping(#[from] ShippingError),

    #[error(transparent)]
    Social(#[from] SocialError),
}

impl IntegrationError {
    /// Status to surface to our own caller.
    pub fn status(&self) -> u16 {
        match self {
            Self::Upstream { status, .. } => *status,
            Self::Social(_) => 400,
            _ => 500,
        }
    }
}

pub type IntegrationResult<T> = std::result::Result<T, IntegrationError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedProduct { pub id: u64, pub permalink: String }

#[async_trait]
pub trait CommerceApi: Send + Sync {
    async fn create_product(&self, payload: &Value) -> IntegrationResult<CreatedProduct>;
    async fn create_variation(&self, product_id: u64, attributes: &VariationCombination) -> IntegrationResult<()>;
    async fn list_terms(&self, kind: TermKind) -> IntegrationResult<Vec<CatalogTerm>>;
    async fn create_term(&self, kind: TermKind, name: &str) -> IntegrationResult<CatalogTerm>;
    fn admin_edit_url(&self, product_id: u64) -> String;
    async fn list_products(&self, status: ProductStatus) -> IntegrationResult<Vec<ProductSummary>>;
    async fn get_product(&self, product_id: u64) -> IntegrationResult<ProductDetail>;
    /// Replaces the product's gallery with `images`, imported by URL.
    async fn attach_images(&self, product_id: u64, images: &[ProductImage]) -> IntegrationResult<()>;
    async fn upload_media(&self, upload: &MediaUpload) -> IntegrationResult<UploadedMedia>;
}

#[async_trait]
pub trait ListingGenerator: Send + Sync {
    async fn generate_listing(&self, input: &ListingInput) -> IntegrationResult<ListingAssets>;
    async fn generate_social_posts(&self, request: &SocialPostRequest) -> IntegrationResult<Vec<SocialPost>>;
    async fn post_from_idea(&self, idea: &str) -> IntegrationResult<String>;
}

#[async_trait]
pub trait ShippingAdvisor: Send + Sync {
    async fn advise(&self, request: &ShippingAdviceRequest) -> IntegrationResult<ShippingAdvice>;
}

#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn save_listing(&self, input: &ListingInput, assets: &ListingAssets) -> IntegrationResult<()>;
    async fn save_scheduled_posts(&self, posts: &[ScheduledPost]) -> IntegrationResult<()>;
    /// Every scheduled post, soonest first.
    async fn fetch_scheduled_posts(&self) -> IntegrationResult<Vec<ScheduledPost>>;
}

#[async_trait]
pub trait SocialPublisher: Send + Sync {
    async fn post_to_facebook(&self, post: &FacebookPost) -> IntegrationResult<PublishedPost>;
    async fn post_to_instagram(&self, post: &InstagramPost) -> IntegrationResult<PublishedPost>;
}

/// Pulls a human-readable message out of an error body: the JSON `message`
/// (or `error.message`) when present, else the raw text, else the status.
pub(crate) fn upstream_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let message = json.get("message")
            .or_else(|| json.get("error").and_then(|e| e.get("message")))
            .and_then(Value::as_str);
        if let Some(m) = message { return m.to_string(); }
    }
    if body.trim().is_empty() { format!("HTTP {status}") } else { body.to_string() }
}

/// Turns a non-success response into [`IntegrationError::Upstream`].
pub(crate) async fn check_status(service: &'static str, response: reqwest::Response) -> IntegrationResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = upstream_message(status.as_u16(), &body);
    tracing::error!(service, status = status.as_u16(), %message, "upstream call failed");
    Err(IntegrationError::Upstream { service, status: status.as_u16(), message })
}
