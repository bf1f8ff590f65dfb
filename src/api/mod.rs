//! HTTP surface: router, shared state and handlers.

mod catalog;
mod error;
mod extract;
mod listings;
mod pricing;
mod products;
mod shipping;
mod social;
mod storefront;
mod variations;

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::integrations::{
    AirtableClient, AnthropicClient, CommerceApi, ListingGenerator, ListingStore, MetaClient, ShippingAdvisor, SocialPublisher, WooCommerceClient,
};
use extract::Json;

/// Largest photo accepted by the upload endpoint.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub commerce: Arc<dyn CommerceApi>,
    pub listing_generator: Arc<dyn ListingGenerator>,
    pub shipping_advisor: Arc<dyn ShippingAdvisor>,
    pub listing_store: Arc<dyn ListingStore>,
    pub social_publisher: Arc<dyn SocialPublisher>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let anthropic = Arc::new(AnthropicClient::new(http.clone(), config.anthropic.clone()));
        Ok(Self {
            commerce: Arc::new(WooCommerceClient::new(http.clone(), config.woo.clone())),
            listing_generator: anthropic.clone(),
            shipping_advisor: anthropic,
            listing_store: Arc::new(AirtableClient::new(http.clone(), config.airtable.clone())),
            social_publisher: Arc::new(MetaClient::new(http, config.facebook.clone(), config.instagram.clone())),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "craft-workbench"})) }))
        .route("/api/v1/variations/preview", post(variations::preview))
        .route("/api/v1/pricing/marketplaces", get(pricing::marketplaces))
        .route("/api/v1/pricing/quote", post(pricing::quote))
        .route("/api/v1/shipping/advice", post(shipping::advice))
        .route("/api/v1/products", get(storefront::list_products))
        .route("/api/v1/products/drafts", post(products::create_draft))
        .route("/api/v1/products/:id", get(storefront::get_product))
        .route("/api/v1/products/:id/images", post(storefront::attach_images))
        .route("/api/v1/photos", post(storefront::upload_photo).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)))
        .route("/api/v1/catalog/categories", get(catalog::list_categories).post(catalog::ensure_category))
        .route("/api/v1/catalog/tags", get(catalog::list_tags).post(catalog::ensure_tag))
        .route("/api/v1/listings", post(listings::generate))
        .route("/api/v1/social/posts/generate", post(social::generate_posts))
        .route("/api/v1/social/posts/from-idea", post(social::post_from_idea))
        .route("/api/v1/social/scheduled", get(social::scheduled_posts).post(social::schedule_posts))
        .route("/api/v1/social/facebook", post(social::post_to_facebook))
        .route("/api/v1/social/instagram", post(social::post_to_instagram))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
