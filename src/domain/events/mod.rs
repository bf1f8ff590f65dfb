//! Domain events
use crate::domain::pricing::Marketplace;

#[derive(Clone, Debug)]
pub enum DomainEvent {
    Product(ProductEvent),
    Listing(ListingEvent),
    Social(SocialEvent),
}

#[derive(Clone, Debug)]
pub enum ProductEvent {
    DraftPrepared { draft_id: String, variation_count: usize },
    Created { draft_id: String, remote_id: u64 },
    VariationCreated { remote_id: u64, index: usize, title: String },
    ImagesAttached { remote_id: u64, count: usize },
    PhotoUploaded { media_id: u64, filename: String },
}

#[derive(Clone, Debug)]
pub enum ListingEvent {
    Generated { product_name: String, title: String },
    Saved { product_name: String },
    Priced { marketplace: Marketplace, bands: usize },
}

#[derive(Clone, Debug)]
pub enum SocialEvent {
    PostsGenerated { product_id: u64, count: usize },
    Scheduled { count: usize },
    Published { platform: &'static str, id: String },
}

impl DomainEvent {
    /// Emits the event to the tracing pipeline.
    pub fn record(&self) {
        match self {
            DomainEvent::Product(ProductEvent::DraftPrepared { draft_id, variation_count }) =>
                tracing::info!(%draft_id, variation_count, "draft product prepared"),
            DomainEvent::Product(ProductEvent::Created { draft_id, remote_id }) =>
                tracing::info!(%draft_id, remote_id, "draft product created upstream"),
            DomainEvent::Product(ProductEvent::VariationCreated { remote_id, index, title }) =>
                tracing::debug!(remote_id, index, %title, "variation created"),
            DomainEvent::Product(ProductEvent::ImagesAttached { remote_id, count }) =>
                tracing::info!(remote_id, count, "images attached"),
            DomainEvent::Product(ProductEvent::PhotoUploaded { media_id, filename }) =>
                tracing::info!(media_id, %filename, "photo uploaded"),
            DomainEvent::Listing(ListingEvent::Generated { product_name, title }) =>
                tracing::info!(%product_name, %title, "listing copy generated"),
            DomainEvent::Listing(ListingEvent::Saved { product_name }) =>
                tracing::info!(%product_name, "listing saved"),
            DomainEvent::Listing(ListingEvent::Priced { marketplace, bands }) =>
                tracing::debug!(?marketplace, bands, "pricing quoted"),
            DomainEvent::Social(SocialEvent::PostsGenerated { product_id, count }) =>
                tracing::info!(product_id, count, "social posts generated"),
            DomainEvent::Social(SocialEvent::Scheduled { count }) =>
                tracing::info!(count, "social posts scheduled"),
            DomainEvent::Social(SocialEvent::Published { platform, id }) =>
                tracing::info!(platform, %id, "social post published"),
        }
    }
}
