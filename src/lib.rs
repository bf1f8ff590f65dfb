//! Craft Workbench
//!
//! Back-office service for a handmade-crafts shop.
//!
//! ## Features
//! - Variation combinations for variable products
//! - Cost-based pricing across markup bands and marketplaces
//! - Draft variable products pushed to WooCommerce
//! - Category and tag lookup with create-if-missing
//! - LLM listing copy saved to Airtable
//! - LLM parcel shipping advice
//! - Product browsing and photo upload/attach against WooCommerce
//! - LLM social posts, scheduled in Airtable or published to Facebook and Instagram

pub mod api;
pub mod config;
pub mod domain;
pub mod integrations;

pub use domain::pricing::{quote, quote_with_bands, Marketplace, PricingInputs, PricingReport};
pub use domain::variations::{generate_combinations, total_variations, VariationAttribute, VariationCombination};

use thiserror::Error;

use domain::aggregates::{DraftError, ListingError, PhotoError, ShippingError, SocialError};
use domain::variations::VariationError;
use integrations::IntegrationError;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Variation(#[from] VariationError),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error(transparent)]
    Shipping(#[from] ShippingError),

    #[error(transparent)]
    Social(#[from] SocialError),

    #[error(transparent)]
    Photo(#[from] PhotoError),

    #[error("{context}: {source}")]
    Integration { context: &'static str, #[source] source: IntegrationError },
}

impl WorkbenchError {
    /// Wraps an adapter failure with what the caller was trying to do.
    pub fn upstream(context: &'static str) -> impl FnOnce(IntegrationError) -> Self {
        move |source| Self::Integration { context, source }
    }
}

impl From<IntegrationError> for WorkbenchError {
    fn from(source: IntegrationError) -> Self {
        Self::Integration { context: "Upstream service error", source }
    }
}

impl From<validator::ValidationErrors> for WorkbenchError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        Self::Validation(messages.join(", "))
    }
}

pub type Result<T> = std::result::Result<T, WorkbenchError>;
