//! Aggregates module
pub mod product;
pub mod listing;
pub mod term;
pub mod shipping;
pub mod social;
pub mod storefront;

pub use product::{DraftError, DraftProduct, DraftSpec, VariationPayload};
pub use listing::{ListingAssets, ListingError, ListingInput};
pub use term::{CatalogTerm, TermKind};
pub use shipping::{ShippingAdvice, ShippingAdviceRequest, ShippingError};
pub use social::{FacebookPost, InstagramPost, PublishedPost, ScheduledPost, SocialError, SocialPost, SocialPostRequest};
pub use storefront::{MediaUpload, PhotoError, ProductDetail, ProductImage, ProductStatus, ProductSummary, TermRef, UploadedMedia};
