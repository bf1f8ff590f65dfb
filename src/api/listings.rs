use axum::extract::State;
use serde::Serialize;

use super::extract::Json;
use super::AppState;
use crate::domain::aggregates::{ListingAssets, ListingInput};
use crate::domain::events::{DomainEvent, ListingEvent};
use crate::{Result, WorkbenchError};

#[derive(Debug, Serialize)]
pub struct ListingResponse { pub ok: bool, pub assets: ListingAssets }

/// Generates listing copy and stores it as a draft row.
pub async fn generate(State(s): State<AppState>, Json(input): Json<ListingInput>) -> Result<Json<ListingResponse>> {
    input.validate()?;

    let assets = s.listing_generator.generate_listing(&input).await
        .map_err(WorkbenchError::upstream("Failed to generate listing"))?;
    DomainEvent::Listing(ListingEvent::Generated { product_name: input.product_name.clone(), title: assets.title.clone() }).record();

    s.listing_store.save_listing(&input, &assets).await
        .map_err(WorkbenchError::upstream("Failed to save listing"))?;
    DomainEvent::Listing(ListingEvent::Saved { product_name: input.product_name.clone() }).record();

    Ok(Json(ListingResponse { ok: true, assets }))
}
