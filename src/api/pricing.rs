use serde::{Deserialize, Serialize};
use validator::Validate;

use super::extract::Json;

use crate::domain::events::{DomainEvent, ListingEvent};
use crate::domain::pricing::{self, Marketplace, MarketplaceFeeProfile, PricingInputs, PricingReport, DEFAULT_MARKUP_BANDS};
use crate::Result;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(flatten)]
    pub inputs: PricingInputs,
    #[validate(length(min = 1, max = 10, message = "Between 1 and 10 markup bands are allowed"))]
    pub markup_bands: Option<Vec<u32>>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse { pub ok: bool, pub report: PricingReport }

#[derive(Debug, Serialize)]
pub struct MarketplacesResponse { pub ok: bool, pub marketplaces: Vec<MarketplaceFeeProfile> }

pub async fn quote(Json(r): Json<QuoteRequest>) -> Result<Json<QuoteResponse>> {
    r.validate()?;
    let inputs = r.inputs.clamped();
    let bands = r.markup_bands.unwrap_or_else(|| DEFAULT_MARKUP_BANDS.to_vec());
    let report = pricing::quote_with_bands(&inputs, &bands);
    DomainEvent::Listing(ListingEvent::Priced { marketplace: inputs.marketplace, bands: report.results.len() }).record();
    Ok(Json(QuoteResponse { ok: true, report }))
}

pub async fn marketplaces() -> Json<MarketplacesResponse> {
    Json(MarketplacesResponse { ok: true, marketplaces: Marketplace::fee_table() })
}
