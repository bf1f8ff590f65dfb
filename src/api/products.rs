use axum::{extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::extract::Json;
use super::AppState;
use crate::domain::aggregates::{DraftProduct, DraftSpec};
use crate::domain::events::DomainEvent;
use crate::domain::variations::VariationAttribute;
use crate::{Result, WorkbenchError};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Product description is required"))]
    pub description: String,
    #[serde(default, alias = "short_description")]
    pub short_description: String,
    #[serde(default)]
    pub variation_attributes: Vec<VariationAttribute>,
    #[serde(default)]
    pub category_ids: Vec<u64>,
    #[serde(default)]
    pub tag_ids: Vec<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftResponse {
    pub ok: bool,
    pub product_id: u64,
    pub permalink: String,
    pub admin_edit_url: String,
    pub variation_count: usize,
}

/// Creates the parent variable product, then each variation in turn. The
/// first failing variation aborts the run; variations created before it stay.
pub async fn create_draft(State(s): State<AppState>, Json(r): Json<CreateDraftRequest>) -> Result<(StatusCode, Json<CreateDraftResponse>)> {
    r.validate()?;
    let mut draft = DraftProduct::create(DraftSpec {
        name: r.name,
        description: r.description,
        short_description: r.short_description,
        attributes: r.variation_attributes,
        category_ids: r.category_ids,
        tag_ids: r.tag_ids,
    })?;

    let created = s.commerce.create_product(&draft.product_payload()).await
        .map_err(WorkbenchError::upstream("Failed to create draft product"))?;
    draft.mark_created(created.id);

    let total = draft.variation_count();
    let combinations = draft.combinations().to_vec();
    for (index, combination) in combinations.iter().enumerate() {
        if let Err(e) = s.commerce.create_variation(created.id, combination).await {
            tracing::error!(product_id = created.id, variation = index + 1, total, error = %e, "variation creation failed");
            draft.take_events().iter().for_each(DomainEvent::record);
            return Err(WorkbenchError::upstream("Failed to create draft product")(e));
        }
        draft.mark_variation_created(index)?;
    }

    draft.take_events().iter().for_each(DomainEvent::record);
    let elapsed_ms = (Utc::now() - draft.created_at()).num_milliseconds();
    tracing::info!(product_id = created.id, variations = total, elapsed_ms, "draft variable product ready");

    Ok((StatusCode::CREATED, Json(CreateDraftResponse {
        ok: true,
        product_id: created.id,
        permalink: created.permalink,
        admin_edit_url: s.commerce.admin_edit_url(created.id),
        variation_count: total,
    })))
}
