use serde::{Deserialize, Serialize};

use super::extract::Json;

use crate::domain::variations::{generate_combinations, parse_attribute_rows, sanitize_attributes, total_variations, AttributeRow, VariationAttribute, VariationCombination};
use crate::Result;

/// Either already-split attributes or raw form rows ("Red, Blue").
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(default)]
    pub attributes: Vec<VariationAttribute>,
    #[serde(default)]
    pub rows: Vec<AttributeRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub ok: bool,
    pub attributes: Vec<VariationAttribute>,
    pub total_variations: usize,
    pub combinations: Vec<VariationCombination>,
}

pub async fn preview(Json(r): Json<PreviewRequest>) -> Result<Json<PreviewResponse>> {
    let mut attributes = sanitize_attributes(&r.attributes)?;
    attributes.extend(parse_attribute_rows(&r.rows));
    let combinations = generate_combinations(&attributes)?;
    Ok(Json(PreviewResponse { ok: true, total_variations: total_variations(&attributes), attributes, combinations }))
}
