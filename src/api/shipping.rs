use axum::extract::State;
use serde::Serialize;

use super::extract::Json;
use super::AppState;
use crate::domain::aggregates::{ShippingAdvice, ShippingAdviceRequest};
use crate::{Result, WorkbenchError};

#[derive(Debug, Serialize)]
pub struct AdviceResponse { pub ok: bool, pub advice: ShippingAdvice }

pub async fn advice(State(s): State<AppState>, Json(r): Json<ShippingAdviceRequest>) -> Result<Json<AdviceResponse>> {
    r.validate()?;
    let advice = s.shipping_advisor.advise(&r).await.map_err(WorkbenchError::upstream("Failed to get shipping advice"))?;
    tracing::info!(service = %advice.service, cost = %advice.estimated_cost_net, "shipping advice");
    Ok(Json(AdviceResponse { ok: true, advice }))
}
