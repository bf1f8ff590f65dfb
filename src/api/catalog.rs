use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use super::extract::Json;
use super::AppState;
use crate::domain::aggregates::{term, CatalogTerm, TermKind};
use crate::domain::value_objects::Label;
use crate::{Result, WorkbenchError};

#[derive(Debug, Serialize)]
pub struct TermsResponse { pub ok: bool, pub terms: Vec<CatalogTerm> }

#[derive(Debug, Deserialize)]
pub struct EnsureTermRequest { #[serde(default)] pub name: String }

#[derive(Debug, Serialize)]
pub struct EnsureTermResponse { pub ok: bool, pub term: CatalogTerm, pub created: bool }

async fn list(s: &AppState, kind: TermKind) -> Result<Json<TermsResponse>> {
    let terms = s.commerce.list_terms(kind).await.map_err(WorkbenchError::upstream("Failed to fetch catalog terms"))?;
    Ok(Json(TermsResponse { ok: true, terms }))
}

/// Returns the matching term if one already exists, otherwise creates it.
async fn ensure(s: &AppState, kind: TermKind, name: &str) -> Result<(StatusCode, Json<EnsureTermResponse>)> {
    let label = Label::new(name.trim())
        .map_err(|_| WorkbenchError::Validation(format!("{} name cannot be empty", capitalised(kind))))?;

    let existing = s.commerce.list_terms(kind).await.map_err(WorkbenchError::upstream("Failed to fetch catalog terms"))?;
    if let Some(found) = term::find_existing(&existing, &label) {
        tracing::info!(kind = kind.as_str(), name = %label, id = found.id, "catalog term already exists");
        return Ok((StatusCode::OK, Json(EnsureTermResponse { ok: true, term: found.clone(), created: false })));
    }

    let created = s.commerce.create_term(kind, label.as_str()).await
        .map_err(WorkbenchError::upstream("Failed to create catalog term"))?;
    Ok((StatusCode::CREATED, Json(EnsureTermResponse { ok: true, term: created, created: true })))
}

fn capitalised(kind: TermKind) -> &'static str {
    match kind { TermKind::Category => "Category", TermKind::Tag => "Tag" }
}

pub async fn list_categories(State(s): State<AppState>) -> Result<Json<TermsResponse>> { list(&s, TermKind::Category).await }
pub async fn list_tags(State(s): State<AppState>) -> Result<Json<TermsResponse>> { list(&s, TermKind::Tag).await }

pub async fn ensure_category(State(s): State<AppState>, Json(r): Json<EnsureTermRequest>) -> Result<(StatusCode, Json<EnsureTermResponse>)> {
    ensure(&s, TermKind::Category, &r.name).await
}

pub async fn ensure_tag(State(s): State<AppState>, Json(r): Json<EnsureTermRequest>) -> Result<(StatusCode, Json<EnsureTermResponse>)> {
    ensure(&s, TermKind::Tag, &r.name).await
}
