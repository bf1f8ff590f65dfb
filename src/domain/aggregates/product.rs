//! Draft Product Aggregate
//!
//! A variable product held locally until it is pushed to the commerce
//! platform as a draft, together with one variation per attribute
//! combination.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;
use crate::domain::events::{DomainEvent, ProductEvent};
use crate::domain::variations::{generate_combinations, sanitize_attributes, total_variations, VariationAttribute, VariationCombination, VariationError};

#[derive(Clone, Debug)]
pub struct DraftProduct {
    id: String,
    name: String,
    description: String,
    short_description: String,
    attributes: Vec<VariationAttribute>,
    combinations: Vec<VariationCombination>,
    category_ids: Vec<u64>,
    tag_ids: Vec<u64>,
    remote_id: Option<u64>,
    created_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

/// Request body for one variation of a variable product.
#[derive(Clone, Debug, Serialize)]
pub struct VariationPayload<'a> { pub attributes: &'a VariationCombination }

pub struct DraftSpec {
    pub name: String,
    pub description: String,
    pub short_description: String,
    pub attributes: Vec<VariationAttribute>,
    pub category_ids: Vec<u64>,
    pub tag_ids: Vec<u64>,
}

impl DraftProduct {
    pub fn create(spec: DraftSpec) -> Result<Self, DraftError> {
        let name = spec.name.trim().to_string();
        if name.is_empty() { return Err(DraftError::MissingName); }
        if spec.description.trim().is_empty() { return Err(DraftError::MissingDescription); }

        let attributes = sanitize_attributes(&spec.attributes)?;
        let combinations = generate_combinations(&attributes)?;

        let id = Uuid::now_v7().to_string();
        let mut draft = Self {
            id: id.clone(), name, description: spec.description, short_description: spec.short_description,
            attributes, combinations, category_ids: spec.category_ids, tag_ids: spec.tag_ids,
            remote_id: None, created_at: Utc::now(), events: vec![],
        };
        let variation_count = draft.variation_count();
        draft.raise_event(DomainEvent::Product(ProductEvent::DraftPrepared { draft_id: id, variation_count }));
        Ok(draft)
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn attributes(&self) -> &[VariationAttribute] { &self.attributes }
    pub fn combinations(&self) -> &[VariationCombination] { &self.combinations }
    pub fn variation_count(&self) -> usize { total_variations(&self.attributes) }
    pub fn remote_id(&self) -> Option<u64> { self.remote_id }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

    /// Parent product body: a variable product in draft status.
    pub fn product_payload(&self) -> Value {
        json!({
            "name": self.name,
            "type": "variable",
            "status": "draft",
            "description": self.description,
            "short_description": self.short_description,
            "attributes": self.attributes.iter().map(|a| json!({
                "name": a.name,
                "visible": true,
                "variation": true,
                "options": a.options,
            })).collect::<Vec<_>>(),
            "categories": self.category_ids.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>(),
            "tags": self.tag_ids.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>(),
        })
    }

    pub fn variation_payloads(&self) -> impl Iterator<Item = VariationPayload<'_>> {
        self.combinations.iter().map(|attributes| VariationPayload { attributes })
    }

    pub fn mark_created(&mut self, remote_id: u64) {
        self.remote_id = Some(remote_id);
        self.raise_event(DomainEvent::Product(ProductEvent::Created { draft_id: self.id.clone(), remote_id }));
    }

    pub fn mark_variation_created(&mut self, index: usize) -> Result<(), DraftError> {
        let remote_id = self.remote_id.ok_or(DraftError::NotCreated)?;
        let title = self.combinations.get(index).map(|c| c.title()).ok_or(DraftError::UnknownVariation(index))?;
        self.raise_event(DomainEvent::Product(ProductEvent::VariationCreated { remote_id, index, title }));
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Product name is required")]
    MissingName,
    #[error("Product description is required")]
    MissingDescription,
    #[error(transparent)]
    Variation(#[from] VariationError),
    #[error("Draft has not been created upstream yet")]
    NotCreated,
    #[error("No variation at index {0}")]
    UnknownVariation(usize),
}
