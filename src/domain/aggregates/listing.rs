//! Listing copy: what the seller tells us, and what the copywriter model
//! hands back.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Absent fields read as empty so `validate` reports them by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingInput {
    pub product_name: String,
    pub what_is_it: String,
    pub who_is_it_for: String,
    pub variations: String,
    pub personalisation: String,
    pub price_notes: Option<String>,
    pub postage_notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingAssets {
    pub title: String,
    pub description: String,
    pub key_features: Vec<String>,
    pub tags: Vec<String>,
    pub personalisation_short: String,
    pub personalisation_long: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Failed to parse model response as JSON: {0}")]
    NotJson(String),
    #[error("Invalid response: {0}")]
    InvalidAssets(&'static str),
}

impl ListingInput {
    pub fn validate(&self) -> Result<(), ListingError> {
        if self.product_name.trim().is_empty() { return Err(ListingError::MissingField("Product name")); }
        if self.what_is_it.trim().is_empty() { return Err(ListingError::MissingField("What is it")); }
        if self.who_is_it_for.trim().is_empty() { return Err(ListingError::MissingField("Who is it for")); }
        Ok(())
    }

    /// Price and postage notes joined by a blank line, skipping empty ones.
    pub fn price_postage_notes(&self) -> String {
        [&self.price_notes, &self.postage_notes]
            .into_iter()
            .flatten()
            .filter(|n| !n.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn prompt(&self) -> String {
        let mut extras = String::new();
        let optional = [
            ("Available variations", Some(&self.variations)),
            ("Personalisation options", Some(&self.personalisation)),
            ("Pricing notes", self.price_notes.as_ref()),
            ("Postage notes", self.postage_notes.as_ref()),
        ];
        for (heading, value) in optional {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                extras.push_str(&format!("\n\n{heading}: {v}"));
            }
        }

        format!(
            r#"You are a professional e-commerce listing copywriter. Generate professional Etsy listing content for this product:

Product: {name}

Description: {what}

Target audience: {who}{extras}

You must respond with ONLY valid JSON in this exact format:
{{
  "title": "SEO-optimized Etsy title (max 140 characters)",
  "description": "Engaging product description with benefits and features",
  "keyFeatures": ["Feature 1", "Feature 2", "Feature 3"],
  "tags": ["tag1", "tag2", "tag3", "tag4", "tag5"],
  "personalisationShort": "Brief personalisation description (1-2 sentences)",
  "personalisationLong": "Detailed personalisation instructions and options"
}}

Focus on SEO-friendly titles, benefit-driven descriptions, clear key features, relevant Etsy search tags and professional personalisation guidance.

Respond with ONLY the JSON object, no other text or explanations."#,
            name = self.product_name,
            what = self.what_is_it,
            who = self.who_is_it_for,
        )
    }

    /// Record fields for the listings table.
    pub fn record_fields(&self, assets: &ListingAssets) -> Value {
        json!({
            "Product Name": self.product_name,
            "Raw Input – What is it?": self.what_is_it,
            "Raw Input – Who is it for?": self.who_is_it_for,
            "Raw Input – Variations": self.variations,
            "Raw Input – Personalisation": self.personalisation,
            "Raw Input – Price/Postage notes": self.price_postage_notes(),
            "Listing Title": assets.title,
            "Listing Description": assets.description,
            "Key Features (bullets)": assets.key_features.join("\n"),
            "Listing Tags": assets.tags.join(", "),
            "Personalisation – Short": assets.personalisation_short,
            "Personalisation – Long": assets.personalisation_long,
            "Status": "Draft",
        })
    }
}

/// Removes a leading ``` or ```json fence and a trailing ``` fence.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else { return text };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

impl ListingAssets {
    /// Parses and validates the model's reply.
    pub fn from_model_text(text: &str) -> Result<Self, ListingError> {
        let value: Value = serde_json::from_str(strip_code_fence(text)).map_err(|e| ListingError::NotJson(e.to_string()))?;
        let obj = value.as_object().ok_or(ListingError::InvalidAssets("expected object"))?;

        Ok(Self {
            title: required_str(obj, "title", "title must be a string")?,
            description: required_str(obj, "description", "description must be a string")?,
            key_features: str_array(obj, "keyFeatures", "keyFeatures must be an array")?,
            tags: str_array(obj, "tags", "tags must be an array")?,
            personalisation_short: required_str(obj, "personalisationShort", "personalisationShort must be a string")?,
            personalisation_long: required_str(obj, "personalisationLong", "personalisationLong must be a string")?,
        })
    }
}

fn required_str(obj: &Map<String, Value>, key: &str, msg: &'static str) -> Result<String, ListingError> {
    match obj.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(ListingError::InvalidAssets(msg)),
    }
}

fn str_array(obj: &Map<String, Value>, key: &str, msg: &'static str) -> Result<Vec<String>, ListingError> {
    let items = obj.get(key).and_then(Value::as_array).ok_or(ListingError::InvalidAssets(msg))?;
    Ok(items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
}
