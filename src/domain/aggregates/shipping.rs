//! Parcel shipping advice

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::listing::strip_code_fence;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAdviceRequest {
    pub weight_grams: Decimal,
    pub width_mm: Decimal,
    pub height_mm: Decimal,
    pub depth_mm: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAdvice {
    pub service: String,
    pub size_format: String,
    /// Postage cost excluding VAT; feeds the pricing engine as the advised cost.
    pub estimated_cost_net: Decimal,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShippingError {
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),
    #[error("Invalid shipping advice: {0}")]
    InvalidAdvice(String),
}

impl ShippingAdviceRequest {
    pub fn validate(&self) -> Result<(), ShippingError> {
        let checks = [
            ("Weight", self.weight_grams),
            ("Width", self.width_mm),
            ("Height", self.height_mm),
            ("Depth", self.depth_mm),
        ];
        for (field, value) in checks {
            if value <= Decimal::ZERO { return Err(ShippingError::NotPositive(field)); }
        }
        Ok(())
    }

    pub fn prompt(&self) -> String {
        format!(
            r#"You are a UK Royal Mail postage expert. A small business is sending a packed parcel:

Weight: {w}g
Dimensions: {x}mm x {y}mm x {z}mm

Pick the cheapest suitable Royal Mail size format and service for a tracked or signed-for consumer delivery, and estimate the postage cost in GBP excluding VAT.

Respond with ONLY valid JSON in this exact format:
{{
  "service": "Service name",
  "sizeFormat": "Letter, Large Letter, Small Parcel or Medium Parcel",
  "estimatedCostNet": 0.00,
  "notes": "Any caveats about size or weight limits"
}}"#,
            w = self.weight_grams,
            x = self.width_mm,
            y = self.height_mm,
            z = self.depth_mm,
        )
    }
}

impl ShippingAdvice {
    pub fn from_model_text(text: &str) -> Result<Self, ShippingError> {
        let advice: Self = serde_json::from_str(strip_code_fence(text))
            .map_err(|e| ShippingError::InvalidAdvice(e.to_string()))?;
        if advice.estimated_cost_net < Decimal::ZERO {
            return Err(ShippingError::InvalidAdvice("estimatedCostNet is negative".into()));
        }
        Ok(advice)
    }
}
