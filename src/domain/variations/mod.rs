//! Variation attributes and the combinations they expand into.
//!
//! A variable product carries a list of attributes ("Colour", "Size"), each
//! with a list of options. Every sellable variant is one combination: exactly
//! one option picked per attribute. Combinations are computed on demand and
//! handed straight to the commerce platform, one variation record each.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::value_objects::Label;

/// Upper bound on combinations for one product. Each one becomes a separate
/// variation record upstream.
pub const MAX_VARIATIONS: usize = 250;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationAttribute {
    pub name: String,
    pub options: Vec<String>,
}

impl VariationAttribute {
    /// Builds an attribute from raw user input.
    ///
    /// The name is trimmed and whitespace-collapsed. Options are trimmed,
    /// blanks dropped, and duplicates removed case-insensitively keeping the
    /// first spelling seen.
    pub fn sanitized<I, S>(name: &str, options: I) -> Result<Self, VariationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = Label::new(name).map_err(|_| VariationError::MissingName)?.into_inner();
        let mut seen = HashSet::new();
        let options: Vec<String> = options
            .into_iter()
            .map(|o| o.as_ref().trim().to_string())
            .filter(|o| !o.is_empty() && seen.insert(o.to_lowercase()))
            .collect();
        if options.is_empty() {
            return Err(VariationError::EmptyOptions { attribute: name });
        }
        Ok(Self { name, options })
    }

    pub fn option_count(&self) -> usize { self.options.len() }
}

/// One attribute/option pick inside a combination. Serialises the way the
/// commerce platform expects variation attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationChoice {
    #[serde(rename = "name")]
    pub attribute_name: String,
    pub option: String,
}

/// One pick per attribute, in the same order as the input attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationCombination(pub Vec<VariationChoice>);

impl VariationCombination {
    pub fn choices(&self) -> &[VariationChoice] { &self.0 }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// "Red / M" style title for logs and previews.
    pub fn title(&self) -> String {
        self.0.iter().map(|c| c.option.as_str()).collect::<Vec<_>>().join(" / ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariationError {
    #[error("Attribute name is required")]
    MissingName,
    #[error("Attribute \"{attribute}\" must have at least one valid option")]
    EmptyOptions { attribute: String },
    #[error("Attribute options expand to more than {limit} variations")]
    TooMany { limit: usize },
}

/// Cartesian product of the attributes' options.
///
/// The first attribute varies slowest and the last fastest. An empty input
/// produces no combinations. The count is checked against [`MAX_VARIATIONS`]
/// before anything is allocated.
pub fn generate_combinations(
    attributes: &[VariationAttribute],
) -> Result<Vec<VariationCombination>, VariationError> {
    if attributes.is_empty() {
        return Ok(Vec::new());
    }
    if let Some(empty) = attributes.iter().find(|a| a.options.is_empty()) {
        return Err(VariationError::EmptyOptions { attribute: empty.name.clone() });
    }
    if total_variations(attributes) > MAX_VARIATIONS {
        return Err(VariationError::TooMany { limit: MAX_VARIATIONS });
    }

    let mut combos: Vec<Vec<VariationChoice>> = vec![Vec::with_capacity(attributes.len())];
    for attribute in attributes {
        let mut next = Vec::with_capacity(combos.len() * attribute.options.len());
        for prefix in &combos {
            for option in &attribute.options {
                let mut combo = prefix.clone();
                combo.push(VariationChoice {
                    attribute_name: attribute.name.clone(),
                    option: option.clone(),
                });
                next.push(combo);
            }
        }
        combos = next;
    }

    Ok(combos.into_iter().map(VariationCombination).collect())
}

/// Number of combinations the attributes expand into, saturating at
/// `usize::MAX`.
pub fn total_variations(attributes: &[VariationAttribute]) -> usize {
    if attributes.is_empty() {
        return 0;
    }
    attributes
        .iter()
        .map(VariationAttribute::option_count)
        .try_fold(1usize, usize::checked_mul)
        .unwrap_or(usize::MAX)
}

/// Sanitises every attribute, failing on the first one that ends up unusable.
pub fn sanitize_attributes(raw: &[VariationAttribute]) -> Result<Vec<VariationAttribute>, VariationError> {
    raw.iter()
        .map(|a| VariationAttribute::sanitized(&a.name, &a.options))
        .collect()
}

/// Form row: an attribute name plus its options as comma-separated text.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AttributeRow {
    pub name: String,
    pub values: String,
}

/// Parses form rows, skipping any row whose name or values are blank.
pub fn parse_attribute_rows(rows: &[AttributeRow]) -> Vec<VariationAttribute> {
    rows.iter()
        .filter(|row| !row.name.trim().is_empty() && !row.values.trim().is_empty())
        .filter_map(|row| VariationAttribute::sanitized(&row.name, row.values.split(',')).ok())
        .collect()
}
