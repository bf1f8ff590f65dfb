//! Catalog terms (product categories and tags)

use serde::{Deserialize, Serialize};
use crate::domain::value_objects::Label;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTerm { pub id: u64, pub name: String, pub slug: String }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TermKind { Category, Tag }

impl TermKind {
    pub fn as_str(self) -> &'static str { match self { Self::Category => "category", Self::Tag => "tag" } }
    pub fn collection(self) -> &'static str { match self { Self::Category => "categories", Self::Tag => "tags" } }
}

/// Finds a term that already covers `name`, matching either its name
/// case-insensitively or its slug against the hyphenated name.
pub fn find_existing<'a>(terms: &'a [CatalogTerm], name: &Label) -> Option<&'a CatalogTerm> {
    let lower = name.as_str().to_lowercase();
    let slug = name.slug();
    terms.iter().find(|t| t.name.to_lowercase() == lower || t.slug.to_lowercase() == slug)
}
