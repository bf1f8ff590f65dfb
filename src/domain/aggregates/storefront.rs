//! Products as the shop already holds them, and the photos attached to them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Publish,
    Draft,
}

impl ProductStatus {
    pub fn as_str(self) -> &'static str {
        match self { Self::Publish => "publish", Self::Draft => "draft" }
    }
}

/// One row of a product picker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: u64,
    pub name: String,
    pub price: String,
    pub thumbnail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRef { pub id: u64, pub name: String }

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub short_description: String,
    pub price: String,
    pub regular_price: String,
    pub images: Vec<ProductImage>,
    pub categories: Vec<TermRef>,
    pub tags: Vec<TermRef>,
    pub permalink: String,
}

impl ProductDetail {
    pub fn image_urls(&self) -> Vec<String> {
        self.images.iter().map(|i| i.src.clone()).collect()
    }
}

/// Display price: the sale price, else the regular price, else "0".
pub fn display_price(price: &str, regular_price: &str) -> String {
    [price, regular_price]
        .into_iter()
        .find(|p| !p.is_empty())
        .unwrap_or("0")
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoError {
    #[error("images is required and must be a non-empty array")]
    NoImages,
    #[error("All images must have a src property")]
    MissingSource,
    #[error("No file provided")]
    NoFile,
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),
}

/// Images to import by URL; the shop downloads each `src` itself.
pub fn validate_attachments(images: &[ProductImage]) -> Result<(), PhotoError> {
    if images.is_empty() { return Err(PhotoError::NoImages); }
    if images.iter().any(|i| i.src.trim().is_empty()) { return Err(PhotoError::MissingSource); }
    Ok(())
}

/// A photo received from the browser, headed for the shop's media library.
#[derive(Clone, Debug)]
pub struct MediaUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub alt_text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedMedia { pub id: u64, pub src: String, pub name: String, pub alt: String }

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

impl MediaUpload {
    /// Builds an upload with a collision-free name: the original base name
    /// reduced to `[A-Za-z0-9_-]` (max 50 chars), a millisecond stamp, and
    /// an extension taken from the content type, else the original name.
    pub fn new(original_name: &str, content_type: &str, bytes: Vec<u8>, alt_text: Option<String>, stamp_millis: i64) -> Result<Self, PhotoError> {
        if bytes.is_empty() { return Err(PhotoError::NoFile); }
        let extension = image_extension(original_name, content_type)?;
        let filename = format!("{}-{stamp_millis}.{extension}", base_name(original_name));
        let content_type = match extension {
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            _ => "image/jpeg",
        };
        Ok(Self { filename, content_type: content_type.to_string(), bytes, alt_text: alt_text.filter(|a| !a.trim().is_empty()) })
    }
}

fn image_extension(original_name: &str, content_type: &str) -> Result<&'static str, PhotoError> {
    let mime = content_type.to_lowercase();
    if mime.starts_with("image/") {
        for (needle, ext) in [("png", "png"), ("jpeg", "jpg"), ("jpg", "jpg"), ("webp", "webp"), ("gif", "gif")] {
            if mime.contains(needle) { return Ok(ext); }
        }
        return Err(PhotoError::UnsupportedType(content_type.to_string()));
    }
    let from_name = original_name.rsplit_once('.').map(|(_, e)| e.to_lowercase());
    match from_name.as_deref() {
        Some(ext) => IMAGE_EXTENSIONS.iter().copied().find(|e| *e == ext).ok_or_else(|| PhotoError::UnsupportedType(ext.to_string())),
        None => Ok("jpg"),
    }
}

fn base_name(original_name: &str) -> String {
    let stem = match original_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => original_name,
    };
    let mut cleaned = String::with_capacity(stem.len());
    for c in stem.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '-' };
        if c == '-' && cleaned.ends_with('-') { continue; }
        cleaned.push(c);
    }
    let trimmed: String = cleaned.trim_matches('-').chars().take(50).collect();
    if trimmed.is_empty() { "image".to_string() } else { trimmed }
}
