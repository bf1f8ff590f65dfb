//! Social media posts: drafted from a product or an idea, scheduled into the
//! post calendar, or published straight to a Facebook page or Instagram.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use super::listing::strip_code_fence;

pub const POSTS_PER_PRODUCT: usize = 5;
pub const INSTAGRAM_CAPTION_LIMIT: usize = 2200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocialError {
    #[error("Missing required fields: productId, productName, and description are required")]
    MissingProductFields,
    #[error("At least one product image is required")]
    NoImages,
    #[error("idea is required and cannot be empty")]
    EmptyIdea,
    #[error("Posts array is required and must not be empty")]
    NoPosts,
    #[error("Each post must have postText, productName, and scheduledDateTime")]
    IncompletePost,
    #[error("message is required and cannot be empty")]
    EmptyMessage,
    #[error("caption is required and cannot be empty")]
    EmptyCaption,
    #[error("caption must be at most {limit} characters")]
    CaptionTooLong { limit: usize },
    #[error("imageUrl is required and must be a valid HTTP/HTTPS URL")]
    InvalidImageUrl,
    #[error("Failed to parse model response: {0}")]
    InvalidPosts(String),
}

/// A product as the post writer sees it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialPostRequest {
    pub product_id: u64,
    pub product_name: String,
    pub description: String,
    pub short_description: String,
    pub price: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub image_urls: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub text: String,
    pub character_count: usize,
    pub image_url: String,
    pub image_alt: String,
}

impl SocialPostRequest {
    pub fn validate(&self) -> Result<(), SocialError> {
        if self.product_id == 0 || self.product_name.trim().is_empty() || self.description.trim().is_empty() {
            return Err(SocialError::MissingProductFields);
        }
        if !self.image_urls.iter().any(|u| !u.trim().is_empty()) {
            return Err(SocialError::NoImages);
        }
        Ok(())
    }

    pub fn prompt(&self) -> String {
        let mut details = format!(
            "Product: {}\n\nDescription: {}",
            self.product_name,
            strip_html(&self.description),
        );
        let short = strip_html(&self.short_description);
        let lines = [
            ("Summary", short),
            ("Price", if self.price.is_empty() { String::new() } else { format!("£{}", self.price) }),
            ("Categories", self.categories.join(", ")),
            ("Tags", self.tags.join(", ")),
        ];
        for (heading, value) in lines {
            if !value.is_empty() {
                details.push_str(&format!("\n\n{heading}: {value}"));
            }
        }

        format!(
            r#"You are a social media manager for a small handmade-crafts business. Write {POSTS_PER_PRODUCT} distinct social media posts promoting this product:

{details}

Vary the angle of each post (gift idea, craftsmanship, personalisation, seasonal, behind the scenes). Keep each post under 300 characters, use a warm and friendly tone and end with two or three relevant hashtags.

You must respond with ONLY valid JSON in this exact format:
{{
  "posts": ["Post 1", "Post 2", "Post 3", "Post 4", "Post 5"]
}}

Respond with ONLY the JSON object, no other text or explanations."#
        )
    }

    /// Pairs each generated text with a product image, cycling through the
    /// images when there are more posts than photos.
    pub fn posts_from_model_text(&self, text: &str) -> Result<Vec<SocialPost>, SocialError> {
        let value: Value = serde_json::from_str(strip_code_fence(text)).map_err(|e| SocialError::InvalidPosts(e.to_string()))?;
        let texts = value.get("posts").unwrap_or(&value).as_array()
            .ok_or_else(|| SocialError::InvalidPosts("posts must be an array".into()))?
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        if texts.is_empty() {
            return Err(SocialError::InvalidPosts("no posts returned".into()));
        }

        let images: Vec<&String> = self.image_urls.iter().filter(|u| !u.trim().is_empty()).collect();
        if images.is_empty() {
            return Err(SocialError::NoImages);
        }
        Ok(texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| SocialPost {
                character_count: text.chars().count(),
                text,
                image_url: images[i % images.len()].clone(),
                image_alt: self.product_name.clone(),
            })
            .collect())
    }
}

/// The idea is sent to the model as-is.
pub fn validate_idea(idea: &str) -> Result<&str, SocialError> {
    let idea = idea.trim();
    if idea.is_empty() { Err(SocialError::EmptyIdea) } else { Ok(idea) }
}

/// Drops tags and collapses whitespace.
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => { in_tag = true; text.push(' '); }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&nbsp;", " ").replace("&amp;", "&").split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    #[default]
    Facebook,
    Instagram,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Scheduled,
    Posted,
    Failed,
}

impl SocialPlatform {
    fn label(self) -> &'static str {
        match self { Self::Facebook => "Facebook", Self::Instagram => "Instagram" }
    }
}

impl PostStatus {
    fn label(self) -> &'static str {
        match self { Self::Scheduled => "Scheduled", Self::Posted => "Posted", Self::Failed => "Failed" }
    }
}

/// One entry in the post calendar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduledPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub post_text: String,
    pub product_name: String,
    pub scheduled_date_time: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub platform: SocialPlatform,
    pub status: PostStatus,
}

impl ScheduledPost {
    pub fn validate_batch(posts: &[ScheduledPost]) -> Result<(), SocialError> {
        if posts.is_empty() {
            return Err(SocialError::NoPosts);
        }
        let incomplete = |p: &ScheduledPost| p.post_text.trim().is_empty() || p.product_name.trim().is_empty() || p.scheduled_date_time.is_none();
        if posts.iter().any(incomplete) {
            return Err(SocialError::IncompletePost);
        }
        Ok(())
    }

    /// Record fields for the social posts table.
    pub fn record_fields(&self) -> Value {
        let mut fields = json!({
            "Post Text": self.post_text,
            "Product Name": self.product_name,
            "Scheduled Date Time": self.scheduled_date_time.map(|t| t.to_rfc3339()),
            "Platform": self.platform.label(),
            "Status": self.status.label(),
        });
        if let Some(url) = self.image_url.as_ref().filter(|u| !u.is_empty()) {
            fields["Image URL"] = json!(url);
        }
        fields
    }

    /// Reads a stored record back; rows without text or a time are skipped.
    pub fn from_record(id: &str, fields: &Value) -> Option<Self> {
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);
        let scheduled = text("Scheduled Date Time")?.parse::<DateTime<Utc>>().ok()?;
        let platform = match text("Platform").as_deref() {
            Some("Instagram") => SocialPlatform::Instagram,
            _ => SocialPlatform::Facebook,
        };
        let status = match text("Status").as_deref() {
            Some("Posted") => PostStatus::Posted,
            Some("Failed") => PostStatus::Failed,
            _ => PostStatus::Scheduled,
        };
        Some(Self {
            id: Some(id.to_string()),
            post_text: text("Post Text").filter(|t| !t.is_empty())?,
            product_name: text("Product Name").unwrap_or_default(),
            scheduled_date_time: Some(scheduled),
            image_url: text("Image URL"),
            platform,
            status,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacebookPost {
    pub message: String,
    pub image_url: Option<String>,
    /// Unix seconds; the page holds the post unpublished until then.
    pub scheduled_publish_time: Option<i64>,
}

impl FacebookPost {
    pub fn validate(&self) -> Result<(), SocialError> {
        if self.message.trim().is_empty() { return Err(SocialError::EmptyMessage); }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstagramPost {
    pub caption: String,
    pub image_url: String,
}

impl InstagramPost {
    pub fn validate(&self) -> Result<(), SocialError> {
        if self.caption.trim().is_empty() { return Err(SocialError::EmptyCaption); }
        if self.caption.chars().count() > INSTAGRAM_CAPTION_LIMIT {
            return Err(SocialError::CaptionTooLong { limit: INSTAGRAM_CAPTION_LIMIT });
        }
        if !self.image_url.starts_with("http") { return Err(SocialError::InvalidImageUrl); }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedPost { pub id: String, pub post_url: String }
