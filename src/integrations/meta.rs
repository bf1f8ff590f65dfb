//! Meta Graph API client: Facebook page posts and Instagram business posts.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{check_status, IntegrationError, IntegrationResult, SocialPublisher};
use crate::config::{FacebookConfig, InstagramConfig};
use crate::domain::aggregates::{FacebookPost, InstagramPost, PublishedPost};

const GRAPH_ROOT: &str = "https://graph.facebook.com/v24.0";
const FACEBOOK: &str = "Facebook";
const INSTAGRAM: &str = "Instagram";

#[derive(Clone)]
pub struct MetaClient {
    http: reqwest::Client,
    facebook: Option<FacebookConfig>,
    instagram: Option<InstagramConfig>,
}

#[derive(Deserialize)]
struct GraphId {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    post_id: Option<String>,
}

impl GraphId {
    fn into_id(self, service: &'static str) -> IntegrationResult<String> {
        self.id.or(self.post_id).ok_or_else(|| IntegrationError::InvalidResponse(format!("{service} API did not return an ID")))
    }
}

impl MetaClient {
    pub fn new(http: reqwest::Client, facebook: Option<FacebookConfig>, instagram: Option<InstagramConfig>) -> Self {
        Self { http, facebook, instagram }
    }

    /// Photo posts go to `/photos`, text posts to `/feed`. A publish time
    /// leaves the post unpublished until then.
    fn facebook_request(config: &FacebookConfig, post: &FacebookPost) -> (String, Value) {
        let mut body = match post.image_url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => json!({ "url": url, "caption": post.message }),
            None => json!({ "message": post.message }),
        };
        body["access_token"] = json!(config.page_access_token);
        if let Some(at) = post.scheduled_publish_time {
            body["published"] = json!(false);
            body["scheduled_publish_time"] = json!(at);
        }
        let edge = if body.get("url").is_some() { "photos" } else { "feed" };
        (format!("{GRAPH_ROOT}/{}/{edge}", config.page_id), body)
    }

    fn facebook_post_url(config: &FacebookConfig, post: &FacebookPost, id: &str) -> String {
        match post.image_url.as_deref().filter(|u| !u.is_empty()) {
            Some(_) => format!("https://www.facebook.com/{}/photos/{id}", config.page_id),
            None => format!("https://www.facebook.com/{id}"),
        }
    }

    async fn graph_post(&self, service: &'static str, url: String, query: &[(&str, &str)], body: Option<&Value>) -> IntegrationResult<String> {
        let mut request = self.http.post(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let reply: GraphId = check_status(service, request.send().await?).await?.json().await?;
        reply.into_id(service)
    }
}

#[async_trait]
impl SocialPublisher for MetaClient {
    async fn post_to_facebook(&self, post: &FacebookPost) -> IntegrationResult<PublishedPost> {
        let config = self.facebook.as_ref().ok_or(IntegrationError::NotConfigured(FACEBOOK))?;
        post.validate()?;
        let (url, body) = Self::facebook_request(config, post);
        let id = self.graph_post(FACEBOOK, url, &[], Some(&body)).await?;
        let post_url = Self::facebook_post_url(config, post, &id);
        tracing::info!(%id, %post_url, scheduled = post.scheduled_publish_time.is_some(), "posted to facebook");
        Ok(PublishedPost { id, post_url })
    }

    /// Two steps: create a media container, then publish it.
    async fn post_to_instagram(&self, post: &InstagramPost) -> IntegrationResult<PublishedPost> {
        let config = self.instagram.as_ref().ok_or(IntegrationError::NotConfigured(INSTAGRAM))?;
        post.validate()?;
        let container = self.graph_post(
            INSTAGRAM,
            format!("{GRAPH_ROOT}/{}/media", config.account_id),
            &[("image_url", post.image_url.as_str()), ("caption", post.caption.as_str()), ("access_token", config.access_token.as_str())],
            None,
        ).await?;
        tracing::debug!(%container, "instagram media container created");
        let id = self.graph_post(
            INSTAGRAM,
            format!("{GRAPH_ROOT}/{}/media_publish", config.account_id),
            &[("creation_id", container.as_str()), ("access_token", config.access_token.as_str())],
            None,
        ).await?;
        tracing::info!(%id, "posted to instagram");
        // The publish reply carries no shortcode, so the link is the profile root.
        Ok(PublishedPost { id, post_url: "https://www.instagram.com/".into() })
    }
}
