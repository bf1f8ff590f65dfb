use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use super::extract::Json;
use super::AppState;
use crate::domain::aggregates::social::validate_idea;
use crate::domain::aggregates::{FacebookPost, InstagramPost, ScheduledPost, SocialPost, SocialPostRequest};
use crate::domain::events::{DomainEvent, SocialEvent};
use crate::{Result, WorkbenchError};

#[derive(Debug, Serialize)]
pub struct PostsResponse { pub ok: bool, pub posts: Vec<SocialPost> }

#[derive(Debug, Default, Deserialize)]
pub struct IdeaRequest { #[serde(default)] pub idea: String }

#[derive(Debug, Serialize)]
pub struct IdeaResponse { pub ok: bool, pub post: String }

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleRequest { #[serde(default)] pub posts: Vec<ScheduledPost> }

#[derive(Debug, Serialize)]
pub struct ScheduledResponse { pub ok: bool, pub posts: Vec<ScheduledPost> }

#[derive(Debug, Serialize)]
pub struct MessageResponse { pub ok: bool, pub message: String }

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookResponse { pub ok: bool, pub message: &'static str, pub facebook_post_id: String, pub facebook_post_url: String }

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramResponse { pub ok: bool, pub message: &'static str, pub instagram_post_id: String, pub instagram_post_url: String }

pub async fn generate_posts(State(s): State<AppState>, Json(r): Json<SocialPostRequest>) -> Result<Json<PostsResponse>> {
    r.validate()?;
    tracing::info!(product_id = r.product_id, product_name = %r.product_name, "generating social posts");
    let posts = s.listing_generator.generate_social_posts(&r).await
        .map_err(WorkbenchError::upstream("Failed to generate social media posts"))?;
    DomainEvent::Social(SocialEvent::PostsGenerated { product_id: r.product_id, count: posts.len() }).record();
    Ok(Json(PostsResponse { ok: true, posts }))
}

pub async fn post_from_idea(State(s): State<AppState>, Json(r): Json<IdeaRequest>) -> Result<Json<IdeaResponse>> {
    let idea = validate_idea(&r.idea)?;
    let post = s.listing_generator.post_from_idea(idea).await.map_err(WorkbenchError::upstream("Failed to generate post"))?;
    tracing::info!(chars = post.chars().count(), "post generated from idea");
    Ok(Json(IdeaResponse { ok: true, post }))
}

pub async fn scheduled_posts(State(s): State<AppState>) -> Result<Json<ScheduledResponse>> {
    let posts = s.listing_store.fetch_scheduled_posts().await.map_err(WorkbenchError::upstream("Failed to fetch scheduled posts"))?;
    Ok(Json(ScheduledResponse { ok: true, posts }))
}

pub async fn schedule_posts(State(s): State<AppState>, Json(r): Json<ScheduleRequest>) -> Result<(StatusCode, Json<MessageResponse>)> {
    ScheduledPost::validate_batch(&r.posts)?;
    s.listing_store.save_scheduled_posts(&r.posts).await.map_err(WorkbenchError::upstream("Failed to schedule posts"))?;
    DomainEvent::Social(SocialEvent::Scheduled { count: r.posts.len() }).record();
    Ok((StatusCode::CREATED, Json(MessageResponse { ok: true, message: format!("Successfully scheduled {} posts", r.posts.len()) })))
}

pub async fn post_to_facebook(State(s): State<AppState>, Json(r): Json<FacebookPost>) -> Result<Json<FacebookResponse>> {
    r.validate()?;
    let published = s.social_publisher.post_to_facebook(&r).await.map_err(WorkbenchError::upstream("Failed to post to Facebook"))?;
    DomainEvent::Social(SocialEvent::Published { platform: "facebook", id: published.id.clone() }).record();
    Ok(Json(FacebookResponse {
        ok: true,
        message: "Successfully posted to Facebook",
        facebook_post_id: published.id,
        facebook_post_url: published.post_url,
    }))
}

pub async fn post_to_instagram(State(s): State<AppState>, Json(r): Json<InstagramPost>) -> Result<Json<InstagramResponse>> {
    r.validate()?;
    let published = s.social_publisher.post_to_instagram(&r).await.map_err(WorkbenchError::upstream("Failed to post to Instagram"))?;
    DomainEvent::Social(SocialEvent::Published { platform: "instagram", id: published.id.clone() }).record();
    Ok(Json(InstagramResponse {
        ok: true,
        message: "Successfully posted to Instagram",
        instagram_post_id: published.id,
        instagram_post_url: published.post_url,
    }))
}
