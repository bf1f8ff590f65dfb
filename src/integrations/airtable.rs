//! Airtable store for generated listings and the social post calendar.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{check_status, IntegrationError, IntegrationResult, ListingStore};
use crate::config::AirtableConfig;
use crate::domain::aggregates::{ListingAssets, ListingInput, ScheduledPost};

const SERVICE: &str = "Airtable";
const API_ROOT: &str = "https://api.airtable.com/v0";
/// Airtable accepts at most ten records per create call.
const BATCH_SIZE: usize = 10;

#[derive(Clone)]
pub struct AirtableClient {
    http: reqwest::Client,
    config: Option<AirtableConfig>,
}

#[derive(Deserialize)]
struct RecordPage {
    #[serde(default)]
    records: Vec<Record>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Deserialize)]
struct Record { id: String, #[serde(default)] fields: Value }

impl AirtableClient {
    pub fn new(http: reqwest::Client, config: Option<AirtableConfig>) -> Self { Self { http, config } }

    fn config(&self) -> IntegrationResult<&AirtableConfig> {
        self.config.as_ref().ok_or(IntegrationError::NotConfigured(SERVICE))
    }

    fn table_url(base_id: &str, table: &str) -> IntegrationResult<Url> {
        let mut url = Url::parse(API_ROOT).map_err(|e| IntegrationError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| IntegrationError::InvalidUrl(API_ROOT.to_string()))?
            .push(base_id)
            .push(table);
        Ok(url)
    }

    async fn create_records(&self, table: &str, records: Vec<Value>) -> IntegrationResult<()> {
        let config = self.config()?;
        let url = Self::table_url(&config.base_id, table)?;
        for chunk in records.chunks(BATCH_SIZE) {
            let body = json!({ "records": chunk.iter().map(|fields| json!({ "fields": fields })).collect::<Vec<_>>(), "typecast": true });
            let response = self.http.post(url.clone()).bearer_auth(&config.token).json(&body).send().await?;
            let _: Value = check_status(SERVICE, response).await?.json().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ListingStore for AirtableClient {
    async fn save_listing(&self, input: &ListingInput, assets: &ListingAssets) -> IntegrationResult<()> {
        let config = self.config()?;
        self.create_records(&config.table_name, vec![input.record_fields(assets)]).await
    }

    async fn save_scheduled_posts(&self, posts: &[ScheduledPost]) -> IntegrationResult<()> {
        let config = self.config()?;
        self.create_records(&config.social_table_name, posts.iter().map(ScheduledPost::record_fields).collect()).await?;
        tracing::info!(count = posts.len(), "scheduled posts saved");
        Ok(())
    }

    async fn fetch_scheduled_posts(&self) -> IntegrationResult<Vec<ScheduledPost>> {
        let config = self.config()?;
        let url = Self::table_url(&config.base_id, &config.social_table_name)?;
        let mut posts = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let mut request = self.http
                .get(url.clone())
                .bearer_auth(&config.token)
                .query(&[("sort[0][field]", "Scheduled Date Time"), ("sort[0][direction]", "asc")]);
            if let Some(o) = &offset {
                request = request.query(&[("offset", o.as_str())]);
            }
            let page: RecordPage = check_status(SERVICE, request.send().await?).await?.json().await?;
            posts.extend(page.records.iter().filter_map(|r| ScheduledPost::from_record(&r.id, &r.fields)));
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }
        posts.sort_by_key(|p| p.scheduled_date_time);
        Ok(posts)
    }
}
