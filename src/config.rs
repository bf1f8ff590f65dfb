//! Runtime configuration read from the environment (and `.env` via dotenvy).
//!
//! Service credentials are optional: a missing set leaves that adapter
//! unconfigured, and its calls fail with `IntegrationError::NotConfigured`.

use std::env;

pub const DEFAULT_PORT: u16 = 8083;
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-haiku-4-5-20251001";
pub const DEFAULT_AIRTABLE_TABLE: &str = "Listings";
pub const DEFAULT_AIRTABLE_SOCIAL_TABLE: &str = "Social Posts";

#[derive(Clone, Debug)]
pub struct WooConfig { pub base_url: String, pub consumer_key: String, pub consumer_secret: String }

#[derive(Clone, Debug)]
pub struct AnthropicConfig { pub api_key: String, pub model: String }

#[derive(Clone, Debug)]
pub struct AirtableConfig { pub base_id: String, pub token: String, pub table_name: String, pub social_table_name: String }

#[derive(Clone, Debug)]
pub struct FacebookConfig { pub page_id: String, pub page_access_token: String }

#[derive(Clone, Debug)]
pub struct InstagramConfig { pub account_id: String, pub access_token: String }

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub port: u16,
    pub woo: Option<WooConfig>,
    pub anthropic: Option<AnthropicConfig>,
    pub airtable: Option<AirtableConfig>,
    pub facebook: Option<FacebookConfig>,
    pub instagram: Option<InstagramConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds config from any key lookup; blank values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(p) => p.parse().map_err(|e| anyhow::anyhow!("invalid PORT {p:?}: {e}"))?,
            None => DEFAULT_PORT,
        };

        let woo = match (get("WOO_BASE_URL"), get("WOO_CONSUMER_KEY"), get("WOO_CONSUMER_SECRET")) {
            (Some(base_url), Some(consumer_key), Some(consumer_secret)) => Some(WooConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                consumer_key,
                consumer_secret,
            }),
            _ => None,
        };

        let anthropic = get("ANTHROPIC_API_KEY").map(|api_key| AnthropicConfig {
            api_key,
            model: get("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string()),
        });

        let airtable = match (get("AIRTABLE_BASE_ID"), get("AIRTABLE_TOKEN")) {
            (Some(base_id), Some(token)) => Some(AirtableConfig {
                base_id,
                token,
                table_name: get("AIRTABLE_TABLE_NAME").unwrap_or_else(|| DEFAULT_AIRTABLE_TABLE.to_string()),
                social_table_name: get("AIRTABLE_SOCIAL_TABLE_NAME").unwrap_or_else(|| DEFAULT_AIRTABLE_SOCIAL_TABLE.to_string()),
            }),
            _ => None,
        };

        let facebook = match (get("FACEBOOK_PAGE_ID"), get("FACEBOOK_PAGE_ACCESS_TOKEN")) {
            (Some(page_id), Some(page_access_token)) => Some(FacebookConfig { page_id, page_access_token }),
            _ => None,
        };

        let instagram = match (get("INSTAGRAM_BUSINESS_ACCOUNT_ID"), get("INSTAGRAM_ACCESS_TOKEN")) {
            (Some(account_id), Some(access_token)) => Some(InstagramConfig { account_id, access_token }),
            _ => None,
        };

        Ok(Self { port, woo, anthropic, airtable, facebook, instagram })
    }
}
