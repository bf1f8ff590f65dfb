//! WooCommerce REST API (v3) client.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{check_status, CommerceApi, CreatedProduct, IntegrationError, IntegrationResult};
use crate::config::WooConfig;
use crate::domain::aggregates::storefront::display_price;
use crate::domain::aggregates::{
    CatalogTerm, MediaUpload, ProductDetail, ProductImage, ProductStatus, ProductSummary, TermKind, TermRef, UploadedMedia, VariationPayload,
};
use crate::domain::variations::VariationCombination;

const SERVICE: &str = "WooCommerce";
const PER_PAGE: usize = 100;

#[derive(Clone)]
pub struct WooCommerceClient {
    http: reqwest::Client,
    config: Option<WooConfig>,
}

#[derive(Deserialize)]
struct ProductReply { id: u64, #[serde(default)] permalink: Option<String> }

/// The subset of a WooCommerce product the workbench reads.
#[derive(Deserialize)]
struct WooProduct {
    id: u64,
    #[serde(default)] name: String,
    #[serde(default)] description: String,
    #[serde(default)] short_description: String,
    #[serde(default)] price: String,
    #[serde(default)] regular_price: String,
    #[serde(default)] images: Vec<ProductImage>,
    #[serde(default)] categories: Vec<TermRef>,
    #[serde(default)] tags: Vec<TermRef>,
    #[serde(default)] permalink: String,
}

impl WooProduct {
    fn summary(self) -> ProductSummary {
        ProductSummary {
            price: display_price(&self.price, &self.regular_price),
            thumbnail: self.images.into_iter().next().map(|i| i.src).unwrap_or_default(),
            id: self.id,
            name: self.name,
        }
    }

    fn detail(self) -> ProductDetail {
        let name = self.name;
        let images = self.images.into_iter()
            .map(|i| ProductImage { alt: if i.alt.is_empty() { name.clone() } else { i.alt }, ..i })
            .collect();
        ProductDetail {
            id: self.id,
            description: self.description,
            short_description: self.short_description,
            price: self.price,
            regular_price: self.regular_price,
            images,
            categories: self.categories,
            tags: self.tags,
            permalink: self.permalink,
            name,
        }
    }
}

#[derive(Deserialize)]
struct Rendered { #[serde(default)] rendered: String }

#[derive(Deserialize)]
struct MediaReply {
    id: u64,
    #[serde(default)] source_url: String,
    #[serde(default)] guid: Option<Rendered>,
    #[serde(default)] title: Option<Rendered>,
    #[serde(default)] alt_text: String,
}

impl WooCommerceClient {
    pub fn new(http: reqwest::Client, config: Option<WooConfig>) -> Self { Self { http, config } }

    fn config(&self) -> IntegrationResult<&WooConfig> {
        self.config.as_ref().ok_or(IntegrationError::NotConfigured(SERVICE))
    }

    async fn call<T: DeserializeOwned>(&self, method: Method, endpoint: &str, body: Option<&Value>) -> IntegrationResult<T> {
        let config = self.config()?;
        tracing::debug!(%method, endpoint, "woocommerce request");
        let mut request = self.http
            .request(method, format!("{}{}", config.base_url, endpoint))
            .basic_auth(&config.consumer_key, Some(&config.consumer_secret));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = check_status(SERVICE, request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Walks a collection page by page until a short or empty page.
    async fn fetch_all<T: DeserializeOwned>(&self, path: &str, filter: &str) -> IntegrationResult<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let batch: Vec<T> = self
                .call(Method::GET, &format!("{path}?per_page={PER_PAGE}&page={page}{filter}"), None)
                .await?;
            let len = batch.len();
            items.extend(batch);
            if len < PER_PAGE { break; }
            page += 1;
        }
        Ok(items)
    }
}

#[async_trait]
impl CommerceApi for WooCommerceClient {
    async fn create_product(&self, payload: &Value) -> IntegrationResult<CreatedProduct> {
        let reply: ProductReply = self.call(Method::POST, "/wp-json/wc/v3/products", Some(payload)).await?;
        Ok(CreatedProduct { id: reply.id, permalink: reply.permalink.unwrap_or_default() })
    }

    async fn create_variation(&self, product_id: u64, attributes: &VariationCombination) -> IntegrationResult<()> {
        let body = serde_json::to_value(VariationPayload { attributes })?;
        let _: Value = self
            .call(Method::POST, &format!("/wp-json/wc/v3/products/{product_id}/variations"), Some(&body))
            .await?;
        Ok(())
    }

    async fn list_terms(&self, kind: TermKind) -> IntegrationResult<Vec<CatalogTerm>> {
        let terms: Vec<CatalogTerm> = self.fetch_all(&format!("/wp-json/wc/v3/products/{}", kind.collection()), "").await?;
        tracing::info!(kind = kind.as_str(), count = terms.len(), "fetched catalog terms");
        Ok(terms)
    }

    async fn create_term(&self, kind: TermKind, name: &str) -> IntegrationResult<CatalogTerm> {
        tracing::info!(kind = kind.as_str(), name, "creating catalog term");
        self.call(Method::POST, &format!("/wp-json/wc/v3/products/{}", kind.collection()), Some(&json!({ "name": name })))
            .await
    }

    fn admin_edit_url(&self, product_id: u64) -> String {
        let base = self.config.as_ref().map(|c| c.base_url.as_str()).unwrap_or_default();
        format!("{base}/wp-admin/post.php?post={product_id}&action=edit")
    }

    async fn list_products(&self, status: ProductStatus) -> IntegrationResult<Vec<ProductSummary>> {
        let products: Vec<WooProduct> = self.fetch_all("/wp-json/wc/v3/products", &format!("&status={}", status.as_str())).await?;
        tracing::info!(status = status.as_str(), count = products.len(), "fetched products");
        Ok(products.into_iter().map(WooProduct::summary).collect())
    }

    async fn get_product(&self, product_id: u64) -> IntegrationResult<ProductDetail> {
        let product: WooProduct = self.call(Method::GET, &format!("/wp-json/wc/v3/products/{product_id}"), None).await?;
        Ok(product.detail())
    }

    async fn attach_images(&self, product_id: u64, images: &[ProductImage]) -> IntegrationResult<()> {
        tracing::info!(product_id, count = images.len(), "attaching product images");
        let body = json!({ "images": images });
        let _: Value = self.call(Method::POST, &format!("/wp-json/wc/v3/products/{product_id}"), Some(&body)).await?;
        Ok(())
    }

    async fn upload_media(&self, upload: &MediaUpload) -> IntegrationResult<UploadedMedia> {
        let config = self.config()?;
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.filename.clone())
            .mime_str(&upload.content_type)?;
        let mut form = Form::new().part("file", part);
        if let Some(alt) = &upload.alt_text {
            form = form.text("alt_text", alt.clone());
        }
        tracing::info!(filename = %upload.filename, bytes = upload.bytes.len(), "uploading media");
        let response = self.http
            .post(format!("{}/wp-json/wp/v2/media", config.base_url))
            .basic_auth(&config.consumer_key, Some(&config.consumer_secret))
            .multipart(form)
            .send()
            .await?;
        let media: MediaReply = check_status(SERVICE, response).await?.json().await?;
        Ok(uploaded_media(media, upload))
    }
}

fn uploaded_media(media: MediaReply, upload: &MediaUpload) -> UploadedMedia {
    let src = if media.source_url.is_empty() { media.guid.map(|g| g.rendered).unwrap_or_default() } else { media.source_url };
    let name = media.title.map(|t| t.rendered).filter(|t| !t.is_empty()).unwrap_or_else(|| upload.filename.clone());
    let alt = if media.alt_text.is_empty() { upload.alt_text.clone().unwrap_or_default() } else { media.alt_text };
    UploadedMedia { id: media.id, src, name, alt }
}
