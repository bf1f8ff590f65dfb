use axum::extract::{multipart::MultipartRejection, Multipart, Path, Query, State};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::extract::{product_id, Json};
use super::AppState;
use crate::domain::aggregates::storefront::validate_attachments;
use crate::domain::aggregates::{MediaUpload, PhotoError, ProductDetail, ProductImage, ProductStatus, ProductSummary};
use crate::domain::events::{DomainEvent, ProductEvent};
use crate::{Result, WorkbenchError};

#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery { #[serde(default)] pub status: ProductStatus }

#[derive(Debug, Serialize)]
pub struct ProductsResponse { pub ok: bool, pub products: Vec<ProductSummary> }

#[derive(Debug, Serialize)]
pub struct ProductResponse { pub ok: bool, pub product: ProductDetail }

#[derive(Debug, Deserialize)]
pub struct AttachImagesRequest { #[serde(default)] pub images: Vec<ProductImage> }

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachImagesResponse { pub ok: bool, pub product_id: u64, pub image_count: usize }

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse { pub ok: bool, pub media_id: u64, pub image_url: String, pub filename: String }

pub async fn list_products(State(s): State<AppState>, Query(q): Query<ProductsQuery>) -> Result<Json<ProductsResponse>> {
    let products = s.commerce.list_products(q.status).await.map_err(WorkbenchError::upstream("Failed to fetch products"))?;
    Ok(Json(ProductsResponse { ok: true, products }))
}

pub async fn get_product(State(s): State<AppState>, Path(id): Path<String>) -> Result<Json<ProductResponse>> {
    let id = product_id(&id)?;
    let product = s.commerce.get_product(id).await.map_err(WorkbenchError::upstream("Failed to fetch product"))?;
    Ok(Json(ProductResponse { ok: true, product }))
}

pub async fn attach_images(State(s): State<AppState>, Path(id): Path<String>, Json(r): Json<AttachImagesRequest>) -> Result<Json<AttachImagesResponse>> {
    let id = product_id(&id)?;
    validate_attachments(&r.images)?;
    s.commerce.attach_images(id, &r.images).await.map_err(WorkbenchError::upstream("Failed to attach images"))?;
    DomainEvent::Product(ProductEvent::ImagesAttached { remote_id: id, count: r.images.len() }).record();
    Ok(Json(AttachImagesResponse { ok: true, product_id: id, image_count: r.images.len() }))
}

/// Takes a multipart form with a `file` part and an optional `caption`
/// used as alt text, and stores the photo in the shop's media library.
pub async fn upload_photo(State(s): State<AppState>, form: std::result::Result<Multipart, MultipartRejection>) -> Result<Json<UploadResponse>> {
    let mut form = form.map_err(|e| WorkbenchError::Validation(format!("Invalid upload: {}", e.body_text())))?;
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut caption = None;
    while let Some(field) = form.next_field().await.map_err(|e| WorkbenchError::Validation(format!("Invalid upload: {}", e.body_text())))? {
        let part = field.name().unwrap_or_default().to_string();
        match part.as_str() {
            "file" => {
                let name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| WorkbenchError::Validation(format!("Invalid upload: {}", e.body_text())))?;
                file = Some((name, content_type, bytes.to_vec()));
            }
            "caption" => caption = field.text().await.ok(),
            _ => {}
        }
    }

    let (name, content_type, bytes) = file.ok_or(PhotoError::NoFile)?;
    let upload = MediaUpload::new(&name, &content_type, bytes, caption, Utc::now().timestamp_millis())?;
    let media = s.commerce.upload_media(&upload).await.map_err(WorkbenchError::upstream("Failed to upload photo"))?;
    DomainEvent::Product(ProductEvent::PhotoUploaded { media_id: media.id, filename: upload.filename.clone() }).record();
    Ok(Json(UploadResponse { ok: true, media_id: media.id, image_url: media.src, filename: upload.filename }))
}
