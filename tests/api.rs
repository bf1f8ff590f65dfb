use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use craft_workbench::api::{router, AppState};
use craft_workbench::domain::aggregates::{
    CatalogTerm, FacebookPost, InstagramPost, ListingAssets, ListingInput, MediaUpload, ProductDetail, ProductImage, ProductStatus,
    ProductSummary, PublishedPost, ScheduledPost, ShippingAdvice, ShippingAdviceRequest, SocialPost, SocialPostRequest, TermKind, UploadedMedia,
};
use craft_workbench::domain::variations::VariationCombination;
use craft_workbench::integrations::{
    CommerceApi, CreatedProduct, IntegrationError, IntegrationResult, ListingGenerator, ListingStore, ShippingAdvisor, SocialPublisher,
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Default)]
struct FakeCommerce {
    products: Mutex<Vec<Value>>,
    variations: Mutex<Vec<(u64, VariationCombination)>>,
    terms: Mutex<Vec<CatalogTerm>>,
    attached: Mutex<Vec<(u64, Vec<ProductImage>)>>,
    uploads: Mutex<Vec<MediaUpload>>,
    fail_variation_at: Option<usize>,
}

#[async_trait]
impl CommerceApi for FakeCommerce {
    async fn create_product(&self, payload: &Value) -> IntegrationResult<CreatedProduct> {
        self.products.lock().unwrap().push(payload.clone());
        Ok(CreatedProduct { id: 501, permalink: "https://shop.example/?p=501".into() })
    }

    async fn create_variation(&self, product_id: u64, attributes: &VariationCombination) -> IntegrationResult<()> {
        let mut made = self.variations.lock().unwrap();
        if self.fail_variation_at == Some(made.len()) {
            return Err(IntegrationError::Upstream { service: "WooCommerce", status: 400, message: "Invalid attribute".into() });
        }
        made.push((product_id, attributes.clone()));
        Ok(())
    }

    async fn list_terms(&self, _kind: TermKind) -> IntegrationResult<Vec<CatalogTerm>> {
        Ok(self.terms.lock().unwrap().clone())
    }

    async fn create_term(&self, _kind: TermKind, name: &str) -> IntegrationResult<CatalogTerm> {
        let mut terms = self.terms.lock().unwrap();
        let term = CatalogTerm { id: 100 + terms.len() as u64, name: name.into(), slug: name.to_lowercase().replace(' ', "-") };
        terms.push(term.clone());
        Ok(term)
    }

    fn admin_edit_url(&self, product_id: u64) -> String {
        format!("https://shop.example/wp-admin/post.php?post={product_id}&action=edit")
    }

    async fn list_products(&self, status: ProductStatus) -> IntegrationResult<Vec<ProductSummary>> {
        let name = match status { ProductStatus::Draft => "Draft Sign", ProductStatus::Publish => "Slate Sign" };
        Ok(vec![ProductSummary { id: 9, name: name.into(), price: "30.00".into(), thumbnail: String::new() }])
    }

    async fn get_product(&self, product_id: u64) -> IntegrationResult<ProductDetail> {
        if product_id != 9 {
            return Err(IntegrationError::Upstream { service: "WooCommerce", status: 404, message: "Invalid ID.".into() });
        }
        Ok(ProductDetail {
            id: 9,
            name: "Slate Sign".into(),
            description: "<p>Hand-cut</p>".into(),
            short_description: String::new(),
            price: "30.00".into(),
            regular_price: "30.00".into(),
            images: vec![ProductImage { id: Some(3), src: "https://shop.example/a.jpg".into(), alt: "Slate Sign".into() }],
            categories: vec![],
            tags: vec![],
            permalink: "https://shop.example/p/9".into(),
        })
    }

    async fn attach_images(&self, product_id: u64, images: &[ProductImage]) -> IntegrationResult<()> {
        self.attached.lock().unwrap().push((product_id, images.to_vec()));
        Ok(())
    }

    async fn upload_media(&self, upload: &MediaUpload) -> IntegrationResult<UploadedMedia> {
        self.uploads.lock().unwrap().push(upload.clone());
        Ok(UploadedMedia { id: 77, src: format!("https://shop.example/uploads/{}", upload.filename), name: upload.filename.clone(), alt: String::new() })
    }
}

#[derive(Default)]
struct FakeCopywriter {
    saved: Mutex<Vec<(String, String)>>,
    scheduled: Mutex<Vec<ScheduledPost>>,
}

#[async_trait]
impl ListingGenerator for FakeCopywriter {
    async fn generate_listing(&self, input: &ListingInput) -> IntegrationResult<ListingAssets> {
        Ok(ListingAssets {
            title: format!("{} | Handmade", input.product_name),
            description: input.what_is_it.clone(),
            key_features: vec!["Hand cut".into()],
            tags: vec!["slate".into()],
            personalisation_short: "Initials".into(),
            personalisation_long: "Up to three initials".into(),
        })
    }

    async fn generate_social_posts(&self, request: &SocialPostRequest) -> IntegrationResult<Vec<SocialPost>> {
        let reply = json!({ "posts": ["Gift idea!", "Made by hand.", "Add your name."] }).to_string();
        Ok(request.posts_from_model_text(&reply)?)
    }

    async fn post_from_idea(&self, idea: &str) -> IntegrationResult<String> {
        Ok(format!("{idea} #handmade"))
    }
}

#[async_trait]
impl ListingStore for FakeCopywriter {
    async fn save_listing(&self, input: &ListingInput, assets: &ListingAssets) -> IntegrationResult<()> {
        self.saved.lock().unwrap().push((input.product_name.clone(), assets.title.clone()));
        Ok(())
    }

    async fn save_scheduled_posts(&self, posts: &[ScheduledPost]) -> IntegrationResult<()> {
        self.scheduled.lock().unwrap().extend_from_slice(posts);
        Ok(())
    }

    async fn fetch_scheduled_posts(&self) -> IntegrationResult<Vec<ScheduledPost>> {
        let mut posts = self.scheduled.lock().unwrap().clone();
        posts.sort_by_key(|p| p.scheduled_date_time);
        Ok(posts)
    }
}

#[async_trait]
impl SocialPublisher for FakeCopywriter {
    async fn post_to_facebook(&self, post: &FacebookPost) -> IntegrationResult<PublishedPost> {
        Ok(PublishedPost { id: "123_456".into(), post_url: format!("https://www.facebook.com/123_456?len={}", post.message.len()) })
    }

    async fn post_to_instagram(&self, _post: &InstagramPost) -> IntegrationResult<PublishedPost> {
        Ok(PublishedPost { id: "1789".into(), post_url: "https://www.instagram.com/".into() })
    }
}

#[async_trait]
impl ShippingAdvisor for FakeCopywriter {
    async fn advise(&self, _request: &ShippingAdviceRequest) -> IntegrationResult<ShippingAdvice> {
        Ok(ShippingAdvice { service: "Tracked 48".into(), size_format: "Large Letter".into(), estimated_cost_net: Decimal::new(285, 2), notes: String::new() })
    }
}

fn app(commerce: Arc<FakeCommerce>, copy: Arc<FakeCopywriter>) -> Router {
    router(AppState {
        commerce,
        listing_generator: copy.clone(),
        shipping_advisor: copy.clone(),
        listing_store: copy.clone(),
        social_publisher: copy,
    })
}

fn default_app() -> Router {
    app(Arc::new(FakeCommerce::default()), Arc::new(FakeCopywriter::default()))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = send(default_app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn preview_counts_and_orders_combinations() {
    let body = json!({
        "attributes": [{ "name": " Colour ", "options": ["Red", "Blue", "red"] }],
        "rows": [{ "name": "Size", "values": "S, M, L" }, { "name": "", "values": "x" }]
    });
    let (status, body) = send(default_app(), "POST", "/api/v1/variations/preview", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalVariations"], 6);
    assert_eq!(body["attributes"][0], json!({ "name": "Colour", "options": ["Red", "Blue"] }));
    assert_eq!(body["combinations"].as_array().unwrap().len(), 6);
    assert_eq!(body["combinations"][1], json!([{ "name": "Colour", "option": "Red" }, { "name": "Size", "option": "M" }]));
}

#[tokio::test]
async fn preview_rejects_attribute_without_options() {
    let body = json!({ "attributes": [{ "name": "Size", "options": [" "] }] });
    let (status, body) = send(default_app(), "POST", "/api/v1/variations/preview", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Attribute \"Size\" must have at least one valid option");
}

#[tokio::test]
async fn quote_returns_three_bands() {
    let body = json!({
        "materials": [{ "id": "1", "description": "slate", "costPerUnitNet": 2.00 }],
        "labourMinutes": 30,
        "labourRatePerHour": 20,
        "overheadPercentage": 20,
        "manualShippingCost": 1.50,
        "shippingOverheadPercentage": 0,
        "marketplace": "etsy",
        "vatPercentage": 20
    });
    let (status, body) = send(default_app(), "POST", "/api/v1/pricing/quote", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    let report = &body["report"];
    assert_eq!(report["feeProfile"]["name"], "Etsy");
    let base: Decimal = report["breakdown"]["baseCostPerUnitNet"].as_str().unwrap().parse().unwrap();
    assert_eq!(base, Decimal::new(1590, 2));
    let bands: Vec<u64> = report["results"].as_array().unwrap().iter().map(|r| r["markupPercentage"].as_u64().unwrap()).collect();
    assert_eq!(bands, vec![30, 50, 100]);
    let gross: Decimal = report["results"][1]["grossItemPrice"].as_str().unwrap().parse().unwrap();
    assert_eq!(gross, Decimal::new(2862, 2));
}

#[tokio::test]
async fn quote_clamps_negative_inputs_and_honours_custom_bands() {
    let body = json!({ "labourMinutes": -30, "manualShippingCost": -4, "markupBands": [200] });
    let (status, body) = send(default_app(), "POST", "/api/v1/pricing/quote", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    let result = &body["report"]["results"][0];
    assert_eq!(result["markupPercentage"], 200);
    let per_hour: Decimal = result["profitPerHour"].as_str().unwrap().parse().unwrap();
    assert_eq!(per_hour, Decimal::ZERO);
    let margin: Decimal = result["effectiveMarginPercent"].as_str().unwrap().parse().unwrap();
    assert_eq!(margin, Decimal::ZERO);
}

#[tokio::test]
async fn quote_rejects_empty_band_list() {
    let (status, body) = send(default_app(), "POST", "/api/v1/pricing/quote", Some(json!({ "markupBands": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Between 1 and 10 markup bands are allowed");
}

#[tokio::test]
async fn marketplaces_lists_fee_table() {
    let (status, body) = send(default_app(), "GET", "/api/v1/pricing/marketplaces", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["marketplaces"].as_array().unwrap().iter().map(|m| m["marketplace"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["all-worst-case", "etsy", "woocommerce", "amazon-handmade"]);
}

#[tokio::test]
async fn draft_creates_parent_and_every_variation() {
    let commerce = Arc::new(FakeCommerce::default());
    let body = json!({
        "name": "Slate House Sign",
        "description": "Hand-cut Welsh slate",
        "variationAttributes": [
            { "name": "Size", "options": ["Small", "Large"] },
            { "name": "Font", "options": ["Serif", "Script", "serif"] }
        ],
        "categoryIds": [12],
        "tagIds": []
    });
    let (status, body) = send(app(commerce.clone(), Arc::new(FakeCopywriter::default())), "POST", "/api/v1/products/drafts", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["productId"], 501);
    assert_eq!(body["variationCount"], 4);
    assert_eq!(body["adminEditUrl"], "https://shop.example/wp-admin/post.php?post=501&action=edit");

    let products = commerce.products.lock().unwrap();
    assert_eq!(products[0]["status"], "draft");
    assert_eq!(products[0]["attributes"][1]["options"], json!(["Serif", "Script"]));

    let variations = commerce.variations.lock().unwrap();
    assert_eq!(variations.len(), 4);
    assert!(variations.iter().all(|(id, _)| *id == 501));
    assert_eq!(variations[3].1.title(), "Large / Script");
}

#[tokio::test]
async fn draft_stops_at_first_failing_variation() {
    let commerce = Arc::new(FakeCommerce { fail_variation_at: Some(1), ..Default::default() });
    let body = json!({
        "name": "Coaster",
        "description": "Slate coaster",
        "variationAttributes": [{ "name": "Shape", "options": ["Round", "Square", "Hexagon"] }]
    });
    let (status, body) = send(app(commerce.clone(), Arc::new(FakeCopywriter::default())), "POST", "/api/v1/products/drafts", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Failed to create draft product");
    assert_eq!(body["details"]["status"], 400);
    assert_eq!(commerce.variations.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn draft_requires_name() {
    let commerce = Arc::new(FakeCommerce::default());
    let body = json!({ "name": "", "description": "x" });
    let (status, body) = send(app(commerce.clone(), Arc::new(FakeCopywriter::default())), "POST", "/api/v1/products/drafts", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Product name is required");
    assert!(commerce.products.lock().unwrap().is_empty());
}

#[tokio::test]
async fn ensure_category_reuses_existing_then_creates() {
    let commerce = Arc::new(FakeCommerce::default());
    commerce.terms.lock().unwrap().push(CatalogTerm { id: 7, name: "Home Decor".into(), slug: "home-decor".into() });
    let copy = Arc::new(FakeCopywriter::default());

    let (status, body) = send(app(commerce.clone(), copy.clone()), "POST", "/api/v1/catalog/categories", Some(json!({ "name": " home decor " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], false);
    assert_eq!(body["term"]["id"], 7);

    let (status, body) = send(app(commerce.clone(), copy.clone()), "POST", "/api/v1/catalog/categories", Some(json!({ "name": "Garden" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["created"], true);

    let (_, body) = send(app(commerce, copy), "GET", "/api/v1/catalog/categories", None).await;
    assert_eq!(body["terms"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn ensure_tag_rejects_blank_name() {
    let (status, body) = send(default_app(), "POST", "/api/v1/catalog/tags", Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Tag name cannot be empty");
}

#[tokio::test]
async fn listing_is_generated_and_saved() {
    let copy = Arc::new(FakeCopywriter::default());
    let body = json!({
        "productName": "Slate Coasters",
        "whatIsIt": "Four hand-cut coasters",
        "whoIsItFor": "Homeowners"
    });
    let (status, body) = send(app(Arc::new(FakeCommerce::default()), copy.clone()), "POST", "/api/v1/listings", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assets"]["title"], "Slate Coasters | Handmade");
    assert_eq!(copy.saved.lock().unwrap().as_slice(), &[("Slate Coasters".to_string(), "Slate Coasters | Handmade".to_string())]);
}

#[tokio::test]
async fn listing_requires_audience() {
    let body = json!({ "productName": "Slate Coasters", "whatIsIt": "Coasters", "whoIsItFor": "" });
    let (status, body) = send(default_app(), "POST", "/api/v1/listings", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Who is it for is required");
}

#[tokio::test]
async fn shipping_advice_validates_dimensions() {
    let body = json!({ "weightGrams": 450, "widthMm": 160, "heightMm": 0, "depthMm": 20 });
    let (status, body) = send(default_app(), "POST", "/api/v1/shipping/advice", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Height must be a positive number");
}

#[tokio::test]
async fn shipping_advice_returns_net_cost() {
    let body = json!({ "weightGrams": 450, "widthMm": 160, "heightMm": 160, "depthMm": 20 });
    let (status, body) = send(default_app(), "POST", "/api/v1/shipping/advice", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["advice"]["sizeFormat"], "Large Letter");
    assert_eq!(body["advice"]["estimatedCostNet"], "2.85");
}

async fn send_raw(app: Router, uri: &str, content_type: &str, body: Vec<u8>) -> (StatusCode, Value) {
    let request = Request::builder().method("POST").uri(uri).header("content-type", content_type).body(Body::from(body)).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn quote_survives_astronomical_inputs() {
    let body = json!({ "labourMinutes": 1e20, "labourRatePerHour": 1e20, "overheadPercentage": 1e20, "markupBands": [4294967295u32, 30] });
    let (status, body) = send(default_app(), "POST", "/api/v1/pricing/quote", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    let results = body["report"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    let gross: Decimal = results[1]["grossItemPrice"].as_str().unwrap().parse().unwrap();
    assert!(gross > Decimal::ZERO);
}

#[tokio::test]
async fn preview_rejects_runaway_expansion() {
    let options: Vec<String> = (0..20).map(|i| format!("Option {i}")).collect();
    let attributes: Vec<Value> = (0..8).map(|i| json!({ "name": format!("Attr {i}"), "options": options })).collect();
    let (status, body) = send(default_app(), "POST", "/api/v1/variations/preview", Some(json!({ "attributes": attributes }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Attribute options expand to more than 250 variations");
}

#[tokio::test]
async fn missing_body_field_gets_json_error() {
    let body = json!({ "productName": "Slate Coasters", "whatIsIt": "Coasters" });
    let (status, body) = send(default_app(), "POST", "/api/v1/listings", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "ok": false, "error": "Who is it for is required" }));

    let (status, body) = send(default_app(), "POST", "/api/v1/products/drafts", Some(json!({ "description": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Product name is required");
}

#[tokio::test]
async fn malformed_body_gets_json_error() {
    let (status, body) = send_raw(default_app(), "/api/v1/pricing/quote", "application/json", b"{\"labourMinutes\": ".to_vec()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));

    let (status, body) = send(default_app(), "POST", "/api/v1/shipping/advice", Some(json!({ "weightGrams": "heavy" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn products_list_by_status() {
    let (status, body) = send(default_app(), "GET", "/api/v1/products?status=draft", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"][0]["name"], "Draft Sign");
    let (_, body) = send(default_app(), "GET", "/api/v1/products", None).await;
    assert_eq!(body["products"][0]["name"], "Slate Sign");
}

#[tokio::test]
async fn product_detail_and_bad_ids() {
    let (status, body) = send(default_app(), "GET", "/api/v1/products/9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["regularPrice"], "30.00");
    assert_eq!(body["product"]["images"][0]["alt"], "Slate Sign");

    let (status, body) = send(default_app(), "GET", "/api/v1/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid product ID");

    let (status, body) = send(default_app(), "GET", "/api/v1/products/10", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Failed to fetch product");
}

#[tokio::test]
async fn images_attach_by_url() {
    let commerce = Arc::new(FakeCommerce::default());
    let copy = Arc::new(FakeCopywriter::default());
    let body = json!({ "images": [{ "src": "https://cdn.example/a.jpg", "alt": "Front" }, { "src": "https://cdn.example/b.jpg" }] });
    let (status, body) = send(app(commerce.clone(), copy.clone()), "POST", "/api/v1/products/9/images", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "productId": 9, "imageCount": 2 }));
    let attached = commerce.attached.lock().unwrap();
    assert_eq!(attached[0].0, 9);
    assert_eq!(attached[0].1[1].src, "https://cdn.example/b.jpg");
    drop(attached);

    let (status, body) = send(app(commerce, copy), "POST", "/api/v1/products/9/images", Some(json!({ "images": [{ "alt": "x" }] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All images must have a src property");
}

fn multipart_body(boundary: &str, parts: &[(&str, Option<(&str, &str)>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file, bytes) in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match file {
            Some((filename, content_type)) => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n").as_bytes(),
            ),
            None => body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes()),
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

#[tokio::test]
async fn photo_upload_stores_renamed_file() {
    let commerce = Arc::new(FakeCommerce::default());
    let body = multipart_body("XYZ", &[("file", Some(("My Sign.png", "image/png")), &b"\x89PNG"[..]), ("caption", None, &b"Front view"[..])]);
    let (status, body) = send_raw(app(commerce.clone(), Arc::new(FakeCopywriter::default())), "/api/v1/photos", "multipart/form-data; boundary=XYZ", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mediaId"], 77);
    let filename = body["filename"].as_str().unwrap();
    assert!(filename.starts_with("My-Sign-") && filename.ends_with(".png"));
    let uploads = commerce.uploads.lock().unwrap();
    assert_eq!(uploads[0].alt_text.as_deref(), Some("Front view"));
    assert_eq!(uploads[0].bytes, b"\x89PNG".to_vec());
}

#[tokio::test]
async fn photo_upload_requires_file() {
    let body = multipart_body("XYZ", &[("caption", None, &b"Front view"[..])]);
    let (status, body) = send_raw(default_app(), "/api/v1/photos", "multipart/form-data; boundary=XYZ", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file provided");

    let (status, body) = send(default_app(), "POST", "/api/v1/photos", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid upload"));
}

#[tokio::test]
async fn social_posts_generated_with_images() {
    let body = json!({
        "productId": 9,
        "productName": "Slate Sign",
        "description": "Hand-cut slate",
        "imageUrls": ["https://shop.example/a.jpg", "https://shop.example/b.jpg"]
    });
    let (status, body) = send(default_app(), "POST", "/api/v1/social/posts/generate", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[2]["imageUrl"], "https://shop.example/a.jpg");
    assert_eq!(posts[0]["characterCount"], 10);
}

#[tokio::test]
async fn social_posts_need_product_and_images() {
    let (status, body) = send(default_app(), "POST", "/api/v1/social/posts/generate", Some(json!({ "productName": "Sign" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields: productId, productName, and description are required");

    let body = json!({ "productId": 9, "productName": "Sign", "description": "Slate", "imageUrls": [] });
    let (status, body) = send(default_app(), "POST", "/api/v1/social/posts/generate", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "At least one product image is required");
}

#[tokio::test]
async fn post_from_idea_round_trip() {
    let (status, body) = send(default_app(), "POST", "/api/v1/social/posts/from-idea", Some(json!({ "idea": " Autumn sale " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"], "Autumn sale #handmade");

    let (status, body) = send(default_app(), "POST", "/api/v1/social/posts/from-idea", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "idea is required and cannot be empty");
}

#[tokio::test]
async fn scheduled_posts_saved_then_listed_in_order() {
    let copy = Arc::new(FakeCopywriter::default());
    let body = json!({ "posts": [
        { "postText": "Later", "productName": "Sign", "scheduledDateTime": "2026-12-01T09:00:00Z", "platform": "instagram" },
        { "postText": "Sooner", "productName": "Sign", "scheduledDateTime": "2026-11-01T09:00:00Z" }
    ]});
    let (status, body) = send(app(Arc::new(FakeCommerce::default()), copy.clone()), "POST", "/api/v1/social/scheduled", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Successfully scheduled 2 posts");

    let (status, body) = send(app(Arc::new(FakeCommerce::default()), copy), "GET", "/api/v1/social/scheduled", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts"][0]["postText"], "Sooner");
    assert_eq!(body["posts"][1]["platform"], "instagram");
    assert_eq!(body["posts"][0]["status"], "scheduled");
}

#[tokio::test]
async fn scheduling_rejects_incomplete_posts() {
    let (status, body) = send(default_app(), "POST", "/api/v1/social/scheduled", Some(json!({ "posts": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Posts array is required and must not be empty");

    let body = json!({ "posts": [{ "postText": "Hi", "productName": "Sign" }] });
    let (status, body) = send(default_app(), "POST", "/api/v1/social/scheduled", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Each post must have postText, productName, and scheduledDateTime");
}

#[tokio::test]
async fn facebook_and_instagram_publishing() {
    let (status, body) = send(default_app(), "POST", "/api/v1/social/facebook", Some(json!({ "message": "New signs" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["facebookPostId"], "123_456");
    assert_eq!(body["message"], "Successfully posted to Facebook");

    let (status, body) = send(default_app(), "POST", "/api/v1/social/instagram", Some(json!({ "caption": "New signs", "imageUrl": "https://cdn.example/a.jpg" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["instagramPostId"], "1789");

    let (status, body) = send(default_app(), "POST", "/api/v1/social/instagram", Some(json!({ "caption": "New signs", "imageUrl": "ftp://a.jpg" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "imageUrl is required and must be a valid HTTP/HTTPS URL");

    let (status, body) = send(default_app(), "POST", "/api/v1/social/facebook", Some(json!({ "message": " " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "message is required and cannot be empty");
}
