use actix_web::{Responder, delete, get, post, put, web};
use serde::Deserialize;

use crate::actions::{ActionSettings, products};
use crate::domain::product::ProductRequest;
use crate::pagination::{PageRequest, SortDirection};
use crate::routes::{SharedBackend, context, respond};
use crate::session::CurrentSession;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductListParams {
    page: Option<usize>,
    size: Option<usize>,
    sort_by: Option<String>,
    sort_dir: Option<SortDirection>,
    search: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryParams {
    page: Option<usize>,
    size: Option<usize>,
    sort_by: Option<String>,
    sort_dir: Option<SortDirection>,
}

#[derive(Deserialize)]
struct LowStockParams {
    threshold: Option<i64>,
}

#[get("/products")]
pub async fn list_products(
    params: web::Query<ProductListParams>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let params = params.into_inner();
    let mut page = PageRequest::new(params.page.unwrap_or(0), params.size.unwrap_or(0));
    if let Some(sort_by) = params.sort_by {
        page = page.sort(sort_by, params.sort_dir.unwrap_or_default());
    }
    let ctx = context(&backend, &session, &settings);
    respond(products::fetch_products(&ctx, &page, params.search.as_deref()).await)
}

#[get("/products/inventory")]
pub async fn inventory_table(
    params: web::Query<InventoryParams>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(
        products::fetch_inventory_table(
            &ctx,
            params.page.unwrap_or(0),
            params.size.unwrap_or(0),
            params.sort_by.as_deref().unwrap_or("name"),
            params.sort_dir.unwrap_or_default(),
        )
        .await,
    )
}

#[get("/products/inventory/stats")]
pub async fn inventory_stats(
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(products::fetch_inventory_stats(&ctx).await)
}

#[get("/products/low-stock")]
pub async fn low_stock_products(
    params: web::Query<LowStockParams>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(products::fetch_low_stock_products(&ctx, params.threshold).await)
}

#[get("/products/barcode/{barcode}")]
pub async fn product_by_barcode(
    barcode: web::Path<String>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(products::fetch_product_by_barcode(&ctx, &barcode).await)
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<String>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(products::fetch_product(&ctx, &product_id).await)
}

#[post("/products")]
pub async fn add_product(
    web::Json(request): web::Json<ProductRequest>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(products::create_product(&ctx, &request).await)
}

#[put("/products/{product_id}")]
pub async fn save_product(
    product_id: web::Path<String>,
    web::Json(request): web::Json<ProductRequest>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(products::update_product(&ctx, &product_id, &request).await)
}

#[delete("/products/{product_id}")]
pub async fn remove_product(
    product_id: web::Path<String>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(products::delete_product(&ctx, &product_id).await)
}
