use actix_web::{Responder, get, post, web};
use serde::Deserialize;

use crate::actions::{ActionSettings, sales};
use crate::domain::sale::{DateRange, RefundRequest, SaleRequest};
use crate::routes::{PageParams, SharedBackend, context, respond};
use crate::session::CurrentSession;

#[derive(Deserialize)]
struct TopSellingParams {
    limit: Option<u32>,
}

#[post("/sales")]
pub async fn add_sale(
    web::Json(request): web::Json<SaleRequest>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(sales::create_sale(&ctx, &request).await)
}

#[get("/sales")]
pub async fn list_sales(
    params: web::Query<PageParams>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(sales::fetch_sales(&ctx, &params.page_request()).await)
}

#[get("/sales/today")]
pub async fn today_sales(
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(sales::fetch_today_sales(&ctx).await)
}

#[get("/sales/range")]
pub async fn sales_by_range(
    range: web::Query<DateRange>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(sales::fetch_sales_by_range(&ctx, range.into_inner()).await)
}

#[get("/sales/summary")]
pub async fn sales_summary(
    range: web::Query<DateRange>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(sales::fetch_sales_summary(&ctx, range.into_inner()).await)
}

#[get("/sales/summary/today")]
pub async fn today_summary(
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(sales::fetch_today_summary(&ctx).await)
}

#[get("/sales/top-selling")]
pub async fn top_selling_products(
    params: web::Query<TopSellingParams>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(sales::fetch_top_selling_products(&ctx, params.limit).await)
}

#[get("/sales/{sale_id}")]
pub async fn show_sale(
    sale_id: web::Path<String>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(sales::fetch_sale(&ctx, &sale_id).await)
}

#[post("/sales/{sale_id}/refund")]
pub async fn refund_sale(
    sale_id: web::Path<String>,
    web::Json(request): web::Json<RefundRequest>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(sales::refund_sale(&ctx, &sale_id, &request).await)
}
