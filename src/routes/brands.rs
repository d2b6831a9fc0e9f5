use actix_web::{Responder, delete, get, post, put, web};

use crate::actions::{ActionSettings, brands};
use crate::domain::brand::BrandRequest;
use crate::routes::{PageParams, SharedBackend, context, respond};
use crate::session::CurrentSession;

#[get("/brands")]
pub async fn list_brands(
    params: web::Query<PageParams>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(brands::fetch_brands(&ctx, &params.page_request()).await)
}

#[get("/brands/{brand_id}")]
pub async fn show_brand(
    brand_id: web::Path<String>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(brands::fetch_brand(&ctx, &brand_id).await)
}

#[post("/brands")]
pub async fn add_brand(
    web::Json(request): web::Json<BrandRequest>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(brands::create_brand(&ctx, &request).await)
}

#[put("/brands/{brand_id}")]
pub async fn save_brand(
    brand_id: web::Path<String>,
    web::Json(request): web::Json<BrandRequest>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(brands::update_brand(&ctx, &brand_id, &request).await)
}

#[delete("/brands/{brand_id}")]
pub async fn remove_brand(
    brand_id: web::Path<String>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(brands::delete_brand(&ctx, &brand_id).await)
}
