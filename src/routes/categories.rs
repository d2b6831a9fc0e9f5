use actix_web::{Responder, delete, get, post, put, web};

use crate::actions::{ActionSettings, categories};
use crate::domain::category::CategoryRequest;
use crate::routes::{PageParams, SharedBackend, context, respond};
use crate::session::CurrentSession;

#[get("/categories")]
pub async fn list_categories(
    params: web::Query<PageParams>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(categories::fetch_categories(&ctx, &params.page_request()).await)
}

// Registered before `/categories/{category_id}`.
#[get("/categories/root")]
pub async fn list_root_categories(
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(categories::fetch_root_categories(&ctx).await)
}

#[get("/categories/{category_id}/subcategories")]
pub async fn list_subcategories(
    category_id: web::Path<String>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(categories::fetch_subcategories(&ctx, &category_id).await)
}

#[get("/categories/{category_id}")]
pub async fn show_category(
    category_id: web::Path<String>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(categories::fetch_category(&ctx, &category_id).await)
}

#[post("/categories")]
pub async fn add_category(
    web::Json(request): web::Json<CategoryRequest>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(categories::create_category(&ctx, &request).await)
}

#[put("/categories/{category_id}")]
pub async fn save_category(
    category_id: web::Path<String>,
    web::Json(request): web::Json<CategoryRequest>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(categories::update_category(&ctx, &category_id, &request).await)
}

#[delete("/categories/{category_id}")]
pub async fn remove_category(
    category_id: web::Path<String>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    let ctx = context(&backend, &session, &settings);
    respond(categories::delete_category(&ctx, &category_id).await)
}
