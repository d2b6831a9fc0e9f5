//! HTTP surface hosting the server actions.
//!
//! Every handler builds an [`ActionContext`] from the request session and
//! replies `200 OK` with the action's envelope, whatever the outcome.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::actions::{ActionContext, ActionSettings};
use crate::backend::BackendInvoker;
use crate::domain::envelope::ApiEnvelope;
use crate::pagination::{PageRequest, SortDirection};
use crate::session::CurrentSession;

pub mod auth;
pub mod brands;
pub mod categories;
pub mod files;
pub mod products;
pub mod sales;

/// Backend shared by all workers. Registered as `Data<dyn BackendInvoker>`.
pub type SharedBackend = web::Data<dyn BackendInvoker>;

/// Paging parameters accepted by listing routes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<SortDirection>,
}

impl PageParams {
    pub fn page_request(&self) -> PageRequest {
        let request = PageRequest::new(self.page.unwrap_or(0), self.size.unwrap_or(0));
        match self.sort_by.as_deref() {
            Some(field) => request.sort(field, self.sort_dir.unwrap_or_default()),
            None => request,
        }
    }
}

/// Registers the auth routes at the root and the resource routes under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register)
            .service(auth::logout),
    )
    .service(
        web::scope("/api")
            // Fixed paths go before the `{id}` patterns they would otherwise match.
            .service(brands::list_brands)
            .service(brands::show_brand)
            .service(brands::add_brand)
            .service(brands::save_brand)
            .service(brands::remove_brand)
            .service(categories::list_categories)
            .service(categories::list_root_categories)
            .service(categories::list_subcategories)
            .service(categories::show_category)
            .service(categories::add_category)
            .service(categories::save_category)
            .service(categories::remove_category)
            .service(products::list_products)
            .service(products::inventory_table)
            .service(products::inventory_stats)
            .service(products::low_stock_products)
            .service(products::product_by_barcode)
            .service(products::show_product)
            .service(products::add_product)
            .service(products::save_product)
            .service(products::remove_product)
            .service(sales::add_sale)
            .service(sales::list_sales)
            .service(sales::today_sales)
            .service(sales::sales_by_range)
            .service(sales::sales_summary)
            .service(sales::today_summary)
            .service(sales::top_selling_products)
            .service(sales::show_sale)
            .service(sales::refund_sale)
            .service(files::upload_file),
    );
}

pub(crate) fn context<'a>(
    backend: &'a SharedBackend,
    session: &'a CurrentSession,
    settings: &web::Data<ActionSettings>,
) -> ActionContext<'a, dyn BackendInvoker> {
    ActionContext::new(backend.get_ref(), session.session(), *settings.get_ref())
}

pub(crate) fn respond<T: Serialize>(envelope: ApiEnvelope<T>) -> HttpResponse {
    HttpResponse::Ok().json(envelope)
}
