use crate::actions::{ActionContext, Messages, resource_path};
use crate::backend::{BackendInvoker, BackendRequest};
use crate::domain::brand::{Brand, BrandRequest};
use crate::domain::envelope::ApiEnvelope;
use crate::pagination::{Page, PageRequest};

const FETCH_ALL: Messages = Messages::new("Brands fetched successfully", "Failed to fetch brands");
const FETCH_ONE: Messages = Messages::new("Brand fetched successfully", "Failed to fetch brand");
const CREATE: Messages = Messages::new("Brand created successfully", "Failed to create brand");
const UPDATE: Messages = Messages::new("Brand updated successfully", "Failed to update brand");
const DELETE: Messages = Messages::new("Brand deleted successfully", "Failed to delete brand");

pub async fn fetch_brands<B>(
    ctx: &ActionContext<'_, B>,
    page: &PageRequest,
) -> ApiEnvelope<Page<Brand>>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(FETCH_ALL, || Ok(BackendRequest::get("/brands").page(page))).await
}

pub async fn fetch_brand<B>(ctx: &ActionContext<'_, B>, id: &str) -> ApiEnvelope<Brand>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(FETCH_ONE, || Ok(BackendRequest::get(resource_path("/brands", id)?))).await
}

pub async fn create_brand<B>(
    ctx: &ActionContext<'_, B>,
    request: &BrandRequest,
) -> ApiEnvelope<Brand>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(CREATE, || Ok(BackendRequest::post("/brands").json(request)?)).await
}

pub async fn update_brand<B>(
    ctx: &ActionContext<'_, B>,
    id: &str,
    request: &BrandRequest,
) -> ApiEnvelope<Brand>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(UPDATE, || {
        Ok(BackendRequest::put(resource_path("/brands", id)?).json(request)?)
    })
    .await
}

pub async fn delete_brand<B>(ctx: &ActionContext<'_, B>, id: &str) -> ApiEnvelope<()>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run_void(DELETE, || Ok(BackendRequest::delete(resource_path("/brands", id)?))).await
}
