use crate::actions::{ActionContext, Messages, resource_path};
use crate::backend::{BackendInvoker, BackendRequest};
use crate::domain::category::{Category, CategoryRequest};
use crate::domain::envelope::ApiEnvelope;
use crate::pagination::{Page, PageRequest};

const FETCH_ALL: Messages = Messages::new(
    "Categories fetched successfully",
    "Failed to fetch categories",
);
const FETCH_ROOT: Messages = Messages::new(
    "Root categories fetched successfully",
    "Failed to fetch root categories",
);
const FETCH_CHILDREN: Messages = Messages::new(
    "Subcategories fetched successfully",
    "Failed to fetch subcategories",
);
const FETCH_ONE: Messages = Messages::new(
    "Category fetched successfully",
    "Failed to fetch category",
);
const CREATE: Messages = Messages::new(
    "Category created successfully",
    "Failed to create category",
);
const UPDATE: Messages = Messages::new(
    "Category updated successfully",
    "Failed to update category",
);
const DELETE: Messages = Messages::new(
    "Category deleted successfully",
    "Failed to delete category",
);

pub async fn fetch_categories<B>(
    ctx: &ActionContext<'_, B>,
    page: &PageRequest,
) -> ApiEnvelope<Page<Category>>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(FETCH_ALL, || Ok(BackendRequest::get("/categories").page(page))).await
}

pub async fn fetch_root_categories<B>(ctx: &ActionContext<'_, B>) -> ApiEnvelope<Vec<Category>>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(FETCH_ROOT, || Ok(BackendRequest::get("/categories/root"))).await
}

pub async fn fetch_subcategories<B>(
    ctx: &ActionContext<'_, B>,
    parent_id: &str,
) -> ApiEnvelope<Vec<Category>>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(FETCH_CHILDREN, || {
        let parent = resource_path("/categories", parent_id)?;
        Ok(BackendRequest::get(format!("{parent}/subcategories")))
    })
    .await
}

pub async fn fetch_category<B>(ctx: &ActionContext<'_, B>, id: &str) -> ApiEnvelope<Category>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(FETCH_ONE, || {
        Ok(BackendRequest::get(resource_path("/categories", id)?))
    })
    .await
}

pub async fn create_category<B>(
    ctx: &ActionContext<'_, B>,
    request: &CategoryRequest,
) -> ApiEnvelope<Category>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(CREATE, || {
        Ok(BackendRequest::post("/categories").json(request)?)
    })
    .await
}

pub async fn update_category<B>(
    ctx: &ActionContext<'_, B>,
    id: &str,
    request: &CategoryRequest,
) -> ApiEnvelope<Category>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(UPDATE, || {
        Ok(BackendRequest::put(resource_path("/categories", id)?).json(request)?)
    })
    .await
}

pub async fn delete_category<B>(ctx: &ActionContext<'_, B>, id: &str) -> ApiEnvelope<()>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run_void(DELETE, || {
        Ok(BackendRequest::delete(resource_path("/categories", id)?))
    })
    .await
}
