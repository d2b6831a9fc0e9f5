use crate::actions::{ActionContext, Messages, resource_path};
use crate::backend::{BackendInvoker, BackendRequest};
use crate::domain::envelope::ApiEnvelope;
use crate::domain::product::{InventoryItem, InventoryStats, Product, ProductRequest};
use crate::pagination::{Page, PageRequest, SortDirection};

const FETCH_ALL: Messages = Messages::new(
    "Products fetched successfully",
    "Failed to fetch products",
);
const FETCH_ONE: Messages = Messages::new(
    "Product fetched successfully",
    "Failed to fetch product",
);
const FETCH_BY_BARCODE: Messages = Messages::new(
    "Product fetched successfully",
    "Failed to fetch product by barcode",
);
const CREATE: Messages = Messages::new("Product created successfully", "Failed to create product");
const UPDATE: Messages = Messages::new("Product updated successfully", "Failed to update product");
const DELETE: Messages = Messages::new("Product deleted successfully", "Failed to delete product");
const INVENTORY_STATS: Messages = Messages::new(
    "Inventory stats fetched successfully",
    "Failed to fetch inventory stats",
);
const LOW_STOCK: Messages = Messages::new(
    "Low stock products fetched successfully",
    "Failed to fetch low stock products",
);
const INVENTORY_TABLE: Messages = Messages::new(
    "Inventory table fetched successfully",
    "Failed to fetch inventory table",
);

/// Lists products, optionally filtered by a free-form search term.
pub async fn fetch_products<B>(
    ctx: &ActionContext<'_, B>,
    page: &PageRequest,
    search: Option<&str>,
) -> ApiEnvelope<Page<Product>>
where
    B: BackendInvoker + ?Sized,
{
    let search = search.map(str::trim).filter(|s| !s.is_empty());
    ctx.run(FETCH_ALL, || {
        let request = BackendRequest::get("/products").page(page);
        Ok(match search {
            Some(term) => request.query("search", term),
            None => request,
        })
    })
    .await
}

pub async fn fetch_product<B>(ctx: &ActionContext<'_, B>, id: &str) -> ApiEnvelope<Product>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(FETCH_ONE, || {
        Ok(BackendRequest::get(resource_path("/products", id)?))
    })
    .await
}

/// Looks a product up by the code scanned at the point of sale.
pub async fn fetch_product_by_barcode<B>(
    ctx: &ActionContext<'_, B>,
    barcode: &str,
) -> ApiEnvelope<Product>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(FETCH_BY_BARCODE, || {
        Ok(BackendRequest::get(resource_path("/products/barcode", barcode)?))
    })
    .await
}

pub async fn create_product<B>(
    ctx: &ActionContext<'_, B>,
    request: &ProductRequest,
) -> ApiEnvelope<Product>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(CREATE, || Ok(BackendRequest::post("/products").json(request)?)).await
}

pub async fn update_product<B>(
    ctx: &ActionContext<'_, B>,
    id: &str,
    request: &ProductRequest,
) -> ApiEnvelope<Product>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(UPDATE, || {
        Ok(BackendRequest::put(resource_path("/products", id)?).json(request)?)
    })
    .await
}

pub async fn delete_product<B>(ctx: &ActionContext<'_, B>, id: &str) -> ApiEnvelope<()>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run_void(DELETE, || {
        Ok(BackendRequest::delete(resource_path("/products", id)?))
    })
    .await
}

pub async fn fetch_inventory_stats<B>(ctx: &ActionContext<'_, B>) -> ApiEnvelope<InventoryStats>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(INVENTORY_STATS, || {
        Ok(BackendRequest::get("/products/inventory/stats"))
    })
    .await
}

/// Products at or below their minimum stock level. `threshold` overrides the
/// backend default.
pub async fn fetch_low_stock_products<B>(
    ctx: &ActionContext<'_, B>,
    threshold: Option<i64>,
) -> ApiEnvelope<Vec<Product>>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(LOW_STOCK, || {
        let request = BackendRequest::get("/products/low-stock");
        Ok(match threshold {
            Some(threshold) => request.query("threshold", threshold),
            None => request,
        })
    })
    .await
}

/// Sorted, paginated inventory rows, each tagged with its [`StockLevel`].
///
/// [`StockLevel`]: crate::domain::product::StockLevel
pub async fn fetch_inventory_table<B>(
    ctx: &ActionContext<'_, B>,
    page: usize,
    size: usize,
    sort_by: &str,
    sort_dir: SortDirection,
) -> ApiEnvelope<Page<InventoryItem>>
where
    B: BackendInvoker + ?Sized,
{
    let page_request = PageRequest::new(page, size).sort(sort_by, sort_dir);
    let envelope: ApiEnvelope<Page<InventoryItem>> = ctx
        .run(INVENTORY_TABLE, || {
            Ok(BackendRequest::get("/products/inventory").page(&page_request))
        })
        .await;
    envelope.map_data(|rows| rows.map(InventoryItem::with_stock_level))
}
