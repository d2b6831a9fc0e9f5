use crate::actions::{ActionContext, Messages, resource_path};
use crate::backend::{BackendInvoker, BackendRequest};
use crate::domain::envelope::ApiEnvelope;
use crate::domain::sale::{
    DateRange, RefundRequest, Sale, SaleRequest, SalesSummary, TopSellingProduct,
};
use crate::pagination::{Page, PageRequest};

const CREATE: Messages = Messages::new("Sale completed successfully", "Failed to create sale");
const FETCH_ALL: Messages = Messages::new("Sales fetched successfully", "Failed to fetch sales");
const FETCH_ONE: Messages = Messages::new("Sale fetched successfully", "Failed to fetch sale");
const FETCH_TODAY: Messages = Messages::new(
    "Today's sales fetched successfully",
    "Failed to fetch today's sales",
);
const FETCH_RANGE: Messages = Messages::new(
    "Sales fetched successfully",
    "Failed to fetch sales for date range",
);
const SUMMARY: Messages = Messages::new(
    "Sales summary fetched successfully",
    "Failed to fetch sales summary",
);
const SUMMARY_TODAY: Messages = Messages::new(
    "Today's summary fetched successfully",
    "Failed to fetch today's sales summary",
);
const TOP_SELLING: Messages = Messages::new(
    "Top selling products fetched successfully",
    "Failed to fetch top selling products",
);
const REFUND: Messages = Messages::new("Refund processed successfully", "Failed to process refund");

/// Default number of entries requested for the top-selling report.
pub const DEFAULT_TOP_SELLING_LIMIT: u32 = 10;

/// Records a point-of-sale transaction.
pub async fn create_sale<B>(ctx: &ActionContext<'_, B>, request: &SaleRequest) -> ApiEnvelope<Sale>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(CREATE, || Ok(BackendRequest::post("/sales").json(request)?)).await
}

pub async fn fetch_sales<B>(
    ctx: &ActionContext<'_, B>,
    page: &PageRequest,
) -> ApiEnvelope<Page<Sale>>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(FETCH_ALL, || Ok(BackendRequest::get("/sales").page(page))).await
}

pub async fn fetch_sale<B>(ctx: &ActionContext<'_, B>, id: &str) -> ApiEnvelope<Sale>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(FETCH_ONE, || Ok(BackendRequest::get(resource_path("/sales", id)?))).await
}

pub async fn fetch_today_sales<B>(ctx: &ActionContext<'_, B>) -> ApiEnvelope<Vec<Sale>>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(FETCH_TODAY, || Ok(BackendRequest::get("/sales/today"))).await
}

pub async fn fetch_sales_by_range<B>(
    ctx: &ActionContext<'_, B>,
    range: DateRange,
) -> ApiEnvelope<Vec<Sale>>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(FETCH_RANGE, || {
        Ok(BackendRequest::get("/sales/range").query_pairs(range.to_query()))
    })
    .await
}

pub async fn fetch_sales_summary<B>(
    ctx: &ActionContext<'_, B>,
    range: DateRange,
) -> ApiEnvelope<SalesSummary>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(SUMMARY, || {
        Ok(BackendRequest::get("/sales/summary").query_pairs(range.to_query()))
    })
    .await
}

pub async fn fetch_today_summary<B>(ctx: &ActionContext<'_, B>) -> ApiEnvelope<SalesSummary>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(SUMMARY_TODAY, || Ok(BackendRequest::get("/sales/summary/today"))).await
}

pub async fn fetch_top_selling_products<B>(
    ctx: &ActionContext<'_, B>,
    limit: Option<u32>,
) -> ApiEnvelope<Vec<TopSellingProduct>>
where
    B: BackendInvoker + ?Sized,
{
    let limit = limit.filter(|l| *l > 0).unwrap_or(DEFAULT_TOP_SELLING_LIMIT);
    ctx.run(TOP_SELLING, || {
        Ok(BackendRequest::get("/sales/top-selling").query("limit", limit))
    })
    .await
}

/// Refunds a sale in full, or only the listed lines.
pub async fn refund_sale<B>(
    ctx: &ActionContext<'_, B>,
    sale_id: &str,
    request: &RefundRequest,
) -> ApiEnvelope<Sale>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run(REFUND, || {
        let sale = resource_path("/sales", sale_id)?;
        Ok(BackendRequest::post(format!("{sale}/refund")).json(request)?)
    })
    .await
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDate;
    use reqwest::Method;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;
    use crate::actions::normalizer::ErrorSanitizer;
    use crate::actions::test_support::*;
    use crate::actions::ActionSettings;
    use crate::backend::RawResult;
    use crate::backend::mock::MockBackend;
    use crate::domain::sale::{PaymentMethod, SaleItemRequest};

    fn march() -> DateRange {
        DateRange {
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        }
    }

    #[tokio::test]
    async fn summary_sends_date_range() {
        let mut backend = MockBackend::new();
        backend
            .expect_invoke()
            .withf(|request| {
                request.path == "/sales/summary"
                    && request.query
                        == vec![
                            ("startDate".to_string(), "2024-03-01".to_string()),
                            ("endDate".to_string(), "2024-03-31".to_string()),
                        ]
            })
            .times(1)
            .returning(|_| RawResult::Success {
                status: 200,
                body: Some(json!({
                    "success": true,
                    "message": "ok",
                    "data": {"totalSales": 4, "totalRevenue": 120.5, "totalItemsSold": 9}
                })),
            });
        let session = admin_session();
        let ctx = ActionContext::new(&backend, Some(&session), dev_settings());

        let summary = fetch_sales_summary(&ctx, march()).await.data.unwrap();

        assert_eq!(summary.total_sales, 4);
        assert_eq!(summary.total_revenue, Decimal::new(1205, 1));
    }

    #[tokio::test]
    async fn create_sale_posts_items() {
        let mut backend = MockBackend::new();
        backend
            .expect_invoke()
            .withf(|request| {
                request.method == Method::POST && request.path == "/sales" && has_token(request)
            })
            .times(1)
            .returning(|_| RawResult::Success {
                status: 201,
                body: Some(json!({
                    "success": true,
                    "message": "Sale created",
                    "data": {
                        "id": "s-1",
                        "items": [
                            {"productId": "p-1", "quantity": 2, "unitPrice": 5, "subtotal": 10}
                        ],
                        "totalAmount": 10,
                        "paymentMethod": "CASH"
                    }
                })),
            });
        let session = admin_session();
        let ctx = ActionContext::new(&backend, Some(&session), dev_settings());
        let request = SaleRequest {
            items: vec![SaleItemRequest {
                product_id: "p-1".to_string(),
                quantity: 2,
                unit_price: None,
                discount: None,
            }],
            payment_method: PaymentMethod::Cash,
            amount_paid: Some(Decimal::new(20, 0)),
            discount: None,
            customer_name: None,
            notes: None,
        };

        let sale = create_sale(&ctx, &request).await.data.unwrap();

        assert_eq!(sale.id, "s-1");
        assert_eq!(sale.total_amount, Decimal::new(10, 0));
    }

    #[tokio::test]
    async fn refund_posts_to_sale_refund_path() {
        let mut backend = MockBackend::new();
        backend
            .expect_invoke()
            .withf(|request| request.path == "/sales/s-1/refund")
            .times(1)
            .returning(|_| RawResult::HttpError {
                status: 400,
                message: "Bad request: sale already refunded".to_string(),
            });
        let session = admin_session();
        let settings = ActionSettings {
            sanitizer: ErrorSanitizer::production(),
            ..dev_settings()
        };
        let ctx = ActionContext::new(&backend, Some(&session), settings);

        let envelope = refund_sale(
            &ctx,
            "s-1",
            &RefundRequest {
                reason: "damaged".to_string(),
                items: Vec::new(),
            },
        )
        .await;

        assert_eq!(envelope.message, "Failed to process refund");
        assert_eq!(
            envelope.error.as_deref(),
            Some("HTTP 400: Bad request: sale already refunded")
        );
    }

    #[tokio::test]
    async fn top_selling_defaults_limit() {
        let mut backend = MockBackend::new();
        backend
            .expect_invoke()
            .withf(|request| request.query == vec![("limit".to_string(), "10".to_string())])
            .times(1)
            .returning(|_| RawResult::Success {
                status: 200,
                body: Some(json!({"success": true, "message": "ok", "data": []})),
            });
        let session = admin_session();
        let ctx = ActionContext::new(&backend, Some(&session), dev_settings());

        let envelope = fetch_top_selling_products(&ctx, Some(0)).await;

        assert_eq!(envelope.data, Some(Vec::new()));
    }
}
