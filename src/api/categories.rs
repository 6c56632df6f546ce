//! Category lookup.

use super::client::ApiClient;
use super::endpoints::{CategoryId, Endpoint};
use super::error::ApiResult;
use super::request::RequestDescriptor;
use super::types::{Category, Page, ProductQuery, ProductSummary};

pub async fn list_categories(client: &ApiClient) -> ApiResult<Vec<Category>> {
    client
        .execute(&RequestDescriptor::new(Endpoint::Categories))
        .await
}

/// Listings in one category. `query.category_id` is ignored; the path wins.
pub async fn category_products(
    client: &ApiClient,
    id: CategoryId,
    query: &ProductQuery,
) -> ApiResult<Page<ProductSummary>> {
    let query = ProductQuery {
        category_id: None,
        ..query.clone()
    };
    let descriptor =
        RequestDescriptor::new(Endpoint::CategoryProducts(id)).query_pairs(query.to_pairs());
    client.execute(&descriptor).await
}
