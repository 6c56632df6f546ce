//! Product listing operations: browse, detail, create/update/delete, likes.

use super::client::ApiClient;
use super::endpoints::{Endpoint, ProductId};
use super::error::ApiResult;
use super::request::RequestDescriptor;
use super::types::{CreatedProduct, LikeStatus, Page, ProductDetail, ProductForm, ProductQuery, ProductSummary};

/// GET /products with optional paging, category and keyword filters.
pub async fn list_products(client: &ApiClient, query: &ProductQuery) -> ApiResult<Page<ProductSummary>> {
    let descriptor = RequestDescriptor::new(Endpoint::ProductList).query_pairs(query.to_pairs());
    client.execute(&descriptor).await
}

pub async fn get_product(client: &ApiClient, id: ProductId) -> ApiResult<ProductDetail> {
    client
        .execute(&RequestDescriptor::new(Endpoint::ProductDetail(id)))
        .await
}

/// Create a listing and return its id.
pub async fn create_product(client: &ApiClient, form: &ProductForm) -> ApiResult<ProductId> {
    let descriptor = RequestDescriptor::new(Endpoint::ProductCreate).json(form)?;
    let created: CreatedProduct = client.execute(&descriptor).await?;
    log::info!("Created product {}", created.id);
    Ok(created.id)
}

pub async fn update_product(client: &ApiClient, id: ProductId, form: &ProductForm) -> ApiResult<()> {
    let descriptor = RequestDescriptor::new(Endpoint::ProductUpdate(id)).json(form)?;
    client.execute(&descriptor).await
}

pub async fn delete_product(client: &ApiClient, id: ProductId) -> ApiResult<()> {
    client
        .execute(&RequestDescriptor::new(Endpoint::ProductDelete(id)))
        .await
}

pub async fn like_product(client: &ApiClient, id: ProductId) -> ApiResult<LikeStatus> {
    client
        .execute(&RequestDescriptor::new(Endpoint::ProductLike(id)))
        .await
}

pub async fn unlike_product(client: &ApiClient, id: ProductId) -> ApiResult<LikeStatus> {
    client
        .execute(&RequestDescriptor::new(Endpoint::ProductUnlike(id)))
        .await
}
