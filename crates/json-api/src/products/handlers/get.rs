//! Get Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::records::{
    ProductImageRecord, ProductRecord, ProductStatus,
};

use crate::{
    envelope::{Envelope, success},
    extensions::*,
    products::errors::into_status_error,
    state::State,
};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The user who listed the product
    pub user_uuid: Uuid,

    pub category_uuid: Uuid,

    pub title: String,

    pub description: String,

    /// Unit price as a decimal string
    #[salvo(schema(value_type = String))]
    pub price: Decimal,

    /// Quantity on hand
    pub quantity: u32,

    /// `active` or `deleted`
    pub status: String,

    pub images: Vec<ProductImageResponse>,

    pub created_at: String,

    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into(),
            user_uuid: product.user_uuid.into(),
            category_uuid: product.category_uuid.into(),
            title: product.title,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            status: match product.status {
                ProductStatus::Active => "active",
                ProductStatus::Deleted => "deleted",
            }
            .to_string(),
            images: product.images.into_iter().map(Into::into).collect(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Product Image Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductImageResponse {
    pub uuid: Uuid,
    pub image_url: String,
    pub created_at: String,
}

impl From<ProductImageRecord> for ProductImageResponse {
    fn from(image: ProductImageRecord) -> Self {
        Self {
            uuid: image.uuid.into(),
            image_url: image.image_url,
            created_at: image.created_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a single active product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(success(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::products::{ProductsServiceError, records::ProductUuid};

    use crate::test_helpers::{MockServices, anonymous_service, make_product};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        anonymous_service(mocks, Router::with_path("products/{product}").get(handler))
    }

    #[tokio::test]
    async fn get_returns_wrapped_product() -> TestResult {
        let uuid = ProductUuid::new();
        let product = make_product(uuid);

        let mut mocks = MockServices::default();

        mocks
            .products
            .expect_get_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(product));

        let mut res = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(mocks))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["uuid"], uuid.to_string());
        assert_eq!(body["data"]["price"], "25.00");
        assert_eq!(body["data"]["categoryUuid"], Uuid::nil().to_string());

        Ok(())
    }

    #[tokio::test]
    async fn get_missing_product_returns_404() -> TestResult {
        let uuid = ProductUuid::new();

        let mut mocks = MockServices::default();

        mocks
            .products
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn get_invalid_uuid_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/products/123")
            .send(&make_service(MockServices::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
