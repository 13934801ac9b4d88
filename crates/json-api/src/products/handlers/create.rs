//! Create Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::{
    data::{ImageUrls, NewProduct},
    records::ProductUuid,
};

use crate::{
    envelope::{Envelope, success},
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateProductRequest {
    pub title: String,

    pub description: String,

    #[salvo(schema(value_type = String))]
    pub price: Decimal,

    pub quantity: u32,

    pub category_id: Uuid,

    #[serde(default)]
    #[salvo(schema(value_type = Vec<String>))]
    pub image_urls: ImageUrls,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: ProductUuid::new(),
            category_uuid: request.category_id.into(),
            title: request.title,
            description: request.description,
            price: request.price,
            quantity: request.quantity,
            image_urls: request.image_urls,
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));

    let product = state
        .app
        .products
        .create_product(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    span.record("product_uuid", tracing::field::display(product.uuid));

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(product_uuid = %product.uuid, "created product");

    Ok(success(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::products::ProductsServiceError;

    use crate::test_helpers::{
        MockServices, TEST_CATEGORY_UUID, TEST_USER_UUID, authenticated_service, make_product,
    };

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        authenticated_service(mocks, Router::with_path("products").post(handler))
    }

    fn payload() -> serde_json::Value {
        json!({
            "title": "Desk Lamp",
            "description": "A lamp for your desk",
            "price": "25.00",
            "quantity": 10,
            "categoryId": Uuid::nil(),
            "imageUrls": ["/img/lamp.png"],
        })
    }

    #[tokio::test]
    async fn create_product_returns_201_with_location() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .products
            .expect_create_product()
            .once()
            .withf(|owner, new| {
                *owner == TEST_USER_UUID
                    && new.category_uuid == TEST_CATEGORY_UUID
                    && new.title == "Desk Lamp"
                    && new.price == Decimal::new(2500, 2)
                    && new.quantity == 10
                    && new.image_urls == ImageUrls::from_iter(["/img/lamp.png".to_string()])
            })
            .return_once(|_, new| Ok(make_product(new.uuid)));

        let mut res = TestClient::post("http://example.com/products")
            .json(&payload())
            .send(&make_service(mocks))
            .await;

        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let body: Envelope<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{}", body.data.uuid)));
        assert_eq!(body.data.price, Decimal::new(2500, 2));

        Ok(())
    }

    #[tokio::test]
    async fn image_urls_are_optional() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .products
            .expect_create_product()
            .once()
            .withf(|_, new| new.image_urls.is_empty())
            .return_once(|_, new| Ok(make_product(new.uuid)));

        let res = TestClient::post("http://example.com/products")
            .json(&json!({
                "title": "Desk Lamp",
                "description": "A lamp for your desk",
                "price": 25,
                "quantity": 1,
                "categoryId": Uuid::nil(),
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_category_returns_400() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::InvalidReference));

        let res = TestClient::post("http://example.com/products")
            .json(&payload())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn negative_quantity_is_rejected_before_the_service() -> TestResult {
        let res = TestClient::post("http://example.com/products")
            .json(&json!({
                "title": "Desk Lamp",
                "description": "A lamp for your desk",
                "price": "25.00",
                "quantity": -1,
                "categoryId": Uuid::nil(),
            }))
            .send(&make_service(MockServices::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
