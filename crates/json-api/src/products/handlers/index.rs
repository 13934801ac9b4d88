//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    envelope::{Envelope, success},
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns every active product.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductsResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .map_err(into_status_error)?;

    Ok(success(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::products::records::ProductUuid;

    use crate::test_helpers::{MockServices, anonymous_service, make_product};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        anonymous_service(mocks, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn index_returns_products() -> TestResult {
        let first = ProductUuid::new();
        let second = ProductUuid::new();

        let mut mocks = MockServices::default();

        mocks
            .products
            .expect_list_products()
            .once()
            .return_once(move || Ok(vec![make_product(first), make_product(second)]));

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(mocks))
            .await;

        let body: Envelope<ProductsResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.products.len(), 2);
        assert_eq!(body.data.products.first().map(|p| p.uuid), Some(first.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn index_without_products_returns_empty_list() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .products
            .expect_list_products()
            .once()
            .return_once(|| Ok(Vec::new()));

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(mocks))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["data"]["products"], serde_json::json!([]));

        Ok(())
    }
}
