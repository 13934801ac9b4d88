//! App Router

use salvo::Router;

use crate::{auth, carts, categories, orders, products, users};

/// Routes for every resource. Static segments are pushed before their
/// `{uuid}` siblings so they win the match.
pub fn app_router() -> Router {
    Router::new()
        .push(users_router())
        .push(products_router())
        .push(carts_router())
}

fn users_router() -> Router {
    Router::with_path("users")
        .post(users::signup::handler)
        .push(Router::with_path("login").post(users::login::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("me").get(users::me::handler))
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .push(Router::with_path("{order}").get(orders::get::handler)),
                )
                .push(
                    Router::with_path("{user}")
                        .patch(users::update::handler)
                        .delete(users::delete::handler),
                ),
        )
}

fn products_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .post(categories::create::handler)
                        .push(
                            Router::with_path("{category}").patch(categories::update::handler),
                        ),
                ),
        )
        .push(Router::with_path("{product}").get(products::get::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .patch(products::update::handler)
                        .delete(products::delete::handler)
                        .push(Router::with_path("images").post(products::images::handler)),
                ),
        )
}

fn carts_router() -> Router {
    Router::with_path("carts")
        .hoop(auth::middleware::handler)
        .get(carts::get::handler)
        .push(Router::with_path("add-product").post(carts::add::handler))
        .push(Router::with_path("update-cart").patch(carts::update::handler))
        .push(Router::with_path("purchase").post(carts::purchase::handler))
        .push(Router::with_path("{product}").delete(carts::remove::handler))
}
