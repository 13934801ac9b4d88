//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use storefront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            lifecycle::LineItemStatus,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartStatus, CartUuid},
        },
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategoryStatus, CategoryUuid},
        },
        orders::{
            MockOrdersService,
            records::{OrderDetails, OrderRecord, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductStatus, ProductUuid},
        },
        users::{
            MockUsersService,
            records::{UserRecord, UserStatus, UserUuid},
        },
    },
};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_CATEGORY_UUID: CategoryUuid = CategoryUuid::from_uuid(Uuid::nil());

/// Service mocks; any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct MockServices {
    pub users: MockUsersService,
    pub auth: MockAuthService,
    pub categories: MockCategoriesService,
    pub products: MockProductsService,
    pub carts: MockCartsService,
    pub orders: MockOrdersService,
}

impl MockServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            users: Arc::new(self.users),
            auth: Arc::new(self.auth),
            categories: Arc::new(self.categories),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
        })
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    MockServices {
        auth,
        ..MockServices::default()
    }
    .into_state()
}

/// A service running `route` as the signed-in [`TEST_USER_UUID`].
pub(crate) fn authenticated_service(mocks: MockServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_user)
            .push(route),
    )
}

/// A service running `route` without a signed-in user.
pub(crate) fn anonymous_service(mocks: MockServices, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

pub(crate) fn make_user(uuid: UserUuid) -> UserRecord {
    UserRecord {
        uuid,
        username: "testbuyer".to_string(),
        email: "buyer@example.com".to_string(),
        status: UserStatus::Active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_category(uuid: CategoryUuid, name: &str) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: name.to_string(),
        status: CategoryStatus::Active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        category_uuid: TEST_CATEGORY_UUID,
        title: "Desk Lamp".to_string(),
        description: "A lamp for your desk".to_string(),
        price: Decimal::new(2500, 2),
        quantity: 10,
        status: ProductStatus::Active,
        images: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(cart: CartUuid, product: ProductUuid, quantity: u32) -> CartItemRecord {
    CartItemRecord {
        uuid: CartItemUuid::new(),
        cart_uuid: cart,
        product_uuid: product,
        quantity,
        status: LineItemStatus::Active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(uuid: CartUuid, items: Vec<CartItemRecord>) -> CartRecord {
    CartRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        status: CartStatus::Active,
        items,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, cart: CartUuid, total_price: Decimal) -> OrderRecord {
    OrderRecord {
        uuid,
        cart_uuid: cart,
        user_uuid: TEST_USER_UUID,
        total_price,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order_details(uuid: OrderUuid) -> OrderDetails {
    let cart_uuid = CartUuid::new();
    let item = make_cart_item(cart_uuid, ProductUuid::new(), 2);

    let mut cart = make_cart(cart_uuid, vec![item]);

    cart.status = CartStatus::Purchased;

    OrderDetails {
        order: make_order(uuid, cart_uuid, Decimal::new(5000, 2)),
        cart,
    }
}
