//! Test support for service-level tests.

mod helpers;

pub(crate) use context::{TEST_PASSWORD, TestContext};
