//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod images;
pub(crate) mod index;
pub(crate) mod update;
