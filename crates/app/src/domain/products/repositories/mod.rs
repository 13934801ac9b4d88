//! Product Repositories

mod images;
mod products;

pub(crate) use images::PgProductImagesRepository;
pub(crate) use products::PgProductsRepository;
