//! External metadata providers.

pub mod catalog;
pub mod douban;
pub mod tmdb;

pub use catalog::{Catalog, CatalogClient};
