//! Product catalog queries.
//!
//! The catalog is the product list embedded in the shop page of the site
//! document. Every operation is a pure read.

pub mod query;

pub use query::{CatalogError, CatalogQuery, ProductFilter, ProductPage};
