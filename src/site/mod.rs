//! Site-configuration document.
//!
//! # Data Flow
//! ```text
//! data/site.json (compiled in) or site.document_path
//!     → schema.rs (typed SiteConfig)
//!     → store.rs (validate, reconcile pagination)
//!     → ConfigStore (immutable, shared via Arc)
//! ```

pub mod schema;
pub mod store;

pub use schema::{Document, Page, Pagination, Product, SiteConfig};
pub use store::{ConfigStore, SiteError, SHOP_ROUTE};
