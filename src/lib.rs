//! Storefront backend library: site configuration and catalog API.

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod site;

pub use catalog::{CatalogQuery, ProductFilter};
pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use site::{ConfigStore, SiteConfig};
