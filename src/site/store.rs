//! The immutable site document, validated once and shared by handlers.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::CatalogQuery;
use crate::site::schema::{Page, Product, SiteConfig};

/// Route of the page whose mock data holds the product catalog.
pub const SHOP_ROUTE: &str = "/shop";

const BUILTIN_DOCUMENT: &str = include_str!("../../data/site.json");

/// Error type for building the site document.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to read site document: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse site document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid site document: {}", .0.join(", "))]
    Invalid(Vec<String>),
}

impl SiteConfig {
    /// The document compiled into the binary.
    pub fn builtin() -> Result<Self, SiteError> {
        Ok(serde_json::from_str(BUILTIN_DOCUMENT)?)
    }

    /// Load a document from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, SiteError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn shop_page(&self) -> Option<&Page> {
        self.site.pages.iter().find(|p| p.route == SHOP_ROUTE)
    }

    fn shop_page_mut(&mut self) -> Option<&mut Page> {
        self.site.pages.iter_mut().find(|p| p.route == SHOP_ROUTE)
    }

    /// Products embedded in the shop page; empty without one.
    pub fn products(&self) -> &[Product] {
        self.shop_page()
            .and_then(|p| p.mock_data.as_ref())
            .map(|d| d.products.as_slice())
            .unwrap_or_default()
    }
}

/// Holds the site document for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config: Arc<SiteConfig>,
}

impl ConfigStore {
    /// Validate `config` and take ownership of it.
    ///
    /// The shop page's pagination block is rewritten to describe the
    /// catalog actually embedded alongside it.
    pub fn new(mut config: SiteConfig) -> Result<Self, SiteError> {
        validate_document(&config).map_err(SiteError::Invalid)?;

        if let Some(data) = config.shop_page_mut().and_then(|p| p.mock_data.as_mut()) {
            let total = data.products.len();
            if data.pagination.total != total {
                tracing::warn!(
                    declared = data.pagination.total,
                    actual = total,
                    "Shop pagination total disagrees with catalog, using catalog size"
                );
                data.pagination.total = total;
            }
            data.pagination.page = data.pagination.page.max(1);
            data.pagination.per_page = data.pagination.per_page.max(1);
        }

        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// The full document, identical on every call.
    pub fn config(&self) -> Arc<SiteConfig> {
        Arc::clone(&self.config)
    }

    pub fn catalog(&self) -> CatalogQuery<'_> {
        CatalogQuery::new(self.config.products())
    }
}

fn validate_document(config: &SiteConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut routes = HashSet::new();
    for page in &config.site.pages {
        if !routes.insert(page.route.as_str()) {
            errors.push(format!("duplicate page route {:?}", page.route));
        }
    }

    let mut ids = HashSet::new();
    for product in config.products() {
        if !ids.insert(product.id.as_str()) {
            errors.push(format!("duplicate product id {:?}", product.id));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
