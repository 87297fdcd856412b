//! Read-only queries over the product catalog.

use serde::Serialize;
use thiserror::Error;

use crate::site::{Pagination, Product};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("product {id:?} not found")]
    NotFound { id: String },
}

/// Optional constraints accepted by [`CatalogQuery::list_products`].
///
/// Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name or short description.
    pub q: Option<String>,
    /// Case-insensitive exact category.
    pub category: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl ProductFilter {
    /// Build a filter from raw query pairs. Repeated keys keep the last
    /// value; unknown keys and unparsable numbers are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "q" => filter.q = Some(value),
                "category" => filter.category = Some(value),
                "page" => filter.page = parse_count(&value),
                "perPage" => filter.per_page = parse_count(&value),
                _ => {}
            }
        }
        filter
    }

    pub fn query(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Self::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }
}

/// Result of a listing: the requested window in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage<'a> {
    pub items: Vec<&'a Product>,
    /// Number of entries in `items`.
    pub count: usize,
    pub pagination: Pagination,
}

/// A borrowed view over the catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogQuery<'a> {
    products: &'a [Product],
}

impl<'a> CatalogQuery<'a> {
    pub fn new(products: &'a [Product]) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&'a str> {
        let mut seen: Vec<&'a str> = Vec::new();
        for product in self.products {
            if !seen.iter().any(|c| c.to_lowercase() == product.category.to_lowercase()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    pub fn list_products(&self, filter: &ProductFilter) -> ProductPage<'a> {
        let needle = non_empty(&filter.q).map(str::to_lowercase);
        let category = non_empty(&filter.category).map(str::to_lowercase);

        let matched: Vec<&'a Product> = self
            .products
            .iter()
            .filter(|p| needle.as_deref().map_or(true, |n| matches_text(p, n)))
            .filter(|p| category.as_deref().map_or(true, |c| p.category.to_lowercase() == c))
            .collect();
        let total = matched.len();

        if filter.page.is_none() && filter.per_page.is_none() {
            return ProductPage {
                count: total,
                pagination: Pagination {
                    page: 1,
                    per_page: total.max(1),
                    total,
                },
                items: matched,
            };
        }

        let page = filter.page.unwrap_or(1).max(1);
        let per_page = filter.per_page.unwrap_or(total).max(1);
        let items: Vec<&'a Product> = matched
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .collect();

        ProductPage {
            count: items.len(),
            pagination: Pagination {
                page,
                per_page,
                total,
            },
            items,
        }
    }

    /// Exact, case-sensitive lookup by id.
    pub fn get_product(&self, id: &str) -> Result<&'a Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }
}

fn parse_count(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn matches_text(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.short_description.to_lowercase().contains(needle)
}
