//! Endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::catalog::ProductFilter;
use crate::diagnostics::{run_diagnostics_blocking, DiagnosticsReport};
use crate::http::response::{ApiError, Message};
use crate::http::server::AppState;
use crate::site::{Product, SiteConfig};

pub async fn root() -> Json<Message> {
    Json(Message::new("Hello from the Storefront backend!"))
}

pub async fn hello() -> Json<Message> {
    Json(Message::new("Hello from the backend API!"))
}

pub async fn get_site(State(state): State<AppState>) -> Json<Arc<SiteConfig>> {
    Json(state.store.config())
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let filter = ProductFilter::from_pairs(pairs);
    let page = state.store.catalog().list_products(&filter);
    tracing::debug!(
        q = ?filter.q,
        category = ?filter.category,
        count = page.count,
        total = page.pagination.total,
        "Listed products"
    );
    Json(page).into_response()
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state.store.catalog().get_product(&product_id)?;
    Ok(Json(product.clone()))
}

pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    Json(run_diagnostics_blocking(Arc::clone(&state.probe), state.database.clone()).await)
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found")
}
