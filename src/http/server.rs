//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, CORS, metrics)
//! - Bind server to listener
//! - Stop on the shutdown broadcast

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{CorsConfig, DatabaseConfig, ServerConfig};
use crate::diagnostics::DatabaseProbe;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::observability::metrics;
use crate::site::ConfigStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConfigStore>,
    pub probe: Arc<dyn DatabaseProbe>,
    pub database: DatabaseConfig,
}

/// HTTP server for the storefront API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `store`.
    pub fn new(config: ServerConfig, store: ConfigStore, probe: Arc<dyn DatabaseProbe>) -> Self {
        let state = AppState {
            store: Arc::new(store),
            probe,
            database: config.database.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/", get(handlers::root))
            .route("/api/hello", get(handlers::hello))
            .route("/api/site", get(handlers::get_site))
            .route("/api/products", get(handlers::list_products))
            .route("/api/products/{product_id}", get(handlers::get_product))
            .route("/test", get(handlers::diagnostics))
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        let router = match cors_layer(&config.cors) {
            Some(cors) => router.layer(cors),
            None => router,
        };

        router
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = request.request_id().unwrap_or("unknown"),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal is broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// `None` when CORS is disabled. Wide-open mirrors the caller's origin so
/// credentials stay allowed.
fn cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
    if !config.enabled {
        return None;
    }
    if config.is_wide_open() {
        return Some(CorsLayer::very_permissive());
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Method, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::diagnostics::UnconfiguredProbe;
    use crate::http::request::X_REQUEST_ID;
    use crate::site::SiteConfig;

    fn server(config: ServerConfig) -> HttpServer {
        let store = ConfigStore::new(SiteConfig::builtin().unwrap()).unwrap();
        HttpServer::new(config, store, Arc::new(UnconfiguredProbe))
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_greetings() {
        let router = server(ServerConfig::default()).router();
        let (status, body) = get(router.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].is_string());

        let (status, body) = get(router, "/api/hello").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hello from the backend API!");
    }

    #[tokio::test]
    async fn test_site_document() {
        let (status, body) = get(server(ServerConfig::default()).router(), "/api/site").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["site"]["name"], "Custom Treasures");
        assert_eq!(body["site"]["pages"][1]["mockData"]["pagination"]["total"], 2);
    }

    #[tokio::test]
    async fn test_product_listing_filters() {
        let router = server(ServerConfig::default()).router();

        let (_, body) = get(router.clone(), "/api/products").await;
        assert_eq!(body["count"], 2);

        let (_, body) = get(router.clone(), "/api/products?q=bracelet").await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["items"][0]["id"], "SKU-JWL-002");

        let (_, body) = get(router.clone(), "/api/products?category=mugs").await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["items"][0]["id"], "SKU-MUG-001");

        let (_, body) = get(router, "/api/products?page=2&perPage=1").await;
        assert_eq!(body["items"][0]["id"], "SKU-JWL-002");
        assert_eq!(body["pagination"]["total"], 2);
    }

    #[tokio::test]
    async fn test_product_listing_never_rejects_query() {
        let router = server(ServerConfig::default()).router();

        let (status, body) = get(router.clone(), "/api/products?q=mug&q=bracelet").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["items"][0]["id"], "SKU-JWL-002");

        for uri in ["/api/products?page=abc", "/api/products?page=", "/api/products?perPage="] {
            let (status, body) = get(router.clone(), uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body["count"], 2, "{uri}");
        }

        let (status, body) = get(router, "/api/products?perPage=-1&q=mug").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["items"][0]["id"], "SKU-MUG-001");
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let router = server(ServerConfig::default()).router();

        let (status, body) = get(router.clone(), "/api/products/SKU-JWL-002").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Engraved Name Bracelet");
        assert_eq!(body["shortDescription"], "Stainless steel bracelet customized with any name.");

        let (status, body) = get(router, "/api/products/SKU-000-NOPE").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "detail": "Product not found" }));
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = get(server(ServerConfig::default()).router(), "/api/orders").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Not Found");
    }

    #[tokio::test]
    async fn test_diagnostics_without_driver() {
        let mut config = ServerConfig::default();
        config.database.url = Some("mongodb://db".into());
        let (status, body) = get(server(config).router(), "/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "✅ Running");
        assert_eq!(body["database_url"], "✅ Set");
        assert_eq!(body["database_name"], "❌ Not Set");
        assert_eq!(body["collections"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_request_id_generated_and_preserved() {
        let router = server(ServerConfig::default()).router();

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/api/hello").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let id = response.headers().get(X_REQUEST_ID).unwrap().to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/hello")
                    .header(X_REQUEST_ID, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "abc-123");
    }

    #[tokio::test]
    async fn test_cors_wide_open_mirrors_origin() {
        let router = server(ServerConfig::default()).router();
        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/products")
                    .header(header::ORIGIN, "https://anywhere.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://anywhere.example"
        );
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn test_cors_restricted_origins() {
        let mut config = ServerConfig::default();
        config.cors.allowed_origins = vec!["https://custom-treasures.example".into()];
        let router = server(config).router();

        let request = |origin: &str| {
            Request::builder()
                .uri("/api/hello")
                .header(header::ORIGIN, origin)
                .body(Body::empty())
                .unwrap()
        };

        let allowed = router.clone().oneshot(request("https://custom-treasures.example")).await.unwrap();
        assert_eq!(
            allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://custom-treasures.example"
        );

        let denied = router.oneshot(request("https://evil.example")).await.unwrap();
        assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
