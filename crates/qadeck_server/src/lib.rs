//! HTTP server wiring for QADeck (API, handlers, and shared state).

/// HTTP error mapping for API handlers.
pub mod error;
/// API handlers.
pub mod handlers;
/// Site health probing.
pub mod health;
/// First-run seeding of default links and environments.
pub mod seed;

pub use health::{HealthMonitor, HealthSnapshot, HealthStatus};
pub use qadeck_core::{config, db, models, AppError, Config, Database, DEFAULT_PORT};
pub use seed::seed_if_empty;

use axum::{
    extract::DefaultBodyLimit,
    http::header,
    routing::{delete, get, post, put},
    Router,
};
use hyper::HeaderMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
    pub health: Arc<HealthMonitor>,
}

impl AppState {
    /// Construct shared application state.
    ///
    /// # Arguments
    /// - `config`: Loaded configuration.
    /// - `db`: Open database handle.
    ///
    /// # Returns
    /// A new [`AppState`].
    pub fn new(config: Config, db: Database) -> Self {
        let health = Arc::new(HealthMonitor::new(config.probe_timeout_ms));
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
            health,
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// # Arguments
/// - `state`: Shared application state.
/// - `allow_public_access`: Whether to allow cross-origin requests from any origin.
///
/// # Returns
/// Configured `axum::Router`.
///
/// # Panics
/// Panics if static header values fail to parse (should not happen).
pub fn create_app(state: AppState, allow_public_access: bool) -> Router {
    let cors_port = state.config.port;
    create_app_with_cors_port(state, allow_public_access, cors_port)
}

/// Resolve the listener address from env var overrides and security policy.
///
/// # Arguments
/// - `config`: Server configuration containing the configured `port`.
/// - `allow_public_access`: Whether non-loopback bind targets are permitted.
///
/// # Returns
/// A validated socket address that enforces loopback when public access is disabled.
pub fn resolve_bind_address(config: &Config, allow_public_access: bool) -> SocketAddr {
    let default_bind = SocketAddr::from(([127, 0, 0, 1], config.port));
    let requested = match std::env::var("BIND") {
        Ok(value) => match value.trim().parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(err) => {
                tracing::warn!(
                    "Invalid BIND='{}': {}. Falling back to {}",
                    value,
                    err,
                    default_bind
                );
                default_bind
            }
        },
        Err(_) => default_bind,
    };

    if allow_public_access || requested.ip().is_loopback() {
        return requested;
    }

    tracing::warn!(
        "Non-loopback bind {} requested without ALLOW_PUBLIC_ACCESS; forcing 127.0.0.1",
        requested
    );
    SocketAddr::from(([127, 0, 0, 1], requested.port()))
}

fn create_app_with_cors_port(state: AppState, allow_public_access: bool, cors_port: u16) -> Router {
    // Configure security headers
    let mut default_headers = HeaderMap::new();
    default_headers.insert(header::X_CONTENT_TYPE_OPTIONS, "nosniff".parse().unwrap());
    default_headers.insert(header::X_FRAME_OPTIONS, "DENY".parse().unwrap());
    default_headers.insert(
        header::CONTENT_SECURITY_POLICY,
        "default-src 'self'; frame-ancestors 'none'; base-uri 'self'"
            .parse()
            .unwrap(),
    );

    // Configure CORS - optionally allow public access
    let cors = if allow_public_access {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
            ])
            .allow_headers(tower_http::cors::Any)
    } else {
        CorsLayer::new()
            .allow_origin([
                format!("http://localhost:{}", cors_port).parse().unwrap(),
                format!("http://127.0.0.1:{}", cors_port).parse().unwrap(),
            ])
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
    };

    Router::new()
        .route(
            "/api/links",
            get(handlers::link::list_links)
                .post(handlers::link::create_link)
                .delete(handlers::link::delete_links),
        )
        .route("/api/links/view", get(handlers::link::view_links))
        .route("/api/links/:id", put(handlers::link::update_link))
        .route(
            "/api/categories",
            get(handlers::category::list_categories).post(handlers::category::add_category),
        )
        .route(
            "/api/categories/order",
            put(handlers::category::reorder_categories),
        )
        .route(
            "/api/categories/:name",
            put(handlers::category::rename_category).delete(handlers::category::delete_category),
        )
        .route(
            "/api/datasets",
            get(handlers::dataset::list_datasets).post(handlers::dataset::create_dataset),
        )
        .route("/api/datasets/lookup", get(handlers::dataset::lookup_sku))
        .route("/api/datasets/:id", delete(handlers::dataset::delete_dataset))
        .route(
            "/api/datasets/:id/activate",
            put(handlers::dataset::activate_dataset),
        )
        .route(
            "/api/environments",
            get(handlers::environment::list_environments)
                .post(handlers::environment::create_environment),
        )
        .route(
            "/api/environments/:id",
            put(handlers::environment::update_environment)
                .delete(handlers::environment::delete_environment),
        )
        .route(
            "/api/environments/:id/sku-url",
            get(handlers::environment::sku_url),
        )
        .route("/api/health", get(handlers::health::get_health))
        .route("/api/health/refresh", post(handlers::health::refresh_health))
        .route(
            "/api/prefs",
            get(handlers::prefs::get_prefs).put(handlers::prefs::put_prefs),
        )
        .route(
            "/api/profiles",
            get(handlers::prefs::get_profiles).put(handlers::prefs::put_profiles),
        )
        .with_state(state.clone())
        .layer(
            tower::ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(state.config.max_upload_size))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors)
                .layer(SetResponseHeaderLayer::overriding(
                    header::CONTENT_SECURITY_POLICY,
                    default_headers
                        .get(header::CONTENT_SECURITY_POLICY)
                        .unwrap()
                        .clone(),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    default_headers
                        .get(header::X_CONTENT_TYPE_OPTIONS)
                        .unwrap()
                        .clone(),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    default_headers.get(header::X_FRAME_OPTIONS).unwrap().clone(),
                )),
        )
}

fn listener_cors_port(listener: &tokio::net::TcpListener, fallback_port: u16) -> u16 {
    listener
        .local_addr()
        .map(|addr| addr.port())
        .unwrap_or(fallback_port)
}

/// Run the Axum server with graceful shutdown support.
///
/// # Arguments
/// - `listener`: Bound TCP listener for the server.
/// - `state`: Shared application state.
/// - `allow_public_access`: Whether to allow cross-origin requests from any origin.
/// - `shutdown_signal`: Future that resolves when shutdown should start.
///
/// # Returns
/// `Ok(())` when the server exits cleanly.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    allow_public_access: bool,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let cors_port = listener_cors_port(&listener, state.config.port);
    let app = create_app_with_cors_port(state, allow_public_access, cors_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

#[cfg(test)]
mod tests {
    use super::listener_cors_port;
    use super::resolve_bind_address;
    use qadeck_core::Config;
    use qadeck_core::DEFAULT_PORT;
    use std::net::SocketAddr;

    fn test_config(port: u16) -> Config {
        Config {
            db_path: String::from("/tmp/qadeck-db"),
            port,
            probe_timeout_ms: 5000,
            max_upload_size: 1024,
        }
    }

    #[tokio::test]
    async fn listener_cors_port_uses_bound_listener_port() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener");
        let expected = listener.local_addr().expect("listener addr").port();
        let resolved = listener_cors_port(&listener, DEFAULT_PORT);
        assert_eq!(resolved, expected);
    }

    #[test]
    fn resolve_bind_address_enforces_loopback_policy() {
        let config = test_config(4041);
        let loopback = resolve_bind_address(&config, false);
        assert_eq!(loopback, SocketAddr::from(([127, 0, 0, 1], 4041)));

        // Non-loopback bind without public access keeps the requested port
        // but forces the loopback address.
        std::env::set_var("BIND", "0.0.0.0:4040");
        let forced = resolve_bind_address(&config, false);
        let public = resolve_bind_address(&config, true);
        std::env::set_var("BIND", "bad:host");
        let fallback = resolve_bind_address(&config, false);
        std::env::remove_var("BIND");

        assert_eq!(forced, SocketAddr::from(([127, 0, 0, 1], 4040)));
        assert_eq!(public, SocketAddr::from(([0, 0, 0, 0], 4040)));
        assert_eq!(fallback, SocketAddr::from(([127, 0, 0, 1], 4041)));
    }
}
