//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (request ID, tracing, error envelope, timeout, body
//!   limit, metrics, CORS, API-key auth)
//! - Bind server to listener and shut down gracefully

use axum::{middleware, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::config::{ApiConfig, DeploymentMode};
use crate::http::error::ApiError;
use crate::http::middleware::{
    api_key_middleware, count_preflight, envelope_bare_errors, metrics_middleware,
};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::tracing::http_trace_layer;
use crate::routes;
use crate::security::{ApiKeyAuthenticator, CorsPolicy};
use crate::services::{
    AnalyticsService, CustomerService, InMemoryStore, OrderService, ServiceError,
};

/// Application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderService>,
    pub customers: Arc<dyn CustomerService>,
    pub analytics: Arc<dyn AnalyticsService>,
    pub mode: DeploymentMode,
}

impl AppState {
    pub fn new(
        mode: DeploymentMode,
        orders: Arc<dyn OrderService>,
        customers: Arc<dyn CustomerService>,
        analytics: Arc<dyn AnalyticsService>,
    ) -> Self {
        Self {
            orders,
            customers,
            analytics,
            mode,
        }
    }

    /// All three services backed by one in-memory store.
    pub fn with_store(mode: DeploymentMode, store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self::new(mode, store.clone(), store.clone(), store)
    }

    /// Map a service failure for this deployment mode.
    pub fn service_error(&self, err: ServiceError) -> ApiError {
        ApiError::from_service(err, self.mode)
    }
}

/// HTTP server for the grading API.
pub struct HttpServer {
    router: Router,
    config: Arc<ApiConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and services.
    pub fn new(config: ApiConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self {
            router,
            config: Arc::new(config),
        }
    }

    /// Create a server backed by a fresh in-memory store.
    pub fn with_in_memory_store(config: ApiConfig) -> Self {
        let state = AppState::with_store(config.environment, InMemoryStore::new());
        Self::new(config, state)
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &ApiConfig, state: AppState) -> Router {
        let authenticator = Arc::new(ApiKeyAuthenticator::new(config.auth.api_key.clone()));
        let cors_policy = Arc::new(CorsPolicy::from_config(&config.cors, config.environment));

        // CORS sits outside auth so preflights never need a key.
        let api = routes::api_router()
            .layer(middleware::from_fn_with_state(authenticator, api_key_middleware))
            .layer(cors_policy.layer())
            .layer(middleware::map_request_with_state(cors_policy, count_preflight));

        Router::new()
            .merge(routes::public_router())
            .nest(&config.cors.api_prefix, api)
            .fallback(routes::not_found)
            .with_state(state)
            .layer(middleware::from_fn(metrics_middleware))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::map_response(envelope_bare_errors))
            .layer(propagate_request_id_layer())
            .layer(http_trace_layer())
            .layer(set_request_id_layer())
    }

    /// A clone of the fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires or the process is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = self.config.environment.as_str(),
            api_prefix = %self.config.cors.api_prefix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => tracing::info!("Shutdown triggered"),
                    _ = shutdown_signal() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
