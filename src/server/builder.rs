//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::state::AppState;
use crate::core::error::{BiztimeError, RequestError};
use crate::core::service::{CompanyStore, IndustryStore, InvoiceStore};
use crate::entities::company::CompanyDescriptor;
use crate::entities::industry::IndustryDescriptor;
use crate::entities::invoice::InvoiceDescriptor;
use anyhow::Result;
use axum::{
    Json, Router,
    http::{Method, Uri},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builder for the biztime HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryStore::new())
///     .with_cors(true)
///     .build()?;
/// ```
pub struct ServerBuilder {
    state: Option<AppState>,
    custom_routes: Vec<Router>,
    cors: bool,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            state: None,
            custom_routes: Vec::new(),
            cors: false,
        }
    }

    /// Serve every repository from `store` (required)
    pub fn with_store<S>(mut self, store: S) -> Self
    where
        S: CompanyStore + InvoiceStore + IndustryStore + 'static,
    {
        self.state = Some(AppState::from_store(store));
        self
    }

    /// Add routes that are not tied to an entity
    ///
    /// # Example
    ///
    /// ```ignore
    /// let admin = Router::new().route("/admin/ping", get(|| async { "pong" }));
    ///
    /// ServerBuilder::new()
    ///     .with_store(store)
    ///     .with_custom_routes(admin)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Allow cross-origin requests from any origin
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    /// Build the entity registry for the configured state
    fn registry(state: &AppState) -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(CompanyDescriptor::new(state.clone())));
        registry.register(Box::new(InvoiceDescriptor::new(state.clone())));
        registry.register(Box::new(IndustryDescriptor::new(state.clone())));
        registry
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Health check routes
    /// - Routes for every registered entity
    /// - Custom routes
    ///
    /// Requests that match no route, or a route without the requested
    /// method, answer with the standard JSON error body.
    pub fn build(self) -> Result<Router> {
        let state = self
            .state
            .ok_or_else(|| anyhow::anyhow!("A store is required. Call .with_store()"))?;

        let registry = Self::registry(&state);
        tracing::debug!(entities = ?registry.entity_types(), "building router");

        let mut app = health_routes().merge(registry.build_routes());
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }
        let mut app = app
            .method_not_allowed_fallback(method_not_allowed)
            .fallback(route_not_found);

        if self.cors {
            app = app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Returns once a Ctrl+C or SIGTERM has been received and in-flight
    /// requests have completed.
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_store(store)
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "biztime"
    }))
}

async fn route_not_found(method: Method, uri: Uri) -> BiztimeError {
    RequestError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
    .into()
}

async fn method_not_allowed(method: Method, uri: Uri) -> BiztimeError {
    RequestError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
    .into()
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
