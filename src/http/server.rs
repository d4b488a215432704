//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Build the route table and forwarder from configuration
//! - Create the Axum Router: `/health`, then prefix dispatch as fallback
//! - Wrap everything in the middleware chain
//! - Serve with connect info and graceful shutdown

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header::InvalidHeaderValue, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::http::health::{health_check, HEALTH_PATH};
use crate::http::middleware::MiddlewareChain;
use crate::http::proxy::ProxyForwarder;
use crate::routing::{RouteTable, RouteTableError};

/// Errors raised while building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Routes(#[from] RouteTableError),

    #[error("invalid gateway name: {0}")]
    GatewayName(#[from] InvalidHeaderValue),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub forwarder: ProxyForwarder,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if two services claim the same prefix.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let routes = RouteTable::build(config.to_targets())?;
        for (prefix, target) in routes.bindings() {
            tracing::info!(
                prefix,
                service = target.name(),
                url = target.base_url(),
                "Registering route"
            );
        }

        let forwarder = ProxyForwarder::new(
            HeaderValue::from_str(&config.gateway.name)?,
            Duration::from_secs(config.gateway.upstream_timeout_secs),
        );

        let chain = MiddlewareChain::from_config(&config.gateway);
        tracing::info!(stages = ?chain.names(), "Middleware chain built");

        let state = AppState {
            routes: Arc::new(routes),
            forwarder,
        };

        let router = chain.wrap(Self::build_router(state));
        Ok(Self { router })
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route(HEALTH_PATH, any(health_check))
            .fallback(dispatch)
            .with_state(state)
    }

    /// The fully wrapped router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the request path and forward to the owning backend, or 404.
async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let Some(target) = state.routes.resolve(&path).cloned() else {
        tracing::warn!(method = %method, path = %path, "No route found");
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    match state.forwarder.forward(&target, request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(
                service = target.name(),
                method = %method,
                path = %path,
                error = %err,
                "Proxy request failed"
            );
            err.into_response()
        }
    }
}
