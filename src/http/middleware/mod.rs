//! Request interceptors wrapping the dispatcher.
//!
//! # Data Flow
//! ```text
//! request → stage[0] → stage[1] → ... → dispatcher
//! response ← stage[0] ← stage[1] ← ... ← dispatcher
//! ```
//!
//! # Design Decisions
//! - Stages are trait objects composed once at startup
//! - The first declared stage is the outermost
//! - A stage may short-circuit by returning without calling `next`

pub mod auth;
pub mod logging;

use std::sync::Arc;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};
use futures_util::future::BoxFuture;

use crate::config::GatewayConfig;

pub use auth::{AuthMiddleware, X_WATCHMAN_TOKEN};
pub use logging::LoggingMiddleware;

/// A single interception stage.
pub trait Middleware: Send + Sync + 'static {
    /// Stage name for startup logging.
    fn name(&self) -> &'static str;

    /// Handle `request`, delegating to `next` to continue down the chain.
    fn intercept(&self, request: Request, next: Next) -> BoxFuture<'_, Response>;
}

/// Ordered list of stages applied around a router.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    stages: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage; it runs inside every stage added before it.
    pub fn with(mut self, stage: impl Middleware) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Logging always; authentication only when enabled.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let chain = Self::new().with(LoggingMiddleware);
        if config.auth_enabled {
            chain.with(AuthMiddleware::new(config.log_auth_token))
        } else {
            chain
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Wrap `router` so the first stage sees requests first.
    pub fn wrap(&self, router: Router) -> Router {
        self.stages.iter().rev().fold(router, |router, stage| {
            let stage = Arc::clone(stage);
            router.layer(middleware::from_fn(move |request: Request, next: Next| {
                let stage = Arc::clone(&stage);
                async move { stage.intercept(request, next).await }
            }))
        })
    }
}
