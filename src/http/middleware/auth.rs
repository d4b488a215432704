//! Token presence check.
//!
//! Requests without `X-watchman-token` are answered with 403 and never reach
//! the dispatcher. The token value itself is not validated.
//!
//! Header names are case-insensitive in `http`, so any spelling of
//! `X-watchman-token` is accepted, not only the exact one.

use axum::{
    extract::Request,
    http::{HeaderName, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;

use crate::http::middleware::Middleware;

/// Header carrying the caller's token.
pub const X_WATCHMAN_TOKEN: HeaderName = HeaderName::from_static("x-watchman-token");

#[derive(Debug, Clone, Copy, Default)]
pub struct AuthMiddleware {
    log_token: bool,
}

impl AuthMiddleware {
    /// `log_token` logs the raw token value on success; otherwise only its length.
    pub fn new(log_token: bool) -> Self {
        Self { log_token }
    }
}

impl Middleware for AuthMiddleware {
    fn name(&self) -> &'static str {
        "auth"
    }

    fn intercept(&self, request: Request, next: Next) -> BoxFuture<'_, Response> {
        Box::pin(async move {
            let Some(token) = request.headers().get(X_WATCHMAN_TOKEN) else {
                tracing::warn!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    "Rejected request without token"
                );
                return (StatusCode::FORBIDDEN, "Forbidden").into_response();
            };

            if self.log_token {
                tracing::info!(
                    token = %String::from_utf8_lossy(token.as_bytes()),
                    "Authenticated request"
                );
            } else {
                tracing::info!(token_len = token.len(), "Authenticated request");
            }

            next.run(request).await
        })
    }
}
