//! Request logging stage.
//!
//! Emits one line per request with method, path, caller address, status and
//! elapsed time. The line is written once the response body has been fully
//! relayed or dropped, so the duration covers backend streaming.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::Method,
    middleware::Next,
    response::Response,
};
use futures_util::{future, future::BoxFuture, StreamExt};

use crate::http::middleware::Middleware;
use crate::observability::metrics;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn intercept(&self, request: Request, next: Next) -> BoxFuture<'_, Response> {
        Box::pin(async move {
            let start = Instant::now();
            let method = request.method().clone();
            let path = request.uri().path().to_string();
            let client = request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.to_string())
                .unwrap_or_else(|| "unknown".to_string());

            let response = next.run(request).await;

            let record = Completion {
                method,
                path,
                client,
                status: response.status().as_u16(),
                start,
            };

            // The record rides along with the body and logs when the body is dropped.
            let (parts, body) = response.into_parts();
            let body = body
                .into_data_stream()
                .scan(record, |_, chunk| future::ready(Some(chunk)));

            Response::from_parts(parts, Body::from_stream(body))
        })
    }
}

struct Completion {
    method: Method,
    path: String,
    client: String,
    status: u16,
    start: Instant,
}

impl Drop for Completion {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        tracing::info!(
            method = %self.method,
            path = %self.path,
            client = %self.client,
            status = self.status,
            duration_ms = elapsed.as_secs_f64() * 1000.0,
            "Request completed"
        );
        metrics::record_request(self.method.as_str(), self.status, elapsed);
    }
}
