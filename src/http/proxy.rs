//! Request forwarding to backend targets.
//!
//! # Responsibilities
//! - Rebuild the inbound request against the target's base URL
//! - Copy every header value, then stamp `X-API-Gateway`
//! - Dispatch with a per-call deadline on a non-pooled client
//! - Relay the backend response as a bounded-chunk stream
//!
//! # Design Decisions
//! - The full inbound path-and-query is appended to the base URL; no prefix stripping
//! - The inbound `Host` header is dropped so the client derives it from the backend URL
//! - A new client is built per call with idle pooling disabled, so no connection
//!   is shared across requests. This costs a TCP handshake per request.
//! - One deadline covers the whole call: connect, response head and body relay
//! - A body read error or an expired deadline mid-relay ends the stream; status and
//!   headers are already sent

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{header, uri::InvalidUri, HeaderName, HeaderValue, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use futures_util::{stream, StreamExt};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tokio::time::Instant;

use crate::routing::BackendTarget;

/// Header identifying requests relayed by this gateway.
pub const X_API_GATEWAY: HeaderName = HeaderName::from_static("x-api-gateway");

/// Upper bound on the size of each relayed body chunk.
pub const RELAY_CHUNK_SIZE: usize = 4096;

/// Failures while forwarding a request.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("invalid upstream url '{url}': {source}")]
    InvalidUri {
        url: String,
        #[source]
        source: InvalidUri,
    },

    #[error("failed to build upstream request: {0}")]
    Build(#[from] axum::http::Error),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidUri { .. } | ProxyError::Build(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Upstream(_) | ProxyError::Timeout(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ProxyError::InvalidUri { .. } | ProxyError::Build(_) => "Error creating proxy request",
            ProxyError::Upstream(_) | ProxyError::Timeout(_) => "Error forwarding request",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.public_message()).into_response()
    }
}

/// Forwards requests to a backend target and relays the response.
#[derive(Debug, Clone)]
pub struct ProxyForwarder {
    gateway_id: HeaderValue,
    timeout: Duration,
}

impl ProxyForwarder {
    pub fn new(gateway_id: HeaderValue, timeout: Duration) -> Self {
        Self {
            gateway_id,
            timeout,
        }
    }

    /// Build the outbound request for `target` from the inbound one.
    pub fn build_outbound(
        &self,
        target: &BackendTarget,
        request: Request<Body>,
    ) -> Result<Request<Body>, ProxyError> {
        let (parts, body) = request.into_parts();

        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let url = target.upstream_url(path_and_query);
        let uri = match url.parse::<Uri>() {
            Ok(uri) => uri,
            Err(source) => return Err(ProxyError::InvalidUri { url, source }),
        };

        let mut builder = Request::builder().method(parts.method).uri(uri);

        if let Some(headers) = builder.headers_mut() {
            for (name, value) in parts.headers.iter() {
                if *name == header::HOST {
                    continue;
                }
                headers.append(name.clone(), value.clone());
            }
            headers.insert(X_API_GATEWAY, self.gateway_id.clone());
        }

        Ok(builder.body(body)?)
    }

    /// Forward `request` to `target`.
    ///
    /// On success the backend status and headers are returned unchanged and the
    /// body is streamed through until the call deadline. Dropping the returned
    /// future cancels the outbound call.
    pub async fn forward(
        &self,
        target: &BackendTarget,
        request: Request<Body>,
    ) -> Result<Response, ProxyError> {
        let outbound = self.build_outbound(target, request)?;

        tracing::debug!(
            service = target.name(),
            method = %outbound.method(),
            uri = %outbound.uri(),
            "Forwarding request"
        );

        let deadline = Instant::now() + self.timeout;
        let client: Client<HttpConnector, Body> = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(HttpConnector::new());

        let response: Response<Incoming> = tokio::time::timeout_at(deadline, client.request(outbound))
            .await
            .map_err(|_| ProxyError::Timeout(self.timeout))??;

        let (parts, body) = response.into_parts();
        let body = relay_body(Body::new(body), target.name().to_string(), deadline);

        Ok(Response::from_parts(parts, body))
    }
}

/// Re-stream `body` in chunks of at most [`RELAY_CHUNK_SIZE`] bytes.
///
/// A read error, or `deadline` passing while waiting on the next frame, is
/// logged and terminates the stream.
pub fn relay_body(body: Body, service: String, deadline: Instant) -> Body {
    let frames = stream::unfold((body.into_data_stream(), service), move |(mut frames, service)| async move {
        match tokio::time::timeout_at(deadline, frames.next()).await {
            Ok(Some(Ok(bytes))) => Some((bytes, (frames, service))),
            Ok(Some(Err(err))) => {
                tracing::warn!(
                    service = %service,
                    error = %err,
                    "Upstream body read failed, ending relay"
                );
                None
            }
            Ok(None) => None,
            Err(_) => {
                tracing::warn!(service = %service, "Upstream deadline passed mid-body, ending relay");
                None
            }
        }
    });

    let chunks = frames
        .flat_map(|bytes| stream::iter(split_chunks(bytes, RELAY_CHUNK_SIZE)))
        .map(Ok::<_, Infallible>);

    Body::from_stream(chunks)
}

fn split_chunks(mut bytes: Bytes, size: usize) -> Vec<Bytes> {
    let mut chunks = Vec::with_capacity(bytes.len().div_ceil(size));
    while bytes.len() > size {
        chunks.push(bytes.split_to(size));
    }
    if !bytes.is_empty() {
        chunks.push(bytes);
    }
    chunks
}
