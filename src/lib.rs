//! Minimal HTTP API gateway.
//!
//! Matches inbound request paths against a static prefix table and relays
//! each request to the owning backend service.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use routing::{BackendTarget, RouteTable};
