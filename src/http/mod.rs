//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, connect info)
//!     → middleware/ (logging, optional token check)
//!     → health.rs (/health, answered locally)
//!     → server.rs dispatch (route table lookup, 404 fallback)
//!     → proxy.rs (rebuild request, forward, relay response)
//!     → Send to client
//! ```

pub mod health;
pub mod middleware;
pub mod proxy;
pub mod server;

pub use middleware::{Middleware, MiddlewareChain};
pub use proxy::{ProxyError, ProxyForwarder, X_API_GATEWAY};
pub use server::{AppState, HttpServer, ServerError};
