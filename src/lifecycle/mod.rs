//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → resolve shutdown future
//!     → server stops accepting, drains in-flight requests → exit
//! ```

pub mod signals;

pub use signals::shutdown_signal;
