//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (route table lookup)
//!     → matcher.rs (evaluate prefix)
//!     → Return: owning BackendTarget or None
//!
//! Route Compilation (at startup):
//!     BackendTarget[]
//!     → Flatten prefixes, reject duplicates
//!     → Sort by prefix length
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: longest prefix wins

pub mod matcher;
pub mod router;
pub mod target;

pub use router::{RouteTable, RouteTableError};
pub use target::BackendTarget;
