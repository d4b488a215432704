//! Route table lookup.
//!
//! # Responsibilities
//! - Flatten backend targets into (prefix, target) bindings
//! - Reject a prefix registered more than once
//! - Resolve a request path to the target owning the longest matching prefix
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Entries kept sorted by prefix length, longest first, so the first hit wins
//! - O(n) prefix scan (acceptable for typical route counts)
//! - Explicit `None` rather than silent default

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::routing::matcher::PathPrefixMatcher;
use crate::routing::target::BackendTarget;

/// Errors raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("prefix '{prefix}' is registered by both '{first}' and '{second}'")]
    DuplicatePrefix {
        prefix: String,
        first: String,
        second: String,
    },
}

#[derive(Debug)]
struct RouteEntry {
    matcher: PathPrefixMatcher,
    target: Arc<BackendTarget>,
}

/// Immutable prefix → backend target table.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a table from backend targets, flattening each target's prefixes.
    pub fn build(targets: Vec<BackendTarget>) -> Result<Self, RouteTableError> {
        let mut owners: HashMap<String, String> = HashMap::new();
        let mut entries = Vec::new();

        for target in targets {
            let target = Arc::new(target);
            for prefix in target.path_prefixes() {
                if let Some(first) = owners.insert(prefix.clone(), target.name().to_string()) {
                    return Err(RouteTableError::DuplicatePrefix {
                        prefix: prefix.clone(),
                        first,
                        second: target.name().to_string(),
                    });
                }
                entries.push(RouteEntry {
                    matcher: PathPrefixMatcher::new(prefix.clone()),
                    target: Arc::clone(&target),
                });
            }
        }

        // Stable sort: equal-length prefixes keep declaration order.
        entries.sort_by(|a, b| b.matcher.specificity().cmp(&a.matcher.specificity()));

        Ok(Self { entries })
    }

    /// Find the target owning the longest prefix of `path`.
    pub fn resolve(&self, path: &str) -> Option<&Arc<BackendTarget>> {
        self.entries
            .iter()
            .find(|entry| entry.matcher.matches(path))
            .map(|entry| &entry.target)
    }

    /// Registered (prefix, target) bindings, longest prefix first.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &BackendTarget)> {
        self.entries
            .iter()
            .map(|entry| (entry.matcher.prefix(), entry.target.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
