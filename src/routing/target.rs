//! Backend targets: named upstream services and the prefixes they own.

/// A named upstream service with a base URL and the path prefixes routed to it.
///
/// Immutable after construction; shared between route table entries via `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendTarget {
    name: String,
    base_url: String,
    path_prefixes: Vec<String>,
}

impl BackendTarget {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        path_prefixes: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            path_prefixes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URL the inbound path-and-query is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn path_prefixes(&self) -> &[String] {
        &self.path_prefixes
    }

    /// Full outbound URL for an inbound path-and-query. The path is kept as-is,
    /// including the matched prefix.
    pub fn upstream_url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }
}
