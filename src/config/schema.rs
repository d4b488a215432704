//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::BackendTarget;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Gateway behaviour (identification header, upstream timeout, auth).
    pub gateway: GatewayConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Backend services and the path prefixes routed to them.
    pub services: Vec<ServiceConfig>,
}

impl ProxyConfig {
    /// Convert the configured services into immutable backend targets,
    /// preserving declaration order.
    pub fn to_targets(&self) -> Vec<BackendTarget> {
        self.services
            .iter()
            .map(|s| BackendTarget::new(s.name.clone(), s.url.clone(), s.prefixes.clone()))
            .collect()
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Gateway-wide request handling settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Value of the `X-API-Gateway` header set on every outbound request.
    pub name: String,

    /// Deadline for a single outbound call, in seconds.
    pub upstream_timeout_secs: u64,

    /// Require the `X-watchman-token` header on every request.
    pub auth_enabled: bool,

    /// Log the raw token value on successful authentication.
    /// When false only its length is logged.
    pub log_auth_token: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            name: "api-gateway".to_string(),
            upstream_timeout_secs: 10,
            auth_enabled: false,
            log_auth_token: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log line format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Address for the metrics endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// A backend service definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service identifier for logging.
    pub name: String,

    /// Base URL requests are forwarded to (e.g., "http://localhost:8081").
    pub url: String,

    /// Path prefixes routed to this service.
    pub prefixes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let raw = r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [gateway]
            name = "edge"
            upstream_timeout_secs = 3
            auth_enabled = true

            [observability]
            log_format = "json"

            [[services]]
            name = "users-service"
            url = "http://localhost:8081"
            prefixes = ["/users", "/auth"]

            [[services]]
            name = "products-service"
            url = "http://localhost:8082"
            prefixes = ["/products"]
        "#;

        let config: ProxyConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.gateway.name, "edge");
        assert_eq!(config.gateway.upstream_timeout_secs, 3);
        assert!(config.gateway.auth_enabled);
        assert!(!config.gateway.log_auth_token);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.services.len(), 2);
        assert_eq!(config.services[0].prefixes, vec!["/users", "/auth"]);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: ProxyConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.gateway.name, "api-gateway");
        assert_eq!(config.gateway.upstream_timeout_secs, 10);
        assert!(!config.gateway.auth_enabled);
        assert!(config.services.is_empty());
    }

    #[test]
    fn targets_keep_declaration_order() {
        let mut config = ProxyConfig::default();
        config.services.push(ServiceConfig {
            name: "a".into(),
            url: "http://a".into(),
            prefixes: vec!["/a".into()],
        });
        config.services.push(ServiceConfig {
            name: "b".into(),
            url: "http://b".into(),
            prefixes: vec!["/b".into(), "/bb".into()],
        });

        let targets = config.to_targets();
        assert_eq!(targets[0].name(), "a");
        assert_eq!(targets[1].name(), "b");
        assert_eq!(targets[1].path_prefixes(), ["/b", "/bb"]);
    }
}
