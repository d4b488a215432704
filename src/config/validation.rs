//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect conflicting prefixes and services
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),

    #[error("gateway name must be a non-empty header value")]
    InvalidGatewayName,

    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,

    #[error("service #{0} has an empty name")]
    EmptyServiceName(usize),

    #[error("service '{0}' is declared more than once")]
    DuplicateService(String),

    #[error("service '{service}' has invalid url '{url}': {reason}")]
    InvalidUrl {
        service: String,
        url: String,
        reason: String,
    },

    #[error("service '{0}' declares no prefixes")]
    NoPrefixes(String),

    #[error("service '{service}' prefix '{prefix}' must start with '/'")]
    InvalidPrefix { service: String, prefix: String },

    #[error("prefix '{prefix}' is claimed by both '{first}' and '{second}'")]
    DuplicatePrefix {
        prefix: String,
        first: String,
        second: String,
    },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.gateway.name.is_empty()
        || axum::http::HeaderValue::from_str(&config.gateway.name).is_err()
    {
        errors.push(ValidationError::InvalidGatewayName);
    }

    if config.gateway.upstream_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut seen_services: HashSet<&str> = HashSet::new();
    let mut prefix_owners: HashMap<&str, &str> = HashMap::new();

    for (index, service) in config.services.iter().enumerate() {
        if service.name.is_empty() {
            errors.push(ValidationError::EmptyServiceName(index));
        } else if !seen_services.insert(service.name.as_str()) {
            errors.push(ValidationError::DuplicateService(service.name.clone()));
        }

        if let Err(reason) = check_url(&service.url) {
            errors.push(ValidationError::InvalidUrl {
                service: service.name.clone(),
                url: service.url.clone(),
                reason,
            });
        }

        if service.prefixes.is_empty() {
            errors.push(ValidationError::NoPrefixes(service.name.clone()));
        }

        for prefix in &service.prefixes {
            if !prefix.starts_with('/') {
                errors.push(ValidationError::InvalidPrefix {
                    service: service.name.clone(),
                    prefix: prefix.clone(),
                });
                continue;
            }
            if let Some(first) = prefix_owners.insert(prefix.as_str(), service.name.as_str()) {
                errors.push(ValidationError::DuplicatePrefix {
                    prefix: prefix.clone(),
                    first: first.to_string(),
                    second: service.name.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("base url must not carry a query or fragment".to_string());
    }
    Ok(())
}
