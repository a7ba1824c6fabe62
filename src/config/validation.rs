//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate bind addresses and required fields
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Route targets are not checked here; they are judged at resolution time

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{ProxyConfig, ResolverConfig};
use crate::routing::matcher::HostPattern;

/// A single semantic problem in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("routes[{0}]: host must not be empty")]
    EmptyHost(usize),

    #[error("resolvers[{index}]: invalid host pattern {pattern:?}")]
    BadPattern { index: usize, pattern: String },

    #[error("resolvers[{0}]: name must not be empty")]
    EmptyResolverName(usize),

    #[error("{field}: invalid socket address {value:?}")]
    BadAddress { field: &'static str, value: String },

    #[error("admin.api_key must not be empty when the admin API is enabled")]
    EmptyApiKey,
}

pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.host.trim().is_empty() {
            errors.push(ValidationError::EmptyHost(index));
        }
    }

    for (index, resolver) in config.resolvers.iter().enumerate() {
        match resolver {
            ResolverConfig::Wildcard { pattern, .. } => {
                if HostPattern::parse(pattern).is_none() {
                    errors.push(ValidationError::BadPattern {
                        index,
                        pattern: pattern.clone(),
                    });
                }
            }
            ResolverConfig::Named { name, .. } => {
                if name.trim().is_empty() {
                    errors.push(ValidationError::EmptyResolverName(index));
                }
            }
        }
    }

    if config.admin.enabled {
        check_address(&mut errors, "admin.bind_address", &config.admin.bind_address);
        if config.admin.api_key.is_empty() {
            errors.push(ValidationError::EmptyApiKey);
        }
    }

    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadAddress {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{RouteConfig, RouteTarget};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ProxyConfig::default();
        config.routes.push(RouteConfig {
            host: "  ".into(),
            target: RouteTarget::Url("garbage".into()),
            tls: false,
        });
        config.resolvers.push(ResolverConfig::Wildcard {
            pattern: "*.".into(),
            target: RouteTarget::Url("http://10.0.0.1".into()),
            priority: 0,
        });
        config.admin.enabled = true;
        config.admin.bind_address = "nowhere".into();
        config.admin.api_key.clear();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyHost(0),
                ValidationError::BadPattern {
                    index: 0,
                    pattern: "*.".into()
                },
                ValidationError::BadAddress {
                    field: "admin.bind_address",
                    value: "nowhere".into()
                },
                ValidationError::EmptyApiKey,
            ]
        );
    }

    #[test]
    fn test_targets_are_not_validated() {
        let mut config = ProxyConfig::default();
        config.routes.push(RouteConfig {
            host: "a.example.com".into(),
            target: RouteTarget::Url("::not a url::".into()),
            tls: false,
        });
        assert!(validate_config(&config).is_ok());
    }
}
