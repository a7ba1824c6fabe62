//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for revio.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::certificates::ChallengeType;
use crate::routing::{RouteInput, RouteRecord};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Static hostname routes for the built-in routing resolver.
    pub routes: Vec<RouteConfig>,

    /// Additional resolvers installed at startup.
    pub resolvers: Vec<ResolverConfig>,

    /// Target selection among a route's URLs.
    pub balancing: BalancingConfig,

    /// Certificate provisioning settings.
    pub certificates: CertificateConfig,

    /// Admin API settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ProxyConfig {
    /// Hostnames of routes that want TLS termination.
    pub fn tls_domains(&self) -> Vec<String> {
        self.routes
            .iter()
            .filter(|route| route.tls)
            .map(|route| route.host.clone())
            .collect()
    }
}

/// A static hostname route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Exact hostname to match.
    pub host: String,

    /// Where requests for the host go.
    pub target: RouteTarget,

    /// Request a certificate for this host.
    #[serde(default)]
    pub tls: bool,
}

/// Route target as written in config: a URL, or a path plus URL list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RouteTarget {
    Url(String),
    Record {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
        url: UrlList,
    },
}

/// One URL or several.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum UrlList {
    One(String),
    Many(Vec<String>),
}

impl RouteTarget {
    /// Convert to a route input. Each call yields a fresh record identity.
    pub fn to_input(&self) -> RouteInput {
        match self {
            RouteTarget::Url(url) => RouteInput::Url(url.clone()),
            RouteTarget::Record { path, url } => {
                let urls = match url {
                    UrlList::One(url) => vec![url.clone()],
                    UrlList::Many(urls) => urls.clone(),
                };
                let record = RouteRecord::with_urls(urls);
                let record = match path {
                    Some(path) => record.with_path(path.clone()),
                    None => record,
                };
                RouteInput::from(record)
            }
        }
    }
}

/// A resolver installed from configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolverConfig {
    /// Host pattern (`*.example.com`) mapped to a fixed target.
    Wildcard {
        pattern: String,
        target: RouteTarget,
        #[serde(default)]
        priority: i32,
    },

    /// Resolver supplied by the host through a `ResolverCatalog`.
    Named {
        name: String,
        #[serde(default)]
        priority: i32,
    },
}

impl ResolverConfig {
    pub fn priority(&self) -> i32 {
        match self {
            ResolverConfig::Wildcard { priority, .. } | ResolverConfig::Named { priority, .. } => {
                *priority
            }
        }
    }
}

/// How a target is picked from a multi-URL route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalancingStrategy {
    #[default]
    First,
    RoundRobin,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BalancingConfig {
    pub strategy: BalancingStrategy,
}

/// Certificate provisioning configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CertificateConfig {
    /// Contact email sent with certificate requests.
    pub email: String,

    /// Domains allowed to obtain certificates, besides `tls = true` routes.
    pub approved_domains: Vec<String>,

    /// Domain validation challenge.
    pub challenge: ChallengeType,

    /// Force renewal of cached certificates on fetch.
    pub renew: bool,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            email: "revio@email.com".to_string(),
            approved_domains: Vec::new(),
            challenge: ChallengeType::default(),
            renew: false,
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable admin API.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Admin API bind address.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[routes]]
        host = "mysite.example.com"
        target = "http://127.0.0.1:9999"

        [[routes]]
        host = "api.example.com"
        target = { path = "/v1", url = ["http://10.0.0.1", "http://10.0.0.2"] }
        tls = true

        [[resolvers]]
        kind = "wildcard"
        pattern = "*.example.com"
        target = "http://10.0.0.9"
        priority = -1

        [[resolvers]]
        kind = "named"
        name = "tenants"
        priority = 5

        [balancing]
        strategy = "round_robin"

        [certificates]
        approved_domains = ["www.example.com"]
        challenge = "dns-01"
    "#;

    #[test]
    fn test_parse_full_config() {
        let config: ProxyConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(config.routes.len(), 2);
        assert_eq!(
            config.routes[0].target,
            RouteTarget::Url("http://127.0.0.1:9999".into())
        );
        assert_eq!(
            config.routes[1].target,
            RouteTarget::Record {
                path: Some("/v1".into()),
                url: UrlList::Many(vec!["http://10.0.0.1".into(), "http://10.0.0.2".into()]),
            }
        );
        assert_eq!(config.tls_domains(), vec!["api.example.com"]);

        assert_eq!(config.resolvers.len(), 2);
        assert_eq!(config.resolvers[0].priority(), -1);
        assert!(matches!(&config.resolvers[1], ResolverConfig::Named { name, .. } if name == "tenants"));

        assert_eq!(config.balancing.strategy, BalancingStrategy::RoundRobin);
        assert_eq!(config.certificates.challenge, ChallengeType::Dns01);
        assert_eq!(config.certificates.email, "revio@email.com");
        assert!(!config.admin.enabled);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ProxyConfig = toml::from_str("").unwrap();
        assert!(config.routes.is_empty());
        assert_eq!(config.balancing.strategy, BalancingStrategy::First);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_record_target_to_input() {
        let target = RouteTarget::Record {
            path: Some("/api".into()),
            url: UrlList::One("http://127.0.0.1".into()),
        };

        match target.to_input() {
            RouteInput::Record(record) => {
                assert_eq!(record.path(), Some("/api"));
                assert_eq!(record.urls(), ["http://127.0.0.1".to_string()]);
            }
            other => panic!("expected record input, got {other:?}"),
        }
    }
}
