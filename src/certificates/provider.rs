//! Certificate provider contract.
//!
//! The provider owns the ACME conversation (account, challenge, issuance);
//! revio only asks it for a certificate by domain.

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A PEM-encoded certificate bundle for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub domain: String,
    pub cert_pem: String,
    pub chain_pem: String,
    /// Never serialized to clients.
    #[serde(skip_serializing, default)]
    pub key_pem: String,
    /// Expiry as seconds since the Unix epoch, when known.
    pub expires_at: Option<u64>,
}

/// ACME domain validation method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeType {
    #[default]
    #[serde(rename = "http-01")]
    Http01,
    #[serde(rename = "tls-sni-01")]
    TlsSni01,
    #[serde(rename = "dns-01")]
    Dns01,
}

/// Per-fetch options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Ask for a fresh certificate even if one is cached.
    pub renew: bool,
    pub challenge: ChallengeType,
}

#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("domain {0:?} is not approved for certificates")]
    Unapproved(String),

    #[error("certificate provider failed: {0}")]
    Provider(String),

    #[error("no certificate email configured")]
    NotConfigured,
}

/// Supplies certificates, typically by speaking ACME to a CA.
pub trait CertificateProvider: Send + Sync {
    fn fetch<'a>(
        &'a self,
        domain: &'a str,
        email: &'a str,
        options: &'a FetchOptions,
    ) -> BoxFuture<'a, Result<Certificate, CertificateError>>;
}
