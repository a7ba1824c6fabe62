//! Approved-domain gate and certificate cache in front of a provider.

use std::sync::Arc;

use dashmap::{DashMap, DashSet};

use crate::certificates::provider::{
    Certificate, CertificateError, CertificateProvider, FetchOptions,
};
use crate::config::{CertificateConfig, ProxyConfig};

/// Fetches certificates for approved domains, reusing cached ones.
pub struct Certifier {
    provider: Arc<dyn CertificateProvider>,
    email: String,
    defaults: FetchOptions,
    approved: DashSet<String>,
    certs: DashMap<String, Certificate>,
}

impl Certifier {
    pub fn new(provider: Arc<dyn CertificateProvider>, email: impl Into<String>) -> Self {
        Self {
            provider,
            email: email.into(),
            defaults: FetchOptions::default(),
            approved: DashSet::new(),
            certs: DashMap::new(),
        }
    }

    /// Certifier approving the configured domains plus every `tls` route host.
    pub fn from_config(provider: Arc<dyn CertificateProvider>, config: &ProxyConfig) -> Self {
        let CertificateConfig {
            email,
            approved_domains,
            challenge,
            renew,
        } = &config.certificates;

        let mut certifier = Self::new(provider, email.clone());
        certifier.defaults = FetchOptions {
            renew: *renew,
            challenge: *challenge,
        };
        for domain in approved_domains.iter().cloned().chain(config.tls_domains()) {
            certifier.add_domain(domain);
        }
        certifier
    }

    /// Approve `domain`. Duplicates and empty names are ignored.
    pub fn add_domain(&self, domain: impl Into<String>) {
        let domain = domain.into();
        if domain.is_empty() {
            return;
        }
        if self.approved.insert(domain.clone()) {
            tracing::info!(domain = %domain, "Domain approved for certificates");
        }
    }

    pub fn is_approved(&self, domain: &str) -> bool {
        self.approved.contains(domain)
    }

    /// Check that every domain in `domains` is approved.
    pub fn approve(&self, domains: &[&str]) -> Result<(), CertificateError> {
        match domains.iter().find(|domain| !self.is_approved(domain)) {
            Some(domain) => {
                tracing::warn!(domain = %domain, approved = ?self.approved_domains(), "Unapproved domain");
                Err(CertificateError::Unapproved(domain.to_string()))
            }
            None => Ok(()),
        }
    }

    /// Approved domains, sorted.
    pub fn approved_domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = self.approved.iter().map(|d| d.key().clone()).collect();
        domains.sort();
        domains
    }

    /// Options from `[certificates]`, used by `fetch_default`.
    pub fn default_options(&self) -> &FetchOptions {
        &self.defaults
    }

    /// Certificate for `domain` with the configured renew and challenge.
    pub async fn fetch_default(&self, domain: &str) -> Result<Certificate, CertificateError> {
        self.fetch(domain, &self.defaults).await
    }

    /// Certificate for `domain`: cached unless `options.renew`, otherwise
    /// requested from the provider and cached.
    pub async fn fetch(
        &self,
        domain: &str,
        options: &FetchOptions,
    ) -> Result<Certificate, CertificateError> {
        if self.email.is_empty() {
            return Err(CertificateError::NotConfigured);
        }
        self.approve(&[domain])?;

        if !options.renew {
            if let Some(cert) = self.cached(domain) {
                tracing::info!(domain, "Using cached certificate");
                return Ok(cert);
            }
            tracing::info!(domain, challenge = ?options.challenge, "Requesting certificate");
        } else {
            tracing::info!(domain, challenge = ?options.challenge, "Renewing certificate");
        }

        match self.provider.fetch(domain, &self.email, options).await {
            Ok(cert) => {
                self.certs.insert(domain.to_string(), cert.clone());
                Ok(cert)
            }
            Err(e) => {
                tracing::error!(domain, error = %e, "Certificate request failed");
                Err(e)
            }
        }
    }

    pub fn cached(&self, domain: &str) -> Option<Certificate> {
        self.certs.get(domain).map(|r| r.value().clone())
    }
}
