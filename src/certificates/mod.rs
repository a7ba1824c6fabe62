//! Certificate provisioning collaborator.
//!
//! # Data Flow
//! ```text
//! Host resolves a route for a TLS hostname
//!     → certifier.rs (is the domain approved? cached certificate?)
//!     → provider.rs  (CertificateProvider::fetch, ACME lives behind it)
//!     → Certificate cached per domain
//! ```
//!
//! # Design Decisions
//! - The routing engine never calls into this module
//! - Only approved domains are ever sent to the provider
//! - Provider errors are logged and returned, the host decides what to serve

pub mod certifier;
pub mod provider;

pub use certifier::Certifier;
pub use provider::{Certificate, CertificateError, CertificateProvider, ChallengeType, FetchOptions};
