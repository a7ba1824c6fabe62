//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → lifecycle::Runtime registers routes and resolvers
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → Runtime::reload swaps config resolvers in one snapshot
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Route targets are stored raw; bad targets surface at resolution time

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AdminConfig, BalancingConfig, BalancingStrategy, CertificateConfig, LogFormat,
    ObservabilityConfig, ProxyConfig, ResolverConfig, RouteConfig, RouteTarget, UrlList,
};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
