//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! register(host, target)         → table.rs (exact hostname map)
//! add_resolver / remove_resolver → registry.rs (priority-sorted snapshot)
//!
//! resolve(host, path):
//!     → engine.rs  (walk snapshot, highest priority first)
//!     → resolver   (host, path) → RouteInput | no opinion
//!     → cache.rs   (canonicalize + memoize → RouteSpec)
//!     → matcher.rs (does the route's path own the request path?)
//!     → Return: first accepted RouteSpec or NoMatch
//! ```
//!
//! # Design Decisions
//! - Deterministic: same input and registry state always gives the same route
//! - Resolver misbehaviour is contained; it never fails a request
//! - Canonical routes are shared and immutable
//! - Target selection among a route's URLs happens after resolution

pub mod cache;
pub mod catalog;
pub mod engine;
pub mod matcher;
pub mod registry;
pub mod resolver;
pub mod route;
pub mod table;
pub mod wildcard;

pub use cache::{build_route, RouteCache};
pub use catalog::ResolverCatalog;
pub use engine::RouteEngine;
pub use registry::{ResolverEntry, ResolverRegistry};
pub use resolver::{BoxError, ResolveResult, Resolver, ResolverHandle, ResolverId, ResolverSet};
pub use route::{RouteInput, RouteRecord, RouteSpec, TargetError, UrlTarget};
pub use table::RoutingTable;
pub use wildcard::HostPatternResolver;
