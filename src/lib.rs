//! revio: resolver-chain routing engine for a reverse-proxy front-end.
//!
//! For every inbound request, identified by hostname and path, revio walks a
//! priority-ordered chain of resolvers and returns the canonical route of the
//! first one that claims the request.

pub mod admin;
pub mod certificates;
pub mod config;
pub mod lifecycle;
pub mod load_balancer;
pub mod observability;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use lifecycle::{Runtime, Shutdown};
pub use routing::{
    build_route, ResolverHandle, RouteEngine, RouteInput, RouteRecord, RouteSpec, UrlTarget,
};
