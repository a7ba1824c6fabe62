//! Target selection subsystem.
//!
//! # Data Flow
//! ```text
//! RouteEngine::resolve → RouteSpec (one or more UrlTargets)
//!     → TargetSelector picks the target for this request:
//!         - first.rs (always the first URL)
//!         - round_robin.rs (rotate through URLs)
//!     → Host opens the connection
//! ```
//!
//! # Design Decisions
//! - Selection is outside the resolution contract; routes stay immutable
//! - Strategy is chosen once from configuration

pub mod first;
pub mod round_robin;

use std::sync::Arc;

use crate::config::BalancingStrategy;
use crate::routing::{RouteSpec, UrlTarget};

pub use first::FirstTarget;
pub use round_robin::RoundRobin;

/// Picks one target of a resolved route.
pub trait TargetSelector: Send + Sync + std::fmt::Debug {
    /// Returns `None` only for a route without targets.
    fn select<'a>(&self, route: &'a RouteSpec) -> Option<&'a UrlTarget>;
}

/// Selector for a configured strategy.
pub fn selector_for(strategy: BalancingStrategy) -> Arc<dyn TargetSelector> {
    match strategy {
        BalancingStrategy::First => Arc::new(FirstTarget),
        BalancingStrategy::RoundRobin => Arc::new(RoundRobin::new()),
    }
}
