//! Round-robin target selection.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::load_balancer::TargetSelector;
use crate::routing::{RouteSpec, UrlTarget};

/// Round-robin selector.
/// Stores an internal counter to rotate through a route's targets.
#[derive(Debug, Default)]
pub struct RoundRobin {
    counter: AtomicUsize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TargetSelector for RoundRobin {
    fn select<'a>(&self, route: &'a RouteSpec) -> Option<&'a UrlTarget> {
        let urls = route.urls();
        if urls.is_empty() {
            return None;
        }

        // One counter for every route; single-target routes skip it.
        if urls.len() == 1 {
            return urls.first();
        }

        let index = self.counter.fetch_add(1, Ordering::Relaxed) % urls.len();
        urls.get(index)
    }
}
