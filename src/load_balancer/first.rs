//! First-target selection.

use crate::load_balancer::TargetSelector;
use crate::routing::{RouteSpec, UrlTarget};

/// Always picks the first URL of the route.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstTarget;

impl TargetSelector for FirstTarget {
    fn select<'a>(&self, route: &'a RouteSpec) -> Option<&'a UrlTarget> {
        route.urls().first()
    }
}
