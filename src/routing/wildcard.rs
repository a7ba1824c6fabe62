//! Host pattern resolver.
//!
//! Answers for every hostname matching `example.com` or `*.example.com` with a
//! fixed target. Used for catch-all subdomain routing from configuration.

use crate::routing::matcher::HostPattern;
use crate::routing::resolver::{ResolveResult, Resolver};
use crate::routing::route::RouteInput;

#[derive(Debug)]
pub struct HostPatternResolver {
    name: String,
    pattern: HostPattern,
    target: RouteInput,
}

impl HostPatternResolver {
    /// Returns `None` if `pattern` is not a valid host pattern.
    pub fn new(pattern: &str, target: RouteInput) -> Option<Self> {
        let parsed = HostPattern::parse(pattern)?;
        Some(Self {
            name: format!("pattern:{}", pattern.trim()),
            pattern: parsed,
            target,
        })
    }

    pub fn pattern(&self) -> &HostPattern {
        &self.pattern
    }
}

impl Resolver for HostPatternResolver {
    fn resolve(&self, hostname: &str, _path: &str) -> ResolveResult {
        if self.pattern.matches(hostname) {
            Ok(Some(self.target.clone()))
        } else {
            Ok(None)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
