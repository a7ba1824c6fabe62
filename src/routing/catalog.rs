//! Named resolvers supplied by the embedding host.
//!
//! Configuration can only refer to resolvers by name; the host registers the
//! actual implementations here before starting the runtime.

use std::collections::HashMap;

use crate::routing::resolver::ResolverHandle;

#[derive(Debug, Clone, Default)]
pub struct ResolverCatalog {
    resolvers: HashMap<String, ResolverHandle>,
}

impl ResolverCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resolver under `name`, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, handle: ResolverHandle) {
        self.resolvers.insert(name.into(), handle);
    }

    pub fn with(mut self, name: impl Into<String>, handle: ResolverHandle) -> Self {
        self.insert(name, handle);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ResolverHandle> {
        self.resolvers.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_returns_same_handle() {
        let handle = ResolverHandle::from_fn("tenants", |_, _| None);
        let catalog = ResolverCatalog::new().with("tenants", handle.clone());

        assert_eq!(catalog.get("tenants"), Some(&handle));
        assert!(catalog.get("unknown").is_none());
    }
}
