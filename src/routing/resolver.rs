//! Resolver abstraction.
//!
//! A resolver maps `(hostname, path)` to a route input, or to `None` when it
//! has no opinion. Resolvers must be synchronous and cheap: they run inline
//! on every request.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::routing::route::RouteInput;

/// Error type resolvers may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a single resolver call.
pub type ResolveResult = Result<Option<RouteInput>, BoxError>;

/// A pluggable routing decision.
pub trait Resolver: Send + Sync {
    /// Decide where `hostname` + `path` should go.
    fn resolve(&self, hostname: &str, path: &str) -> ResolveResult;

    /// Name used in logs and metrics.
    fn name(&self) -> &str {
        "anonymous"
    }
}

static NEXT_RESOLVER_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a resolver handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct ResolverId(u64);

impl ResolverId {
    fn next() -> Self {
        Self(NEXT_RESOLVER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResolverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared handle to a resolver.
///
/// Clones share the same identity; two handles built from separate calls to
/// `new` are distinct even if they wrap equivalent resolvers.
#[derive(Clone)]
pub struct ResolverHandle {
    id: ResolverId,
    inner: Arc<dyn Resolver>,
}

impl ResolverHandle {
    pub fn new<R: Resolver + 'static>(resolver: R) -> Self {
        Self::from_arc(Arc::new(resolver))
    }

    /// Wrap a resolver that is also owned elsewhere.
    pub fn from_arc(inner: Arc<dyn Resolver>) -> Self {
        Self {
            id: ResolverId::next(),
            inner,
        }
    }

    /// Wrap an infallible closure.
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &str) -> Option<RouteInput> + Send + Sync + 'static,
    {
        Self::new(FnResolver {
            name: name.into(),
            f,
        })
    }

    pub fn id(&self) -> ResolverId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn resolve(&self, hostname: &str, path: &str) -> ResolveResult {
        self.inner.resolve(hostname, path)
    }
}

impl PartialEq for ResolverHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ResolverHandle {}

impl fmt::Debug for ResolverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverHandle")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

struct FnResolver<F> {
    name: String,
    f: F,
}

impl<F> Resolver for FnResolver<F>
where
    F: Fn(&str, &str) -> Option<RouteInput> + Send + Sync,
{
    fn resolve(&self, hostname: &str, path: &str) -> ResolveResult {
        Ok((self.f)(hostname, path))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// One or several resolvers passed to a single registration call.
#[derive(Debug, Clone)]
pub enum ResolverSet {
    One(ResolverHandle),
    Many(Vec<ResolverHandle>),
}

impl ResolverSet {
    pub fn into_vec(self) -> Vec<ResolverHandle> {
        match self {
            ResolverSet::One(handle) => vec![handle],
            ResolverSet::Many(handles) => handles,
        }
    }
}

impl From<ResolverHandle> for ResolverSet {
    fn from(handle: ResolverHandle) -> Self {
        ResolverSet::One(handle)
    }
}

impl From<&ResolverHandle> for ResolverSet {
    fn from(handle: &ResolverHandle) -> Self {
        ResolverSet::One(handle.clone())
    }
}

impl From<Vec<ResolverHandle>> for ResolverSet {
    fn from(handles: Vec<ResolverHandle>) -> Self {
        ResolverSet::Many(handles)
    }
}

impl<const N: usize> From<[ResolverHandle; N]> for ResolverSet {
    fn from(handles: [ResolverHandle; N]) -> Self {
        ResolverSet::Many(handles.into())
    }
}
