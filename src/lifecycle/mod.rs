//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Register routes → Install resolvers
//!
//! Reload (startup.rs):
//!     New config → Re-register routes → Swap config resolvers atomically
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGINT → Broadcast shutdown → Admin server and watcher stop → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - A failed reload keeps the running configuration

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::Runtime;
