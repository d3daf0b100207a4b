//! Switchboard Core - Hierarchical command dispatch and tab completion
//!
//! This crate provides the dispatch framework for Switchboard, including:
//! - A command tree model with names, aliases, and per-node permission gates
//! - Capability-polymorphic executor resolution over a closed issuer taxonomy
//! - A recoverable abort signal for declarative argument validation
//! - Argument combinators (sub-contexts, optional values, fixed-arity arrays)
//! - Tree-descent tab completion with a pluggable generic fallback
//! - A registration boundary with handle-scoped ownership
//!
//! A tree is assembled with [`CommandBuilder`], frozen into an immutable
//! [`CommandNode`], and published through a [`CommandRegistry`]. Dispatch
//! is synchronous and mutation-free, so a built tree is safe to share.

pub mod builder;
pub mod combinators;
pub mod context;
pub mod errors;
pub mod issuer;
pub mod logging;
pub mod node;
pub mod registry;

// Re-export commonly used types
pub use builder::CommandBuilder;
pub use context::InvocationContext;
pub use errors::{Abort, ExecResult, RegistryError, RegistryResult, TreeError};
pub use issuer::{Capability, Issuer, IssuerKind};
pub use node::{CommandNode, CompletionHandler, CompletionRequest, Handler};
pub use registry::{
    CommandDescriptor, CommandRegistry, InMemoryRegistry, NoSuggestions, RegistrationHandle,
    SuggestionSource,
};
