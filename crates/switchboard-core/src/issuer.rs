//! Issuer identity and the capability taxonomy
//!
//! Every invocation is triggered by an issuer: the console, an interactive
//! session, or an automation hook. Executor registration and resolution key
//! off a closed `Capability` taxonomy instead of the issuer's runtime type,
//! so resolution is an ordered lookup that the compiler can check
//! exhaustively.

/// Concrete classification of the entity that issued a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssuerKind {
    /// The host's own operator console
    Console,
    /// An interactive session (a connected end user)
    Interactive,
    /// A non-interactive automation source (timers, hooks, pipelines)
    Automation,
}

impl IssuerKind {
    /// The exact capability this kind satisfies (besides `Capability::Any`)
    pub fn capability(self) -> Capability {
        match self {
            IssuerKind::Console => Capability::Console,
            IssuerKind::Interactive => Capability::Interactive,
            IssuerKind::Automation => Capability::Automation,
        }
    }
}

/// Capability class an executor can be registered under
///
/// `Any` is satisfied by every issuer and is the least specific entry in
/// the order; each remaining variant is satisfied only by the matching
/// `IssuerKind` and is strictly more specific than `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Satisfied by every issuer
    Any,
    /// Satisfied only by `IssuerKind::Console`
    Console,
    /// Satisfied only by `IssuerKind::Interactive`
    Interactive,
    /// Satisfied only by `IssuerKind::Automation`
    Automation,
}

impl Capability {
    /// Check whether an issuer of the given kind satisfies this capability
    pub fn accepts(self, kind: IssuerKind) -> bool {
        self == Capability::Any || self == kind.capability()
    }

    /// Whether this capability is a refinement (more specific than `Any`)
    pub fn is_refinement(self) -> bool {
        self != Capability::Any
    }
}

/// The entity that triggered a command invocation
///
/// Object-safe so a dispatch can carry `&dyn Issuer` through the tree.
/// `send_message` takes `&self`; implementations that record output (the
/// test issuer, for instance) use interior mutability.
pub trait Issuer {
    /// Display name of the issuer
    fn name(&self) -> &str;

    /// Concrete kind, used for capability resolution
    fn kind(&self) -> IssuerKind;

    /// Single boolean permission check against the host's permission model
    fn has_permission(&self, permission: &str) -> bool;

    /// Deliver a user-facing message to the issuer
    fn send_message(&self, message: &str);
}
