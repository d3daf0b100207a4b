//! Abort signal and typed error taxonomy
//!
//! `Abort` is the recoverable-failure value a handler returns when it
//! cannot proceed with the supplied arguments. It is deliberately not a
//! `std::error::Error`: it is a dispatch outcome, consumed by the node
//! that invoked the handler, never surfaced to the host. Build-time and
//! registration-time failures are ordinary typed errors.

use std::fmt;

use thiserror::Error;

use crate::issuer::Issuer;

/// Result type returned by handlers and argument accessors
pub type ExecResult<T> = Result<T, Abort>;

/// Result type for registration operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Recoverable early exit from a handler
///
/// Carries an optional user-facing message, a missing-argument flag, and
/// an optional fallback action. The node executing the handler consumes
/// the abort: the message (if any) is delivered to the issuer, then the
/// fallback runs (no-op by default). An abort never crosses the node
/// boundary that invoked the handler.
pub struct Abort {
    message: Option<String>,
    missing_argument: bool,
    fallback: Option<Box<dyn FnOnce() + Send>>,
}

impl Abort {
    /// Abort with a user-facing message
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            missing_argument: false,
            fallback: None,
        }
    }

    /// Abort without issuer-visible output
    pub fn silent() -> Self {
        Self {
            message: None,
            missing_argument: false,
            fallback: None,
        }
    }

    /// The missing-argument flavor
    ///
    /// Produced by argument accessors when no value is available at a
    /// position; `combinators::optional` converts it into an absent value
    /// instead of an abort.
    pub fn missing_argument() -> Self {
        Self {
            message: None,
            missing_argument: true,
            fallback: None,
        }
    }

    /// Attach a fallback action, invoked after the message is delivered
    pub fn with_fallback(mut self, action: impl FnOnce() + Send + 'static) -> Self {
        self.fallback = Some(Box::new(action));
        self
    }

    /// The user-facing message, if any
    pub fn user_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether this is the missing-argument flavor
    pub fn is_missing_argument(&self) -> bool {
        self.missing_argument
    }

    /// Whether a fallback action is attached
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Consume the abort at the dispatching node: deliver the message to
    /// the issuer (if present), then run the fallback action.
    pub(crate) fn deliver(self, issuer: &dyn Issuer) {
        if let Some(message) = &self.message {
            issuer.send_message(message);
        }
        if let Some(action) = self.fallback {
            action();
        }
    }
}

impl fmt::Debug for Abort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Abort")
            .field("message", &self.message)
            .field("missing_argument", &self.missing_argument)
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

/// Errors detected while building a command tree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Command name is empty after trimming
    #[error("command name cannot be empty")]
    EmptyName,

    /// Two siblings share a name or alias under case-insensitive comparison
    #[error("duplicate subcommand label '{label}' under '{parent}'")]
    DuplicateChild { parent: String, label: String },
}

/// Errors from the registration collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Name or alias already claimed in the host namespace
    #[error("label '{label}' is already registered")]
    LabelTaken { label: String },

    /// Handle does not refer to an active registration
    #[error("registration handle {id} is not active")]
    UnknownHandle { id: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use crate::issuer::IssuerKind;

    struct SilentIssuer;

    impl Issuer for SilentIssuer {
        fn name(&self) -> &str {
            "silent"
        }
        fn kind(&self) -> IssuerKind {
            IssuerKind::Console
        }
        fn has_permission(&self, _permission: &str) -> bool {
            true
        }
        fn send_message(&self, _message: &str) {}
    }

    #[test]
    fn test_message_abort_accessors() {
        let abort = Abort::message("usage: warp <name>");
        assert_eq!(abort.user_message(), Some("usage: warp <name>"));
        assert!(!abort.is_missing_argument());
        assert!(!abort.has_fallback());
    }

    #[test]
    fn test_missing_argument_flavor_has_no_message() {
        let abort = Abort::missing_argument();
        assert!(abort.is_missing_argument());
        assert_eq!(abort.user_message(), None);
    }

    #[test]
    fn test_deliver_runs_fallback() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let abort = Abort::silent().with_fallback(move || flag.store(true, Ordering::SeqCst));

        abort.deliver(&SilentIssuer);
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_debug_does_not_require_fallback_debug() {
        let abort = Abort::message("m").with_fallback(|| {});
        let rendered = format!("{:?}", abort);
        assert!(rendered.contains("has_fallback: true"));
    }
}
