//! Invocation context
//!
//! The immutable value handed to a handler for one dispatch step: the
//! issuer, the label path that reached this node, and the remaining
//! argument slice. Subcommand descent produces a fresh context with the
//! label extended and the args shifted; a context is never mutated in
//! place.

use std::str::FromStr;

use crate::errors::{Abort, ExecResult};
use crate::issuer::Issuer;

/// Immutable input to a handler for one dispatch step
pub struct InvocationContext<'a> {
    /// The entity that issued the invocation
    pub issuer: &'a dyn Issuer,
    /// Label path that reached this node (e.g. `"warp add"`)
    pub label: String,
    /// Arguments remaining after subcommand descent
    pub args: &'a [String],
}

impl<'a> InvocationContext<'a> {
    /// Create a context for one dispatch step
    pub fn new(issuer: &'a dyn Issuer, label: impl Into<String>, args: &'a [String]) -> Self {
        Self {
            issuer,
            label: label.into(),
            args,
        }
    }

    /// Number of arguments in this step
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// The argument at `index`
    ///
    /// This is the producer of the missing-argument flavor that
    /// `combinators::optional` converts into an absent value.
    ///
    /// # Errors
    ///
    /// `Abort::missing_argument()` when the position is absent.
    pub fn arg(&self, index: usize) -> ExecResult<&str> {
        self.args
            .get(index)
            .map(String::as_str)
            .ok_or_else(Abort::missing_argument)
    }

    /// The argument at `index` parsed as `T`
    ///
    /// # Errors
    ///
    /// Missing-argument abort when the position is absent; a message abort
    /// naming the offending value when present but unparsable.
    pub fn parsed_arg<T: FromStr>(&self, index: usize) -> ExecResult<T> {
        let raw = self.arg(index)?;
        raw.parse().map_err(|_| {
            Abort::message(format!(
                "'{}' is not a valid value for argument {}.",
                raw,
                index + 1
            ))
        })
    }

    /// Arguments from `from` to the end joined by single spaces
    ///
    /// `None` when `from` is past the last argument.
    pub fn joined_args(&self, from: usize) -> Option<String> {
        if from >= self.args.len() {
            return None;
        }
        Some(self.args[from..].join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issuer::IssuerKind;

    struct TestIssuer;

    impl Issuer for TestIssuer {
        fn name(&self) -> &str {
            "tester"
        }
        fn kind(&self) -> IssuerKind {
            IssuerKind::Console
        }
        fn has_permission(&self, _permission: &str) -> bool {
            true
        }
        fn send_message(&self, _message: &str) {}
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_arg_present_and_missing() {
        let issuer = TestIssuer;
        let args = args(&["north", "12"]);
        let ctx = InvocationContext::new(&issuer, "warp", &args);

        assert_eq!(ctx.arg_count(), 2);
        assert_eq!(ctx.arg(0).unwrap(), "north");
        let missing = ctx.arg(2).unwrap_err();
        assert!(missing.is_missing_argument());
    }

    #[test]
    fn test_parsed_arg_success_and_failure() {
        let issuer = TestIssuer;
        let args = args(&["12", "tree"]);
        let ctx = InvocationContext::new(&issuer, "warp", &args);

        let value: i32 = ctx.parsed_arg(0).unwrap();
        assert_eq!(value, 12);

        let err = ctx.parsed_arg::<i32>(1).unwrap_err();
        assert!(!err.is_missing_argument());
        assert_eq!(
            err.user_message(),
            Some("'tree' is not a valid value for argument 2.")
        );

        let missing = ctx.parsed_arg::<i32>(5).unwrap_err();
        assert!(missing.is_missing_argument());
    }

    #[test]
    fn test_joined_args() {
        let issuer = TestIssuer;
        let args = args(&["set", "a", "b", "c"]);
        let ctx = InvocationContext::new(&issuer, "motd", &args);

        assert_eq!(ctx.joined_args(1), Some("a b c".to_string()));
        assert_eq!(ctx.joined_args(4), None);
    }
}
