//! Command tree node: dispatch and tab completion
//!
//! A `CommandNode` owns its identity (name + aliases), a permission gate,
//! per-capability executors with a capability-agnostic default, an
//! optional completion handler, and its child nodes. The dispatch state
//! machine is recomputed on every invocation; no tree state is mutated
//! during dispatch, so a built tree can be shared across threads.

use tracing::{debug, trace};

use crate::context::InvocationContext;
use crate::errors::ExecResult;
use crate::issuer::{Capability, Issuer, IssuerKind};
use crate::registry::SuggestionSource;

/// Unit of behavior executed once dispatch resolves a command
pub type Handler = Box<dyn Fn(&InvocationContext<'_>) -> ExecResult<()> + Send + Sync>;

/// Custom completion behavior; its return value is used verbatim
pub type CompletionHandler = Box<dyn Fn(&CompletionRequest<'_>) -> Vec<String> + Send + Sync>;

/// Input to a completion handler for one completion request
pub struct CompletionRequest<'a> {
    /// The entity requesting completion
    pub issuer: &'a dyn Issuer,
    /// Alias the command was invoked under
    pub alias: &'a str,
    /// Arguments typed so far
    pub args: &'a [String],
}

/// A node in the command tree
///
/// Built once via `CommandBuilder`, structurally immutable thereafter;
/// only the `description` and `usage_message` text fields have setters.
pub struct CommandNode {
    name: String,
    aliases: Vec<String>,
    description: String,
    usage_message: String,
    permission: Option<String>,
    permission_message: String,
    only_interactive_message: String,
    default_executor: Option<Handler>,
    capability_executors: Vec<(Capability, Handler)>,
    completion_handler: Option<CompletionHandler>,
    children: Vec<CommandNode>,
}

impl std::fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .field("usage_message", &self.usage_message)
            .field("permission", &self.permission)
            .field("permission_message", &self.permission_message)
            .field("only_interactive_message", &self.only_interactive_message)
            .field("default_executor", &self.default_executor.is_some())
            .field("capability_executors", &self.capability_executors.len())
            .field("completion_handler", &self.completion_handler.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// Outcome of capability resolution for one invocation
enum Resolution<'a> {
    /// A handler was selected
    Handler(&'a Handler),
    /// Only refinements the issuer does not satisfy exist, and no default
    Unsatisfied,
    /// Nothing registered; the invocation is a handled no-op
    None,
}

impl CommandNode {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        aliases: Vec<String>,
        description: String,
        usage_message: String,
        permission: Option<String>,
        permission_message: String,
        only_interactive_message: String,
        default_executor: Option<Handler>,
        capability_executors: Vec<(Capability, Handler)>,
        completion_handler: Option<CompletionHandler>,
        children: Vec<CommandNode>,
    ) -> Self {
        Self {
            name,
            aliases,
            description,
            usage_message,
            permission,
            permission_message,
            only_interactive_message,
            default_executor,
            capability_executors,
            completion_handler,
            children,
        }
    }

    /// Primary name of this command
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aliases in declaration order
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Human-readable description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Set the description text
    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
    }

    /// Usage text shown by host help surfaces
    pub fn usage_message(&self) -> &str {
        &self.usage_message
    }

    /// Set the usage text
    pub fn set_usage_message(&mut self, text: impl Into<String>) {
        self.usage_message = text.into();
    }

    /// Required permission, if any
    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    /// Child nodes in declaration order
    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    /// Dispatch one invocation against this node
    ///
    /// Permission gate, then subcommand descent (which takes priority over
    /// this node's own executors), then capability resolution, then
    /// handler execution with the abort consumed here. Always returns
    /// `true`: every invocation is considered handled, including no-ops.
    pub fn dispatch(&self, issuer: &dyn Issuer, label: &str, args: &[String]) -> bool {
        if let Some(permission) = &self.permission {
            if !issuer.has_permission(permission) {
                debug!(
                    command = %self.name,
                    issuer = %issuer.name(),
                    permission = %permission,
                    "permission denied"
                );
                issuer.send_message(&self.permission_message);
                return true;
            }
        }

        if !self.children.is_empty() {
            if let Some(first) = args.first() {
                if let Some(child) = self.find_child(first) {
                    trace!(command = %self.name, subcommand = %child.name, "descending");
                    let sub_label = format!("{} {}", label, first);
                    return child.dispatch(issuer, &sub_label, &args[1..]);
                }
            }
        }

        let ctx = InvocationContext::new(issuer, label, args);
        match self.resolve_executor(issuer.kind()) {
            Resolution::Handler(handler) => {
                if let Err(abort) = handler(&ctx) {
                    trace!(command = %self.name, ?abort, "handler aborted");
                    abort.deliver(issuer);
                }
            }
            Resolution::Unsatisfied => {
                debug!(
                    command = %self.name,
                    issuer_kind = ?issuer.kind(),
                    "no executor satisfiable by issuer"
                );
                issuer.send_message(&self.only_interactive_message);
            }
            Resolution::None => {}
        }
        true
    }

    /// Tab-complete one request against this node
    ///
    /// A custom completion handler, when set, is used verbatim; otherwise
    /// the default tree-descent behavior applies, with `suggestions` as
    /// the platform's generic fallback.
    pub fn tab_complete(
        &self,
        issuer: &dyn Issuer,
        alias: &str,
        args: &[String],
        suggestions: &dyn SuggestionSource,
    ) -> Vec<String> {
        if let Some(handler) = &self.completion_handler {
            let request = CompletionRequest {
                issuer,
                alias,
                args,
            };
            return handler(&request);
        }
        self.default_tab_complete(issuer, alias, args, suggestions)
    }

    /// Default completion: descend past settled positions, suggest child
    /// names (never aliases) for the position being typed, and fall back
    /// to the generic source when this node has nothing more specific.
    pub fn default_tab_complete(
        &self,
        issuer: &dyn Issuer,
        alias: &str,
        args: &[String],
        suggestions: &dyn SuggestionSource,
    ) -> Vec<String> {
        if args.len() > 1 {
            let first = &args[0];
            return match self
                .children
                .iter()
                .find(|child| child.name.eq_ignore_ascii_case(first))
            {
                Some(child) => child.tab_complete(issuer, first, &args[1..], suggestions),
                None => Vec::new(),
            };
        }
        if args.len() == 1 && !self.children.is_empty() {
            return self
                .children
                .iter()
                .filter(|child| starts_with_ignore_ascii_case(&child.name, &args[0]))
                .map(|child| child.name.clone())
                .collect();
        }
        suggestions.suggest(issuer, args)
    }

    /// First child (declaration order) whose name or any alias matches
    /// case-insensitively
    fn find_child(&self, label: &str) -> Option<&CommandNode> {
        self.children.iter().find(|child| {
            child.name.eq_ignore_ascii_case(label)
                || child
                    .aliases
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(label))
        })
    }

    /// Ordered capability lookup: the issuer's exact capability first,
    /// then `Any`, declaration order breaking ties; then the default
    /// executor; an unmatched non-empty executor table with no default is
    /// the unsatisfied case.
    fn resolve_executor(&self, kind: IssuerKind) -> Resolution<'_> {
        let exact = kind.capability();
        for wanted in [exact, Capability::Any] {
            if let Some((_, handler)) = self
                .capability_executors
                .iter()
                .find(|(capability, _)| *capability == wanted)
            {
                return Resolution::Handler(handler);
            }
        }
        match &self.default_executor {
            Some(handler) => Resolution::Handler(handler),
            None if !self.capability_executors.is_empty() => Resolution::Unsatisfied,
            None => Resolution::None,
        }
    }
}

fn starts_with_ignore_ascii_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_match_is_ascii_case_insensitive() {
        assert!(starts_with_ignore_ascii_case("remove", "REM"));
        assert!(starts_with_ignore_ascii_case("remove", ""));
        assert!(!starts_with_ignore_ascii_case("rem", "remove"));
        assert!(!starts_with_ignore_ascii_case("add", "rem"));
    }
}
