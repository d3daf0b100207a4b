//! Fluent construction of a command tree
//!
//! `CommandBuilder` is the single mutation surface of the system: a tree
//! is assembled here, validated, and frozen into an immutable
//! `CommandNode` by `build()`. Children snapshot-inherit the permission
//! gate, permission message, only-interactive message, and usage text
//! from their parent for every field they did not set themselves.

use std::collections::HashSet;

use crate::context::InvocationContext;
use crate::errors::{ExecResult, TreeError};
use crate::issuer::Capability;
use crate::node::{CommandNode, CompletionHandler, CompletionRequest, Handler};

const DEFAULT_PERMISSION_MESSAGE: &str = "You do not have permission to use this command.";

/// Values a child inherits from its parent when it leaves them unset
struct Inherited {
    permission: Option<String>,
    permission_message: String,
    only_interactive_message: String,
    usage_message: String,
}

/// Builder for one command node and its subtree
pub struct CommandBuilder {
    name: String,
    aliases: Vec<String>,
    description: Option<String>,
    usage_message: Option<String>,
    permission: Option<String>,
    permission_message: Option<String>,
    only_interactive_message: Option<String>,
    default_executor: Option<Handler>,
    capability_executors: Vec<(Capability, Handler)>,
    completion_handler: Option<CompletionHandler>,
    children: Vec<CommandBuilder>,
}

impl CommandBuilder {
    /// Start building a command with the given primary name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: None,
            usage_message: None,
            permission: None,
            permission_message: None,
            only_interactive_message: None,
            default_executor: None,
            capability_executors: Vec::new(),
            completion_handler: None,
            children: Vec::new(),
        }
    }

    /// Add one alias
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add several aliases in declaration order
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Set the description text
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Set the usage text
    pub fn usage(mut self, text: impl Into<String>) -> Self {
        self.usage_message = Some(text.into());
        self
    }

    /// Require a permission to dispatch this node (and, by inheritance,
    /// its children)
    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Message delivered when the permission gate rejects the issuer
    pub fn permission_message(mut self, text: impl Into<String>) -> Self {
        self.permission_message = Some(text.into());
        self
    }

    /// Message delivered when only capability-specific executors the
    /// issuer does not satisfy exist and no default is registered
    pub fn only_interactive_message(mut self, text: impl Into<String>) -> Self {
        self.only_interactive_message = Some(text.into());
        self
    }

    /// Register the capability-agnostic default executor
    pub fn executor<F>(mut self, handler: F) -> Self
    where
        F: Fn(&InvocationContext<'_>) -> ExecResult<()> + Send + Sync + 'static,
    {
        self.default_executor = Some(Box::new(handler));
        self
    }

    /// Register an executor for a specific capability
    ///
    /// Registering the same capability twice replaces the handler in
    /// place, keeping the original declaration position.
    pub fn capability_executor<F>(mut self, capability: Capability, handler: F) -> Self
    where
        F: Fn(&InvocationContext<'_>) -> ExecResult<()> + Send + Sync + 'static,
    {
        let boxed: Handler = Box::new(handler);
        match self
            .capability_executors
            .iter_mut()
            .find(|(registered, _)| *registered == capability)
        {
            Some(slot) => slot.1 = boxed,
            None => self.capability_executors.push((capability, boxed)),
        }
        self
    }

    /// Shorthand for `capability_executor(Capability::Interactive, ..)`
    pub fn interactive_executor<F>(self, handler: F) -> Self
    where
        F: Fn(&InvocationContext<'_>) -> ExecResult<()> + Send + Sync + 'static,
    {
        self.capability_executor(Capability::Interactive, handler)
    }

    /// Shorthand for `capability_executor(Capability::Console, ..)`
    pub fn console_executor<F>(self, handler: F) -> Self
    where
        F: Fn(&InvocationContext<'_>) -> ExecResult<()> + Send + Sync + 'static,
    {
        self.capability_executor(Capability::Console, handler)
    }

    /// Replace default completion with a custom handler
    pub fn completer<F>(mut self, handler: F) -> Self
    where
        F: Fn(&CompletionRequest<'_>) -> Vec<String> + Send + Sync + 'static,
    {
        self.completion_handler = Some(Box::new(handler));
        self
    }

    /// Attach a subcommand subtree
    pub fn child(mut self, child: CommandBuilder) -> Self {
        self.children.push(child);
        self
    }

    /// Validate and freeze the tree
    ///
    /// # Errors
    ///
    /// `TreeError::EmptyName` if any node's name trims to empty;
    /// `TreeError::DuplicateChild` if two siblings collide on name or
    /// alias under case-insensitive comparison.
    pub fn build(self) -> Result<CommandNode, TreeError> {
        self.finish(None)
    }

    fn finish(self, inherited: Option<&Inherited>) -> Result<CommandNode, TreeError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(TreeError::EmptyName);
        }

        let permission = self
            .permission
            .or_else(|| inherited.and_then(|i| i.permission.clone()));
        let permission_message = self.permission_message.unwrap_or_else(|| {
            inherited.map_or_else(
                || DEFAULT_PERMISSION_MESSAGE.to_string(),
                |i| i.permission_message.clone(),
            )
        });
        let only_interactive_message = self
            .only_interactive_message
            .unwrap_or_else(|| inherited.map_or_else(String::new, |i| i.only_interactive_message.clone()));
        let usage_message = self
            .usage_message
            .unwrap_or_else(|| inherited.map_or_else(String::new, |i| i.usage_message.clone()));

        let snapshot = Inherited {
            permission: permission.clone(),
            permission_message: permission_message.clone(),
            only_interactive_message: only_interactive_message.clone(),
            usage_message: usage_message.clone(),
        };

        let mut claimed: HashSet<String> = HashSet::new();
        let mut children = Vec::with_capacity(self.children.len());
        for child in self.children {
            let built = child.finish(Some(&snapshot))?;
            for label in std::iter::once(built.name()).chain(built.aliases().iter().map(String::as_str))
            {
                if !claimed.insert(label.to_ascii_lowercase()) {
                    return Err(TreeError::DuplicateChild {
                        parent: name.clone(),
                        label: label.to_string(),
                    });
                }
            }
            children.push(built);
        }

        Ok(CommandNode::new(
            name,
            self.aliases,
            self.description.unwrap_or_default(),
            usage_message,
            permission,
            permission_message,
            only_interactive_message,
            self.default_executor,
            self.capability_executors,
            self.completion_handler,
            children,
        ))
    }
}
