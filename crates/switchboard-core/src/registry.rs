//! Registration collaborator and completion fallback
//!
//! The host makes a built tree reachable by raw invocation text through a
//! `CommandRegistry`. Each registration is owned by exactly one
//! `RegistrationHandle`; retracting the handle removes exactly the labels
//! it claimed. `InMemoryRegistry` is the provided implementation, also
//! used by the test suites and the demo host. The `SuggestionSource`
//! trait is the platform's generic completion fallback.

use serde::Serialize;
use tracing::debug;

use crate::errors::{RegistryError, RegistryResult};
use crate::issuer::Issuer;
use crate::node::CommandNode;

/// Generic completion fallback supplied by the platform
///
/// Consulted when the default completion behavior has nothing more
/// specific to offer (no children, or nothing typed yet).
pub trait SuggestionSource {
    /// Platform-default candidates for the current request
    fn suggest(&self, issuer: &dyn Issuer, args: &[String]) -> Vec<String>;
}

/// A fallback with no suggestions at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSuggestions;

impl SuggestionSource for NoSuggestions {
    fn suggest(&self, _issuer: &dyn Issuer, _args: &[String]) -> Vec<String> {
        Vec::new()
    }
}

/// Serializable summary of a registered command, for host help surfaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub usage: String,
}

impl CommandDescriptor {
    fn of(node: &CommandNode) -> Self {
        Self {
            name: node.name().to_string(),
            aliases: node.aliases().to_vec(),
            description: node.description().to_string(),
            usage: node.usage_message().to_string(),
        }
    }
}

/// Ownership record for one published tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationHandle {
    id: u64,
}

impl RegistrationHandle {
    /// Opaque identity of this registration
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Registration collaborator boundary
///
/// Responsible for label uniqueness across the whole host namespace, not
/// just within one tree.
pub trait CommandRegistry {
    /// Publish a tree under its name and every alias
    ///
    /// # Errors
    ///
    /// `RegistryError::LabelTaken` when a label is already claimed in the
    /// host namespace.
    fn register(&mut self, node: CommandNode) -> RegistryResult<RegistrationHandle>;

    /// Retract exactly the labels the handle owns
    ///
    /// # Errors
    ///
    /// `RegistryError::UnknownHandle` when the handle is not active.
    fn unregister(&mut self, handle: RegistrationHandle) -> RegistryResult<()>;
}

struct Registration {
    handle: RegistrationHandle,
    labels: Vec<String>,
    node: CommandNode,
}

/// In-memory registry with handle-scoped ownership
#[derive(Default)]
pub struct InMemoryRegistry {
    next_id: u64,
    registrations: Vec<Registration>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of published trees
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// The node reachable under `label`, if any (case-insensitive)
    pub fn find(&self, label: &str) -> Option<&CommandNode> {
        let wanted = label.to_ascii_lowercase();
        self.registrations
            .iter()
            .find(|registration| registration.labels.contains(&wanted))
            .map(|registration| &registration.node)
    }

    /// Invocation boundary: locate the node for `label` and dispatch
    ///
    /// Returns `false` only when no node is registered under `label`; a
    /// located node always reports the invocation handled.
    pub fn dispatch(&self, issuer: &dyn Issuer, label: &str, args: &[String]) -> bool {
        match self.find(label) {
            Some(node) => node.dispatch(issuer, label, args),
            None => false,
        }
    }

    /// Completion boundary: locate the node for `alias` and complete
    pub fn complete(
        &self,
        issuer: &dyn Issuer,
        alias: &str,
        args: &[String],
        suggestions: &dyn SuggestionSource,
    ) -> Vec<String> {
        match self.find(alias) {
            Some(node) => node.tab_complete(issuer, alias, args, suggestions),
            None => Vec::new(),
        }
    }

    /// Summaries of every published tree, in registration order
    pub fn descriptors(&self) -> Vec<CommandDescriptor> {
        self.registrations
            .iter()
            .map(|registration| CommandDescriptor::of(&registration.node))
            .collect()
    }

    fn is_claimed(&self, label: &str) -> bool {
        self.registrations
            .iter()
            .any(|registration| registration.labels.iter().any(|claimed| claimed == label))
    }
}

impl CommandRegistry for InMemoryRegistry {
    fn register(&mut self, node: CommandNode) -> RegistryResult<RegistrationHandle> {
        let mut labels = Vec::with_capacity(1 + node.aliases().len());
        for label in std::iter::once(node.name()).chain(node.aliases().iter().map(String::as_str)) {
            let lowered = label.to_ascii_lowercase();
            if labels.contains(&lowered) {
                continue;
            }
            if self.is_claimed(&lowered) {
                return Err(RegistryError::LabelTaken {
                    label: label.to_string(),
                });
            }
            labels.push(lowered);
        }

        let handle = RegistrationHandle { id: self.next_id };
        self.next_id += 1;
        debug!(command = %node.name(), handle = handle.id, "registered command tree");
        self.registrations.push(Registration {
            handle,
            labels,
            node,
        });
        Ok(handle)
    }

    fn unregister(&mut self, handle: RegistrationHandle) -> RegistryResult<()> {
        let index = self
            .registrations
            .iter()
            .position(|registration| registration.handle == handle)
            .ok_or(RegistryError::UnknownHandle { id: handle.id })?;
        let removed = self.registrations.remove(index);
        debug!(command = %removed.node.name(), handle = handle.id, "unregistered command tree");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CommandBuilder;
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

    #[test]
    fn test_register_claims_name_and_aliases() {
        let mut registry = InMemoryRegistry::new();
        let node = CommandBuilder::new("warp").alias("w").build().unwrap();
        registry.register(node).unwrap();

        assert!(registry.find("warp").is_some());
        assert!(registry.find("W").is_some());
        assert!(registry.find("teleport").is_none());
    }

    #[test]
    fn test_label_clash_rejected_across_trees() {
        let mut registry = InMemoryRegistry::new();
        registry
            .register(CommandBuilder::new("warp").alias("w").build().unwrap())
            .unwrap();

        let clash = registry.register(CommandBuilder::new("Weather").alias("W").build().unwrap());
        assert_eq!(
            clash.unwrap_err(),
            RegistryError::LabelTaken {
                label: "W".to_string()
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_removes_exactly_owned_labels() {
        let mut registry = InMemoryRegistry::new();
        let warp = registry
            .register(CommandBuilder::new("warp").alias("w").build().unwrap())
            .unwrap();
        registry
            .register(CommandBuilder::new("home").build().unwrap())
            .unwrap();

        registry.unregister(warp).unwrap();
        assert!(registry.find("warp").is_none());
        assert!(registry.find("w").is_none());
        assert!(registry.find("home").is_some());

        assert_eq!(
            registry.unregister(warp).unwrap_err(),
            RegistryError::UnknownHandle { id: warp.id() }
        );
    }

    #[test]
    fn test_dispatch_unknown_label_is_unhandled() {
        let registry = InMemoryRegistry::new();
        assert!(!registry.dispatch(&TestIssuer, "warp", &[]));
    }

    #[test]
    fn test_descriptor_serializes() {
        let mut registry = InMemoryRegistry::new();
        registry
            .register(
                CommandBuilder::new("warp")
                    .alias("w")
                    .description("Teleport to saved locations")
                    .usage("/warp <name>")
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let descriptors = registry.descriptors();
        assert_eq!(descriptors.len(), 1);
        let json = serde_json::to_value(&descriptors[0]).unwrap();
        assert_eq!(json["name"], "warp");
        assert_eq!(json["aliases"][0], "w");
    }
}
