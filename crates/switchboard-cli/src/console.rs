//! Console-side collaborators: the issuer and the generic completion
//! fallback

use std::collections::HashSet;

use switchboard_core::{Issuer, IssuerKind, SuggestionSource};

/// Issuer backed by the local console session
pub struct ConsoleIssuer {
    name: String,
    kind: IssuerKind,
    permissions: HashSet<String>,
}

impl ConsoleIssuer {
    pub fn new(name: &str, kind: IssuerKind) -> Self {
        // The demo operator holds the whole demo.* permission set
        let permissions = ["demo.warp", "demo.warp.manage", "demo.greet"]
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            name: name.to_string(),
            kind,
            permissions,
        }
    }
}

impl Issuer for ConsoleIssuer {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> IssuerKind {
        self.kind
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    fn send_message(&self, message: &str) {
        println!("{}", message);
    }
}

/// Generic fallback suggesting known session names, filtered by the
/// prefix currently being typed
pub struct KnownNameSuggestions {
    names: Vec<String>,
}

impl KnownNameSuggestions {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl SuggestionSource for KnownNameSuggestions {
    fn suggest(&self, _issuer: &dyn Issuer, args: &[String]) -> Vec<String> {
        let prefix = args.last().map(String::as_str).unwrap_or("");
        self.names
            .iter()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect()
    }
}
