//! Shared test fixtures for the integration suites

use std::collections::HashSet;
use std::sync::Mutex;

use switchboard_core::{Issuer, IssuerKind, SuggestionSource};

/// Issuer that records every delivered message
pub struct RecordingIssuer {
    name: String,
    kind: IssuerKind,
    permissions: HashSet<String>,
    messages: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingIssuer {
    pub fn new(kind: IssuerKind) -> Self {
        Self {
            name: "tester".to_string(),
            kind,
            permissions: HashSet::new(),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_permission(mut self, permission: &str) -> Self {
        self.permissions.insert(permission.to_string());
        self
    }

    /// Messages delivered so far, in order
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Issuer for RecordingIssuer {
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
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Suggestion source returning a fixed candidate list
#[allow(dead_code)]
pub struct StaticSuggestions(pub Vec<String>);

impl SuggestionSource for StaticSuggestions {
    fn suggest(&self, _issuer: &dyn Issuer, _args: &[String]) -> Vec<String> {
        self.0.clone()
    }
}

#[allow(dead_code)]
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
