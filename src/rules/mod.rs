//! Built-in ZenUML lint rules
//!
//! Every rule is an independent check triggered by specific node kinds. Rules
//! are pure: they read the node, the document text and the participant
//! snapshot, and return zero or more diagnostics.

mod block;
mod color;
mod message;
mod stereotype;
mod syntax;

pub use block::{is_empty_block, is_empty_condition, EmptyBlockRule, EmptyConditionRule};
pub use color::{is_valid_color, InvalidColorRule};
pub use message::MessageEndpointRule;
pub use stereotype::UnclosedStereotypeRule;
pub use syntax::{SyntaxErrorRule, SYNTAX_ERROR_MESSAGE};

use crate::diagnostic::{Diagnostic, Severity};
use crate::participants::ParticipantSnapshot;
use crate::syntax::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule category for grouping related rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Input the diagram cannot render correctly
    Correctness,
    /// Input that is likely wrong (e.g., references to undeclared participants)
    Suspicious,
    /// Advisory observations
    #[default]
    Style,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Correctness => write!(f, "correctness"),
            RuleCategory::Suspicious => write!(f, "suspicious"),
            RuleCategory::Style => write!(f, "style"),
        }
    }
}

impl std::str::FromStr for RuleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "correctness" => Ok(RuleCategory::Correctness),
            "suspicious" => Ok(RuleCategory::Suspicious),
            "style" => Ok(RuleCategory::Style),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Read-only inputs shared by all rules during one check
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Document text the tree was parsed from
    pub text: &'a str,
    /// Declared participants
    pub participants: &'a ParticipantSnapshot,
}

impl<'a> RuleContext<'a> {
    pub fn new(text: &'a str, participants: &'a ParticipantSnapshot) -> Self {
        Self { text, participants }
    }

    /// Text covered by `node`
    pub fn text_of(&self, node: &dyn Node) -> &'a str {
        node.range().slice(self.text)
    }
}

/// A lint rule
pub trait Rule: Send + Sync {
    /// Unique rule identifier (e.g., "invalid-color")
    fn id(&self) -> &'static str;

    /// One-line description
    fn description(&self) -> &'static str;

    /// Rule category
    fn category(&self) -> RuleCategory;

    /// Severity of the rule's primary diagnostic
    fn severity(&self) -> Severity;

    /// Whether the rule is triggered by `node`
    fn applies_to(&self, node: &dyn Node) -> bool;

    /// Check a triggering node
    fn check(&self, node: &dyn Node, ctx: &RuleContext<'_>) -> Vec<Diagnostic>;
}

/// Ordered collection of rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleRegistry {
    /// Registry with no rules
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// All built-in rules, in dispatch order
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(SyntaxErrorRule));
        registry.register(Box::new(InvalidColorRule));
        registry.register(Box::new(MessageEndpointRule));
        registry.register(Box::new(EmptyBlockRule));
        registry.register(Box::new(EmptyConditionRule));
        registry.register(Box::new(UnclosedStereotypeRule));
        registry
    }

    /// Append a rule; it runs after all previously registered rules
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Look up a rule by id
    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
