//! Syntax tree interface
//!
//! The linter never parses ZenUML text itself. An external parser produces a
//! tree of typed nodes and adapts it behind [`Node`]. [`TreeNode`] is an owned
//! implementation that hosts can build directly or load from a JSON dump.

use crate::diagnostic::TextRange;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Node type names produced by the ZenUML grammar
pub mod kinds {
    /// Marker for an unrecognized token inserted by parser error recovery
    pub const ERROR_MARKER: &str = "⚠";

    pub const PARTICIPANT: &str = "Participant";
    pub const NAME: &str = "Name";
    pub const IDENTIFIER: &str = "Identifier";
    pub const COLOR: &str = "Color";
    pub const STEREOTYPE: &str = "Stereotype";

    pub const ASYNC_MESSAGE: &str = "AsyncMessage";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";

    pub const BRACE_BLOCK: &str = "BraceBlock";
    pub const GROUP_BRACE_BLOCK: &str = "GroupBraceBlock";
    pub const STATEMENT_BRACE_BLOCK: &str = "StatementBraceBlock";
    pub const OPEN_BRACE: &str = "OpenBrace";
    pub const CLOSE_BRACE: &str = "CloseBrace";
    pub const NEWLINE: &str = "Newline";

    pub const CONDITION: &str = "Condition";
    pub const TRUE_KEYWORD: &str = "TrueKeyword";
    pub const FALSE_KEYWORD: &str = "FalseKeyword";
    pub const NULL_KEYWORD: &str = "NullKeyword";
    pub const UNDEFINED_KEYWORD: &str = "UndefinedKeyword";

    /// All brace-delimited block kinds
    pub const BRACE_BLOCKS: [&str; 3] = [BRACE_BLOCK, GROUP_BRACE_BLOCK, STATEMENT_BRACE_BLOCK];

    /// Boolean-literal keyword kinds
    pub const BOOLEAN_KEYWORDS: [&str; 4] =
        [TRUE_KEYWORD, FALSE_KEYWORD, NULL_KEYWORD, UNDEFINED_KEYWORD];
}

/// Error loading a serialized syntax tree
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tree: {0}")]
    Invalid(String),
}

/// A node in a parsed ZenUML syntax tree
pub trait Node: Send + Sync {
    /// Node type name (e.g., "Participant", "AsyncMessage")
    fn kind(&self) -> &str;

    /// Byte range into the document text
    fn range(&self) -> TextRange;

    /// Whether the parser flagged this node as unparseable
    fn is_error(&self) -> bool;

    /// Child nodes in document order
    fn children(&self) -> Vec<&dyn Node>;

    /// First child (if any)
    fn first_child(&self) -> Option<&dyn Node> {
        self.children().first().copied()
    }

    /// Last child (if any)
    fn last_child(&self) -> Option<&dyn Node> {
        self.children().last().copied()
    }

    /// Document text covered by this node
    fn text<'a>(&self, source: &'a str) -> &'a str {
        self.range().slice(source)
    }
}

/// Owned syntax tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub kind: String,
    pub from: usize,
    pub to: usize,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(kind: &str, from: usize, to: usize) -> Self {
        let range = TextRange::new(from, to);
        Self {
            kind: kind.to_string(),
            from: range.from,
            to: range.to,
            error: false,
            children: Vec::new(),
        }
    }

    /// An error-recovery node of the generic unrecognized-token kind
    pub fn error_marker(from: usize, to: usize) -> Self {
        Self::new(kinds::ERROR_MARKER, from, to).flagged_error()
    }

    /// Mark this node as an error node
    pub fn flagged_error(mut self) -> Self {
        self.error = true;
        self
    }

    /// Append a child
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children
    pub fn with_children(mut self, children: impl IntoIterator<Item = TreeNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Load a tree from JSON text
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        let root: TreeNode = serde_json::from_str(json)?;
        root.validate()?;
        Ok(root)
    }

    /// Load a tree from a JSON file
    pub fn load(path: &Path) -> Result<Self, TreeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check that every node has `from <= to`
    fn validate(&self) -> Result<(), TreeError> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.from > node.to {
                return Err(TreeError::Invalid(format!(
                    "{} node has from {} > to {}",
                    node.kind, node.from, node.to
                )));
            }
            stack.extend(node.children.iter());
        }
        Ok(())
    }
}

impl Node for TreeNode {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn range(&self) -> TextRange {
        TextRange::new(self.from, self.to)
    }

    fn is_error(&self) -> bool {
        self.error
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.children.iter().map(|c| c as &dyn Node).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_node_navigation() {
        let node = TreeNode::new("Participant", 0, 13)
            .with_child(TreeNode::new("ParticipantType", 0, 6))
            .with_child(TreeNode::new("Name", 7, 13));

        assert_eq!(node.first_child().map(|c| c.kind()), Some("ParticipantType"));
        assert_eq!(node.last_child().map(|c| c.kind()), Some("Name"));
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.last_child().unwrap().text("@Actor Client"), "Client");
    }

    #[test]
    fn test_error_marker() {
        let node = TreeNode::error_marker(3, 4);
        assert!(node.is_error());
        assert_eq!(node.kind(), kinds::ERROR_MARKER);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "kind": "Program", "from": 0, "to": 7,
            "children": [
                { "kind": "AsyncMessage", "from": 0, "to": 7,
                  "children": [ { "kind": "From", "from": 0, "to": 1 } ] },
                { "kind": "⚠", "from": 6, "to": 7, "error": true }
            ]
        }"#;
        let root = TreeNode::from_json(json).unwrap();
        assert_eq!(root.children.len(), 2);
        assert!(root.children[1].is_error());
        assert!(!root.children[0].is_error());
    }

    #[test]
    fn test_from_json_rejects_reversed_range() {
        let json = r#"{ "kind": "Program", "from": 5, "to": 2 }"#;
        let err = TreeNode::from_json(json).unwrap_err();
        assert!(matches!(err, TreeError::Invalid(_)));
    }

    #[test]
    fn test_tree_error_display() {
        let err = TreeError::Invalid("bad".to_string());
        assert_eq!(format!("{}", err), "Invalid tree: bad");
    }
}
