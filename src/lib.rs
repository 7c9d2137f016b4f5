//! Zenlint - Semantic diagnostics for ZenUML sequence diagrams
//!
//! Consumes a syntax tree produced by an external ZenUML parser together with
//! the document text, and reports diagnostics for unparseable regions,
//! malformed colors and stereotypes, undeclared message endpoints, and empty
//! blocks or conditions.
//!
//! # Architecture
//!
//! ```text
//! (text, tree) -> ParticipantIndex -> Engine -> RuleRegistry -> Vec<Diagnostic>
//! ```
//!
//! The participant index keeps one immutable snapshot per document and only
//! replaces it when the declared set changes. The engine walks the tree once
//! and dispatches every node to the rules that apply to it.
//!
//! # Example
//!
//! ```
//! use zenlint::{check, extract_participants, TreeNode};
//!
//! let text = "A -> B: hi";
//! let tree = TreeNode::new("Program", 0, 10).with_child(
//!     TreeNode::new("AsyncMessage", 0, 10)
//!         .with_child(TreeNode::new("From", 0, 1))
//!         .with_child(TreeNode::new("To", 5, 6)),
//! );
//!
//! let participants = extract_participants(text, &tree);
//! let diagnostics = check(&tree, text, &participants);
//! assert_eq!(diagnostics.len(), 2);
//! assert_eq!(diagnostics[0].message, "Undefined participant: A");
//! ```

pub mod completion;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod external;
pub mod lsp;
pub mod participants;
pub mod position;
pub mod rules;
pub mod syntax;
pub mod walker;

// Re-export main types
pub use completion::{complete, CompletionItem, CompletionKind, CompletionLexicon, CompletionList};
pub use config::{Config, ConfigError};
pub use diagnostic::{Diagnostic, Severity, TextRange};
pub use engine::{check, Engine, LintResult};
pub use external::{check_external, ExternalParseReport, ExternalParser, RawParserError};
pub use lsp::{
    to_lsp_diagnostics, to_publish_diagnostics, LspDiagnostic, LspSeverity,
    Position as LspPosition, PublishDiagnosticsParams, Range as LspRange,
};
pub use participants::{
    extract_participants, update_participants, ParticipantIndex, ParticipantSnapshot,
};
pub use position::{to_offset, LineCol, LineIndex};
pub use rules::{Rule, RuleCategory, RuleContext, RuleRegistry};
pub use syntax::{kinds, Node, TreeError, TreeNode};
pub use walker::{walk, WalkControl, Visitor, Walked};
