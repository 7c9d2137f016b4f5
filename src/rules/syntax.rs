//! Unparseable regions reported by the parser

use super::{Rule, RuleCategory, RuleContext};
use crate::diagnostic::{Diagnostic, Severity};
use crate::syntax::{kinds, Node};

pub const SYNTAX_ERROR_MESSAGE: &str = "Syntax error in zenuml diagram";

/// Flags error nodes other than the generic unrecognized-token marker
pub struct SyntaxErrorRule;

impl Rule for SyntaxErrorRule {
    fn id(&self) -> &'static str {
        "syntax-error"
    }

    fn description(&self) -> &'static str {
        "The parser could not make sense of this part of the diagram"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Correctness
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn applies_to(&self, node: &dyn Node) -> bool {
        node.is_error() && node.kind() != kinds::ERROR_MARKER
    }

    fn check(&self, node: &dyn Node, _ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        vec![Diagnostic::error(
            self.id(),
            SYNTAX_ERROR_MESSAGE,
            node.range(),
        )]
    }
}
