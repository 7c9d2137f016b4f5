//! `<<stereotype>>` annotations

use super::{Rule, RuleCategory, RuleContext};
use crate::diagnostic::{Diagnostic, Severity};
use crate::syntax::{kinds, Node};

/// Stereotypes opened with `<<` must be closed with `>>`
pub struct UnclosedStereotypeRule;

impl Rule for UnclosedStereotypeRule {
    fn id(&self) -> &'static str {
        "unclosed-stereotype"
    }

    fn description(&self) -> &'static str {
        "A stereotype starting with << is missing its closing >>"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Correctness
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn applies_to(&self, node: &dyn Node) -> bool {
        node.kind() == kinds::STEREOTYPE
    }

    fn check(&self, node: &dyn Node, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let text = ctx.text_of(node);
        if text.starts_with("<<") && !text.ends_with(">>") {
            vec![Diagnostic::error(
                self.id(),
                "Unclosed stereotype",
                node.range(),
            )]
        } else {
            Vec::new()
        }
    }
}
