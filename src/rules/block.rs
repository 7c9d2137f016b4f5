//! Empty blocks and conditions

use super::{Rule, RuleCategory, RuleContext};
use crate::diagnostic::{Diagnostic, Severity};
use crate::syntax::{kinds, Node};
use crate::walker::any_node;

/// Node kinds that may appear in a block without making it non-empty
const BLOCK_FILLER: [&str; 7] = [
    kinds::NEWLINE,
    kinds::OPEN_BRACE,
    kinds::CLOSE_BRACE,
    kinds::ERROR_MARKER,
    kinds::BRACE_BLOCK,
    kinds::GROUP_BRACE_BLOCK,
    kinds::STATEMENT_BRACE_BLOCK,
];

/// A block is empty when its subtree holds nothing but braces, newlines,
/// error markers and other (empty) blocks.
pub fn is_empty_block(block: &dyn Node) -> bool {
    !any_node(block, |node| !BLOCK_FILLER.iter().any(|k| *k == node.kind()))
}

/// A condition is empty when no identifier or boolean-literal keyword appears
/// anywhere in its subtree.
pub fn is_empty_condition(condition: &dyn Node) -> bool {
    !any_node(condition, |node| {
        node.kind() == kinds::IDENTIFIER
            || kinds::BOOLEAN_KEYWORDS.iter().any(|k| *k == node.kind())
    })
}

/// Brace blocks (`{ }`) with no content
pub struct EmptyBlockRule;

impl Rule for EmptyBlockRule {
    fn id(&self) -> &'static str {
        "empty-block"
    }

    fn description(&self) -> &'static str {
        "Block has no statements or declarations"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Style
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn applies_to(&self, node: &dyn Node) -> bool {
        kinds::BRACE_BLOCKS.iter().any(|k| *k == node.kind())
    }

    fn check(&self, node: &dyn Node, _ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        if is_empty_block(node) {
            vec![Diagnostic::info(self.id(), "Empty block", node.range())]
        } else {
            Vec::new()
        }
    }
}

/// Conditions such as `if ()` with nothing to test
pub struct EmptyConditionRule;

impl Rule for EmptyConditionRule {
    fn id(&self) -> &'static str {
        "empty-condition"
    }

    fn description(&self) -> &'static str {
        "Condition does not reference any identifier or literal"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Style
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn applies_to(&self, node: &dyn Node) -> bool {
        node.kind() == kinds::CONDITION
    }

    fn check(&self, node: &dyn Node, _ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        if is_empty_condition(node) {
            vec![Diagnostic::info(self.id(), "Empty condition", node.range())]
        } else {
            Vec::new()
        }
    }
}
