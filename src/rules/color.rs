//! Participant background colors

use super::{Rule, RuleCategory, RuleContext};
use crate::diagnostic::{Diagnostic, Severity};
use crate::syntax::{kinds, Node};
use once_cell::sync::Lazy;
use regex::Regex;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid color regex"));

/// Whether `text` is `#` followed by exactly six hex digits
pub fn is_valid_color(text: &str) -> bool {
    HEX_COLOR.is_match(text)
}

/// Colors must be six-digit hex codes
pub struct InvalidColorRule;

impl Rule for InvalidColorRule {
    fn id(&self) -> &'static str {
        "invalid-color"
    }

    fn description(&self) -> &'static str {
        "Colors must be written as # followed by six hex digits"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Correctness
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn applies_to(&self, node: &dyn Node) -> bool {
        node.kind() == kinds::COLOR
    }

    fn check(&self, node: &dyn Node, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        if is_valid_color(ctx.text_of(node)) {
            return Vec::new();
        }
        vec![Diagnostic::error(
            self.id(),
            "Invalid color format",
            node.range(),
        )]
    }
}
