//! Async message endpoints (`A -> B: text`)

use super::{Rule, RuleCategory, RuleContext};
use crate::diagnostic::{Diagnostic, Severity};
use crate::syntax::{kinds, Node};

/// Both endpoints of an async message must name declared participants.
///
/// A missing `To` node and an empty `To` node are reported the same way, as
/// "Missing To participant". The `From` diagnostics always precede the `To`
/// diagnostics.
pub struct MessageEndpointRule;

impl MessageEndpointRule {
    fn undefined(&self, name: &str, node: &dyn Node) -> Diagnostic {
        Diagnostic::warning(
            self.id(),
            &format!("Undefined participant: {}", name),
            node.range(),
        )
    }
}

impl Rule for MessageEndpointRule {
    fn id(&self) -> &'static str {
        "message-endpoint"
    }

    fn description(&self) -> &'static str {
        "Message senders and receivers must be present and declared as participants"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Suspicious
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn applies_to(&self, node: &dyn Node) -> bool {
        node.kind() == kinds::ASYNC_MESSAGE
    }

    fn check(&self, node: &dyn Node, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        let children = node.children();
        // Last occurrence wins when the parser produced several
        let from = children.iter().rev().find(|c| c.kind() == kinds::FROM);
        let to = children.iter().rev().find(|c| c.kind() == kinds::TO);

        if let Some(from) = from {
            let name = ctx.text_of(*from);
            if name.is_empty() {
                diagnostics.push(Diagnostic::error(
                    self.id(),
                    "Missing From participant",
                    from.range(),
                ));
            } else if !ctx.participants.contains(name) {
                diagnostics.push(self.undefined(name, *from));
            }
        }

        match to {
            None => diagnostics.push(Diagnostic::error(
                self.id(),
                "Missing To participant",
                node.range(),
            )),
            Some(to) => {
                let name = ctx.text_of(*to);
                if name.is_empty() {
                    diagnostics.push(Diagnostic::error(
                        self.id(),
                        "Missing To participant",
                        to.range(),
                    ));
                } else if !ctx.participants.contains(name) {
                    diagnostics.push(self.undefined(name, *to));
                }
            }
        }

        diagnostics
    }
}
