//! Core linter engine

use crate::config::Config;
use crate::diagnostic::{Diagnostic, Severity};
use crate::participants::ParticipantSnapshot;
use crate::rules::{RuleContext, RuleRegistry};
use crate::syntax::Node;
use crate::walker::for_each_node;
use std::time::{Duration, Instant};

/// Result of linting one document
#[derive(Debug, Default)]
pub struct LintResult {
    /// All diagnostics, in traversal order
    pub diagnostics: Vec<Diagnostic>,

    /// Total errors
    pub error_count: usize,

    /// Total warnings
    pub warning_count: usize,

    /// Total info messages
    pub info_count: usize,

    /// Processing duration
    pub duration: Duration,
}

impl LintResult {
    /// Build a result from diagnostics, counting by severity
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let mut result = LintResult::default();
        for diag in &diagnostics {
            match diag.severity {
                Severity::Error => result.error_count += 1,
                Severity::Warning => result.warning_count += 1,
                Severity::Info => result.info_count += 1,
            }
        }
        result.diagnostics = diagnostics;
        result
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    /// Check if result is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0
    }

    /// Get exit code (0 = success, 1 = warnings, 2 = errors)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }
}

/// The diagnostic engine: one traversal, every rule dispatched per node
pub struct Engine {
    /// Rules in dispatch order
    registry: RuleRegistry,

    /// Configuration
    config: Config,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Engine {
    /// Create an engine with the built-in rules
    pub fn new(config: Config) -> Self {
        Self::with_registry(RuleRegistry::builtin(), config)
    }

    /// Create an engine with a custom rule set
    pub fn with_registry(registry: RuleRegistry, config: Config) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Produce all diagnostics for a tree.
    ///
    /// Nodes are visited in pre-order; for each node the enabled rules run in
    /// registry order. The output order is therefore deterministic for a given
    /// tree, text and participant set.
    pub fn check(
        &self,
        root: &dyn Node,
        text: &str,
        participants: &ParticipantSnapshot,
    ) -> Vec<Diagnostic> {
        let ctx = RuleContext::new(text, participants);
        let rules: Vec<_> = self
            .registry
            .iter()
            .filter(|rule| self.config.is_rule_enabled(rule.id()))
            .collect();

        let mut diagnostics = Vec::new();
        for_each_node(root, |node| {
            for rule in &rules {
                if !rule.applies_to(node) {
                    continue;
                }
                let found = rule.check(node, &ctx);
                match self.config.get_severity_override(rule.id()) {
                    Some(severity) => diagnostics
                        .extend(found.into_iter().map(|d| d.with_severity(severity))),
                    None => diagnostics.extend(found),
                }
            }
        });

        log::debug!(
            "{} rule(s) produced {} diagnostic(s)",
            rules.len(),
            diagnostics.len()
        );
        diagnostics
    }

    /// Check a tree and summarize the outcome
    pub fn lint(
        &self,
        root: &dyn Node,
        text: &str,
        participants: &ParticipantSnapshot,
    ) -> LintResult {
        let start = Instant::now();
        let mut result = LintResult::from_diagnostics(self.check(root, text, participants));
        result.duration = start.elapsed();
        result
    }
}

/// Check a tree with the built-in rules and default configuration
pub fn check(root: &dyn Node, text: &str, participants: &ParticipantSnapshot) -> Vec<Diagnostic> {
    Engine::default().check(root, text, participants)
}
