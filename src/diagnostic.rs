//! Diagnostic types for lint results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for diagnostics
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message (stylistic observations)
    Info,
    /// Warning - potential issue
    #[default]
    Warning,
    /// Error - definite problem
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" | "hint" | "note" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}

/// Half-open byte range `[from, to)` into the document text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RangeBounds")]
pub struct TextRange {
    pub from: usize,
    pub to: usize,
}

/// Bounds as written in JSON, normalized through [`TextRange::new`]
#[derive(Deserialize)]
struct RangeBounds {
    from: usize,
    to: usize,
}

impl From<RangeBounds> for TextRange {
    fn from(bounds: RangeBounds) -> Self {
        TextRange::new(bounds.from, bounds.to)
    }
}

impl TextRange {
    /// Create a range; reversed bounds are swapped so that `from <= to`
    pub fn new(from: usize, to: usize) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    /// Zero-width range anchored at `offset`
    pub fn point(offset: usize) -> Self {
        Self {
            from: offset,
            to: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text covered by this range.
    ///
    /// Ranges outside the text or not on char boundaries yield `""`, so a tree
    /// computed from stale text never panics.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.from..self.to).unwrap_or("")
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

/// A lint diagnostic anchored on a range of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule ID that triggered this diagnostic
    pub rule_id: String,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Source range
    pub range: TextRange,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(rule_id: &str, severity: Severity, message: &str, range: TextRange) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message: message.to_string(),
            range,
        }
    }

    /// Shorthand for an error diagnostic
    pub fn error(rule_id: &str, message: &str, range: TextRange) -> Self {
        Self::new(rule_id, Severity::Error, message, range)
    }

    /// Shorthand for a warning diagnostic
    pub fn warning(rule_id: &str, message: &str, range: TextRange) -> Self {
        Self::new(rule_id, Severity::Warning, message, range)
    }

    /// Shorthand for an info diagnostic
    pub fn info(rule_id: &str, message: &str, range: TextRange) -> Self {
        Self::new(rule_id, Severity::Info, message, range)
    }

    /// Replace the severity (used for configured overrides)
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Check if this is a warning
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Check if this is an info message
    pub fn is_info(&self) -> bool {
        self.severity == Severity::Info
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.range, self.rule_id, self.severity, self.message
        )
    }
}
