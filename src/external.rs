//! Diagnostics from an external line/column-based parser
//!
//! Some hosts validate documents with a black-box parser that reports only
//! `{line, column, message}` errors. [`check_external`] awaits such a parser
//! and folds its report into a single merged diagnostic.

use crate::diagnostic::{Diagnostic, TextRange};
use crate::position::to_offset;
use crate::rules::SYNTAX_ERROR_MESSAGE;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Rule id attached to diagnostics produced by the external backend
pub const EXTERNAL_RULE_ID: &str = "external-parse-error";

/// One error reported by an external parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParserError {
    /// 1-indexed line
    pub line: usize,
    /// 0-indexed column
    pub column: usize,
    pub message: String,
}

impl RawParserError {
    pub fn new(line: usize, column: usize, message: &str) -> Self {
        Self {
            line,
            column,
            message: message.to_string(),
        }
    }
}

/// Outcome of an external parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalParseReport {
    /// Whether the parser accepted the document
    pub ok: bool,
    #[serde(default)]
    pub errors: Vec<RawParserError>,
}

impl ExternalParseReport {
    /// A successful parse with no errors
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
        }
    }

    /// A failed parse
    pub fn failure(errors: Vec<RawParserError>) -> Self {
        Self { ok: false, errors }
    }
}

/// A parser that validates documents out of process or off thread
#[async_trait]
pub trait ExternalParser: Send + Sync {
    async fn parse(&self, text: &str) -> ExternalParseReport;
}

/// Await the external parser and convert its report into diagnostics.
///
/// All reported errors collapse into one error diagnostic spanning from the
/// smallest mapped offset to one past the largest, clamped to the text. A
/// failed parse without structured errors flags the whole document.
pub async fn check_external<P>(parser: &P, text: &str) -> Vec<Diagnostic>
where
    P: ExternalParser + ?Sized,
{
    let report = parser.parse(text).await;
    let diagnostics = report_to_diagnostics(&report, text);
    log::debug!(
        "external parse ok={} errors={} diagnostics={}",
        report.ok,
        report.errors.len(),
        diagnostics.len()
    );
    diagnostics
}

/// Map a parse report onto document offsets
pub fn report_to_diagnostics(report: &ExternalParseReport, text: &str) -> Vec<Diagnostic> {
    let Some(first) = report.errors.first() else {
        if report.ok {
            return Vec::new();
        }
        return vec![Diagnostic::error(
            EXTERNAL_RULE_ID,
            SYNTAX_ERROR_MESSAGE,
            TextRange::new(0, text.len()),
        )];
    };

    let offsets = report
        .errors
        .iter()
        .map(|e| to_offset(text, e.line, e.column));
    let (min, max) = offsets.fold((usize::MAX, 0), |(lo, hi), o| (lo.min(o), hi.max(o)));

    let from = min.min(text.len());
    let to = max.saturating_add(1).min(text.len()).max(from);
    vec![Diagnostic::error(
        EXTERNAL_RULE_ID,
        &first.message,
        TextRange::new(from, to),
    )]
}
