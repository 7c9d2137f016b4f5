//! Language Server Protocol shapes
//!
//! Converts diagnostics into the JSON structures an LSP client expects, with
//! byte ranges mapped to 0-indexed line/character positions.

use crate::diagnostic::{Diagnostic, Severity};
use crate::position::{LineCol, LineIndex};
use serde::{Deserialize, Serialize};

/// Value of the `source` field on every published diagnostic
pub const LSP_SOURCE: &str = "zenlint";

/// LSP diagnostic severity (matches LSP spec)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum LspSeverity {
    Error = 1,
    Warning = 2,
    Information = 3,
}

impl From<Severity> for LspSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => LspSeverity::Error,
            Severity::Warning => LspSeverity::Warning,
            Severity::Info => LspSeverity::Information,
        }
    }
}

/// LSP position (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl From<LineCol> for Position {
    fn from(pos: LineCol) -> Self {
        Self {
            line: pos.line,
            character: pos.character,
        }
    }
}

/// LSP range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// LSP diagnostic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LspDiagnostic {
    pub range: Range,
    pub severity: Option<u32>,
    pub code: Option<String>,
    pub source: Option<String>,
    pub message: String,
}

/// Publish diagnostics notification parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishDiagnosticsParams {
    pub uri: String,
    pub diagnostics: Vec<LspDiagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

/// Convert diagnostics on `text` to LSP diagnostics
pub fn to_lsp_diagnostics(text: &str, diagnostics: &[Diagnostic]) -> Vec<LspDiagnostic> {
    let index = LineIndex::new(text);
    diagnostics
        .iter()
        .map(|d| LspDiagnostic {
            range: Range {
                start: index.position(d.range.from).into(),
                end: index.position(d.range.to).into(),
            },
            severity: Some(LspSeverity::from(d.severity) as u32),
            code: Some(d.rule_id.clone()),
            source: Some(LSP_SOURCE.to_string()),
            message: d.message.clone(),
        })
        .collect()
}

/// Create publish diagnostics params for one document
pub fn to_publish_diagnostics(
    uri: &str,
    text: &str,
    diagnostics: &[Diagnostic],
) -> PublishDiagnosticsParams {
    PublishDiagnosticsParams {
        uri: uri.to_string(),
        diagnostics: to_lsp_diagnostics(text, diagnostics),
        version: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::TextRange;

    #[test]
    fn test_to_lsp_diagnostics() {
        let text = "participant A\nA -> B: hi";
        let diag = Diagnostic::warning(
            "message-endpoint",
            "Undefined participant: B",
            TextRange::new(19, 20),
        );

        let lsp_diags = to_lsp_diagnostics(text, &[diag]);
        assert_eq!(lsp_diags.len(), 1);
        assert_eq!(lsp_diags[0].range.start, Position { line: 1, character: 5 });
        assert_eq!(lsp_diags[0].range.end, Position { line: 1, character: 6 });
        assert_eq!(lsp_diags[0].severity, Some(2));
        assert_eq!(lsp_diags[0].code, Some("message-endpoint".to_string()));
        assert_eq!(lsp_diags[0].source, Some("zenlint".to_string()));
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(LspSeverity::from(Severity::Error) as u32, 1);
        assert_eq!(LspSeverity::from(Severity::Warning) as u32, 2);
        assert_eq!(LspSeverity::from(Severity::Info) as u32, 3);
    }

    #[test]
    fn test_published_severities_are_error_warning_or_information() {
        let range = TextRange::new(0, 1);
        let diags = [
            Diagnostic::error("a", "a", range),
            Diagnostic::warning("b", "b", range),
            Diagnostic::info("c", "c", range),
        ];
        let severities: Vec<_> = to_lsp_diagnostics("x", &diags)
            .iter()
            .map(|d| d.severity)
            .collect();
        assert_eq!(severities, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_publish_diagnostics_json() {
        let text = "{\n}";
        let diag = Diagnostic::info("empty-block", "Empty block", TextRange::new(0, 3));
        let params = to_publish_diagnostics("file:///demo.zen", text, &[diag]);

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["uri"], "file:///demo.zen");
        assert_eq!(json["diagnostics"][0]["severity"], 3);
        assert_eq!(json["diagnostics"][0]["range"]["end"]["line"], 1);
        assert_eq!(json["diagnostics"][0]["range"]["end"]["character"], 1);
        assert!(json.get("version").is_none());
    }
}
