//! Keyword and participant completion

use crate::participants::ParticipantSnapshot;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Word characters immediately before the cursor
static WORD_BEFORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]*$").expect("valid word regex"));

/// Boost applied to participant names so they rank above keywords
pub const PARTICIPANT_BOOST: f32 = 1.5;

/// Kind of completion item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    Keyword,
    Type,
    Variable,
}

/// A single completion candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
}

impl CompletionItem {
    pub fn new(label: &str, kind: CompletionKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            boost: None,
        }
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }
}

/// Candidates and the offset where the completed word starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionList {
    pub from: usize,
    pub options: Vec<CompletionItem>,
}

/// Static labels offered alongside participant names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionLexicon {
    /// Statement keywords
    pub keywords: Vec<String>,
    /// Participant types and stereotypes
    pub types: Vec<String>,
}

impl Default for CompletionLexicon {
    fn default() -> Self {
        let keywords = [
            "title",
            "participant",
            "group",
            "if",
            "else",
            "while",
            "par",
            "opt",
            "critical",
            "section",
            "try",
            "catch",
            "finally",
            "async",
        ];
        let types = [
            "Starter",
            "Boundary",
            "Control",
            "Actor",
            "User",
            "System",
            "Database",
            "Service",
            "<<interface>>",
            "<<boundary>>",
            "<<control>>",
            "<<entity>>",
        ];
        Self {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            types: types.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CompletionLexicon {
    /// All lexicon entries, keywords first
    pub fn items(&self) -> impl Iterator<Item = CompletionItem> + '_ {
        let keywords = self
            .keywords
            .iter()
            .map(|k| CompletionItem::new(k, CompletionKind::Keyword));
        let types = self
            .types
            .iter()
            .map(|t| CompletionItem::new(t, CompletionKind::Type));
        keywords.chain(types)
    }
}

/// Offer completions for the word ending at `offset`.
///
/// Returns `None` when there is no word before the cursor, unless the user
/// explicitly asked for completion.
pub fn complete(
    text: &str,
    offset: usize,
    explicit: bool,
    lexicon: &CompletionLexicon,
    participants: &ParticipantSnapshot,
) -> Option<CompletionList> {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let from = WORD_BEFORE
        .find(&text[line_start..offset])
        .map_or(offset, |m| line_start + m.start());
    if from == offset && !explicit {
        return None;
    }

    let mut options: Vec<CompletionItem> = lexicon.items().collect();
    options.extend(participants.iter().map(|name| {
        CompletionItem::new(name, CompletionKind::Variable).with_boost(PARTICIPANT_BOOST)
    }));

    Some(CompletionList { from, options })
}
