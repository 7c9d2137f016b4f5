//! Participant index
//!
//! Extracts the set of declared participant names from a syntax tree and keeps
//! one immutable snapshot per open document. A snapshot is only replaced when
//! the declared set actually changes, so consumers can compare snapshots by
//! reference to decide whether to re-lint or refresh completions.

use crate::syntax::{kinds, Node};
use crate::walker::for_each_node;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Immutable set of declared participant names
#[derive(Debug, Clone, Default)]
pub struct ParticipantSnapshot {
    names: Arc<BTreeSet<String>>,
}

impl ParticipantSnapshot {
    /// Empty snapshot (no participants declared)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `name` is declared (exact, case-sensitive match)
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Whether both handles point at the same snapshot
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.names, &other.names)
    }
}

impl PartialEq for ParticipantSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.names == other.names
    }
}

impl Eq for ParticipantSnapshot {}

impl<S: Into<String>> FromIterator<S> for ParticipantSnapshot {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: Arc::new(iter.into_iter().map(Into::into).collect()),
        }
    }
}

/// Name declared by a participant node: the last `Name` or `Identifier` child
fn declared_name<'a>(node: &dyn Node, text: &'a str) -> Option<&'a str> {
    let child = node
        .children()
        .into_iter()
        .rev()
        .find(|c| c.kind() == kinds::NAME || c.kind() == kinds::IDENTIFIER)?;
    let name = child.text(text).trim();
    (!name.is_empty()).then_some(name)
}

/// Collect every declared participant name in the tree
pub fn extract_participants(text: &str, root: &dyn Node) -> ParticipantSnapshot {
    let mut names = BTreeSet::new();
    for_each_node(root, |node| {
        if node.kind() == kinds::PARTICIPANT {
            if let Some(name) = declared_name(node, text) {
                names.insert(name.to_string());
            }
        }
    });
    log::trace!("extracted {} participant(s)", names.len());
    ParticipantSnapshot {
        names: Arc::new(names),
    }
}

/// Recompute participants, keeping `previous` when the set is unchanged
pub fn update_participants(
    previous: &ParticipantSnapshot,
    text: &str,
    root: &dyn Node,
) -> ParticipantSnapshot {
    let current = extract_participants(text, root);
    if current == *previous {
        previous.clone()
    } else {
        log::debug!(
            "participants changed: {} -> {}",
            previous.len(),
            current.len()
        );
        current
    }
}

/// Per-document participant snapshots keyed by document identity
#[derive(Debug, Default)]
pub struct ParticipantIndex {
    documents: DashMap<String, ParticipantSnapshot>,
}

impl ParticipantIndex {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Compute and store the snapshot for a newly opened document
    pub fn open(&self, document: &str, text: &str, root: &dyn Node) -> ParticipantSnapshot {
        let snapshot = extract_participants(text, root);
        self.documents
            .insert(document.to_string(), snapshot.clone());
        snapshot
    }

    /// Recompute after an edit.
    ///
    /// Returns the current snapshot and whether it replaced the previous one.
    /// An unknown document behaves like [`ParticipantIndex::open`] and reports a
    /// change. The comparison and the swap happen under one entry lock.
    pub fn refresh(
        &self,
        document: &str,
        text: &str,
        root: &dyn Node,
    ) -> (ParticipantSnapshot, bool) {
        match self.documents.entry(document.to_string()) {
            Entry::Occupied(mut entry) => {
                let snapshot = update_participants(entry.get(), text, root);
                let changed = !snapshot.ptr_eq(entry.get());
                if changed {
                    entry.insert(snapshot.clone());
                }
                (snapshot, changed)
            }
            Entry::Vacant(entry) => {
                let snapshot = extract_participants(text, root);
                entry.insert(snapshot.clone());
                (snapshot, true)
            }
        }
    }

    /// Current snapshot for a document
    pub fn get(&self, document: &str) -> Option<ParticipantSnapshot> {
        self.documents.get(document).map(|s| s.clone())
    }

    /// Forget a document
    pub fn close(&self, document: &str) {
        self.documents.remove(document);
    }

    /// Number of tracked documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TreeNode;

    /// `participant <name>` declarations, one per line
    fn declarations(names: &[&str]) -> (String, TreeNode) {
        let mut text = String::new();
        let mut root = TreeNode::new("Program", 0, 0);
        for name in names {
            let start = text.len();
            text.push_str("participant ");
            let name_start = text.len();
            text.push_str(name);
            root = root.with_child(
                TreeNode::new("Participant", start, text.len())
                    .with_child(TreeNode::new("ParticipantKeyword", start, name_start))
                    .with_child(TreeNode::new("Name", name_start, text.len())),
            );
            text.push('\n');
        }
        root.to = text.len();
        (text, root)
    }

    #[test]
    fn test_extract_participants() {
        let (text, root) = declarations(&["User", "System"]);
        let snapshot = extract_participants(&text, &root);
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains("User"));
        assert!(snapshot.contains("System"));
        assert!(!snapshot.contains("user"));
    }

    #[test]
    fn test_extract_uses_last_name_child() {
        // "@Actor Client #FFEBE6" with an annotation and a color after the name
        let text = "@Actor Client #FFEBE6";
        let root = TreeNode::new("Program", 0, 21).with_child(
            TreeNode::new("Participant", 0, 21)
                .with_child(TreeNode::new("Identifier", 1, 6))
                .with_child(TreeNode::new("Name", 7, 13))
                .with_child(TreeNode::new("Color", 14, 21)),
        );
        let snapshot = extract_participants(text, &root);
        assert_eq!(snapshot.iter().collect::<Vec<_>>(), vec!["Client"]);
    }

    #[test]
    fn test_extract_trims_and_skips_empty() {
        let text = "participant  A \nparticipant ";
        let root = TreeNode::new("Program", 0, text.len())
            .with_child(
                TreeNode::new("Participant", 0, 15).with_child(TreeNode::new("Name", 12, 15)),
            )
            .with_child(
                TreeNode::new("Participant", 16, 28).with_child(TreeNode::new("Name", 28, 28)),
            )
            .with_child(TreeNode::new("Participant", 16, 28));
        let snapshot = extract_participants(text, &root);
        assert_eq!(snapshot.iter().collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let (text, root) = declarations(&["A", "B"]);
        let first = extract_participants(&text, &root);
        let second = extract_participants(&text, &root);
        assert_eq!(first, second);
        assert!(!first.ptr_eq(&second));
    }

    #[test]
    fn test_update_keeps_reference_when_unchanged() {
        let (text, root) = declarations(&["A", "B"]);
        let previous = extract_participants(&text, &root);

        // Different text, same declared set
        let (other_text, other_root) = declarations(&["B", "A"]);
        let updated = update_participants(&previous, &other_text, &other_root);
        assert!(updated.ptr_eq(&previous));
    }

    #[test]
    fn test_update_replaces_when_changed() {
        let (text, root) = declarations(&["A"]);
        let previous = extract_participants(&text, &root);

        let (new_text, new_root) = declarations(&["A", "C"]);
        let updated = update_participants(&previous, &new_text, &new_root);
        assert!(!updated.ptr_eq(&previous));
        assert!(updated.contains("C"));
        // The old snapshot is untouched
        assert!(!previous.contains("C"));
    }

    #[test]
    fn test_index_refresh() {
        let index = ParticipantIndex::new();
        let (text, root) = declarations(&["A"]);
        let opened = index.open("doc://1", &text, &root);

        let (same, changed) = index.refresh("doc://1", &text, &root);
        assert!(!changed);
        assert!(same.ptr_eq(&opened));

        let (new_text, new_root) = declarations(&["A", "B"]);
        let (updated, changed) = index.refresh("doc://1", &new_text, &new_root);
        assert!(changed);
        assert!(index.get("doc://1").unwrap().ptr_eq(&updated));
    }

    #[test]
    fn test_index_documents_are_independent() {
        let index = ParticipantIndex::new();
        let (text_a, root_a) = declarations(&["A"]);
        let (text_b, root_b) = declarations(&["B"]);
        index.open("a", &text_a, &root_a);
        let (_, changed) = index.refresh("b", &text_b, &root_b);
        assert!(changed);

        assert_eq!(index.len(), 2);
        assert!(index.get("a").unwrap().contains("A"));
        assert!(!index.get("a").unwrap().contains("B"));

        index.close("a");
        assert!(index.get("a").is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_concurrent_refresh_reports_one_change() {
        let index = ParticipantIndex::new();
        let (text, root) = declarations(&["A", "B"]);

        let results: Vec<(ParticipantSnapshot, bool)> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| index.refresh("doc://shared", &text, &root)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|(_, changed)| *changed).count(), 1);
        let stored = index.get("doc://shared").unwrap();
        assert!(results.iter().all(|(snapshot, _)| snapshot.ptr_eq(&stored)));
    }

    #[test]
    fn test_snapshot_from_iter() {
        let snapshot: ParticipantSnapshot = ["A", "B", "A"].into_iter().collect();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot, ["B", "A"].into_iter().collect::<ParticipantSnapshot>());
    }
}
