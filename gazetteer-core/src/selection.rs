//! Selection model
//!
//! Tracks which records are checked in whichever list or tree is driving
//! selection, and what mix of record kinds the checked set contains. The
//! checked set is always a subset of the identifiers currently visible;
//! callers prune it with [`SelectionModel::retain_visible`] when the
//! driving list changes.

use crate::RecordKind;
use std::collections::BTreeSet;

/// Maximum depth a cascading toggle descends into the child hierarchy.
const CASCADE_DEPTH: usize = 3;

/// A node in the tree driving selection. Children cascade check state from
/// their parent unless cascading is suppressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionNode {
    pub id: i64,
    pub kind: RecordKind,
    pub children: Vec<SelectionNode>,
}

impl SelectionNode {
    pub fn leaf(id: i64, kind: RecordKind) -> Self {
        Self {
            id,
            kind,
            children: Vec::new(),
        }
    }
}

/// Summary of which record kinds the current selection contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionKinds {
    pub street: bool,
    pub property: bool,
    pub esu: bool,
    pub classification: bool,
    pub organisation: bool,
    pub cross_ref: bool,
    pub provenance: bool,
    pub note: bool,
    pub successor_cross_ref: bool,
}

impl SelectionKinds {
    /// Number of distinct kinds currently non-empty. Decides whether a
    /// mixed-selection or single-kind UI applies.
    pub fn distinct(&self) -> usize {
        [
            self.street,
            self.property,
            self.esu,
            self.classification,
            self.organisation,
            self.cross_ref,
            self.provenance,
            self.note,
            self.successor_cross_ref,
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    pub fn composition(&self) -> SelectionComposition {
        match self.distinct() {
            0 => SelectionComposition::Empty,
            1 => {
                let kind = if self.street {
                    RecordKind::Street
                } else if self.property {
                    RecordKind::Property
                } else if self.esu {
                    RecordKind::Esu
                } else if self.classification {
                    RecordKind::Classification
                } else if self.organisation {
                    RecordKind::Organisation
                } else if self.cross_ref {
                    RecordKind::CrossRef
                } else if self.provenance {
                    RecordKind::Provenance
                } else if self.note {
                    RecordKind::Note
                } else {
                    RecordKind::SuccessorCrossRef
                };
                SelectionComposition::Single(kind)
            }
            2 if self.street && self.property => SelectionComposition::StreetAndProperty,
            _ => SelectionComposition::Mixed,
        }
    }
}

/// What the selection is made of, from the action resolver's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionComposition {
    Empty,
    Single(RecordKind),
    /// The one mixed combination with a shared action (remove from list).
    StreetAndProperty,
    /// Any other mix; no shared actions exist. Terminal state, not an error.
    Mixed,
}

/// The set of checked record identifiers, keyed by (kind, id).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    checked: BTreeSet<(RecordKind, i64)>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, kind: RecordKind, id: i64) {
        self.checked.insert((kind, id));
    }

    pub fn uncheck(&mut self, kind: RecordKind, id: i64) {
        self.checked.remove(&(kind, id));
    }

    /// Toggle one identifier; returns the new checked state.
    pub fn toggle(&mut self, kind: RecordKind, id: i64) -> bool {
        if self.checked.remove(&(kind, id)) {
            false
        } else {
            self.checked.insert((kind, id));
            true
        }
    }

    /// Toggle a node and, unless suppressed (modifier key held), cascade the
    /// resulting state down up to three levels of its child hierarchy.
    pub fn toggle_cascading(&mut self, node: &SelectionNode, suppress_cascade: bool) -> bool {
        let checked = self.toggle(node.kind, node.id);
        if !suppress_cascade {
            for child in &node.children {
                self.apply_cascade(child, checked, 1);
            }
        }
        checked
    }

    fn apply_cascade(&mut self, node: &SelectionNode, checked: bool, depth: usize) {
        if depth > CASCADE_DEPTH {
            return;
        }
        if checked {
            self.check(node.kind, node.id);
        } else {
            self.uncheck(node.kind, node.id);
        }
        for child in &node.children {
            self.apply_cascade(child, checked, depth + 1);
        }
    }

    pub fn clear(&mut self) {
        self.checked.clear();
    }

    pub fn is_checked(&self, kind: RecordKind, id: i64) -> bool {
        self.checked.contains(&(kind, id))
    }

    pub fn len(&self) -> usize {
        self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    /// Checked identifiers of one kind, in ascending order.
    pub fn checked_ids(&self, kind: RecordKind) -> Vec<i64> {
        self.checked
            .iter()
            .filter(|(checked_kind, _)| *checked_kind == kind)
            .map(|(_, id)| *id)
            .collect()
    }

    /// Drop checked entries no longer visible in the driving list, keeping
    /// the subset invariant.
    pub fn retain_visible(&mut self, visible: &BTreeSet<(RecordKind, i64)>) {
        self.checked.retain(|entry| visible.contains(entry));
    }

    pub fn kinds(&self) -> SelectionKinds {
        let mut kinds = SelectionKinds::default();
        for (kind, _) in &self.checked {
            match kind {
                RecordKind::Street => kinds.street = true,
                RecordKind::Property => kinds.property = true,
                RecordKind::Esu => kinds.esu = true,
                RecordKind::Classification => kinds.classification = true,
                RecordKind::Organisation => kinds.organisation = true,
                RecordKind::CrossRef => kinds.cross_ref = true,
                RecordKind::Provenance => kinds.provenance = true,
                RecordKind::Note => kinds.note = true,
                RecordKind::SuccessorCrossRef => kinds.successor_cross_ref = true,
            }
        }
        kinds
    }
}
