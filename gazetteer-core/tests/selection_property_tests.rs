//! Property-based tests for the selection model and draft key arena
//!
//! The selection set must behave like a set under toggling, expose sorted
//! per-kind views, and stay a subset of the visible identifiers. Draft keys
//! must never collide with server-assigned keys.

use gazetteer_core::{DraftKeyArena, RecordKind, SelectionModel};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn arb_kind() -> impl Strategy<Value = RecordKind> {
    prop_oneof![
        Just(RecordKind::Street),
        Just(RecordKind::Property),
        Just(RecordKind::Esu),
        Just(RecordKind::Classification),
        Just(RecordKind::Organisation),
        Just(RecordKind::CrossRef),
        Just(RecordKind::Provenance),
        Just(RecordKind::Note),
        Just(RecordKind::SuccessorCrossRef),
    ]
}

fn arb_entries() -> impl Strategy<Value = Vec<(RecordKind, i64)>> {
    prop::collection::vec((arb_kind(), 1i64..1000), 0..30)
}

proptest! {
    /// Toggling the same identifier twice restores the previous state.
    #[test]
    fn prop_double_toggle_is_identity(entries in arb_entries(), kind in arb_kind(), id in 1i64..1000) {
        let mut model = SelectionModel::new();
        for (kind, id) in &entries {
            model.check(*kind, *id);
        }
        let before = model.clone();
        model.toggle(kind, id);
        model.toggle(kind, id);
        prop_assert_eq!(model, before);
    }

    /// Per-kind views are sorted ascending with no duplicates.
    #[test]
    fn prop_checked_ids_sorted_and_unique(entries in arb_entries(), kind in arb_kind()) {
        let mut model = SelectionModel::new();
        for (kind, id) in &entries {
            model.check(*kind, *id);
        }
        let ids = model.checked_ids(kind);
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(ids, sorted);
    }

    /// Pruning against the visible set leaves only visible entries checked.
    #[test]
    fn prop_retain_visible_keeps_subset(entries in arb_entries(), visible in arb_entries()) {
        let mut model = SelectionModel::new();
        for (kind, id) in &entries {
            model.check(*kind, *id);
        }
        let visible: BTreeSet<(RecordKind, i64)> = visible.into_iter().collect();
        model.retain_visible(&visible);
        for entry in &visible {
            // Still checked only if it was checked before the prune.
            prop_assert_eq!(
                model.is_checked(entry.0, entry.1),
                entries.contains(entry)
            );
        }
        for (kind, id) in entries {
            if !visible.contains(&(kind, id)) {
                prop_assert!(!model.is_checked(kind, id));
            }
        }
    }

    /// Issued draft keys are strictly descending, negative, and disjoint
    /// from any seed keys; sequences are strictly ascending and positive.
    #[test]
    fn prop_arena_keys_never_collide(seed_keys in prop::collection::vec(-50i64..1000, 0..10), draws in 1usize..20) {
        let seed_sequences: [i32; 0] = [];
        let mut arena = DraftKeyArena::seeded(seed_keys.iter(), seed_sequences.iter());
        let mut previous_key: Option<i64> = None;
        let mut previous_sequence = 0;
        for _ in 0..draws {
            let key = arena.next_key();
            prop_assert!(key < 0);
            prop_assert!(!seed_keys.contains(&key));
            if let Some(previous) = previous_key {
                prop_assert!(key < previous);
            }
            previous_key = Some(key);

            let sequence = arena.next_sequence();
            prop_assert!(sequence > previous_sequence);
            previous_sequence = sequence;
        }
    }
}
