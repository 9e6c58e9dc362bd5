//! Reconciliation sink
//!
//! After a batch run completes, the canonical saved snapshots are merged
//! into the three client-side caches so every view stays consistent: the
//! search-results list, the map search layer, and the sandbox/draft context.
//! Merges replace entries in place by key and never reorder, so applying
//! the same snapshot list twice is idempotent.

use gazetteer_core::{LookupTables, MapPin, PropertySnapshot, SearchRow, Uprn};

/// Flat list of lightweight search rows, keyed by (UPRN, language).
#[derive(Debug, Clone, Default)]
pub struct SearchResultsCache {
    rows: Vec<SearchRow>,
}

impl SearchResultsCache {
    pub fn new(rows: Vec<SearchRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SearchRow] {
        &self.rows
    }

    /// Replace the row with a matching key in place, or append when the
    /// key is new (a record saved by a wizard that was not yet listed).
    pub fn upsert(&mut self, row: SearchRow) {
        match self.rows.iter_mut().find(|existing| existing.key() == row.key()) {
            Some(existing) => *existing = row,
            None => self.rows.push(row),
        }
    }

    /// Explicit remove-from-list filtering; the only way entries leave.
    pub fn remove(&mut self, uprn: Uprn) {
        self.rows.retain(|row| row.uprn != uprn);
    }
}

/// Flat list of map pins, keyed by the UPRN rendered as a string.
#[derive(Debug, Clone, Default)]
pub struct MapSearchCache {
    pins: Vec<MapPin>,
}

impl MapSearchCache {
    pub fn new(pins: Vec<MapPin>) -> Self {
        Self { pins }
    }

    pub fn pins(&self) -> &[MapPin] {
        &self.pins
    }

    pub fn upsert(&mut self, pin: MapPin) {
        match self.pins.iter_mut().find(|existing| existing.id == pin.id) {
            Some(existing) => *existing = pin,
            None => self.pins.push(pin),
        }
    }

    pub fn remove(&mut self, uprn: Uprn) {
        let id = uprn.to_string();
        self.pins.retain(|pin| pin.id != id);
    }
}

/// The sandbox/draft context. Cleared, not merged, after any successful
/// batch save: the draft no longer reflects the server's latest state.
#[derive(Debug, Clone, Default)]
pub struct SandboxCache {
    draft: Option<PropertySnapshot>,
}

impl SandboxCache {
    pub fn set_draft(&mut self, snapshot: PropertySnapshot) {
        self.draft = Some(snapshot);
    }

    pub fn draft(&self) -> Option<&PropertySnapshot> {
        self.draft.as_ref()
    }

    pub fn clear(&mut self) {
        self.draft = None;
    }

    pub fn is_empty(&self) -> bool {
        self.draft.is_none()
    }
}

/// The three caches a batch run reconciles into.
#[derive(Debug, Clone, Default)]
pub struct ReconcileSinks {
    pub search: SearchResultsCache,
    pub map: MapSearchCache,
    pub sandbox: SandboxCache,
}

impl ReconcileSinks {
    /// Merge saved snapshots into the search and map caches and clear the
    /// sandbox. Idempotent: replacement is keyed, never appended twice.
    pub fn apply(&mut self, snapshots: &[PropertySnapshot], lookups: &LookupTables) {
        if snapshots.is_empty() {
            return;
        }
        for snapshot in snapshots {
            for row in snapshot.search_rows(lookups) {
                self.search.upsert(row);
            }
            self.map.upsert(snapshot.map_pin(lookups));
        }
        self.sandbox.clear();
    }

    /// The explicit remove-from-list action, applied to both projections.
    pub fn remove_from_list(&mut self, uprn: Uprn) {
        self.search.remove(uprn);
        self.map.remove(uprn);
    }
}
