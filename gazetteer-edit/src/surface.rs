//! Error surface
//!
//! Accumulates per-record validation failures for one batch run and renders
//! them as itemized, human-readable lines. Failures are deduplicated by
//! UPRN: asynchronous save handlers can fire more than once for the same
//! record, and only the first report is kept.

use gazetteer_core::{FieldError, SubEntity, Uprn};
use std::collections::{BTreeMap, HashSet};

/// One record's save failure. The address label is captured before the edit
/// so it can be shown even when the save was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    pub uprn: Uprn,
    pub address: String,
    pub errors: Vec<FieldError>,
}

impl RecordFailure {
    pub fn new(uprn: Uprn, address: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            uprn,
            address: address.into(),
            errors,
        }
    }

    /// Render this failure's errors as one line per (sub-entity, field)
    /// group: `"<SubEntity> [<field>]: <comma-joined unique messages>"`.
    /// Identical lines are suppressed.
    pub fn lines(&self) -> Vec<String> {
        let mut groups: BTreeMap<(SubEntity, String), Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            let messages = groups
                .entry((error.sub_entity, error.field.clone()))
                .or_default();
            if !messages.contains(&error.message) {
                messages.push(error.message.clone());
            }
        }

        let mut seen = HashSet::new();
        let mut lines = Vec::new();
        for ((sub_entity, field), messages) in groups {
            let line = format!("{} [{}]: {}", sub_entity, field, messages.join(", "));
            if seen.insert(line.clone()) {
                lines.push(line);
            }
        }
        lines
    }
}

/// Accumulated failures for one batch run. Terminal per run; nothing is
/// retried automatically.
#[derive(Debug, Clone, Default)]
pub struct ErrorSurface {
    failures: Vec<RecordFailure>,
    seen: HashSet<Uprn>,
}

impl ErrorSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. Returns false (and drops the report) when this
    /// UPRN already failed during the run.
    pub fn push(&mut self, failure: RecordFailure) -> bool {
        if !self.seen.insert(failure.uprn) {
            return false;
        }
        self.failures.push(failure);
        true
    }

    pub fn extend(&mut self, failures: impl IntoIterator<Item = RecordFailure>) {
        for failure in failures {
            self.push(failure);
        }
    }

    pub fn failures(&self) -> &[RecordFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// All rendered lines across failed records, in report order.
    pub fn lines(&self) -> Vec<String> {
        self.failures
            .iter()
            .flat_map(RecordFailure::lines)
            .collect()
    }

    pub fn clear(&mut self) {
        self.failures.clear();
        self.seen.clear();
    }
}
