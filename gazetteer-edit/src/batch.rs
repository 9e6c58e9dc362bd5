//! Batch edit orchestrator
//!
//! Executes one [`EditIntent`] against a list of UPRNs: fetch each record's
//! snapshot, apply the transformation, submit each updated snapshot
//! independently, and track per-record success/failure/skip in a single-use
//! [`BatchRun`] aggregate. Per-record requests are fired together and
//! collected as they resolve; no ordering is guaranteed across records, and
//! the aggregate counters are the only synchronization point.

use crate::intent::{EditIntent, Transformed};
use crate::reconcile::ReconcileSinks;
use crate::surface::{ErrorSurface, RecordFailure};
use futures_util::future::join_all;
use gazetteer_core::{FieldError, Language, LookupTables, PropertySnapshot, SubEntity, Uprn};
use gazetteer_client::RecordGateway;
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// How un-fetchable records are accounted.
///
/// `CountAsFailed` is the default: dropping a record from the accounting
/// silently is the wrong semantic for an audit-sensitive gazetteer. `Ignore`
/// reproduces the legacy behavior of routing the record to the skip list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkipPolicy {
    #[default]
    CountAsFailed,
    Ignore,
}

/// A record the run did not submit, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub uprn: Uprn,
    pub reason: String,
}

/// Ephemeral aggregate over one batch-edit invocation. Created fresh per
/// run, discarded when the owning workflow closes.
///
/// Invariant: `succeeded + failed + skipped <= total` at every point; the
/// run is complete exactly when equality holds.
#[derive(Debug, Clone)]
pub struct BatchRun {
    run_id: Uuid,
    total: usize,
    succeeded_snapshots: Vec<PropertySnapshot>,
    failures: Vec<RecordFailure>,
    failed_uprns: HashSet<Uprn>,
    skips: Vec<SkippedRecord>,
}

impl BatchRun {
    pub fn new(total: usize) -> Self {
        Self {
            run_id: Uuid::now_v7(),
            total,
            succeeded_snapshots: Vec::new(),
            failures: Vec::new(),
            failed_uprns: HashSet::new(),
            skips: Vec::new(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded_snapshots.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn skipped(&self) -> usize {
        self.skips.len()
    }

    pub fn is_complete(&self) -> bool {
        self.succeeded() + self.failed() + self.skipped() == self.total
    }

    pub fn record_success(&mut self, snapshot: PropertySnapshot) {
        self.succeeded_snapshots.push(snapshot);
    }

    /// Record a failure. A UPRN is only counted once per run even if its
    /// error handler fires more than once.
    pub fn record_failure(&mut self, failure: RecordFailure) -> bool {
        if !self.failed_uprns.insert(failure.uprn) {
            return false;
        }
        self.failures.push(failure);
        true
    }

    pub fn record_skip(&mut self, uprn: Uprn, reason: impl Into<String>) {
        self.skips.push(SkippedRecord {
            uprn,
            reason: reason.into(),
        });
    }

    pub fn succeeded_snapshots(&self) -> &[PropertySnapshot] {
        &self.succeeded_snapshots
    }

    pub fn failures(&self) -> &[RecordFailure] {
        &self.failures
    }

    pub fn skips(&self) -> &[SkippedRecord] {
        &self.skips
    }
}

enum RecordResult {
    Succeeded(Box<PropertySnapshot>),
    Failed(RecordFailure),
    Skipped { uprn: Uprn, reason: String },
}

/// Orchestrates batch edits through a [`RecordGateway`].
#[derive(Debug, Clone)]
pub struct BatchEditor<G> {
    gateway: G,
    lookups: LookupTables,
    language: Language,
    skip_policy: SkipPolicy,
}

impl<G: RecordGateway> BatchEditor<G> {
    pub fn new(gateway: G, lookups: LookupTables) -> Self {
        Self {
            gateway,
            lookups,
            language: Language::English,
            skip_policy: SkipPolicy::default(),
        }
    }

    /// Language used for the address labels captured before each edit.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_skip_policy(mut self, skip_policy: SkipPolicy) -> Self {
        self.skip_policy = skip_policy;
        self
    }

    /// Execute one intent against the given UPRNs. Duplicates are dropped
    /// up front; an empty list yields an already-complete no-op run.
    ///
    /// The cancellation token is honored between suspension points: records
    /// whose save has not been issued when the token fires are skipped, and
    /// the run still reaches a terminal state.
    pub async fn run(
        &self,
        uprns: &[Uprn],
        intent: &EditIntent,
        sinks: &mut ReconcileSinks,
        surface: &mut ErrorSurface,
        cancel: &CancellationToken,
    ) -> BatchRun {
        let mut seen = HashSet::new();
        let uprns: Vec<Uprn> = uprns
            .iter()
            .copied()
            .filter(|uprn| seen.insert(*uprn))
            .collect();

        let mut run = BatchRun::new(uprns.len());
        tracing::info!(run_id = %run.run_id(), total = run.total(), "Batch edit started");
        if uprns.is_empty() {
            return run;
        }

        let today = chrono::Utc::now().date_naive();
        let results = join_all(
            uprns
                .iter()
                .map(|uprn| self.edit_one(*uprn, intent, today, cancel)),
        )
        .await;

        for result in results {
            match result {
                RecordResult::Succeeded(snapshot) => run.record_success(*snapshot),
                RecordResult::Failed(failure) => {
                    run.record_failure(failure);
                }
                RecordResult::Skipped { uprn, reason } => run.record_skip(uprn, reason),
            }
        }
        debug_assert!(run.is_complete());

        sinks.apply(run.succeeded_snapshots(), &self.lookups);
        surface.extend(run.failures().iter().cloned());

        tracing::info!(
            run_id = %run.run_id(),
            succeeded = run.succeeded(),
            failed = run.failed(),
            skipped = run.skipped(),
            "Batch edit complete"
        );
        run
    }

    async fn edit_one(
        &self,
        uprn: Uprn,
        intent: &EditIntent,
        today: chrono::NaiveDate,
        cancel: &CancellationToken,
    ) -> RecordResult {
        if cancel.is_cancelled() {
            return RecordResult::Skipped {
                uprn,
                reason: "Cancelled".to_string(),
            };
        }

        let snapshot = match self.gateway.fetch(uprn).await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                return match self.skip_policy {
                    SkipPolicy::CountAsFailed => RecordResult::Failed(RecordFailure::new(
                        uprn,
                        uprn.to_string(),
                        vec![FieldError::new(
                            SubEntity::Blpu,
                            None,
                            "record",
                            format!("Record unavailable: {}", error),
                        )],
                    )),
                    SkipPolicy::Ignore => RecordResult::Skipped {
                        uprn,
                        reason: error.to_string(),
                    },
                };
            }
        };

        // Captured before the edit so a rejected save still reports an
        // address.
        let address = snapshot.address_label(self.language, &self.lookups);

        let updated = match intent.apply(snapshot, today) {
            Transformed::Updated(updated) => updated,
            Transformed::NotApplicable(reason) => {
                return RecordResult::Skipped {
                    uprn,
                    reason: reason.to_string(),
                };
            }
        };

        if cancel.is_cancelled() {
            return RecordResult::Skipped {
                uprn,
                reason: "Cancelled".to_string(),
            };
        }

        match self.gateway.save(&updated).await {
            Ok(canonical) => RecordResult::Succeeded(Box::new(canonical)),
            Err(error) => {
                tracing::debug!(%uprn, %error, "Save rejected");
                RecordResult::Failed(RecordFailure::new(uprn, address, error.field_errors()))
            }
        }
    }
}
