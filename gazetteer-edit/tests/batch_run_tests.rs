//! Batch run integration tests
//!
//! Exercise the full orchestrator path through a scripted in-memory gateway:
//! fetch fan-out, intent application, per-record triage, reconciliation into
//! the caches, and error-surface rendering.

use gazetteer_edit::{BatchEditor, EditIntent, ErrorSurface, ReconcileSinks, SkipPolicy};
use gazetteer_test_utils::{
    approved_snapshot, rpc_validation_error, FetchError, LogicalStatus, LookupTables,
    ScriptedGateway, Uprn,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn uprns(values: &[i64]) -> Vec<Uprn> {
    values.iter().copied().map(Uprn::new).collect()
}

fn make_historical() -> EditIntent {
    EditIntent::SetLogicalStatus {
        status: LogicalStatus::Historical,
    }
}

struct Harness {
    gateway: Arc<ScriptedGateway>,
    editor: BatchEditor<Arc<ScriptedGateway>>,
    sinks: ReconcileSinks,
    surface: ErrorSurface,
    cancel: CancellationToken,
}

impl Harness {
    fn new() -> Self {
        let gateway = Arc::new(ScriptedGateway::new());
        let editor = BatchEditor::new(Arc::clone(&gateway), LookupTables::new());
        Self {
            gateway,
            editor,
            sinks: ReconcileSinks::default(),
            surface: ErrorSurface::new(),
            cancel: CancellationToken::new(),
        }
    }
}

#[tokio::test]
async fn test_mixed_run_counts_and_reports() {
    let mut harness = Harness::new();
    for uprn in [1, 2, 3] {
        harness.gateway.script_fetch(approved_snapshot(uprn));
    }
    harness
        .gateway
        .script_save_failure(Uprn::new(2), rpc_validation_error());

    let run = harness
        .editor
        .run(
            &uprns(&[1, 2, 3]),
            &make_historical(),
            &mut harness.sinks,
            &mut harness.surface,
            &harness.cancel,
        )
        .await;

    assert_eq!(run.total(), 3);
    assert_eq!(run.succeeded(), 2);
    assert_eq!(run.failed(), 1);
    assert_eq!(run.skipped(), 0);
    assert!(run.is_complete());

    // The failure carries the address captured before the edit, and renders
    // as one itemized line.
    assert_eq!(run.failures()[0].uprn, Uprn::new(2));
    assert_eq!(run.failures()[0].address, "2 High Street");
    assert_eq!(
        harness.surface.lines(),
        vec!["BLPU [rpc]: Representative point code is invalid".to_string()]
    );
}

#[tokio::test]
async fn test_successful_run_reconciles_caches() {
    let mut harness = Harness::new();
    harness.gateway.script_fetch(approved_snapshot(1));
    harness.sinks.sandbox.set_draft(approved_snapshot(1));

    let run = harness
        .editor
        .run(
            &uprns(&[1]),
            &make_historical(),
            &mut harness.sinks,
            &mut harness.surface,
            &harness.cancel,
        )
        .await;

    assert_eq!(run.succeeded(), 1);
    assert_eq!(harness.sinks.search.rows().len(), 1);
    assert_eq!(
        harness.sinks.search.rows()[0].logical_status,
        LogicalStatus::Historical
    );
    assert_eq!(harness.sinks.map.pins().len(), 1);
    assert!(harness.sinks.sandbox.is_empty());
    assert!(harness.surface.is_empty());
}

#[tokio::test]
async fn test_fetch_failure_counts_as_failed_by_default() {
    let mut harness = Harness::new();
    // UPRN 7 has no scripted fetch; the gateway reports it unavailable.

    let run = harness
        .editor
        .run(
            &uprns(&[7]),
            &make_historical(),
            &mut harness.sinks,
            &mut harness.surface,
            &harness.cancel,
        )
        .await;

    assert_eq!(run.failed(), 1);
    assert_eq!(run.skipped(), 0);
    assert!(run.is_complete());
    assert_eq!(run.failures()[0].address, "7");
    assert!(run.failures()[0].errors[0]
        .message
        .contains("Record unavailable"));
    assert!(harness.gateway.save_calls().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_with_ignore_policy_is_skipped() {
    let mut harness = Harness::new();
    harness.editor = harness.editor.with_skip_policy(SkipPolicy::Ignore);
    harness.gateway.script_fetch_error(FetchError::Transport {
        uprn: Uprn::new(7),
        reason: "connection reset".to_string(),
    });

    let run = harness
        .editor
        .run(
            &uprns(&[7]),
            &make_historical(),
            &mut harness.sinks,
            &mut harness.surface,
            &harness.cancel,
        )
        .await;

    assert_eq!(run.failed(), 0);
    assert_eq!(run.skipped(), 1);
    assert!(run.is_complete());
    assert!(run.skips()[0].reason.contains("connection reset"));
    assert!(harness.surface.is_empty());
}

#[tokio::test]
async fn test_not_applicable_record_is_skipped_without_save() {
    let mut harness = Harness::new();
    harness.gateway.script_fetch(approved_snapshot(1));
    // Matches the fixture's seed point, so the transform short-circuits.
    let intent = EditIntent::MoveSeedPoint {
        easting: 355000.0,
        northing: 434560.0,
        note: None,
    };

    let run = harness
        .editor
        .run(
            &uprns(&[1]),
            &intent,
            &mut harness.sinks,
            &mut harness.surface,
            &harness.cancel,
        )
        .await;

    assert_eq!(run.skipped(), 1);
    assert_eq!(run.skips()[0].reason, "Seed point unchanged");
    assert!(run.is_complete());
    assert!(harness.gateway.save_calls().is_empty());
}

#[tokio::test]
async fn test_duplicate_uprns_are_deduplicated_up_front() {
    let mut harness = Harness::new();
    harness.gateway.script_fetch(approved_snapshot(1));
    harness.gateway.script_fetch(approved_snapshot(2));

    let run = harness
        .editor
        .run(
            &uprns(&[1, 1, 2, 1]),
            &make_historical(),
            &mut harness.sinks,
            &mut harness.surface,
            &harness.cancel,
        )
        .await;

    assert_eq!(run.total(), 2);
    assert_eq!(run.succeeded(), 2);
    assert_eq!(harness.gateway.fetch_calls().len(), 2);
}

#[tokio::test]
async fn test_empty_selection_is_a_complete_noop() {
    let mut harness = Harness::new();
    harness.sinks.sandbox.set_draft(approved_snapshot(1));

    let run = harness
        .editor
        .run(
            &[],
            &make_historical(),
            &mut harness.sinks,
            &mut harness.surface,
            &harness.cancel,
        )
        .await;

    assert_eq!(run.total(), 0);
    assert!(run.is_complete());
    assert!(harness.gateway.fetch_calls().is_empty());
    // Nothing succeeded, so the sandbox draft is untouched.
    assert!(!harness.sinks.sandbox.is_empty());
}

#[tokio::test]
async fn test_cancelled_token_skips_remaining_records() {
    let mut harness = Harness::new();
    for uprn in [1, 2, 3] {
        harness.gateway.script_fetch(approved_snapshot(uprn));
    }
    harness.cancel.cancel();

    let run = harness
        .editor
        .run(
            &uprns(&[1, 2, 3]),
            &make_historical(),
            &mut harness.sinks,
            &mut harness.surface,
            &harness.cancel,
        )
        .await;

    assert_eq!(run.skipped(), 3);
    assert!(run.is_complete());
    assert!(run.skips().iter().all(|skip| skip.reason == "Cancelled"));
    assert!(harness.gateway.fetch_calls().is_empty());
    assert!(harness.gateway.save_calls().is_empty());
}

#[tokio::test]
async fn test_run_ids_differ_across_runs() {
    let mut harness = Harness::new();
    harness.gateway.script_fetch(approved_snapshot(1));

    let first = harness
        .editor
        .run(
            &uprns(&[1]),
            &make_historical(),
            &mut harness.sinks,
            &mut harness.surface,
            &harness.cancel,
        )
        .await;
    let second = harness
        .editor
        .run(
            &uprns(&[1]),
            &EditIntent::AppendNote {
                text: "Reviewed".to_string(),
            },
            &mut harness.sinks,
            &mut harness.surface,
            &harness.cancel,
        )
        .await;

    assert_ne!(first.run_id(), second.run_id());
}
