//! Gazetteer Test Utilities
//!
//! Centralized test infrastructure for the gazetteer workspace:
//! - Snapshot and sub-entity fixtures for common scenarios
//! - A scripted in-memory [`RecordGateway`] for exercising batch runs
//!   without a server
//! - Proptest generators for core types

pub use gazetteer_client::RecordGateway;
pub use gazetteer_core::{
    AddressableObject, Blpu, ChangeType, CrossRef, FetchError, FieldError, Jurisdiction, Language,
    LogicalStatus, LookupTables, Lpi, NoteRecord, PropertySnapshot, RepresentativePointCode,
    SaveError, SubEntity, Uprn, Usrn,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

// ============================================================================
// FIXTURES
// ============================================================================

/// The fixed start date used by every fixture record.
pub fn fixture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 15).expect("valid date")
}

/// A default English-language LPI: "<n> High Street" on USRN 1.
pub fn english_lpi(number: i32) -> Lpi {
    Lpi {
        lpi_key: None,
        language: Language::English,
        logical_status: LogicalStatus::Approved,
        sao: AddressableObject::default(),
        pao: AddressableObject {
            start_number: Some(number),
            start_suffix: None,
            end_number: None,
            end_suffix: None,
            text: Some("High Street".to_string()),
        },
        usrn: Usrn::new(1),
        postcode_ref: None,
        post_town_ref: None,
        sub_locality_ref: None,
        official_address: true,
        postally_addressable: true,
        change_type: ChangeType::Update,
        start_date: fixture_date(),
        end_date: None,
    }
}

/// An approved England/Wales property snapshot with a single English LPI
/// whose PAO number matches the UPRN.
pub fn approved_snapshot(uprn: i64) -> PropertySnapshot {
    PropertySnapshot {
        uprn: Uprn::new(uprn),
        jurisdiction: Jurisdiction::EnglandWales,
        blpu: Blpu {
            logical_status: LogicalStatus::Approved,
            rpc: RepresentativePointCode::VisualCentre,
            easting: 355000.0,
            northing: 434560.0,
            parent_uprn: None,
            classification_code: Some("RD04".to_string()),
            change_type: ChangeType::Update,
            start_date: fixture_date(),
            end_date: None,
        },
        lpis: vec![english_lpi(uprn as i32)],
        provenances: Vec::new(),
        cross_refs: Vec::new(),
        notes: Vec::new(),
        classifications: None,
        organisations: None,
        successor_cross_refs: None,
    }
}

/// A Scottish snapshot: classification lives in the `classifications`
/// collection rather than on the BLPU.
pub fn scottish_snapshot(uprn: i64) -> PropertySnapshot {
    let mut snapshot = approved_snapshot(uprn);
    snapshot.jurisdiction = Jurisdiction::Scottish;
    snapshot.blpu.classification_code = None;
    snapshot.classifications = Some(vec![gazetteer_core::ClassificationRecord {
        class_key: 1,
        classification_code: "RD04".to_string(),
        scheme: "Scottish Gazetteer".to_string(),
        change_type: ChangeType::Update,
        start_date: fixture_date(),
        end_date: None,
    }]);
    snapshot.organisations = Some(Vec::new());
    snapshot.successor_cross_refs = Some(Vec::new());
    snapshot
}

/// A live cross reference against the given source.
pub fn cross_ref(xref_key: i64, source_id: i64, reference: &str) -> CrossRef {
    CrossRef {
        xref_key,
        source_id,
        cross_reference: reference.to_string(),
        change_type: ChangeType::Update,
        start_date: fixture_date(),
        end_date: None,
    }
}

/// A validation failure on the BLPU's representative point code.
pub fn rpc_validation_error() -> SaveError {
    SaveError::Validation {
        errors: vec![FieldError::new(
            SubEntity::Blpu,
            None,
            "rpc",
            "Representative point code is invalid",
        )],
    }
}

// ============================================================================
// SCRIPTED GATEWAY
// ============================================================================

/// In-memory [`RecordGateway`] with per-UPRN scripted outcomes.
///
/// Fetches return the scripted snapshot (or the scripted error); UPRNs with
/// no script fetch as unavailable. Saves echo the submitted snapshot as the
/// canonical response unless a failure is scripted for that UPRN. Every call
/// is recorded for assertion.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    fetches: Mutex<HashMap<Uprn, Result<PropertySnapshot, FetchError>>>,
    save_failures: Mutex<HashMap<Uprn, SaveError>>,
    fetch_calls: Mutex<Vec<Uprn>>,
    save_calls: Mutex<Vec<Uprn>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_fetch(&self, snapshot: PropertySnapshot) {
        self.fetches
            .lock()
            .expect("fetch script lock")
            .insert(snapshot.uprn, Ok(snapshot));
    }

    pub fn script_fetch_error(&self, error: FetchError) {
        self.fetches
            .lock()
            .expect("fetch script lock")
            .insert(error.uprn(), Err(error));
    }

    pub fn script_save_failure(&self, uprn: Uprn, error: SaveError) {
        self.save_failures
            .lock()
            .expect("save script lock")
            .insert(uprn, error);
    }

    pub fn fetch_calls(&self) -> Vec<Uprn> {
        self.fetch_calls.lock().expect("fetch call lock").clone()
    }

    pub fn save_calls(&self) -> Vec<Uprn> {
        self.save_calls.lock().expect("save call lock").clone()
    }
}

#[async_trait]
impl RecordGateway for ScriptedGateway {
    async fn fetch(&self, uprn: Uprn) -> Result<PropertySnapshot, FetchError> {
        self.fetch_calls.lock().expect("fetch call lock").push(uprn);
        match self.fetches.lock().expect("fetch script lock").get(&uprn) {
            Some(result) => result.clone(),
            None => Err(FetchError::Unavailable {
                uprn,
                status: Some(404),
            }),
        }
    }

    async fn save(&self, snapshot: &PropertySnapshot) -> Result<PropertySnapshot, SaveError> {
        self.save_calls
            .lock()
            .expect("save call lock")
            .push(snapshot.uprn);
        match self
            .save_failures
            .lock()
            .expect("save script lock")
            .get(&snapshot.uprn)
        {
            Some(error) => Err(error.clone()),
            None => Ok(snapshot.clone()),
        }
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    use super::*;
    use proptest::prelude::*;

    pub fn arb_uprn() -> impl Strategy<Value = Uprn> {
        (1i64..1_000_000_000).prop_map(Uprn::new)
    }

    pub fn arb_logical_status() -> impl Strategy<Value = LogicalStatus> {
        prop_oneof![
            Just(LogicalStatus::Approved),
            Just(LogicalStatus::Alternative),
            Just(LogicalStatus::Provisional),
            Just(LogicalStatus::Historical),
            Just(LogicalStatus::Rejected),
        ]
    }

    pub fn arb_change_type() -> impl Strategy<Value = ChangeType> {
        prop_oneof![
            Just(ChangeType::Insert),
            Just(ChangeType::Update),
            Just(ChangeType::Delete),
        ]
    }

    /// Snapshots with a random UPRN and logical status, built on the
    /// standard fixture.
    pub fn arb_snapshot() -> impl Strategy<Value = PropertySnapshot> {
        (arb_uprn(), arb_logical_status()).prop_map(|(uprn, status)| {
            let mut snapshot = approved_snapshot(uprn.value());
            snapshot.blpu.logical_status = status;
            snapshot
        })
    }
}
