//! Edit intents and their transformations
//!
//! An [`EditIntent`] describes what one batch operation does to every
//! selected record. Transformations are pure: they take a fetched snapshot
//! and either produce the updated snapshot to submit, or decide the intent
//! is not applicable to this record (a business-rule short-circuit, never an
//! error).

use chrono::NaiveDate;
use gazetteer_core::{
    ChangeType, ClassificationRecord, CrossRef, DraftKeyArena, Jurisdiction, LogicalStatus,
    NoteRecord, PropertySnapshot,
};

/// Which cross-reference sub-records a removal targets.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossRefMatcher {
    /// Every cross-reference on the record.
    All,
    /// Cross-references from one external source.
    Source { source_id: i64 },
    /// Cross-references from one source with an exact reference string.
    SourceAndRef { source_id: i64, reference: String },
}

impl CrossRefMatcher {
    pub fn matches(&self, cross_ref: &CrossRef) -> bool {
        match self {
            Self::All => true,
            Self::Source { source_id } => cross_ref.source_id == *source_id,
            Self::SourceAndRef {
                source_id,
                reference,
            } => cross_ref.source_id == *source_id && cross_ref.cross_reference == *reference,
        }
    }
}

/// What to do when a make-child-of target already has a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentPolicy {
    /// Keep the existing parent; the record is skipped.
    Leave,
    /// Reparent unconditionally.
    Replace,
}

/// A batch operation, parameterized by the initiating wizard's choices.
#[derive(Debug, Clone, PartialEq)]
pub enum EditIntent {
    MoveSeedPoint {
        easting: f64,
        northing: f64,
        note: Option<String>,
    },
    RemoveCrossRefs {
        matcher: CrossRefMatcher,
    },
    MakeChildOf {
        parent: Box<PropertySnapshot>,
        policy: ParentPolicy,
        propagate_address: bool,
    },
    SetLogicalStatus {
        status: LogicalStatus,
    },
    SetClassification {
        code: String,
    },
    AppendNote {
        text: String,
    },
}

/// Result of applying an intent to one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed {
    Updated(Box<PropertySnapshot>),
    /// Business-rule short-circuit; the record is skipped, not failed.
    NotApplicable(&'static str),
}

impl EditIntent {
    /// Apply this intent to a fetched snapshot. `today` is the close-out
    /// date stamped on soft-deleted sub-records.
    pub fn apply(&self, mut snapshot: PropertySnapshot, today: NaiveDate) -> Transformed {
        match self {
            Self::MoveSeedPoint {
                easting,
                northing,
                note,
            } => {
                if snapshot.blpu.easting == *easting && snapshot.blpu.northing == *northing {
                    return Transformed::NotApplicable("Seed point unchanged");
                }
                snapshot.blpu.easting = *easting;
                snapshot.blpu.northing = *northing;
                snapshot.blpu.change_type = ChangeType::Update;
                if let Some(text) = note {
                    append_note(&mut snapshot, text);
                }
                Transformed::Updated(Box::new(snapshot))
            }

            Self::RemoveCrossRefs { matcher } => {
                let mut touched = false;
                for cross_ref in &mut snapshot.cross_refs {
                    if cross_ref.change_type != ChangeType::Delete && matcher.matches(cross_ref) {
                        cross_ref.change_type = ChangeType::Delete;
                        cross_ref.end_date = Some(today);
                        touched = true;
                    }
                }
                if !touched {
                    return Transformed::NotApplicable("No matching cross references");
                }
                Transformed::Updated(Box::new(snapshot))
            }

            Self::MakeChildOf {
                parent,
                policy,
                propagate_address,
            } => {
                if snapshot.blpu.parent_uprn.is_some() && *policy == ParentPolicy::Leave {
                    return Transformed::NotApplicable("Child already has a parent");
                }
                if snapshot.blpu.logical_status.code() < parent.blpu.logical_status.code() {
                    return Transformed::NotApplicable("Child logical status below parent");
                }
                snapshot.blpu.parent_uprn = Some(parent.uprn);
                snapshot.blpu.change_type = ChangeType::Update;
                if *propagate_address {
                    propagate_parent_pao(&mut snapshot, parent);
                }
                Transformed::Updated(Box::new(snapshot))
            }

            Self::SetLogicalStatus { status } => {
                let unchanged = snapshot.blpu.logical_status == *status
                    && snapshot.lpis.iter().all(|lpi| lpi.logical_status == *status);
                if unchanged {
                    return Transformed::NotApplicable("Logical status unchanged");
                }
                snapshot.blpu.logical_status = *status;
                snapshot.blpu.change_type = ChangeType::Update;
                for lpi in &mut snapshot.lpis {
                    lpi.logical_status = *status;
                    lpi.change_type = ChangeType::Update;
                }
                Transformed::Updated(Box::new(snapshot))
            }

            Self::SetClassification { code } => {
                if snapshot.classification_code() == Some(code.as_str()) {
                    return Transformed::NotApplicable("Classification unchanged");
                }
                match snapshot.jurisdiction {
                    Jurisdiction::EnglandWales => {
                        snapshot.blpu.classification_code = Some(code.clone());
                        snapshot.blpu.change_type = ChangeType::Update;
                    }
                    Jurisdiction::Scottish => {
                        set_scottish_classification(&mut snapshot, code, today);
                    }
                }
                Transformed::Updated(Box::new(snapshot))
            }

            Self::AppendNote { text } => {
                append_note(&mut snapshot, text);
                Transformed::Updated(Box::new(snapshot))
            }
        }
    }
}

/// Append a draft note with arena-issued synthetic key and sequence.
fn append_note(snapshot: &mut PropertySnapshot, text: &str) {
    let mut arena = note_arena(snapshot);
    snapshot.notes.push(NoteRecord {
        pkey: arena.next_key(),
        uprn: snapshot.uprn,
        note: text.to_string(),
        sequence: arena.next_sequence(),
        change_type: ChangeType::Insert,
    });
}

/// Arena continuing from the keys and sequences already on the record.
fn note_arena(snapshot: &PropertySnapshot) -> DraftKeyArena {
    let keys: Vec<i64> = snapshot.notes.iter().map(|note| note.pkey).collect();
    let sequences: Vec<i32> = snapshot.notes.iter().map(|note| note.sequence).collect();
    DraftKeyArena::seeded(keys.iter(), sequences.iter())
}

/// Copy the parent's PAO into the child's SAO for each LPI with a matching
/// language and logical-status variant. The Scottish schema also carries the
/// parent LPI's post town and sub-locality onto the child.
fn propagate_parent_pao(child: &mut PropertySnapshot, parent: &PropertySnapshot) {
    let jurisdiction = child.jurisdiction;
    for lpi in &mut child.lpis {
        let Some(parent_lpi) = parent.lpi_for(lpi.language, lpi.logical_status) else {
            continue;
        };
        lpi.sao = parent_lpi.pao.clone();
        lpi.change_type = ChangeType::Update;
        if jurisdiction == Jurisdiction::Scottish {
            lpi.post_town_ref = parent_lpi.post_town_ref;
            lpi.sub_locality_ref = parent_lpi.sub_locality_ref;
        }
    }
}

/// Close out any live classification sub-records and append a draft record
/// carrying the new code.
fn set_scottish_classification(snapshot: &mut PropertySnapshot, code: &str, today: NaiveDate) {
    let mut arena = {
        let classes = snapshot.classifications.as_deref().unwrap_or_default();
        let keys: Vec<i64> = classes.iter().map(|class| class.class_key).collect();
        let no_sequences: [i32; 0] = [];
        DraftKeyArena::seeded(keys.iter(), no_sequences.iter())
    };

    let classes = snapshot.classifications.get_or_insert_with(Vec::new);
    let scheme = classes
        .first()
        .map(|class| class.scheme.clone())
        .unwrap_or_else(|| "OSG".to_string());
    for class in classes.iter_mut() {
        if class.change_type != ChangeType::Delete {
            class.change_type = ChangeType::Delete;
            class.end_date = Some(today);
        }
    }
    classes.push(ClassificationRecord {
        class_key: arena.next_key(),
        classification_code: code.to_string(),
        scheme,
        change_type: ChangeType::Insert,
        start_date: today,
        end_date: None,
    });
}
