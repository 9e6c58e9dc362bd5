//! Gazetteer Core - Record Types
//!
//! Pure data structures and pure logic for the gazetteer batch-edit engine:
//! identifiers, record snapshots, selection state, the action resolver and
//! the error taxonomy. No I/O lives here.

pub mod actions;
pub mod enums;
pub mod error;
pub mod identity;
pub mod lookup;
pub mod records;
pub mod selection;

pub use actions::{resolve_actions, Action, Capabilities, StreetState};
pub use enums::{
    ChangeType, Jurisdiction, Language, LogicalStatus, RecordKind, RepresentativePointCode,
    StreetRecordType, SubEntity,
};
pub use error::{FetchError, FieldError, GazetteerError, GazetteerResult, SaveError};
pub use identity::{DraftKeyArena, Uprn, Usrn};
pub use lookup::LookupTables;
pub use records::{
    AddressableObject, Blpu, ClassificationRecord, CrossRef, Lpi, MapPin, NoteRecord,
    OrganisationRecord, PropertySnapshot, ProvenanceRecord, SearchRow, SuccessorCrossRef,
};
pub use selection::{SelectionComposition, SelectionKinds, SelectionModel, SelectionNode};
