//! Enum types for gazetteer records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// RECORD ENUMS
// ============================================================================

/// BS 7666 logical status of a BLPU or LPI.
///
/// Serialized as the numeric wire code. Ordering follows the numeric codes,
/// which is what the make-child-of rule compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum LogicalStatus {
    Approved,
    Alternative,
    Provisional,
    Historical,
    Rejected,
}

impl LogicalStatus {
    pub const fn code(self) -> i32 {
        match self {
            Self::Approved => 1,
            Self::Alternative => 3,
            Self::Provisional => 6,
            Self::Historical => 8,
            Self::Rejected => 9,
        }
    }
}

impl From<LogicalStatus> for i32 {
    fn from(status: LogicalStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i32> for LogicalStatus {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Approved),
            3 => Ok(Self::Alternative),
            6 => Ok(Self::Provisional),
            8 => Ok(Self::Historical),
            9 => Ok(Self::Rejected),
            other => Err(format!("Unknown logical status code: {}", other)),
        }
    }
}

/// Change type marker carried on every sub-record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    #[serde(rename = "I")]
    Insert,
    #[serde(rename = "U")]
    Update,
    /// Soft-delete marker; the record is closed out, not removed.
    #[serde(rename = "D")]
    Delete,
}

/// LPI language variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "ENG")]
    English,
    #[serde(rename = "CYM")]
    Welsh,
    #[serde(rename = "GAE")]
    Gaelic,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::English => "ENG",
            Self::Welsh => "CYM",
            Self::Gaelic => "GAE",
        };
        write!(f, "{}", code)
    }
}

/// Representative Point Code - what a BLPU's seed point coordinate means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum RepresentativePointCode {
    VisualCentre,
    GeneralInternal,
    SouthWestCorner,
    StartOfReferencedStreet,
    GeneralPoint,
    Unspecified,
}

impl RepresentativePointCode {
    pub const fn code(self) -> i32 {
        match self {
            Self::VisualCentre => 1,
            Self::GeneralInternal => 2,
            Self::SouthWestCorner => 3,
            Self::StartOfReferencedStreet => 4,
            Self::GeneralPoint => 5,
            Self::Unspecified => 9,
        }
    }
}

impl From<RepresentativePointCode> for i32 {
    fn from(rpc: RepresentativePointCode) -> Self {
        rpc.code()
    }
}

impl TryFrom<i32> for RepresentativePointCode {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::VisualCentre),
            2 => Ok(Self::GeneralInternal),
            3 => Ok(Self::SouthWestCorner),
            4 => Ok(Self::StartOfReferencedStreet),
            5 => Ok(Self::GeneralPoint),
            9 => Ok(Self::Unspecified),
            other => Err(format!("Unknown RPC code: {}", other)),
        }
    }
}

/// Street record type. Types 3 and 4 are restricted: no properties may be
/// added to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum StreetRecordType {
    OfficialDesignated,
    StreetDescription,
    NumberedStreet,
    UnofficialName,
    DescriptionOnly,
}

impl StreetRecordType {
    pub const fn code(self) -> i32 {
        match self {
            Self::OfficialDesignated => 1,
            Self::StreetDescription => 2,
            Self::NumberedStreet => 3,
            Self::UnofficialName => 4,
            Self::DescriptionOnly => 9,
        }
    }

    /// Restricted types do not accept new properties.
    pub const fn is_restricted(self) -> bool {
        matches!(self, Self::NumberedStreet | Self::UnofficialName)
    }
}

impl From<StreetRecordType> for i32 {
    fn from(record_type: StreetRecordType) -> Self {
        record_type.code()
    }
}

impl TryFrom<i32> for StreetRecordType {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::OfficialDesignated),
            2 => Ok(Self::StreetDescription),
            3 => Ok(Self::NumberedStreet),
            4 => Ok(Self::UnofficialName),
            9 => Ok(Self::DescriptionOnly),
            other => Err(format!("Unknown street record type: {}", other)),
        }
    }
}

/// Which schema family a snapshot follows. Fixed once per record; all
/// jurisdiction-dependent behavior matches on this tag instead of probing
/// field shapes at each call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    /// Classification and organisation live on the BLPU itself.
    EnglandWales,
    /// Classification, organisation and successor cross-references are
    /// separate sub-record collections.
    Scottish,
}

// ============================================================================
// SELECTION / ERROR GROUPING ENUMS
// ============================================================================

/// Kind discriminator for selectable records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    Street,
    Property,
    Esu,
    Classification,
    Organisation,
    CrossRef,
    Provenance,
    Note,
    SuccessorCrossRef,
}

/// Sub-entity grouping for field-level validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubEntity {
    Blpu,
    Lpi,
    Provenance,
    CrossRef,
    Classification,
    Organisation,
    SuccessorCrossRef,
    Note,
}

impl fmt::Display for SubEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Blpu => "BLPU",
            Self::Lpi => "LPI",
            Self::Provenance => "Provenance",
            Self::CrossRef => "Cross reference",
            Self::Classification => "Classification",
            Self::Organisation => "Organisation",
            Self::SuccessorCrossRef => "Successor cross reference",
            Self::Note => "Note",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for SubEntity {
    type Err = String;

    /// Parse the collection prefix of a wire error path (`lpis[0].postcode`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blpu" => Ok(Self::Blpu),
            "lpis" | "lpi" => Ok(Self::Lpi),
            "provenances" | "provenance" => Ok(Self::Provenance),
            "crossRefs" | "crossRef" => Ok(Self::CrossRef),
            "classifications" | "classification" => Ok(Self::Classification),
            "organisations" | "organisation" => Ok(Self::Organisation),
            "successorCrossRefs" | "successorCrossRef" => Ok(Self::SuccessorCrossRef),
            "notes" | "note" => Ok(Self::Note),
            other => Err(format!("Unknown sub-entity prefix: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_status_roundtrip() {
        for status in [
            LogicalStatus::Approved,
            LogicalStatus::Alternative,
            LogicalStatus::Provisional,
            LogicalStatus::Historical,
            LogicalStatus::Rejected,
        ] {
            assert_eq!(LogicalStatus::try_from(status.code()), Ok(status));
        }
        assert!(LogicalStatus::try_from(2).is_err());
    }

    #[test]
    fn test_logical_status_ordering_follows_codes() {
        assert!(LogicalStatus::Approved < LogicalStatus::Provisional);
        assert!(LogicalStatus::Provisional < LogicalStatus::Historical);
    }

    #[test]
    fn test_change_type_wire_form() {
        assert_eq!(serde_json::to_string(&ChangeType::Delete).unwrap(), "\"D\"");
        let parsed: ChangeType = serde_json::from_str("\"I\"").unwrap();
        assert_eq!(parsed, ChangeType::Insert);
    }

    #[test]
    fn test_street_record_type_restriction() {
        assert!(StreetRecordType::NumberedStreet.is_restricted());
        assert!(StreetRecordType::UnofficialName.is_restricted());
        assert!(!StreetRecordType::OfficialDesignated.is_restricted());
    }

    #[test]
    fn test_sub_entity_path_prefix_parse() {
        assert_eq!("lpis".parse::<SubEntity>(), Ok(SubEntity::Lpi));
        assert_eq!("blpu".parse::<SubEntity>(), Ok(SubEntity::Blpu));
        assert_eq!(
            "successorCrossRefs".parse::<SubEntity>(),
            Ok(SubEntity::SuccessorCrossRef)
        );
        assert!("unknown".parse::<SubEntity>().is_err());
    }

    #[test]
    fn test_sub_entity_display() {
        assert_eq!(SubEntity::Blpu.to_string(), "BLPU");
        assert_eq!(SubEntity::CrossRef.to_string(), "Cross reference");
    }
}
