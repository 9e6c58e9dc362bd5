//! Record snapshot structures
//!
//! `PropertySnapshot` is the full authoritative representation of a property
//! as fetched from the server. The lightweight `SearchRow` and `MapPin`
//! projections are what the client-side caches hold.

use crate::{
    ChangeType, Jurisdiction, Language, LogicalStatus, LookupTables, RepresentativePointCode,
    Uprn, Usrn,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Addressable object fields - the same shape serves PAO and SAO.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressableObject {
    pub start_number: Option<i32>,
    pub start_suffix: Option<String>,
    pub end_number: Option<i32>,
    pub end_suffix: Option<String>,
    pub text: Option<String>,
}

impl AddressableObject {
    pub fn is_empty(&self) -> bool {
        self.start_number.is_none()
            && self.start_suffix.is_none()
            && self.end_number.is_none()
            && self.end_suffix.is_none()
            && self.text.is_none()
    }

    /// Render as a display fragment, e.g. `"10A-12 High Street"`.
    pub fn label(&self) -> String {
        let mut number = String::new();
        if let Some(start) = self.start_number {
            number.push_str(&start.to_string());
            if let Some(suffix) = &self.start_suffix {
                number.push_str(suffix);
            }
            if let Some(end) = self.end_number {
                number.push('-');
                number.push_str(&end.to_string());
                if let Some(suffix) = &self.end_suffix {
                    number.push_str(suffix);
                }
            }
        }
        match (&self.text, number.is_empty()) {
            (Some(text), true) => text.clone(),
            (Some(text), false) => format!("{} {}", number, text),
            (None, _) => number,
        }
    }
}

/// Basic Land and Property Unit - the core property record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blpu {
    pub logical_status: LogicalStatus,
    pub rpc: RepresentativePointCode,
    pub easting: f64,
    pub northing: f64,
    pub parent_uprn: Option<Uprn>,
    /// England/Wales schema carries the classification code here.
    pub classification_code: Option<String>,
    pub change_type: ChangeType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Land and Property Identifier - a language-specific address for a BLPU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lpi {
    pub lpi_key: Option<String>,
    pub language: Language,
    pub logical_status: LogicalStatus,
    pub sao: AddressableObject,
    pub pao: AddressableObject,
    pub usrn: Usrn,
    pub postcode_ref: Option<i64>,
    pub post_town_ref: Option<i64>,
    pub sub_locality_ref: Option<i64>,
    pub official_address: bool,
    pub postally_addressable: bool,
    pub change_type: ChangeType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Extent-of-interest provenance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvenanceRecord {
    pub prov_key: i64,
    pub provenance_code: String,
    pub annotation: Option<String>,
    pub change_type: ChangeType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Cross-reference to an external dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossRef {
    pub xref_key: i64,
    pub source_id: i64,
    pub cross_reference: String,
    pub change_type: ChangeType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Scottish-schema classification sub-record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRecord {
    pub class_key: i64,
    pub classification_code: String,
    pub scheme: String,
    pub change_type: ChangeType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Scottish-schema organisation sub-record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationRecord {
    pub org_key: i64,
    pub organisation: String,
    pub legal_name: Option<String>,
    pub change_type: ChangeType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Scottish-schema successor cross-reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessorCrossRef {
    pub succ_key: i64,
    pub successor: Uprn,
    pub predecessor: Uprn,
    pub change_type: ChangeType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Free-text annotation attached to a BLPU.
///
/// Draft notes carry synthetic negative primary keys issued by
/// [`crate::DraftKeyArena`] until the server assigns real ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub pkey: i64,
    pub uprn: Uprn,
    pub note: String,
    pub sequence: i32,
    pub change_type: ChangeType,
}

/// Full authoritative representation of a property, as fetched from and
/// submitted to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySnapshot {
    pub uprn: Uprn,
    pub jurisdiction: Jurisdiction,
    pub blpu: Blpu,
    pub lpis: Vec<Lpi>,
    pub provenances: Vec<ProvenanceRecord>,
    pub cross_refs: Vec<CrossRef>,
    pub notes: Vec<NoteRecord>,
    /// Scottish schema only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifications: Option<Vec<ClassificationRecord>>,
    /// Scottish schema only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisations: Option<Vec<OrganisationRecord>>,
    /// Scottish schema only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successor_cross_refs: Option<Vec<SuccessorCrossRef>>,
}

impl PropertySnapshot {
    /// The LPI for a language, preferring an exact logical-status match.
    pub fn lpi_for(&self, language: Language, status: LogicalStatus) -> Option<&Lpi> {
        self.lpis
            .iter()
            .find(|lpi| lpi.language == language && lpi.logical_status == status)
            .or_else(|| self.lpis.iter().find(|lpi| lpi.language == language))
    }

    /// Human-readable address label for the first LPI in a language,
    /// falling back to any LPI. Captured before an edit so failures can
    /// still be reported with an address.
    pub fn address_label(&self, language: Language, lookups: &LookupTables) -> String {
        let lpi = self
            .lpis
            .iter()
            .find(|lpi| lpi.language == language)
            .or_else(|| self.lpis.first());

        let Some(lpi) = lpi else {
            return self.uprn.to_string();
        };

        let mut parts: Vec<String> = Vec::new();
        let sao = lpi.sao.label();
        if !sao.is_empty() {
            parts.push(sao);
        }
        let pao = lpi.pao.label();
        if !pao.is_empty() {
            parts.push(pao);
        }
        if let Some(town) = lpi.post_town_ref.and_then(|key| lookups.post_town(key)) {
            parts.push(town.to_string());
        }
        if let Some(postcode) = lpi.postcode_ref.and_then(|key| lookups.postcode(key)) {
            parts.push(postcode.to_string());
        }

        if parts.is_empty() {
            self.uprn.to_string()
        } else {
            parts.join(", ")
        }
    }

    /// Effective classification code, wherever the jurisdiction keeps it.
    pub fn classification_code(&self) -> Option<&str> {
        match self.jurisdiction {
            Jurisdiction::EnglandWales => self.blpu.classification_code.as_deref(),
            Jurisdiction::Scottish => self
                .classifications
                .as_ref()
                .and_then(|classes| {
                    classes
                        .iter()
                        .find(|class| class.change_type != ChangeType::Delete)
                })
                .map(|class| class.classification_code.as_str()),
        }
    }

    /// One search-results row per LPI.
    pub fn search_rows(&self, lookups: &LookupTables) -> Vec<SearchRow> {
        self.lpis
            .iter()
            .map(|lpi| SearchRow {
                uprn: self.uprn,
                language: lpi.language,
                address: self.address_label(lpi.language, lookups),
                postcode: lpi
                    .postcode_ref
                    .and_then(|key| lookups.postcode(key))
                    .unwrap_or_default()
                    .to_string(),
                easting: self.blpu.easting,
                northing: self.blpu.northing,
                logical_status: self.blpu.logical_status,
                classification_code: self.classification_code().map(str::to_string),
            })
            .collect()
    }

    /// Map-pin projection for the map search layer.
    pub fn map_pin(&self, lookups: &LookupTables) -> MapPin {
        MapPin {
            id: self.uprn.to_string(),
            address: self.address_label(Language::English, lookups),
            easting: self.blpu.easting,
            northing: self.blpu.northing,
            logical_status: self.blpu.logical_status,
        }
    }
}

/// Lightweight row projection held by the search-results cache.
/// Keyed by (UPRN, language).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRow {
    pub uprn: Uprn,
    pub language: Language,
    pub address: String,
    pub postcode: String,
    pub easting: f64,
    pub northing: f64,
    pub logical_status: LogicalStatus,
    pub classification_code: Option<String>,
}

impl SearchRow {
    pub fn key(&self) -> (Uprn, Language) {
        (self.uprn, self.language)
    }
}

/// Map-pin projection held by the map search cache. Keyed by the UPRN
/// rendered as a string, matching the map layer's feature ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPin {
    pub id: String,
    pub address: String,
    pub easting: f64,
    pub northing: f64,
    pub logical_status: LogicalStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LookupTables;
    use chrono::NaiveDate;

    fn start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()
    }

    fn sample_snapshot() -> PropertySnapshot {
        PropertySnapshot {
            uprn: Uprn::new(100023456789),
            jurisdiction: Jurisdiction::EnglandWales,
            blpu: Blpu {
                logical_status: LogicalStatus::Approved,
                rpc: RepresentativePointCode::VisualCentre,
                easting: 429384.0,
                northing: 434560.0,
                parent_uprn: None,
                classification_code: Some("RD04".to_string()),
                change_type: ChangeType::Update,
                start_date: start_date(),
                end_date: None,
            },
            lpis: vec![Lpi {
                lpi_key: Some("1000234567891".to_string()),
                language: Language::English,
                logical_status: LogicalStatus::Approved,
                sao: AddressableObject::default(),
                pao: AddressableObject {
                    start_number: Some(10),
                    start_suffix: Some("A".to_string()),
                    end_number: None,
                    end_suffix: None,
                    text: Some("High Street".to_string()),
                },
                usrn: Usrn::new(12345678),
                postcode_ref: Some(7),
                post_town_ref: Some(3),
                sub_locality_ref: None,
                official_address: true,
                postally_addressable: true,
                change_type: ChangeType::Update,
                start_date: start_date(),
                end_date: None,
            }],
            provenances: Vec::new(),
            cross_refs: Vec::new(),
            notes: Vec::new(),
            classifications: None,
            organisations: None,
            successor_cross_refs: None,
        }
    }

    fn sample_lookups() -> LookupTables {
        let mut lookups = LookupTables::new();
        lookups.insert_postcode(7, "AB1 2CD");
        lookups.insert_post_town(3, "Sheffield");
        lookups
    }

    #[test]
    fn test_addressable_object_label_range() {
        let pao = AddressableObject {
            start_number: Some(10),
            start_suffix: Some("A".to_string()),
            end_number: Some(12),
            end_suffix: None,
            text: Some("High Street".to_string()),
        };
        assert_eq!(pao.label(), "10A-12 High Street");
    }

    #[test]
    fn test_address_label_joins_parts() {
        let snapshot = sample_snapshot();
        let label = snapshot.address_label(Language::English, &sample_lookups());
        assert_eq!(label, "10A High Street, Sheffield, AB1 2CD");
    }

    #[test]
    fn test_address_label_falls_back_to_uprn() {
        let mut snapshot = sample_snapshot();
        snapshot.lpis.clear();
        let label = snapshot.address_label(Language::English, &sample_lookups());
        assert_eq!(label, "100023456789");
    }

    #[test]
    fn test_search_rows_keyed_per_lpi() {
        let snapshot = sample_snapshot();
        let rows = snapshot.search_rows(&sample_lookups());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key(), (snapshot.uprn, Language::English));
        assert_eq!(rows[0].postcode, "AB1 2CD");
        assert_eq!(rows[0].classification_code.as_deref(), Some("RD04"));
    }

    #[test]
    fn test_scottish_classification_skips_deleted() {
        let mut snapshot = sample_snapshot();
        snapshot.jurisdiction = Jurisdiction::Scottish;
        snapshot.blpu.classification_code = None;
        snapshot.classifications = Some(vec![
            ClassificationRecord {
                class_key: 1,
                classification_code: "RD".to_string(),
                scheme: "OSG".to_string(),
                change_type: ChangeType::Delete,
                start_date: start_date(),
                end_date: Some(start_date()),
            },
            ClassificationRecord {
                class_key: 2,
                classification_code: "CO".to_string(),
                scheme: "OSG".to_string(),
                change_type: ChangeType::Insert,
                start_date: start_date(),
                end_date: None,
            },
        ]);
        assert_eq!(snapshot.classification_code(), Some("CO"));
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let snapshot = sample_snapshot();
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["uprn"], 100023456789i64);
        assert_eq!(value["blpu"]["logicalStatus"], 1);
        assert_eq!(value["lpis"][0]["pao"]["startNumber"], 10);
        // Scottish-only collections are absent for an England/Wales record.
        assert!(value.get("classifications").is_none());
    }
}
