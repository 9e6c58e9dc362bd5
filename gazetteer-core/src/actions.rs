//! Action resolver
//!
//! Pure mapping from selection composition, user capabilities and record
//! state to the list of enabled actions. No state is held; callers
//! recompute whenever selection or permissions change.

use crate::{RecordKind, SelectionComposition, StreetRecordType};

/// An action the UI may offer for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CopyIdentifier,
    OpenInMapView,
    Zoom,
    AddProperty,
    MoveSeedPoint,
    MakeChildOf,
    EditLogicalStatus,
    EditClassification,
    RemoveCrossRefs,
    RemoveFromList,
    DeleteRecords,
    DivideEsu,
    MergeEsus,
}

/// User capability flags gating editing and destructive actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub edit_property: bool,
    pub edit_street: bool,
    pub delete_records: bool,
}

/// State flags of the selected street, where one is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreetState {
    pub closed: bool,
    pub record_type: StreetRecordType,
}

impl StreetState {
    /// Whether new properties may be added to this street.
    pub fn accepts_properties(&self) -> bool {
        !self.closed && !self.record_type.is_restricted()
    }
}

/// Resolve the enabled actions for a selection.
///
/// A single selection offers a superset of the multi-selection actions
/// (copy identifier, open in external map view, zoom); multi-selection only
/// offers bulk edits and deletes. A mixed selection other than
/// street+property yields no actions at all.
pub fn resolve_actions(
    composition: SelectionComposition,
    count: usize,
    capabilities: &Capabilities,
    street_state: Option<&StreetState>,
) -> Vec<Action> {
    let mut actions = Vec::new();
    if count == 0 {
        return actions;
    }

    match composition {
        SelectionComposition::Empty => {}
        SelectionComposition::Mixed => {}
        SelectionComposition::StreetAndProperty => {
            actions.push(Action::RemoveFromList);
        }
        SelectionComposition::Single(kind) => {
            let single = count == 1;
            if single {
                actions.push(Action::CopyIdentifier);
                actions.push(Action::OpenInMapView);
                actions.push(Action::Zoom);
            }
            match kind {
                RecordKind::Property => {
                    if capabilities.edit_property {
                        actions.push(Action::MoveSeedPoint);
                        actions.push(Action::MakeChildOf);
                        actions.push(Action::EditLogicalStatus);
                        actions.push(Action::EditClassification);
                        actions.push(Action::RemoveCrossRefs);
                    }
                    actions.push(Action::RemoveFromList);
                }
                RecordKind::Street => {
                    let accepts = street_state.is_some_and(StreetState::accepts_properties);
                    if single && capabilities.edit_street && accepts {
                        actions.push(Action::AddProperty);
                    }
                    actions.push(Action::RemoveFromList);
                }
                RecordKind::Esu => {
                    if capabilities.edit_street {
                        if single {
                            actions.push(Action::DivideEsu);
                        } else {
                            actions.push(Action::MergeEsus);
                        }
                    }
                }
                _ => {}
            }
            if capabilities.delete_records {
                actions.push(Action::DeleteRecords);
            }
        }
    }

    actions
}
