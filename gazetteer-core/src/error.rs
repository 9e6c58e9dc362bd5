//! Error types for gazetteer operations

use crate::{SubEntity, Uprn};
use thiserror::Error;

/// A single field-level validation message, grouped by the sub-entity the
/// field belongs to. `index` carries the collection index from wire paths
/// like `lpis[0].postcode`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldError {
    pub sub_entity: SubEntity,
    pub index: Option<usize>,
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(
        sub_entity: SubEntity,
        index: Option<usize>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            sub_entity,
            index,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Failure to fetch a record snapshot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Record {uprn} unavailable (status {status:?})")]
    Unavailable { uprn: Uprn, status: Option<u16> },

    #[error("Fetch of {uprn} failed: {reason}")]
    Transport { uprn: Uprn, reason: String },
}

impl FetchError {
    pub fn uprn(&self) -> Uprn {
        match self {
            Self::Unavailable { uprn, .. } | Self::Transport { uprn, .. } => *uprn,
        }
    }
}

/// Failure to save an updated record snapshot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SaveError {
    /// HTTP 400 with a field-keyed error map.
    #[error("Save rejected with {} field error(s)", errors.len())]
    Validation { errors: Vec<FieldError> },

    /// HTTP 401; re-authentication is handled by an external collaborator.
    #[error("Session expired")]
    SessionExpired,

    /// Any other non-2xx outcome, reduced to an operator-facing title and
    /// description.
    #[error("Save failed: {title}: {description}")]
    Rejected { title: String, description: String },

    #[error("Save request failed: {reason}")]
    Transport { reason: String },
}

impl SaveError {
    /// Flatten any save failure into field errors so batch counters stay
    /// balanced. Non-validation variants produce a single synthetic entry.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::Validation { errors } => errors.clone(),
            Self::SessionExpired => vec![FieldError::new(
                SubEntity::Blpu,
                None,
                "record",
                "Session expired; sign in again and retry",
            )],
            Self::Rejected { title, description } => vec![FieldError::new(
                SubEntity::Blpu,
                None,
                "record",
                format!("{}: {}", title, description),
            )],
            Self::Transport { reason } => vec![FieldError::new(
                SubEntity::Blpu,
                None,
                "record",
                reason.clone(),
            )],
        }
    }
}

/// Master error type for gazetteer operations.
#[derive(Debug, Clone, Error)]
pub enum GazetteerError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Save error: {0}")]
    Save(#[from] SaveError),
}

/// Result type alias for gazetteer operations.
pub type GazetteerResult<T> = Result<T, GazetteerError>;
