//! Record gateway trait
//!
//! The seam between the batch-edit orchestrator and the HTTP client. The
//! orchestrator is handed a gateway instead of reaching for a global client,
//! which keeps the fetch/save contract testable with an in-memory fake.

use async_trait::async_trait;
use gazetteer_core::{FetchError, PropertySnapshot, SaveError, Uprn};

/// Fetch and save property snapshots.
///
/// # Contract
///
/// - `fetch` returns the full authoritative snapshot for one UPRN; any
///   non-2xx outcome (including 404) is a [`FetchError`], which the batch
///   orchestrator turns into a skip or a failure per its policy.
/// - `save` submits an updated snapshot and returns the canonical saved
///   snapshot on success. Validation rejections, session expiry and
///   unexpected statuses are the [`SaveError`] variants; implementations
///   must not panic on malformed error bodies.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    async fn fetch(&self, uprn: Uprn) -> Result<PropertySnapshot, FetchError>;

    async fn save(&self, snapshot: &PropertySnapshot) -> Result<PropertySnapshot, SaveError>;
}

#[async_trait]
impl<G: RecordGateway + ?Sized> RecordGateway for std::sync::Arc<G> {
    async fn fetch(&self, uprn: Uprn) -> Result<PropertySnapshot, FetchError> {
        (**self).fetch(uprn).await
    }

    async fn save(&self, snapshot: &PropertySnapshot) -> Result<PropertySnapshot, SaveError> {
        (**self).save(snapshot).await
    }
}
