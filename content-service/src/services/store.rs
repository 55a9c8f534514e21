//! Persistence seam for generation records.

use crate::models::{GenerationFilter, GenerationRecord, StoredGeneration};
use async_trait::async_trait;
use service_core::error::AppError;

/// A document store holding one collection of generation records.
///
/// Unknown or malformed ids are reported as "not found", never as errors.
#[async_trait]
pub trait GenerationStore: Send + Sync {
    /// Insert a record and return its id as plain hex.
    async fn insert(&self, record: &GenerationRecord) -> Result<String, AppError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<StoredGeneration>, AppError>;

    /// Newest records first, at most `limit`.
    async fn query(
        &self,
        filter: &GenerationFilter,
        limit: i64,
    ) -> Result<Vec<StoredGeneration>, AppError>;

    /// `true` when a record was removed.
    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError>;
}
