//! Director store port

use super::StoreError;
use async_trait::async_trait;
use boardroom_domain::{Director, DirectorId};

/// Persistence port for director records.
///
/// Directors referenced by participants or statements must never be removed
/// from the store; archiving is a status update.
#[async_trait]
pub trait DirectorStore: Send + Sync {
    /// Insert a new director; the store assigns the id.
    async fn insert(&self, director: Director) -> Result<Director, StoreError>;

    async fn get(&self, id: DirectorId) -> Result<Option<Director>, StoreError>;

    /// Fetch several directors at once. Missing ids are silently absent from
    /// the result; the caller decides whether that is an error.
    async fn get_many(&self, ids: &[DirectorId]) -> Result<Vec<Director>, StoreError>;

    async fn list(&self) -> Result<Vec<Director>, StoreError>;

    async fn update(&self, director: &Director) -> Result<(), StoreError>;
}
