use async_trait::async_trait;

use super::domain::{Cat, CatFields};
use crate::errors::ServiceError;

/// Storage capability set shared by every cat backend.
///
/// Lookups return `Ok(None)` for an unknown id; turning that into a
/// `NotFound` is the service's business.
#[async_trait]
pub trait CatRepository: Send + Sync {
    /// Short name used in logs and startup output.
    fn backend(&self) -> &'static str;

    /// Append a fully formed cat. Fails with `Conflict` if the id is taken.
    async fn insert(&self, cat: Cat) -> Result<Cat, ServiceError>;
    /// Every cat, in insertion order.
    async fn list(&self) -> Result<Vec<Cat>, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<Cat>, ServiceError>;
    /// Replace name and age in place, keeping id and position.
    async fn update(&self, id: &str, fields: CatFields) -> Result<Option<Cat>, ServiceError>;
    /// Remove and return the matching cat.
    async fn delete(&self, id: &str) -> Result<Option<Cat>, ServiceError>;
    async fn count(&self) -> Result<usize, ServiceError>;
}
