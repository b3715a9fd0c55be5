use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cats::domain::{Cat, CatFields};
use crate::cats::repository::CatRepository;
use crate::errors::ServiceError;

/// Process-lifetime collection kept in an ordered `Vec`.
///
/// Each operation holds the lock for its whole read-modify-write, so a
/// request never observes another request's half-applied change.
#[derive(Default)]
pub struct InMemoryCatRepository {
    cats: RwLock<Vec<Cat>>,
}

impl InMemoryCatRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl CatRepository for InMemoryCatRepository {
    fn backend(&self) -> &'static str { "memory" }

    async fn insert(&self, cat: Cat) -> Result<Cat, ServiceError> {
        let mut cats = self.cats.write().await;
        if cats.iter().any(|c| c.id == cat.id) {
            return Err(ServiceError::Conflict(format!("cat with id {} already exists", cat.id)));
        }
        cats.push(cat.clone());
        Ok(cat)
    }

    async fn list(&self) -> Result<Vec<Cat>, ServiceError> {
        Ok(self.cats.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Cat>, ServiceError> {
        let cats = self.cats.read().await;
        Ok(cats.iter().find(|c| c.id == id).cloned())
    }

    async fn update(&self, id: &str, fields: CatFields) -> Result<Option<Cat>, ServiceError> {
        let mut cats = self.cats.write().await;
        let Some(existing) = cats.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        existing.name = fields.name;
        existing.age = fields.age;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: &str) -> Result<Option<Cat>, ServiceError> {
        let mut cats = self.cats.write().await;
        let Some(idx) = cats.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        Ok(Some(cats.remove(idx)))
    }

    async fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.cats.read().await.len())
    }
}
