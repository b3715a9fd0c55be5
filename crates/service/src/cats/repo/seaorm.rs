use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;

use crate::cats::domain::{Cat, CatFields};
use crate::cats::repository::CatRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository over the `cat` table.
///
/// Writes go through `write_lock` one at a time: `create` derives the next
/// `seq` from the current maximum, and SQLite refuses two upgrading write
/// transactions at once.
pub struct SeaOrmCatRepository {
    pub db: DatabaseConnection,
    write_lock: Mutex<()>,
}

impl SeaOrmCatRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db, write_lock: Mutex::new(()) } }
}

#[async_trait::async_trait]
impl CatRepository for SeaOrmCatRepository {
    fn backend(&self) -> &'static str { "database" }

    async fn insert(&self, cat: Cat) -> Result<Cat, ServiceError> {
        let _guard = self.write_lock.lock().await;
        if models::cat::find(&self.db, &cat.id).await?.is_some() {
            return Err(ServiceError::Conflict(format!("cat with id {} already exists", cat.id)));
        }
        let created = models::cat::create(&self.db, &cat.id, &cat.name, cat.age).await?;
        Ok(created.into())
    }

    async fn list(&self) -> Result<Vec<Cat>, ServiceError> {
        let rows = models::cat::list(&self.db).await?;
        Ok(rows.into_iter().map(Cat::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Cat>, ServiceError> {
        Ok(models::cat::find(&self.db, id).await?.map(Cat::from))
    }

    async fn update(&self, id: &str, fields: CatFields) -> Result<Option<Cat>, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let updated = models::cat::update(&self.db, id, &fields.name, fields.age).await?;
        Ok(updated.map(Cat::from))
    }

    async fn delete(&self, id: &str) -> Result<Option<Cat>, ServiceError> {
        let _guard = self.write_lock.lock().await;
        Ok(models::cat::delete(&self.db, id).await?.map(Cat::from))
    }

    async fn count(&self) -> Result<usize, ServiceError> {
        let n = models::cat::count(&self.db).await?;
        Ok(n as usize)
    }
}
