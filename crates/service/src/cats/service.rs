use std::sync::Arc;

use common::metrics;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::domain::{fixtures, Cat, CreateCatInput, UpdateCatInput};
use super::repository::CatRepository;
use crate::errors::ServiceError;

/// Cat store business service, independent of web framework and backend.
///
/// Validation happens here so both backends reject the same inputs, and
/// unknown ids surface as `NotFound` for reads, updates and deletes alike.
#[derive(Clone)]
pub struct CatService {
    repo: Arc<dyn CatRepository>,
}

fn observe<T>(operation: &str, res: &Result<T, ServiceError>) {
    let outcome = match res {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::record_operation(operation, outcome);
}

impl CatService {
    pub fn new(repo: Arc<dyn CatRepository>) -> Self { Self { repo } }

    pub fn backend(&self) -> &'static str { self.repo.backend() }

    async fn refresh_size(&self) {
        match self.repo.count().await {
            Ok(n) => metrics::set_collection_size(n),
            Err(e) => warn!(error = %e, "cat count failed"),
        }
    }

    /// Insert the sandy/rocky fixtures if the collection is empty.
    /// Returns how many cats were inserted.
    pub async fn seed_fixtures(&self) -> Result<usize, ServiceError> {
        if self.repo.count().await? > 0 {
            info!(backend = self.backend(), "collection not empty; fixtures skipped");
            return Ok(0);
        }
        let seeded = fixtures();
        let n = seeded.len();
        for cat in seeded {
            self.repo.insert(cat).await?;
        }
        self.refresh_size().await;
        info!(backend = self.backend(), count = n, "fixtures seeded");
        Ok(n)
    }

    /// Add a cat under a fresh UUID.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::cats::{CatService, repo::InMemoryCatRepository, domain::{CreateCatInput, Scalar}};
    /// let svc = CatService::new(Arc::new(InMemoryCatRepository::new()));
    /// let input = CreateCatInput { name: Some("mittens".into()), age: Some(Scalar::Int(3)) };
    /// let cat = tokio_test::block_on(svc.create(&input)).unwrap();
    /// assert_eq!(cat.name, "mittens");
    /// assert_eq!(tokio_test::block_on(svc.get(&cat.id)).unwrap(), cat);
    /// ```
    #[instrument(skip(self, input), fields(backend = self.backend()))]
    pub async fn create(&self, input: &CreateCatInput) -> Result<Cat, ServiceError> {
        let res = async {
            let fields = input.validate()?;
            let cat = Cat { id: Uuid::new_v4().to_string(), name: fields.name, age: fields.age };
            self.repo.insert(cat).await
        }
        .await;
        observe("create", &res);
        if let Ok(cat) = &res {
            info!(id = %cat.id, name = %cat.name, age = cat.age, "cat_created");
            self.refresh_size().await;
        }
        res
    }

    #[instrument(skip(self), fields(backend = self.backend()))]
    pub async fn list(&self) -> Result<Vec<Cat>, ServiceError> {
        let res = self.repo.list().await;
        observe("list", &res);
        if let Ok(cats) = &res {
            debug!(count = cats.len(), "cats_listed");
            metrics::set_collection_size(cats.len());
        }
        res
    }

    #[instrument(skip(self), fields(backend = self.backend()))]
    pub async fn get(&self, id: &str) -> Result<Cat, ServiceError> {
        let res = match self.repo.get(id).await {
            Ok(Some(cat)) => Ok(cat),
            Ok(None) => Err(ServiceError::cat_not_found(id)),
            Err(e) => Err(e),
        };
        observe("get", &res);
        res
    }

    /// Replace name and age of an existing cat; the id never changes.
    #[instrument(skip(self, input), fields(backend = self.backend()))]
    pub async fn update(&self, input: &UpdateCatInput) -> Result<Cat, ServiceError> {
        let res = async {
            let (id, fields) = input.validate()?;
            self.repo
                .update(&id, fields)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("unable to find and update cat with id {id}")))
        }
        .await;
        observe("update", &res);
        if let Ok(cat) = &res {
            info!(id = %cat.id, name = %cat.name, age = cat.age, "cat_updated");
        }
        res
    }

    /// Remove a cat and return it. Deleting the same id twice yields `NotFound` the second time.
    #[instrument(skip(self), fields(backend = self.backend()))]
    pub async fn delete(&self, id: &str) -> Result<Cat, ServiceError> {
        let res = match self.repo.delete(id).await {
            Ok(Some(cat)) => Ok(cat),
            Ok(None) => Err(ServiceError::NotFound(format!("unable to find and delete cat with id {id}"))),
            Err(e) => Err(e),
        };
        observe("delete", &res);
        if let Ok(cat) = &res {
            info!(id = %cat.id, name = %cat.name, "cat_adopted");
            self.refresh_size().await;
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cats::domain::Scalar;
    use crate::cats::repo::InMemoryCatRepository;

    async fn seeded() -> CatService {
        let svc = CatService::new(Arc::new(InMemoryCatRepository::new()));
        assert_eq!(svc.seed_fixtures().await.unwrap(), 2);
        svc
    }

    fn new_cat(name: &str, age: i64) -> CreateCatInput {
        CreateCatInput { name: Some(name.into()), age: Some(Scalar::Int(age)) }
    }

    fn change(id: &str, name: &str, age: i64) -> UpdateCatInput {
        UpdateCatInput { id: Some(Scalar::Text(id.into())), name: Some(name.into()), age: Some(Scalar::Int(age)) }
    }

    #[tokio::test]
    async fn seeding_only_fills_an_empty_collection() {
        let svc = seeded().await;
        assert_eq!(svc.seed_fixtures().await.unwrap(), 0);
        assert_eq!(svc.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn shelter_scenario() {
        let svc = seeded().await;

        let mittens = svc.create(&new_cat("mittens", 3)).await.unwrap();
        let cats = svc.list().await.unwrap();
        assert_eq!(cats.len(), 3);
        assert!(mittens.id != "0" && mittens.id != "1");
        assert_eq!(cats.last(), Some(&mittens));

        let adopted = svc.delete("0").await.unwrap();
        assert_eq!(adopted.name, "sandy");
        let cats = svc.list().await.unwrap();
        assert_eq!(cats.len(), 2);
        assert!(cats.iter().all(|c| c.id != "0"));
    }

    #[tokio::test]
    async fn create_with_missing_field_leaves_collection_unchanged() {
        let svc = seeded().await;
        let err = svc.create(&CreateCatInput { name: Some("nameless-age".into()), age: None }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let svc = seeded().await;
        let err = svc.get("never-issued").await.unwrap_err();
        assert_eq!(err.to_string(), "could not find cat with id never-issued");
    }

    #[tokio::test]
    async fn update_keeps_id_and_reports_unknown_ids() {
        let svc = seeded().await;
        let updated = svc.update(&change("1", "rocky balboa", 9)).await.unwrap();
        assert_eq!(updated, Cat { id: "1".into(), name: "rocky balboa".into(), age: 9 });
        assert_eq!(svc.get("1").await.unwrap(), updated);

        let before = svc.list().await.unwrap();
        let err = svc.update(&change("42", "ghost", 1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(svc.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn repeated_delete_is_not_found_and_changes_nothing() {
        let svc = seeded().await;
        svc.delete("1").await.unwrap();
        let after_first = svc.list().await.unwrap();
        let err = svc.delete("1").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(svc.list().await.unwrap(), after_first);
    }
}
