use sea_orm::{
    entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::errors;

/// One row per cat. `seq` is internal and never leaves the service layer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cat")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub seq: i64,
    pub name: String,
    pub age: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub fn validate_id(id: &str) -> Result<(), errors::ModelError> {
    if id.trim().is_empty() {
        return Err(errors::ModelError::Validation("id required".into()));
    }
    if id.len() > 64 {
        return Err(errors::ModelError::Validation("id longer than 64 characters".into()));
    }
    Ok(())
}

/// Insert a cat at the end of the collection.
/// The next `seq` is read and the row inserted inside one transaction.
pub async fn create(db: &DatabaseConnection, id: &str, name: &str, age: i32) -> Result<Model, errors::ModelError> {
    validate_id(id)?;
    validate_name(name)?;

    let txn = db.begin().await?;
    let next_seq = Entity::find()
        .order_by_desc(Column::Seq)
        .one(&txn)
        .await?
        .map(|last| last.seq + 1)
        .unwrap_or(0);
    let am = ActiveModel {
        id: Set(id.to_owned()),
        seq: Set(next_seq),
        name: Set(name.to_owned()),
        age: Set(age),
    };
    let created = am.insert(&txn).await?;
    txn.commit().await?;
    Ok(created)
}

/// All cats, oldest first.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find().order_by_asc(Column::Seq).all(db).await?;
    Ok(rows)
}

pub async fn find(db: &DatabaseConnection, id: &str) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find_by_id(id.to_owned()).one(db).await?;
    Ok(found)
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, errors::ModelError> {
    let n = Entity::find().count(db).await?;
    Ok(n)
}

/// Replace name and age; `Ok(None)` when no row has this id.
pub async fn update(db: &DatabaseConnection, id: &str, name: &str, age: i32) -> Result<Option<Model>, errors::ModelError> {
    validate_name(name)?;
    let Some(existing) = Entity::find_by_id(id.to_owned()).one(db).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = existing.into();
    am.name = Set(name.to_owned());
    am.age = Set(age);
    let updated = am.update(db).await?;
    Ok(Some(updated))
}

/// Remove a cat and hand back the removed row; `Ok(None)` when no row has this id.
pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<Option<Model>, errors::ModelError> {
    let txn = db.begin().await?;
    let Some(existing) = Entity::find_by_id(id.to_owned()).one(&txn).await? else {
        txn.rollback().await?;
        return Ok(None);
    };
    Entity::delete_by_id(id.to_owned()).exec(&txn).await?;
    txn.commit().await?;
    Ok(Some(existing))
}
