//! Create `cat` table.
//!
//! `seq` records insertion order so listings come back oldest first.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cat::Table)
                    .if_not_exists()
                    .col(string_len(Cat::Id, 64).primary_key())
                    .col(big_integer(Cat::Seq).unique_key().not_null())
                    .col(string(Cat::Name).not_null())
                    .col(integer(Cat::Age).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Cat::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Cat { Table, Id, Seq, Name, Age }
