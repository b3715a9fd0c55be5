#![cfg(test)]
use configs::DatabaseConfig;
use models::db::connect_and_migrate;
use sea_orm::DatabaseConnection;

/// Private in-memory SQLite database with the schema applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    connect_and_migrate(&DatabaseConfig::with_url("sqlite::memory:")).await
}
