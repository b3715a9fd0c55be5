use std::time::Duration;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// Lifetime given to the single `sqlite::memory:` connection; recycling it would drop every row.
const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 100);

/// An in-memory SQLite database lives inside a single connection, so the pool is pinned to one.
fn is_sqlite_memory(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("sqlite::memory:") || lower.contains("mode=memory")
}

fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if is_sqlite_memory(&cfg.url) {
        opt.max_connections(1)
            .min_connections(1)
            .idle_timeout(MEMORY_CONNECTION_LIFETIME)
            .max_lifetime(MEMORY_CONNECTION_LIFETIME);
    } else {
        opt.max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }
    opt
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(connect_options(cfg)).await?;
    Ok(db)
}

/// Connect and bring the schema up to date.
pub async fn connect_and_migrate(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(cfg).await?;
    migration::Migrator::up(&db, None).await?;
    info!(backend = ?db.get_database_backend(), "database migrations applied");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_connection_is_never_recycled() {
        let opt = connect_options(&DatabaseConfig::with_url("sqlite::memory:"));
        assert_eq!(opt.get_max_connections(), Some(1));
        assert_eq!(opt.get_min_connections(), Some(1));
        assert_eq!(opt.get_max_lifetime(), Some(MEMORY_CONNECTION_LIFETIME));
        assert_eq!(opt.get_idle_timeout(), Some(MEMORY_CONNECTION_LIFETIME));
    }

    #[test]
    fn file_and_server_urls_use_configured_pool() {
        let mut cfg = DatabaseConfig::with_url("postgres://u:p@localhost:5432/cats");
        cfg.max_connections = 7;
        cfg.max_lifetime_secs = 120;
        let opt = connect_options(&cfg);
        assert_eq!(opt.get_max_connections(), Some(7));
        assert_eq!(opt.get_max_lifetime(), Some(Duration::from_secs(120)));
    }
}
