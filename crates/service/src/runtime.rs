//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Warn when the static frontend directory is missing.
pub async fn ensure_env(frontend_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(frontend_dir).await
}
