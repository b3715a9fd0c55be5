//! Environment/runtime helpers
//!
//! Sanity checks to run before the listener is bound.

use tracing::warn;

/// Warn when the static frontend directory is missing; the API still works without it.
pub async fn ensure_env(frontend_dir: &str) -> anyhow::Result<()> {
    match tokio::fs::metadata(frontend_dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("{frontend_dir} exists but is not a directory")),
        Err(_) => {
            warn!(%frontend_dir, "frontend assets directory not found; static assets may 404");
            Ok(())
        }
    }
}
