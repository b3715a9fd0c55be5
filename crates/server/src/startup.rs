use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StoreBackend};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, AppState};
use service::{
    cats::{repo::{InMemoryCatRepository, SeaOrmCatRepository}, CatRepository, CatService},
    runtime,
};

/// Any origin, with credentials: the request origin is mirrored back.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Pick the backend named in config and seed it if asked to.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let repo: Arc<dyn CatRepository> = match cfg.store.backend {
        StoreBackend::Memory => Arc::new(InMemoryCatRepository::new()),
        StoreBackend::Database => {
            let db = models::db::connect_and_migrate(&cfg.database).await?;
            Arc::new(SeaOrmCatRepository::new(db))
        }
    };
    let cats = CatService::new(repo);
    if cfg.store.seed_fixtures {
        cats.seed_fixtures().await?;
    }
    info!(backend = cats.backend(), "cat store ready");
    Ok(AppState { cats })
}

pub fn build_app(cfg: &AppConfig, state: AppState) -> Router {
    routes::build_router(state, build_cors(), &cfg.server.static_dir)
}

/// Build the app from config and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.server.static_dir).await?;

    let state = build_state(&cfg).await?;
    let app = build_app(&cfg, state);

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "cat shelter app backend listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
