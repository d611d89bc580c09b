use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AppConfig;
use service::{
    cafe::{CafeRepository, CafeService, SeaOrmCafeRepository},
    runtime,
};

use crate::routes;
use crate::state::{ServerAuthConfig, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// State wired to a SeaORM repository over `db`.
pub fn build_state(db: DatabaseConnection, api_key: impl Into<String>) -> ServerState {
    let repo: Arc<dyn CafeRepository> = Arc::new(SeaOrmCafeRepository { db });
    ServerState {
        cafes: CafeService::new(repo),
        auth: ServerAuthConfig { api_key: api_key.into() },
    }
}

/// Connect, migrate and assemble the router for `cfg`.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    runtime::ensure_env(&cfg.frontend.dir, &cfg.database.url).await?;

    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg).await?;
    migration::Migrator::up(&db, None).await?;
    info!(event = "migrations_applied", "database schema up to date");

    let state = build_state(db, cfg.auth.api_key.clone());
    Ok(routes::build_router(state, build_cors(), &cfg.frontend.dir))
}

/// Build the app for an already validated `cfg` and serve it until `shutdown` resolves.
/// In-flight requests are allowed to finish before this returns.
pub async fn serve<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    let listener = tokio::net::TcpListener::bind(bind_addr(&cfg)?).await?;
    info!(event = "listening", addr = %listener.local_addr()?, "cafe api accepting connections");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!(event = "drained", "connections closed");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(event = "shutdown_signal", signal = "ctrl_c", "shutting down"),
        _ = terminate => info!(event = "shutdown_signal", signal = "terminate", "shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.server.port = 5000;
        assert_eq!(bind_addr(&cfg).unwrap().to_string(), "0.0.0.0:5000");
    }

    #[tokio::test]
    async fn serve_returns_after_shutdown() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        cfg.database.url = "sqlite::memory:".into();
        cfg.database.max_connections = 1;
        serve(cfg, async {}).await.unwrap();
    }

    #[tokio::test]
    async fn serve_reports_unreachable_database() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        cfg.database.url = "nosuchdb://nowhere".into();
        assert!(serve(cfg, async {}).await.is_err());
    }

    #[test]
    fn bind_addr_rejects_hostnames() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(bind_addr(&cfg).is_err());
    }
}
