//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Warn on a missing landing page; create the SQLite directory if needed.
pub async fn ensure_env(frontend_dir: &str, database_url: &str) -> anyhow::Result<()> {
    common::env::ensure_env(frontend_dir, database_url).await
}
