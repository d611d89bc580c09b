//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected files and directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Warn when the landing page is missing and make sure a file-backed
/// SQLite database has a directory to live in.
pub async fn ensure_env(frontend_dir: &str, database_url: &str) -> anyhow::Result<()> {
    let index = Path::new(frontend_dir).join("index.html");
    if tokio::fs::metadata(&index).await.is_err() {
        warn!(index = %index.display(), "landing page not found; GET / will 404");
    }
    if let Some(parent) = sqlite_parent_dir(database_url) {
        tokio::fs::create_dir_all(&parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    Ok(())
}

/// Parent directory of a file-backed SQLite URL, if it has one.
pub fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let file = rest.split('?').next().unwrap_or(rest);
    if file.is_empty() || file == ":memory:" {
        return None;
    }
    Path::new(file).parent().filter(|p| !p.as_os_str().is_empty())
}
