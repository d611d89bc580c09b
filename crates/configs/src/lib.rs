use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_API_KEY: &str = "TopSecretAPIKey";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://cafes.db?mode=rwc";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Shared secret guarding destructive routes.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub api_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { api_key: DEFAULT_API_KEY.to_string() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_frontend_dir")]
    pub dir: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self { dir: default_frontend_dir() }
    }
}

fn default_frontend_dir() -> String { "frontend".to_string() }

/// `CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present, otherwise defaults overlaid with env vars.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(&config_path())
    }

    /// Only a missing file falls back to env vars; an unreadable or malformed file is an error.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => Self::from_env(),
            Err(e) => return Err(e.context(format!("failed to load config file {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        cfg.auth.api_key = String::new();
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        // 未配置 URL 时从 DATABASE_URL 填充
        self.database.normalize_from_env();
        self.database.validate()?;
        // api_key 为空时依次尝试 CAFE_API_KEY 与默认值
        self.auth.normalize_from_env();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Fill an empty URL from `DATABASE_URL`, then from the built-in SQLite default.
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            self.url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("sqlite:") || lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with sqlite:, postgres:// or postgresql://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.api_key.trim().is_empty() {
            self.api_key = std::env::var("CAFE_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_KEY.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 5000

            [database]
            url = "sqlite://cafes.db?mode=rwc"
            max_connections = 4

            [auth]
            api_key = "s3cret"

            [frontend]
            dir = "static"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.database.max_connections, 4);
        assert_eq!(cfg.database.min_connections, 1);
        assert_eq!(cfg.auth.api_key, "s3cret");
        assert_eq!(cfg.frontend.dir, "static");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.auth.api_key, DEFAULT_API_KEY);
        assert_eq!(cfg.frontend.dir, "frontend");
        assert_eq!(cfg.database.acquire_timeout_secs, 30);
    }

    #[test]
    fn rejects_unknown_database_scheme() {
        let mut db = DatabaseConfig { url: "mysql://localhost/cafes".into(), ..Default::default() };
        db.normalize_from_env();
        assert!(db.validate().is_err());
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let db = DatabaseConfig {
            url: "sqlite::memory:".into(),
            min_connections: 5,
            max_connections: 2,
            ..Default::default()
        };
        assert!(db.validate().is_err());
    }

    #[test]
    fn zero_worker_threads_falls_back() {
        let mut s = ServerConfig { worker_threads: Some(0), ..Default::default() };
        s.normalize().unwrap();
        assert_eq!(s.worker_threads, Some(4));
    }

    #[test]
    fn rejects_port_zero() {
        let mut s = ServerConfig { port: 0, ..Default::default() };
        assert!(s.normalize().is_err());
    }

    fn temp_config(tag: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("cafe-config-{tag}-{}.toml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_config("malformed", "[auth]\napi_key = \"my-real-secret\"\n[server\nport = 1\n");
        let res = AppConfig::load_or_env_from(&path.to_string_lossy());
        std::fs::remove_file(&path).ok();
        let err = res.expect_err("malformed config must not fall back to defaults");
        assert!(err.to_string().contains("failed to load config file"));
    }

    #[test]
    fn wrong_value_type_is_an_error() {
        let path = temp_config("badtype", "[server]\nport = \"eighty\"\n");
        let res = AppConfig::load_or_env_from(&path.to_string_lossy());
        std::fs::remove_file(&path).ok();
        assert!(res.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let path = std::env::temp_dir().join(format!("cafe-config-absent-{}.toml", std::process::id()));
        let cfg = AppConfig::load_or_env_from(&path.to_string_lossy()).unwrap();
        assert!(!cfg.auth.api_key.is_empty());
        assert!(!cfg.database.url.is_empty());
    }

    #[test]
    fn existing_file_keeps_its_api_key() {
        let path = temp_config("valid", "[auth]\napi_key = \"my-real-secret\"\n");
        let res = AppConfig::load_or_env_from(&path.to_string_lossy());
        std::fs::remove_file(&path).ok();
        assert_eq!(res.unwrap().auth.api_key, "my-real-secret");
    }

    #[test]
    fn explicit_api_key_is_kept() {
        let mut auth = AuthConfig { api_key: "from-file".into() };
        auth.normalize_from_env();
        assert_eq!(auth.api_key, "from-file");
    }
}
