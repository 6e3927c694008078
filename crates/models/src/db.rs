use std::env;
use std::time::Duration;

use once_cell::sync::Lazy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::debug;

pub static DATABASE_URL: Lazy<String> = Lazy::new(|| {
    // Load .env if present
    let _ = dotenvy::dotenv();
    env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://students.db?mode=rwc".to_string())
});

/// Pool settings for the SQLite store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub acquire_timeout: Duration,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(3600),
            acquire_timeout: Duration::from_secs(30),
            sqlx_logging: false,
        }
    }
}

impl DatabaseConfig {
    /// Settings from `config.toml` when one exists and validates.
    pub fn from_file() -> Option<Self> {
        let mut cfg = configs::load_default().ok()?;
        cfg.normalize_and_validate().ok()?;
        let d = cfg.database;
        Some(Self {
            url: d.url,
            max_connections: d.max_connections,
            min_connections: d.min_connections,
            connect_timeout: Duration::from_secs(d.connect_timeout_secs),
            idle_timeout: Duration::from_secs(d.idle_timeout_secs),
            max_lifetime: Duration::from_secs(d.max_lifetime_secs),
            acquire_timeout: Duration::from_secs(d.acquire_timeout_secs),
            sqlx_logging: d.sqlx_logging,
        })
    }

    /// Settings from `DATABASE_URL` (or the built-in default url) with
    /// default pool bounds.
    pub fn from_env() -> Self {
        Self { url: DATABASE_URL.clone(), ..Self::default() }
    }
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(cfg.connect_timeout)
        .idle_timeout(cfg.idle_timeout)
        .max_lifetime(cfg.max_lifetime)
        .acquire_timeout(cfg.acquire_timeout)
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    debug!(url = %cfg.url, "database pool ready");
    Ok(db)
}

/// Connect using `config.toml` when present, `DATABASE_URL` otherwise.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig::from_file().unwrap_or_else(DatabaseConfig::from_env);
    connect_with_config(&cfg).await
}

/// Create the schema if it does not exist yet. Called once before the
/// server accepts traffic.
pub async fn init_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    use migration::MigratorTrait;
    migration::Migrator::up(db, None).await?;
    Ok(())
}
