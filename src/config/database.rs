use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::env;
use std::time::Duration;

/// Postgres connection settings, resolved from the environment at startup
/// so a bad value fails before anything binds a port.
///
/// Category and post listings dominate the traffic, so the pool defaults
/// lean larger than the handful of connections a write-mostly service
/// would carry.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let url = env::var("DATABASE_URL")
            .context("DATABASE_URL environment variable must be set")?;

        Ok(Self {
            url,
            max_connections: pool_size(env::var("DB_MAX_CONNECTIONS").ok(), 20),
            min_connections: pool_size(env::var("DB_MIN_CONNECTIONS").ok(), 4),
        })
    }

    pub async fn connect(&self) -> Result<DatabaseConnection, DbErr> {
        let mut opt = ConnectOptions::new(self.url.clone());
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true);

        Database::connect(opt).await
    }
}

/// Parse a pool-size variable; zero and garbage fall back to the default.
fn pool_size(raw: Option<String>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_size_parses_value() {
        assert_eq!(pool_size(Some("12".to_string()), 20), 12);
        assert_eq!(pool_size(Some(" 8 ".to_string()), 20), 8);
    }

    #[test]
    fn pool_size_falls_back_on_missing_or_invalid() {
        assert_eq!(pool_size(None, 20), 20);
        assert_eq!(pool_size(Some("abc".to_string()), 20), 20);
        assert_eq!(pool_size(Some("0".to_string()), 20), 20);
    }
}
