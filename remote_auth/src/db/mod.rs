//! Database module providing SQLite connection pooling and utilities.
//!
//! The account schema is created lazily and idempotently on every new
//! pooled connection, so any worker that first touches the database finds
//! the table in place.

use log::debug;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub mod config;
pub mod store;

pub use config::DatabaseConfig;
pub use store::{CredentialStore, SqliteCredentialStore};

/// Lazily-applied account schema. The UNIQUE constraint on email is what
/// makes concurrent duplicate registrations lose, independent of which
/// pooled connection performs the insert.
const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    username TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// Opens (creating if missing) the SQLite database named by the
    /// config, in WAL mode with a busy timeout so concurrent writers
    /// serialize instead of failing.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use remote_auth::db::{Database, DatabaseConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), sqlx::Error> {
    ///     let config = DatabaseConfig::from_env();
    ///     let db = Database::new(&config).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    debug!("applying account schema on new connection");
                    sqlx::query(SCHEMA_SQL).execute(&mut *conn).await?;
                    Ok(())
                })
            })
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_database_url(prefix: &str) -> String {
        let id: u32 = rand::random();
        let path = std::env::temp_dir().join(format!("{prefix}_{id}.db"));
        format!("sqlite:{}", path.display())
    }

    #[tokio::test]
    async fn test_database_connection() {
        let config = DatabaseConfig {
            database_url: temp_database_url("ra_db"),
            max_connections: 5,
            min_connections: 1,
            connection_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        };

        let db = Database::new(&config)
            .await
            .expect("Failed to open database");
        db.health_check().await.expect("Health check failed");
        db.close().await;
    }

    #[tokio::test]
    async fn test_schema_is_idempotent_across_connections() {
        let config = DatabaseConfig {
            database_url: temp_database_url("ra_schema"),
            max_connections: 4,
            min_connections: 1,
            connection_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        };

        let db = Database::new(&config).await.expect("Failed to open database");

        // Every new pooled connection re-applies the schema; the table must
        // exist and stay queryable regardless of which connection serves us.
        for _ in 0..8 {
            sqlx::query("SELECT COUNT(*) FROM accounts")
                .fetch_one(db.pool())
                .await
                .expect("accounts table should exist");
        }

        db.close().await;
    }
}
