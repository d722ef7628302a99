//! Credential store trait and SQLite implementation.
//!
//! The trait seam exists for testability and dependency injection: the
//! manager talks to `dyn CredentialStore`, production wires in the SQLite
//! implementation, unit tests wire in the in-memory mock.

use async_trait::async_trait;
use log::warn;
use sqlx::{Row, SqlitePool};

use crate::auth::errors::{AuthError, AuthResult};
use crate::auth::models::{Account, AccountId};

/// Trait for account persistence operations
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new account.
    ///
    /// At most one insert for a given email may ever succeed, including
    /// under concurrent callers on separate connections.
    ///
    /// # Errors
    ///
    /// * `AuthError::EmailTaken` - the email is already registered
    async fn insert(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> AuthResult<AccountId>;

    /// Find an account by its exact email
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>>;

    /// Delete all accounts, returning how many were removed.
    ///
    /// Administrative/test support only.
    async fn clear(&self) -> AuthResult<u64>;
}

/// SQLite implementation of [`CredentialStore`]
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn insert(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> AuthResult<AccountId> {
        let result = sqlx::query(
            "INSERT INTO accounts (email, username, password_hash) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.get("id")),
            // The UNIQUE constraint is the single arbiter of duplicates.
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AuthError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, email, username, password_hash, created_at
             FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Account {
            id: r.get("id"),
            email: r.get("email"),
            username: r.get("username"),
            password_hash: r.get("password_hash"),
            created_at: r.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        }))
    }

    async fn clear(&self) -> AuthResult<u64> {
        let result = sqlx::query("DELETE FROM accounts").execute(&self.pool).await?;
        warn!("cleared {} account(s) from credential store", result.rows_affected());
        Ok(result.rows_affected())
    }
}

/// Mock implementation for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub struct MockCredentialStore {
        accounts: Mutex<HashMap<String, Account>>,
        next_id: Mutex<AccountId>,
    }

    impl Default for MockCredentialStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockCredentialStore {
        pub fn new() -> Self {
            Self {
                accounts: Mutex::new(HashMap::new()),
                next_id: Mutex::new(1),
            }
        }
    }

    #[async_trait]
    impl CredentialStore for MockCredentialStore {
        async fn insert(
            &self,
            email: &str,
            username: &str,
            password_hash: &str,
        ) -> AuthResult<AccountId> {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(AuthError::EmailTaken);
            }

            let mut next_id = self.next_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;

            accounts.insert(
                email.to_string(),
                Account {
                    id,
                    email: email.to_string(),
                    username: username.to_string(),
                    password_hash: password_hash.to_string(),
                    created_at: chrono::Utc::now(),
                },
            );
            Ok(id)
        }

        async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>> {
            Ok(self.accounts.lock().unwrap().get(email).cloned())
        }

        async fn clear(&self) -> AuthResult<u64> {
            let mut accounts = self.accounts.lock().unwrap();
            let removed = accounts.len() as u64;
            accounts.clear();
            Ok(removed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, DatabaseConfig};
    use std::sync::Arc;

    async fn setup_store(prefix: &str) -> SqliteCredentialStore {
        let id: u32 = rand::random();
        let path = std::env::temp_dir().join(format!("{prefix}_{id}.db"));
        let config = DatabaseConfig {
            database_url: format!("sqlite:{}", path.display()),
            max_connections: 8,
            min_connections: 1,
            connection_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        };

        let db = Database::new(&config).await.expect("Failed to open database");
        SqliteCredentialStore::new(db.pool().clone())
    }

    #[tokio::test]
    async fn insert_and_find_round_trip() {
        let store = setup_store("ra_store_rt").await;

        let id = store
            .insert("a@x.com", "alice", "hash1")
            .await
            .expect("first insert should succeed");

        let account = store
            .find_by_email("a@x.com")
            .await
            .unwrap()
            .expect("account should be found");
        assert_eq!(account.id, id);
        assert_eq!(account.email, "a@x.com");
        assert_eq!(account.username, "alice");
        assert_eq!(account.password_hash, "hash1");

        assert!(store.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_without_overwriting() {
        let store = setup_store("ra_store_dup").await;

        store.insert("a@x.com", "alice", "hash1").await.unwrap();
        let err = store
            .insert("a@x.com", "alice2", "hash2")
            .await
            .expect_err("second insert must fail");
        assert!(matches!(err, AuthError::EmailTaken));

        // The original row is untouched.
        let account = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(account.username, "alice");
        assert_eq!(account.password_hash, "hash1");
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let store = setup_store("ra_store_case").await;

        store.insert("a@x.com", "alice", "hash1").await.unwrap();
        assert!(store.find_by_email("A@X.COM").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_inserts_for_same_email_yield_one_winner() {
        let store = Arc::new(setup_store("ra_store_conc").await);

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert("race@x.com", &format!("user{i}"), "hash")
                    .await
            }));
        }

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.expect("task should complete") {
                Ok(_) => successes += 1,
                Err(AuthError::EmailTaken) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1, "exactly one registration may win");
        assert_eq!(conflicts, 7);
    }

    #[tokio::test]
    async fn clear_removes_all_accounts() {
        let store = setup_store("ra_store_clear").await;

        store.insert("a@x.com", "alice", "h").await.unwrap();
        store.insert("b@x.com", "bob", "h").await.unwrap();

        let removed = store.clear().await.unwrap();
        assert_eq!(removed, 2);
        assert!(store.find_by_email("a@x.com").await.unwrap().is_none());

        // Idempotent on an empty table.
        assert_eq!(store.clear().await.unwrap(), 0);
    }
}
