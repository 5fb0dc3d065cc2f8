//! # Connection Pool and Database Facade
//!
//! [`DbConfig`] describes how to open the database; [`Database`] wraps the
//! sqlx pool and hands out repositories.
//!
//! ## Connection Settings
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  PRAGMA               Value       Why                        │
//! │  ───────────────────────────────────────────────────────     │
//! │  journal_mode         WAL         readers don't block writer │
//! │  synchronous          NORMAL      safe with WAL, much faster │
//! │  foreign_keys         ON          SQLite defaults it OFF (!) │
//! │  busy_timeout         5s          wait, don't fail, on lock  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! `foreign_keys` matters most here: sales and expenses reference users and
//! products, and the close ledger references the closing owner. Without the
//! pragma SQLite would happily take orphan rows.
//!
//! First boot bootstraps the owner account: when `seed_owner` is set and
//! `usuarios` is empty, a single owner row is created so the shop can log
//! in and add everyone else.

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::close::CloseRepository;
use crate::repository::expense::ExpenseRepository;
use crate::repository::product::ProductRepository;
use crate::repository::report::ReportRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::user::UserRepository;

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite file, or `:memory:` for tests.
    pub database_path: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Apply embedded migrations on connect.
    pub run_migrations: bool,
    /// Create the initial owner account if the users table is empty.
    pub seed_owner: bool,
}

impl DbConfig {
    /// Configuration for a file-backed database at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            run_migrations: true,
            seed_owner: true,
        }
    }

    /// In-memory database for tests.
    ///
    /// Pinned to a single connection: every SQLite `:memory:` connection is
    /// its own database, so a second pooled connection would see no tables.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: ":memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 600,
            run_migrations: true,
            seed_owner: true,
        }
    }

    /// Skip the owner bootstrap (tests that need an empty users table).
    pub fn without_seeding(mut self) -> Self {
        self.seed_owner = false;
        self
    }

    fn connection_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.database_path)
    }
}

/// Shared handle to the database.
///
/// Cheap to clone (the pool is internally reference-counted); every caller
/// that needs persistence holds one of these.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool, applies migrations, and bootstraps the owner.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.connection_url())?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .connect_with(options)
            .await?;

        info!(path = %config.database_path, "database pool ready");

        let db = Database { pool };

        if config.run_migrations {
            migrations::run_migrations(&db.pool).await?;
        }
        if config.seed_owner {
            db.users().ensure_owner().await?;
        }

        Ok(db)
    }

    /// Raw pool access for migrations and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // =========================================================================
    // Repository accessors
    // =========================================================================

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    pub fn expenses(&self) -> ExpenseRepository {
        ExpenseRepository::new(self.pool.clone())
    }

    pub fn closes(&self) -> CloseRepository {
        CloseRepository::new(self.pool.clone())
    }

    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.pool.clone())
    }

    /// Verifies the connection is alive.
    pub async fn health_check(&self) -> DbResult<()> {
        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        if one == 1 {
            Ok(())
        } else {
            Err(DbError::Connection("health check returned garbage".into()))
        }
    }

    /// Closes the pool. Pending queries finish first.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// =============================================================================
// Tests
// =============================================================================
