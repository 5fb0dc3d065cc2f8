//! # Embedded Migrations
//!
//! Schema migrations are compiled into the binary from
//! `migrations/sqlite/` at the workspace root, so a deployed binary can
//! bring any older database file up to date on startup. sqlx records
//! applied versions in its own `_sqlx_migrations` table, which makes
//! re-running the migrator a no-op.

use sqlx::migrate::Migrator;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Migration files, resolved relative to this crate's manifest.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies any pending migrations.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    info!("migrations up to date");
    Ok(())
}
