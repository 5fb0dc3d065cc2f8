//! # Expense Repository
//!
//! Writes and readbacks for `gastos`. Expenses are dated by calendar day
//! (no time of day), which keeps the week-lock containment check a plain
//! `BETWEEN` over ISO date text.
//!
//! Deletion goes through the same check-then-delete transaction as sales;
//! see [`crate::repository::sale::SaleRepository::delete_checked`] for the
//! walkthrough.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use caja_core::{Expense, ExpenseRecord, Money};

use crate::error::DbResult;
use crate::repository::{new_id, DeleteOutcome};

#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct ExpenseRecordRow {
    id: String,
    description: String,
    amount_cents: i64,
    date: NaiveDate,
    user: String,
}

impl From<ExpenseRecordRow> for ExpenseRecord {
    fn from(row: ExpenseRecordRow) -> ExpenseRecord {
        ExpenseRecord {
            id: row.id,
            description: row.description,
            amount_cents: row.amount_cents,
            date: row.date,
            user: row.user,
        }
    }
}

const SELECT_RECORD: &str = "SELECT g.id, g.descripcion AS description, \
     g.monto AS amount_cents, g.fecha AS date, u.nombre AS user \
     FROM gastos g \
     JOIN usuarios u ON g.usuario_id = u.id";

impl ExpenseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Inserts an expense row.
    pub async fn insert(
        &self,
        description: &str,
        amount: Money,
        date: NaiveDate,
        user_id: &str,
    ) -> DbResult<Expense> {
        let expense = Expense {
            id: new_id(),
            description: description.to_string(),
            amount_cents: amount.cents(),
            date,
            user_id: user_id.to_string(),
        };
        sqlx::query(
            "INSERT INTO gastos (id, descripcion, monto, fecha, usuario_id) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&expense.id)
        .bind(&expense.description)
        .bind(expense.amount_cents)
        .bind(expense.date)
        .bind(&expense.user_id)
        .execute(&self.pool)
        .await?;
        debug!(id = %expense.id, "inserted expense");
        Ok(expense)
    }

    /// Every expense with the recording user's name, newest first.
    pub async fn list(&self) -> DbResult<Vec<ExpenseRecord>> {
        let rows: Vec<ExpenseRecordRow> =
            sqlx::query_as(&format!("{SELECT_RECORD} ORDER BY g.fecha DESC"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(ExpenseRecord::from).collect())
    }

    /// One user's expenses, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<ExpenseRecord>> {
        let rows: Vec<ExpenseRecordRow> = sqlx::query_as(&format!(
            "{SELECT_RECORD} WHERE g.usuario_id = ?1 ORDER BY g.fecha DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ExpenseRecord::from).collect())
    }

    /// Deletes an expense unless its date falls inside a closed week.
    pub async fn delete_checked(&self, id: &str) -> DbResult<DeleteOutcome> {
        let mut tx = self.pool.begin().await?;

        let fecha: Option<NaiveDate> =
            sqlx::query_scalar("SELECT fecha FROM gastos WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(fecha) = fecha else {
            return Ok(DeleteOutcome::NotFound);
        };

        let locked: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM cierres_semanales \
             WHERE ?1 BETWEEN fecha_inicio AND fecha_fin",
        )
        .bind(fecha)
        .fetch_one(&mut *tx)
        .await?;
        if locked > 0 {
            return Ok(DeleteOutcome::Locked { date: fecha });
        }

        sqlx::query("DELETE FROM gastos WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!(id = %id, "deleted expense");
        Ok(DeleteOutcome::Deleted)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::user::DEFAULT_OWNER_NAME;
    use caja_core::{Period, PeriodTotals, User};
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    async fn setup() -> (Database, User) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = db
            .users()
            .get_by_name(DEFAULT_OWNER_NAME)
            .await
            .unwrap()
            .unwrap();
        (db, owner)
    }

    #[tokio::test]
    async fn insert_and_list_round_trip() {
        let (db, owner) = setup().await;
        db.expenses()
            .insert("Ice", Money::from_cents(500), d(2024, 1, 4), &owner.id)
            .await
            .unwrap();

        let all = db.expenses().list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description, "Ice");
        assert_eq!(all[0].amount(), Money::from_cents(500));
        assert_eq!(all[0].date, d(2024, 1, 4));
        assert_eq!(all[0].user, DEFAULT_OWNER_NAME);
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let (db, owner) = setup().await;
        db.expenses()
            .insert("Old", Money::from_cents(100), d(2024, 1, 2), &owner.id)
            .await
            .unwrap();
        db.expenses()
            .insert("New", Money::from_cents(200), d(2024, 1, 6), &owner.id)
            .await
            .unwrap();

        let all = db.expenses().list().await.unwrap();
        assert_eq!(all[0].description, "New");
        assert_eq!(all[1].description, "Old");
    }

    #[tokio::test]
    async fn delete_checked_removes_unlocked_expense() {
        let (db, owner) = setup().await;
        let expense = db
            .expenses()
            .insert("Ice", Money::from_cents(500), d(2024, 1, 4), &owner.id)
            .await
            .unwrap();

        let outcome = db.expenses().delete_checked(&expense.id).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(db.expenses().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_checked_reports_missing_rows() {
        let (db, _) = setup().await;
        let outcome = db.expenses().delete_checked("g-missing").await.unwrap();
        assert_eq!(outcome, DeleteOutcome::NotFound);
    }

    #[tokio::test]
    async fn delete_checked_refuses_dates_in_closed_weeks() {
        let (db, owner) = setup().await;
        let expense = db
            .expenses()
            .insert("Ice", Money::from_cents(500), d(2024, 1, 4), &owner.id)
            .await
            .unwrap();

        let week = Period::week_of(d(2024, 1, 4));
        db.closes()
            .record(week, PeriodTotals::default(), &owner.id, Utc::now())
            .await
            .unwrap();

        let outcome = db.expenses().delete_checked(&expense.id).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Locked { date: d(2024, 1, 4) });
        assert_eq!(db.expenses().list().await.unwrap().len(), 1);
    }
}
