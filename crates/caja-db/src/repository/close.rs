//! # Weekly Close Repository
//!
//! The `cierres_semanales` ledger: one row per closed Monday..Sunday week,
//! carrying frozen totals. Rows here are append-only; nothing in the
//! application updates or deletes a close.
//!
//! [`CloseRepository::is_locked`] is the temporal lock checker: a date is
//! locked when any ledger row's `[fecha_inicio, fecha_fin]` contains it.
//! With no rows, nothing is locked. ISO date text compares correctly with
//! plain `BETWEEN`, so the check is one indexed query.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use caja_core::{Period, PeriodTotals, WeeklyClose};

use crate::error::DbResult;
use crate::repository::{format_datetime, new_id, parse_datetime};

#[derive(Debug, Clone)]
pub struct CloseRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct CloseRow {
    id: String,
    week_start: NaiveDate,
    week_end: NaiveDate,
    sales_total_cents: i64,
    expenses_total_cents: i64,
    profit_cents: i64,
    closed_by: String,
    closed_at: String,
}

impl CloseRow {
    fn into_close(self) -> DbResult<WeeklyClose> {
        Ok(WeeklyClose {
            id: self.id,
            week_start: self.week_start,
            week_end: self.week_end,
            sales_total_cents: self.sales_total_cents,
            expenses_total_cents: self.expenses_total_cents,
            profit_cents: self.profit_cents,
            closed_by: self.closed_by,
            closed_at: parse_datetime(&self.closed_at)?,
        })
    }
}

const SELECT_CLOSE: &str = "SELECT id, fecha_inicio AS week_start, fecha_fin AS week_end, \
     total_ventas AS sales_total_cents, total_gastos AS expenses_total_cents, \
     ganancia AS profit_cents, cerrado_por AS closed_by, fecha_cierre AS closed_at \
     FROM cierres_semanales";

impl CloseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CloseRepository { pool }
    }

    /// Appends a close row for `week` with the given frozen totals.
    ///
    /// Profit is derived from the totals here, at the single point where
    /// the snapshot is written. The UNIQUE index on `fecha_inicio` turns a
    /// concurrent double-close into [`crate::DbError::Duplicate`].
    pub async fn record(
        &self,
        week: Period,
        totals: PeriodTotals,
        closed_by: &str,
        closed_at: DateTime<Utc>,
    ) -> DbResult<WeeklyClose> {
        let close = WeeklyClose {
            id: new_id(),
            week_start: week.from,
            week_end: week.to,
            sales_total_cents: totals.sales_total.cents(),
            expenses_total_cents: totals.expenses_total.cents(),
            profit_cents: totals.profit().cents(),
            closed_by: closed_by.to_string(),
            closed_at,
        };
        sqlx::query(
            "INSERT INTO cierres_semanales \
             (id, fecha_inicio, fecha_fin, total_ventas, total_gastos, ganancia, \
              cerrado_por, fecha_cierre) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&close.id)
        .bind(close.week_start)
        .bind(close.week_end)
        .bind(close.sales_total_cents)
        .bind(close.expenses_total_cents)
        .bind(close.profit_cents)
        .bind(&close.closed_by)
        .bind(format_datetime(close.closed_at))
        .execute(&self.pool)
        .await?;
        debug!(week = %week, "recorded weekly close");
        Ok(close)
    }

    /// The close whose week starts on `week_start`, if any.
    pub async fn find_for_week(&self, week_start: NaiveDate) -> DbResult<Option<WeeklyClose>> {
        let row: Option<CloseRow> =
            sqlx::query_as(&format!("{SELECT_CLOSE} WHERE fecha_inicio = ?1"))
                .bind(week_start)
                .fetch_optional(&self.pool)
                .await?;
        row.map(CloseRow::into_close).transpose()
    }

    /// Every close, most recent week first.
    pub async fn list(&self) -> DbResult<Vec<WeeklyClose>> {
        let rows: Vec<CloseRow> =
            sqlx::query_as(&format!("{SELECT_CLOSE} ORDER BY fecha_inicio DESC"))
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(CloseRow::into_close).collect()
    }

    /// True when `date` falls inside any closed week.
    pub async fn is_locked(&self, date: NaiveDate) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM cierres_semanales \
             WHERE ?1 BETWEEN fecha_inicio AND fecha_fin",
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }
}

// =============================================================================
// Tests
// =============================================================================
