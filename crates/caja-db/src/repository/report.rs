//! # Report Repository
//!
//! Read-only aggregates across `ventas` and `gastos`. Nothing in here
//! writes a row.
//!
//! ## Date Slicing
//! ```text
//!   stored:  '2024-01-07 23:59:59'   (sale timestamp, UTC)
//!   sliced:  date(fecha)        ──►  '2024-01-07'
//!   window:  date(fecha) BETWEEN '2024-01-01' AND '2024-01-07'
//! ```
//! Period bounds compare whole calendar days, so a sale one second before
//! midnight Sunday still lands in the closing week. Sums come back through
//! `IFNULL(SUM(..), 0)`: an empty window aggregates to zero, not NULL.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use caja_core::{DayActivity, ExpenseLine, HistoryFilter, Money, Period, PeriodTotals, SaleLine};

use crate::error::DbResult;
use crate::repository::parse_datetime;

#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct SaleLineRow {
    product: String,
    quantity: i64,
    total_cents: i64,
    date: String,
    user: String,
}

impl SaleLineRow {
    fn into_line(self) -> DbResult<SaleLine> {
        Ok(SaleLine {
            product: self.product,
            quantity: self.quantity,
            total: Money::from_cents(self.total_cents),
            date: parse_datetime(&self.date)?,
            user: self.user,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ExpenseLineRow {
    description: String,
    amount_cents: i64,
    date: NaiveDate,
    user: String,
}

impl From<ExpenseLineRow> for ExpenseLine {
    fn from(row: ExpenseLineRow) -> ExpenseLine {
        ExpenseLine {
            description: row.description,
            amount: Money::from_cents(row.amount_cents),
            date: row.date,
            user: row.user,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DayTotalRow {
    day: NaiveDate,
    total_cents: i64,
}

const SELECT_SALE_LINE: &str = "SELECT p.nombre AS product, v.cantidad AS quantity, \
     v.total AS total_cents, v.fecha AS date, u.nombre AS user \
     FROM ventas v \
     JOIN productos p ON v.producto_id = p.id \
     JOIN usuarios u ON v.usuario_id = u.id";

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Sales and expense sums over an inclusive period.
    pub async fn totals_over(&self, period: Period) -> DbResult<PeriodTotals> {
        let sales: i64 = sqlx::query_scalar(
            "SELECT IFNULL(SUM(total), 0) FROM ventas WHERE date(fecha) BETWEEN ?1 AND ?2",
        )
        .bind(period.from)
        .bind(period.to)
        .fetch_one(&self.pool)
        .await?;
        let expenses: i64 = sqlx::query_scalar(
            "SELECT IFNULL(SUM(monto), 0) FROM gastos WHERE date(fecha) BETWEEN ?1 AND ?2",
        )
        .bind(period.from)
        .bind(period.to)
        .fetch_one(&self.pool)
        .await?;
        Ok(PeriodTotals::new(
            Money::from_cents(sales),
            Money::from_cents(expenses),
        ))
    }

    /// All-time sums, for the dashboard headline.
    pub async fn lifetime_totals(&self) -> DbResult<PeriodTotals> {
        let sales: i64 = sqlx::query_scalar("SELECT IFNULL(SUM(total), 0) FROM ventas")
            .fetch_one(&self.pool)
            .await?;
        let expenses: i64 = sqlx::query_scalar("SELECT IFNULL(SUM(monto), 0) FROM gastos")
            .fetch_one(&self.pool)
            .await?;
        Ok(PeriodTotals::new(
            Money::from_cents(sales),
            Money::from_cents(expenses),
        ))
    }

    /// Sums from `from` (inclusive) through today, for the rolling
    /// dashboard windows.
    pub async fn totals_since(&self, from: NaiveDate) -> DbResult<PeriodTotals> {
        let sales: i64 =
            sqlx::query_scalar("SELECT IFNULL(SUM(total), 0) FROM ventas WHERE date(fecha) >= ?1")
                .bind(from)
                .fetch_one(&self.pool)
                .await?;
        let expenses: i64 =
            sqlx::query_scalar("SELECT IFNULL(SUM(monto), 0) FROM gastos WHERE date(fecha) >= ?1")
                .bind(from)
                .fetch_one(&self.pool)
                .await?;
        Ok(PeriodTotals::new(
            Money::from_cents(sales),
            Money::from_cents(expenses),
        ))
    }

    /// Sale lines inside a period, newest first, for report payloads.
    pub async fn sales_detail(&self, period: Period) -> DbResult<Vec<SaleLine>> {
        let rows: Vec<SaleLineRow> = sqlx::query_as(&format!(
            "{SELECT_SALE_LINE} WHERE date(v.fecha) BETWEEN ?1 AND ?2 ORDER BY v.fecha DESC"
        ))
        .bind(period.from)
        .bind(period.to)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(SaleLineRow::into_line).collect()
    }

    /// Expense lines inside a period, newest first, for report payloads.
    pub async fn expenses_detail(&self, period: Period) -> DbResult<Vec<ExpenseLine>> {
        let rows: Vec<ExpenseLineRow> = sqlx::query_as(
            "SELECT g.descripcion AS description, g.monto AS amount_cents, \
             g.fecha AS date, u.nombre AS user \
             FROM gastos g \
             JOIN usuarios u ON g.usuario_id = u.id \
             WHERE date(g.fecha) BETWEEN ?1 AND ?2 \
             ORDER BY g.fecha DESC",
        )
        .bind(period.from)
        .bind(period.to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ExpenseLine::from).collect())
    }

    /// Sales history search with optional period, product and user filters.
    ///
    /// Filters are ANDed; text filters match substrings via `LIKE`, which
    /// is case-insensitive for ASCII in SQLite. No filters means the full
    /// history, newest first.
    pub async fn search_sales(&self, filter: &HistoryFilter) -> DbResult<Vec<SaleLine>> {
        let mut sql = format!("{SELECT_SALE_LINE} WHERE 1=1");
        if filter.period.is_some() {
            sql.push_str(" AND date(v.fecha) BETWEEN ? AND ?");
        }
        if filter.product.is_some() {
            sql.push_str(" AND p.nombre LIKE ?");
        }
        if filter.user.is_some() {
            sql.push_str(" AND u.nombre LIKE ?");
        }
        sql.push_str(" ORDER BY v.fecha DESC");

        // Binds must line up with the pushes above, in the same order
        let mut query = sqlx::query_as::<_, SaleLineRow>(&sql);
        if let Some(period) = filter.period {
            query = query.bind(period.from).bind(period.to);
        }
        if let Some(product) = &filter.product {
            query = query.bind(format!("%{product}%"));
        }
        if let Some(user) = &filter.user {
            query = query.bind(format!("%{user}%"));
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(SaleLineRow::into_line).collect()
    }

    /// Per-day totals for one calendar month, keyed by date. Days with no
    /// activity are simply absent.
    pub async fn daily_activity(
        &self,
        year: i32,
        month: u32,
    ) -> DbResult<BTreeMap<NaiveDate, DayActivity>> {
        let month_key = format!("{year:04}-{month:02}");

        let sales: Vec<DayTotalRow> = sqlx::query_as(
            "SELECT date(fecha) AS day, SUM(total) AS total_cents \
             FROM ventas WHERE strftime('%Y-%m', fecha) = ?1 GROUP BY day",
        )
        .bind(&month_key)
        .fetch_all(&self.pool)
        .await?;
        let expenses: Vec<DayTotalRow> = sqlx::query_as(
            "SELECT date(fecha) AS day, SUM(monto) AS total_cents \
             FROM gastos WHERE strftime('%Y-%m', fecha) = ?1 GROUP BY day",
        )
        .bind(&month_key)
        .fetch_all(&self.pool)
        .await?;

        let mut days: BTreeMap<NaiveDate, DayActivity> = BTreeMap::new();
        for row in sales {
            days.entry(row.day).or_default().sales_total = Money::from_cents(row.total_cents);
        }
        for row in expenses {
            days.entry(row.day).or_default().expenses_total = Money::from_cents(row.total_cents);
        }
        Ok(days)
    }
}

// =============================================================================
// Tests
// =============================================================================
