//! # Sale Repository
//!
//! Writes and readbacks for `ventas`.
//!
//! ## Lock-Checked Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ delete_checked(id)              (single transaction)        │
//! │                                                             │
//! │   1. SELECT fecha FROM ventas WHERE id = ?                  │
//! │        └─ no row ──────────────────────► NotFound           │
//! │   2. is date(fecha) inside any closed week?                 │
//! │        └─ yes ─────────────────────────► Locked { date }    │
//! │   3. DELETE FROM ventas WHERE id = ?                        │
//! │   4. COMMIT ───────────────────────────► Deleted            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The check and the delete share one transaction so a week close landing
//! between them cannot let a frozen row slip away.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use caja_core::{Money, Sale, SaleRecord};

use crate::error::DbResult;
use crate::repository::{format_datetime, new_id, parse_datetime, DeleteOutcome};

#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct SaleRecordRow {
    id: String,
    product: String,
    quantity: i64,
    total_cents: i64,
    recorded_at: String,
    user: String,
}

impl SaleRecordRow {
    fn into_record(self) -> DbResult<SaleRecord> {
        Ok(SaleRecord {
            id: self.id,
            product: self.product,
            quantity: self.quantity,
            total_cents: self.total_cents,
            recorded_at: parse_datetime(&self.recorded_at)?,
            user: self.user,
        })
    }
}

const SELECT_RECORD: &str = "SELECT v.id, p.nombre AS product, v.cantidad AS quantity, \
     v.total AS total_cents, v.fecha AS recorded_at, u.nombre AS user \
     FROM ventas v \
     JOIN productos p ON v.producto_id = p.id \
     JOIN usuarios u ON v.usuario_id = u.id";

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts a sale row. `total` arrives pre-computed; this layer never
    /// reads the catalog price.
    pub async fn insert(
        &self,
        product_id: &str,
        quantity: i64,
        total: Money,
        recorded_at: DateTime<Utc>,
        user_id: &str,
    ) -> DbResult<Sale> {
        let sale = Sale {
            id: new_id(),
            product_id: product_id.to_string(),
            quantity,
            total_cents: total.cents(),
            recorded_at,
            user_id: user_id.to_string(),
        };
        sqlx::query(
            "INSERT INTO ventas (id, producto_id, cantidad, total, fecha, usuario_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&sale.id)
        .bind(&sale.product_id)
        .bind(sale.quantity)
        .bind(sale.total_cents)
        .bind(format_datetime(sale.recorded_at))
        .bind(&sale.user_id)
        .execute(&self.pool)
        .await?;
        debug!(id = %sale.id, product_id = %sale.product_id, "inserted sale");
        Ok(sale)
    }

    /// Every sale with product and user names, newest first.
    pub async fn list(&self) -> DbResult<Vec<SaleRecord>> {
        let rows: Vec<SaleRecordRow> =
            sqlx::query_as(&format!("{SELECT_RECORD} ORDER BY v.fecha DESC"))
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(SaleRecordRow::into_record).collect()
    }

    /// One user's sales, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<SaleRecord>> {
        let rows: Vec<SaleRecordRow> = sqlx::query_as(&format!(
            "{SELECT_RECORD} WHERE v.usuario_id = ?1 ORDER BY v.fecha DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(SaleRecordRow::into_record).collect()
    }

    /// Deletes a sale unless its date falls inside a closed week.
    pub async fn delete_checked(&self, id: &str) -> DbResult<DeleteOutcome> {
        let mut tx = self.pool.begin().await?;

        let fecha: Option<String> = sqlx::query_scalar("SELECT fecha FROM ventas WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(fecha) = fecha else {
            return Ok(DeleteOutcome::NotFound);
        };

        let locked: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM cierres_semanales \
             WHERE date(?1) BETWEEN fecha_inicio AND fecha_fin",
        )
        .bind(&fecha)
        .fetch_one(&mut *tx)
        .await?;
        if locked > 0 {
            // Dropping the transaction rolls it back; nothing was written.
            return Ok(DeleteOutcome::Locked {
                date: parse_datetime(&fecha)?.date_naive(),
            });
        }

        sqlx::query("DELETE FROM ventas WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!(id = %id, "deleted sale");
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
    use caja_core::{Period, PeriodTotals, Role, User};
    use chrono::TimeZone;

    async fn setup() -> (Database, User, caja_core::Product) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = db
            .users()
            .get_by_name(DEFAULT_OWNER_NAME)
            .await
            .unwrap()
            .unwrap();
        let widget = db
            .products()
            .insert("Widget", Money::from_cents(450), 10)
            .await
            .unwrap();
        (db, owner, widget)
    }

    #[tokio::test]
    async fn listing_joins_product_and_user_names() {
        let (db, owner, widget) = setup().await;
        db.sales()
            .insert(&widget.id, 3, Money::from_cents(1350), Utc::now(), &owner.id)
            .await
            .unwrap();

        let all = db.sales().list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].product, "Widget");
        assert_eq!(all[0].user, DEFAULT_OWNER_NAME);
        assert_eq!(all[0].quantity, 3);
        assert_eq!(all[0].total(), Money::from_cents(1350));
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let (db, owner, widget) = setup().await;
        let older = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap();
        db.sales()
            .insert(&widget.id, 1, Money::from_cents(450), older, &owner.id)
            .await
            .unwrap();
        db.sales()
            .insert(&widget.id, 2, Money::from_cents(900), newer, &owner.id)
            .await
            .unwrap();

        let all = db.sales().list().await.unwrap();
        assert_eq!(all[0].quantity, 2);
        assert_eq!(all[1].quantity, 1);
    }

    #[tokio::test]
    async fn list_for_user_sees_only_own_rows() {
        let (db, owner, widget) = setup().await;
        let maria = db
            .users()
            .insert("Maria", Role::Operator, true)
            .await
            .unwrap();

        db.sales()
            .insert(&widget.id, 1, Money::from_cents(450), Utc::now(), &owner.id)
            .await
            .unwrap();
        db.sales()
            .insert(&widget.id, 2, Money::from_cents(900), Utc::now(), &maria.id)
            .await
            .unwrap();

        let hers = db.sales().list_for_user(&maria.id).await.unwrap();
        assert_eq!(hers.len(), 1);
        assert_eq!(hers[0].user, "Maria");
    }

    #[tokio::test]
    async fn delete_checked_removes_unlocked_sale() {
        let (db, owner, widget) = setup().await;
        let sale = db
            .sales()
            .insert(&widget.id, 1, Money::from_cents(450), Utc::now(), &owner.id)
            .await
            .unwrap();

        let outcome = db.sales().delete_checked(&sale.id).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(db.sales().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_checked_reports_missing_rows() {
        let (db, _, _) = setup().await;
        let outcome = db.sales().delete_checked("v-missing").await.unwrap();
        assert_eq!(outcome, DeleteOutcome::NotFound);
    }

    #[tokio::test]
    async fn delete_checked_refuses_rows_in_closed_weeks() {
        let (db, owner, widget) = setup().await;
        let in_week = Utc.with_ymd_and_hms(2024, 1, 3, 15, 0, 0).unwrap();
        let sale = db
            .sales()
            .insert(&widget.id, 1, Money::from_cents(450), in_week, &owner.id)
            .await
            .unwrap();

        // Close the Monday..Sunday week containing the sale
        let week = Period::week_of(in_week.date_naive());
        db.closes()
            .record(week, PeriodTotals::default(), &owner.id, Utc::now())
            .await
            .unwrap();

        let outcome = db.sales().delete_checked(&sale.id).await.unwrap();
        assert_eq!(
            outcome,
            DeleteOutcome::Locked {
                date: in_week.date_naive()
            }
        );
        // The row is still there
        assert_eq!(db.sales().list().await.unwrap().len(), 1);

        // A sale the Monday after the closed week is untouched by the lock
        let next_week = Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap();
        let later = db
            .sales()
            .insert(&widget.id, 1, Money::from_cents(450), next_week, &owner.id)
            .await
            .unwrap();
        let outcome = db.sales().delete_checked(&later.id).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
    }
}
