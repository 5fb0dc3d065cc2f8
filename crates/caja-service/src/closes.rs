//! # Weekly Close Operations
//!
//! `close_week` freezes the current Monday..Sunday week:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ close_week(ctx)                                             │
//! │                                                             │
//! │   1. require_owner                                          │
//! │   2. week = week_of(today)          Monday..Sunday, UTC     │
//! │   3. already closed? ──────────────► WeekAlreadyClosed      │
//! │   4. totals = SUM(sales), SUM(expenses) over the week       │
//! │   5. append ledger row (profit = sales - expenses)          │
//! │        └─ UNIQUE(fecha_inicio) race ► WeekAlreadyClosed     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A week may be closed before Sunday is over; the original workflow is
//! the owner pressing the button whenever the week is done. Mid-week rows
//! recorded after an early close are still covered by the lock, because
//! the lock spans the full Monday..Sunday range.

use chrono::{NaiveDate, Utc};
use tracing::info;

use caja_core::{Period, RequestContext, WeeklyClose};
use caja_db::{Database, DbError};

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct CloseService {
    db: Database,
}

impl CloseService {
    pub fn new(db: Database) -> Self {
        CloseService { db }
    }

    /// Closes the current business week. Owner only, once per week.
    pub async fn close_week(&self, ctx: &RequestContext) -> ServiceResult<WeeklyClose> {
        ctx.require_owner()?;

        let week = Period::week_of(Utc::now().date_naive());
        if self.db.closes().find_for_week(week.from).await?.is_some() {
            return Err(ServiceError::WeekAlreadyClosed { week_start: week.from });
        }

        let totals = self.db.reports().totals_over(week).await?;
        let close = self
            .db
            .closes()
            .record(week, totals, &ctx.user_id, Utc::now())
            .await
            .map_err(|e| match e {
                // Two closes raced; the UNIQUE index broke the tie
                DbError::Duplicate { .. } => ServiceError::WeekAlreadyClosed { week_start: week.from },
                other => ServiceError::Db(other),
            })?;

        info!(
            week = %week,
            sales = %close.sales_total(),
            expenses = %close.expenses_total(),
            profit = %close.profit(),
            by = %ctx.user_name,
            "week closed"
        );
        Ok(close)
    }

    /// The close ledger, most recent week first. Owner only.
    pub async fn list(&self, ctx: &RequestContext) -> ServiceResult<Vec<WeeklyClose>> {
        ctx.require_owner()?;
        Ok(self.db.closes().list().await?)
    }

    /// Whether `date` falls inside any closed week. Open to operators so
    /// the UI can grey out delete buttons on frozen rows.
    pub async fn is_date_locked(
        &self,
        ctx: &RequestContext,
        date: NaiveDate,
    ) -> ServiceResult<bool> {
        ctx.require_operator()?;
        Ok(self.db.closes().is_locked(date).await?)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use caja_core::{Money, Role};
    use caja_db::repository::user::DEFAULT_OWNER_NAME;
    use caja_db::{DbConfig, DeleteOutcome};
    use chrono::{Datelike, Duration, Weekday};

    async fn setup() -> (Database, CloseService, RequestContext, RequestContext) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = db
            .users()
            .get_by_name(DEFAULT_OWNER_NAME)
            .await
            .unwrap()
            .unwrap();
        let maria = db
            .users()
            .insert("Maria", Role::Operator, true)
            .await
            .unwrap();
        let owner_ctx = RequestContext::new(owner.id, owner.name, Role::Owner);
        let operator_ctx = RequestContext::new(maria.id, maria.name, Role::Operator);
        (db.clone(), CloseService::new(db), owner_ctx, operator_ctx)
    }

    #[tokio::test]
    async fn close_freezes_current_week_totals() {
        let (db, service, owner, _) = setup().await;
        let widget = db
            .products()
            .insert("Widget", Money::from_cents(450), 10)
            .await
            .unwrap();
        db.sales()
            .insert(&widget.id, 3, Money::from_cents(1350), Utc::now(), &owner.user_id)
            .await
            .unwrap();
        db.expenses()
            .insert(
                "Ice",
                Money::from_cents(500),
                Utc::now().date_naive(),
                &owner.user_id,
            )
            .await
            .unwrap();

        let close = service.close_week(&owner).await.unwrap();
        assert_eq!(close.sales_total(), Money::from_cents(1350));
        assert_eq!(close.expenses_total(), Money::from_cents(500));
        assert_eq!(close.profit(), Money::from_cents(850));
        assert_eq!(close.week_start.weekday(), Weekday::Mon);
        assert_eq!(close.week_end, close.week_start + Duration::days(6));
        assert!(close.week().contains(Utc::now().date_naive()));
        assert_eq!(close.closed_by, owner.user_id);
    }

    #[tokio::test]
    async fn closing_twice_is_refused() {
        let (_db, service, owner, _) = setup().await;
        let first = service.close_week(&owner).await.unwrap();

        let err = service.close_week(&owner).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::WeekAlreadyClosed { week_start } if week_start == first.week_start
        ));

        // Still exactly one ledger row
        assert_eq!(service.list(&owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn closing_an_empty_week_records_zeros() {
        let (_db, service, owner, _) = setup().await;
        let close = service.close_week(&owner).await.unwrap();
        assert_eq!(close.sales_total(), Money::zero());
        assert_eq!(close.expenses_total(), Money::zero());
        assert_eq!(close.profit(), Money::zero());
    }

    #[tokio::test]
    async fn close_locks_the_whole_week() {
        let (db, service, owner, operator) = setup().await;
        let widget = db
            .products()
            .insert("Widget", Money::from_cents(450), 10)
            .await
            .unwrap();
        let sale = db
            .sales()
            .insert(&widget.id, 1, Money::from_cents(450), Utc::now(), &owner.user_id)
            .await
            .unwrap();

        let today = Utc::now().date_naive();
        assert!(!service.is_date_locked(&operator, today).await.unwrap());

        service.close_week(&owner).await.unwrap();

        assert!(service.is_date_locked(&operator, today).await.unwrap());
        let outcome = db.sales().delete_checked(&sale.id).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Locked { .. }));
    }

    #[tokio::test]
    async fn rows_outside_the_week_stay_out_of_the_totals() {
        let (db, service, owner, _) = setup().await;
        let widget = db
            .products()
            .insert("Widget", Money::from_cents(450), 10)
            .await
            .unwrap();
        // Recorded well before this week
        let long_ago = Utc::now() - Duration::days(60);
        db.sales()
            .insert(&widget.id, 2, Money::from_cents(900), long_ago, &owner.user_id)
            .await
            .unwrap();

        let close = service.close_week(&owner).await.unwrap();
        assert_eq!(close.sales_total(), Money::zero());
    }

    #[tokio::test]
    async fn operator_cannot_close_or_read_the_ledger() {
        let (_db, service, owner, operator) = setup().await;

        let err = service.close_week(&operator).await.unwrap_err();
        assert!(matches!(err, ServiceError::Auth(_)));

        let err = service.list(&operator).await.unwrap_err();
        assert!(matches!(err, ServiceError::Auth(_)));

        // But the lock probe is open to operators
        let today = Utc::now().date_naive();
        assert!(!service.is_date_locked(&operator, today).await.unwrap());

        // And nothing got closed along the way
        assert!(service.list(&owner).await.unwrap().is_empty());
    }
}
