//! # Expense Operations
//!
//! Same shape as sales, minus the catalog: an expense is free text plus an
//! amount, dated with today's calendar date at record time. Deletion is
//! owner-only and goes through the week-lock check.

use chrono::Utc;
use tracing::info;

use caja_core::validation::{validate_amount, validate_description};
use caja_core::{Expense, ExpenseRecord, Money, RequestContext};
use caja_db::{Database, DeleteOutcome};

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct ExpenseService {
    db: Database,
}

impl ExpenseService {
    pub fn new(db: Database) -> Self {
        ExpenseService { db }
    }

    /// Records an expense dated today, attributed to the caller.
    pub async fn record(
        &self,
        ctx: &RequestContext,
        description: &str,
        amount: Money,
    ) -> ServiceResult<Expense> {
        ctx.require_operator()?;
        validate_description(description)?;
        validate_amount(amount)?;

        let today = Utc::now().date_naive();
        let expense = self
            .db
            .expenses()
            .insert(description.trim(), amount, today, &ctx.user_id)
            .await?;

        info!(
            id = %expense.id,
            amount = %expense.amount(),
            by = %ctx.user_name,
            "expense recorded"
        );
        Ok(expense)
    }

    /// Expense listing: the owner sees everyone's rows, an operator sees
    /// only their own. Newest first.
    pub async fn list(&self, ctx: &RequestContext) -> ServiceResult<Vec<ExpenseRecord>> {
        ctx.require_operator()?;
        let records = if ctx.is_owner() {
            self.db.expenses().list().await?
        } else {
            self.db.expenses().list_for_user(&ctx.user_id).await?
        };
        Ok(records)
    }

    /// Deletes an expense. Owner only, refused inside closed weeks.
    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> ServiceResult<()> {
        ctx.require_owner()?;

        match self.db.expenses().delete_checked(id).await? {
            DeleteOutcome::Deleted => {
                info!(id = %id, by = %ctx.user_name, "expense deleted");
                Ok(())
            }
            DeleteOutcome::Locked { date } => Err(ServiceError::PeriodLocked {
                entity: "expense",
                date,
            }),
            DeleteOutcome::NotFound => Err(ServiceError::ExpenseNotFound(id.to_string())),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
