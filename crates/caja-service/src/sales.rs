//! # Sale Operations
//!
//! Recording is the hot path: look up the product, freeze
//! `price x quantity` into the row, stamp the clock, attribute the caller.
//! The catalog price is read exactly once, at record time; later price
//! edits never reach recorded rows.
//!
//! ```text
//! record(ctx, product, qty)         delete(ctx, id)
//!   ├─ require_operator               ├─ require_owner
//!   ├─ validate quantity              └─ delete_checked (one tx)
//!   ├─ total = price * qty                 ├─ Deleted        Ok
//!   └─ INSERT with now()                   ├─ Locked{date}   PeriodLocked
//!                                          └─ NotFound       SaleNotFound
//! ```

use chrono::Utc;
use tracing::info;

use caja_core::validation::validate_quantity;
use caja_core::{RequestContext, Sale, SaleRecord};
use caja_db::{Database, DeleteOutcome};

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct SaleService {
    db: Database,
}

impl SaleService {
    pub fn new(db: Database) -> Self {
        SaleService { db }
    }

    /// Records a sale of `quantity` units at the product's current price.
    pub async fn record(
        &self,
        ctx: &RequestContext,
        product_id: &str,
        quantity: i64,
    ) -> ServiceResult<Sale> {
        ctx.require_operator()?;
        validate_quantity(quantity)?;

        let product = self
            .db
            .products()
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| ServiceError::ProductNotFound(product_id.to_string()))?;

        let total = product.price().multiply_quantity(quantity);
        let sale = self
            .db
            .sales()
            .insert(product_id, quantity, total, Utc::now(), &ctx.user_id)
            .await?;

        info!(
            id = %sale.id,
            product = %product.name,
            quantity,
            total = %sale.total(),
            by = %ctx.user_name,
            "sale recorded"
        );
        Ok(sale)
    }

    /// Sales listing: the owner sees everyone's rows, an operator sees
    /// only their own. Newest first.
    pub async fn list(&self, ctx: &RequestContext) -> ServiceResult<Vec<SaleRecord>> {
        ctx.require_operator()?;
        let records = if ctx.is_owner() {
            self.db.sales().list().await?
        } else {
            self.db.sales().list_for_user(&ctx.user_id).await?
        };
        Ok(records)
    }

    /// Deletes a sale. Owner only, and refused when the sale's date lies
    /// inside a closed week.
    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> ServiceResult<()> {
        ctx.require_owner()?;

        match self.db.sales().delete_checked(id).await? {
            DeleteOutcome::Deleted => {
                info!(id = %id, by = %ctx.user_name, "sale deleted");
                Ok(())
            }
            DeleteOutcome::Locked { date } => Err(ServiceError::PeriodLocked {
                entity: "sale",
                date,
            }),
            DeleteOutcome::NotFound => Err(ServiceError::SaleNotFound(id.to_string())),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
