//! # Product Operations
//!
//! Catalog management. Mutations are owner-only; the listing is open to
//! operators because the sale form needs it.
//!
//! Price edits apply to future sales only. Recorded sales carry their own
//! frozen totals, so nothing here ever touches `ventas`.

use tracing::info;

use caja_core::validation::{validate_price, validate_product_name, validate_stock};
use caja_core::{Money, Product, RequestContext};
use caja_db::{Database, DbError};

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct ProductService {
    db: Database,
}

impl ProductService {
    pub fn new(db: Database) -> Self {
        ProductService { db }
    }

    /// Adds a product to the catalog. Owner only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        price: Money,
        stock: i64,
    ) -> ServiceResult<Product> {
        ctx.require_owner()?;
        validate_product_name(name)?;
        validate_price(price)?;
        validate_stock(stock)?;

        let product = self.db.products().insert(name.trim(), price, stock).await?;
        info!(id = %product.id, name = %product.name, by = %ctx.user_name, "product created");
        Ok(product)
    }

    /// Overwrites a product's name, price and stock. Owner only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        name: &str,
        price: Money,
        stock: i64,
    ) -> ServiceResult<Product> {
        ctx.require_owner()?;
        validate_product_name(name)?;
        validate_price(price)?;
        validate_stock(stock)?;

        let product = Product {
            id: id.to_string(),
            name: name.trim().to_string(),
            price_cents: price.cents(),
            stock,
        };
        self.db
            .products()
            .update(&product)
            .await
            .map_err(|e| match e {
                DbError::NotFound { .. } => ServiceError::ProductNotFound(id.to_string()),
                other => ServiceError::Db(other),
            })?;
        info!(id = %product.id, by = %ctx.user_name, "product updated");
        Ok(product)
    }

    /// Removes a product that has no recorded sales. Owner only.
    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> ServiceResult<()> {
        ctx.require_owner()?;

        self.db.products().delete(id).await.map_err(|e| match e {
            DbError::NotFound { .. } => ServiceError::ProductNotFound(id.to_string()),
            DbError::ForeignKey(_) => ServiceError::ProductInUse(id.to_string()),
            other => ServiceError::Db(other),
        })?;
        info!(id = %id, by = %ctx.user_name, "product deleted");
        Ok(())
    }

    /// Fetches one product (the edit form). Owner only.
    pub async fn get(&self, ctx: &RequestContext, id: &str) -> ServiceResult<Product> {
        ctx.require_owner()?;
        self.db
            .products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::ProductNotFound(id.to_string()))
    }

    /// The catalog, alphabetical. Open to operators: the sale form shows it.
    pub async fn list(&self, ctx: &RequestContext) -> ServiceResult<Vec<Product>> {
        ctx.require_operator()?;
        Ok(self.db.products().list().await?)
    }
}

// =============================================================================
// Tests
// =============================================================================
