//! # Product Repository
//!
//! Catalog CRUD over `productos`. Deleting a product that has recorded
//! sales fails with a foreign key error; history outlives the catalog.

use sqlx::SqlitePool;
use tracing::debug;

use caja_core::{Money, Product};

use crate::error::{DbError, DbResult};
use crate::repository::new_id;

#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price_cents: i64,
    stock: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Product {
        Product {
            id: row.id,
            name: row.name,
            price_cents: row.price_cents,
            stock: row.stock,
        }
    }
}

const SELECT_PRODUCT: &str =
    "SELECT id, nombre AS name, precio AS price_cents, stock FROM productos";

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a product with a fresh id and returns it.
    pub async fn insert(&self, name: &str, price: Money, stock: i64) -> DbResult<Product> {
        let product = Product {
            id: new_id(),
            name: name.to_string(),
            price_cents: price.cents(),
            stock,
        };
        sqlx::query("INSERT INTO productos (id, nombre, precio, stock) VALUES (?1, ?2, ?3, ?4)")
            .bind(&product.id)
            .bind(&product.name)
            .bind(product.price_cents)
            .bind(product.stock)
            .execute(&self.pool)
            .await?;
        debug!(id = %product.id, name = %product.name, "inserted product");
        Ok(product)
    }

    /// Overwrites name, price and stock of an existing product.
    ///
    /// Recorded sales keep their frozen totals; a price edit changes
    /// future sales only.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE productos SET nombre = ?1, precio = ?2, stock = ?3 WHERE id = ?4")
                .bind(&product.name)
                .bind(product.price_cents)
                .bind(product.stock)
                .bind(&product.id)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", &product.id));
        }
        debug!(id = %product.id, "updated product");
        Ok(())
    }

    /// Deletes a product. Fails with [`DbError::ForeignKey`] if any sale
    /// references it.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM productos WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", id));
        }
        debug!(id = %id, "deleted product");
        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("{SELECT_PRODUCT} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Product::from))
    }

    /// All products, alphabetical.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> =
            sqlx::query_as(&format!("{SELECT_PRODUCT} ORDER BY nombre"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM productos")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Tests
// =============================================================================
