use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use business::domain::errors::RepositoryError;
use business::domain::inventory::errors::InventoryError;
use business::domain::inventory::model::{InventoryRecord, Reservation};
use business::domain::inventory::repository::InventoryLedger;
use business::domain::shared::pagination::PagedResult;
use business::domain::shared::value_objects::VariantId;

use crate::db::map_sqlx_error;

use super::entity::InventoryEntity;

pub struct InventoryLedgerPostgres {
    pool: PgPool,
}

impl InventoryLedgerPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryLedger for InventoryLedgerPostgres {
    async fn reserve(
        &self,
        variant_id: &VariantId,
        quantity: i64,
    ) -> Result<Reservation, InventoryError> {
        // The availability check and the decrement are one conditional
        // update; the database serializes concurrent callers on the variant
        // row, so the counter can never go negative.
        let result = sqlx::query(
            r#"UPDATE inventory
               SET quantity_available = quantity_available - $2,
                   quantity_reserved = quantity_reserved + $2
               WHERE variant_id = $1 AND quantity_available >= $2"#,
        )
        .bind(variant_id.as_uuid())
        .bind(quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| InventoryError::Repository(map_sqlx_error(e)))?;

        if result.rows_affected() == 0 {
            // Re-read only to report requested vs available; the value may
            // already be stale, the reservation decision is final.
            let available = sqlx::query_scalar::<_, i64>(
                "SELECT quantity_available FROM inventory WHERE variant_id = $1",
            )
            .bind(variant_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| InventoryError::Repository(map_sqlx_error(e)))?
            .unwrap_or(0);

            debug!(%variant_id, quantity, available, "reservation rejected");
            return Err(InventoryError::InsufficientStock {
                variant_id: *variant_id,
                requested: quantity,
                available,
            });
        }

        Ok(Reservation {
            variant_id: *variant_id,
            quantity,
        })
    }

    async fn release(&self, variant_id: &VariantId, quantity: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE inventory
               SET quantity_available = quantity_available + $2,
                   quantity_reserved = GREATEST(quantity_reserved - $2, 0)
               WHERE variant_id = $1"#,
        )
        .bind(variant_id.as_uuid())
        .bind(quantity)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn get_level(&self, variant_id: &VariantId) -> Result<InventoryRecord, RepositoryError> {
        let entity = sqlx::query_as::<_, InventoryEntity>(
            "SELECT variant_id, quantity_available, quantity_reserved, reorder_level FROM inventory WHERE variant_id = $1",
        )
        .bind(variant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn low_stock(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PagedResult<InventoryRecord>, RepositoryError> {
        let total_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM inventory WHERE quantity_available <= reorder_level",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let offset = (page.saturating_sub(1) as i64) * page_size as i64;
        let entities = sqlx::query_as::<_, InventoryEntity>(
            r#"SELECT variant_id, quantity_available, quantity_reserved, reorder_level
               FROM inventory
               WHERE quantity_available <= reorder_level
               ORDER BY quantity_available ASC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(page_size as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(PagedResult::new(
            entities.into_iter().map(|e| e.into_domain()).collect(),
            total_count as u64,
            page,
            page_size,
        ))
    }
}
