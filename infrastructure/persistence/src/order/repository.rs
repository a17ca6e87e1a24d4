use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use business::domain::errors::RepositoryError;
use business::domain::order::model::{Order, OrderStatus};
use business::domain::order::repository::OrderRepository;
use business::domain::order::view::{OrderLineView, OrderView};
use business::domain::shared::pagination::PagedResult;
use business::domain::shared::value_objects::{CustomerId, OrderId};

use crate::db::map_sqlx_error;

use super::entity::{OrderEntity, OrderLineEntity, OrderLineViewEntity, OrderViewEntity};

const ORDER_COLUMNS: &str = "order_id, customer_id, store_id, payment_type_id, \
     shipment_method_id, status, subtotal, discount, tax, grand_total, \
     order_date, created_at, is_deleted, updated_by";

pub struct OrderRepositoryPostgres {
    pool: PgPool,
}

impl OrderRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_line_views(
        &self,
        order_id: &OrderId,
    ) -> Result<Vec<OrderLineView>, RepositoryError> {
        let lines = sqlx::query_as::<_, OrderLineViewEntity>(
            r#"SELECT ol.variant_id, p.product_name, ol.quantity, ol.unit_price
               FROM order_lines ol
               JOIN products p ON p.product_id = ol.product_id
               WHERE ol.order_id = $1
               ORDER BY ol.id"#,
        )
        .bind(order_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(lines.into_iter().map(|l| l.into_domain()).collect())
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryPostgres {
    async fn create_with_lines(&self, order: &Order) -> Result<(), RepositoryError> {
        // Order header and all lines commit together or not at all.
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            r#"INSERT INTO orders (order_id, customer_id, store_id, payment_type_id,
                   shipment_method_id, status, subtotal, discount, tax, grand_total,
                   order_date, created_at, is_deleted, updated_by)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"#,
        )
        .bind(order.id.as_str())
        .bind(order.customer_id.as_uuid())
        .bind(order.store_id.as_uuid())
        .bind(order.payment_type_id)
        .bind(order.shipment_method_id)
        .bind(order.status.to_string())
        .bind(&order.subtotal)
        .bind(&order.discount)
        .bind(&order.tax)
        .bind(&order.grand_total)
        .bind(order.order_date)
        .bind(order.created_at)
        .bind(order.is_deleted)
        .bind(order.updated_by.map(|c| c.as_uuid()))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        for line in &order.lines {
            sqlx::query(
                r#"INSERT INTO order_lines (order_id, variant_id, product_id, quantity,
                       unit_price, discount)
                   VALUES ($1, $2, $3, $4, $5, $6)"#,
            )
            .bind(order.id.as_str())
            .bind(line.variant_id.as_uuid())
            .bind(line.product_id.as_uuid())
            .bind(line.quantity)
            .bind(&line.unit_price)
            .bind(&line.discount)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)
    }

    async fn get_by_id(
        &self,
        order_id: &OrderId,
        customer_id: Option<CustomerId>,
    ) -> Result<Order, RepositoryError> {
        let entity = sqlx::query_as::<_, OrderEntity>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE order_id = $1 AND is_deleted = FALSE \
               AND ($2::uuid IS NULL OR customer_id = $2)",
        ))
        .bind(order_id.as_str())
        .bind(customer_id.map(|c| c.as_uuid()))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepositoryError::NotFound)?;

        let lines = sqlx::query_as::<_, OrderLineEntity>(
            r#"SELECT variant_id, product_id, quantity, unit_price, discount
               FROM order_lines
               WHERE order_id = $1
               ORDER BY id"#,
        )
        .bind(order_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        entity.into_domain(lines.into_iter().map(|l| l.into_domain()).collect())
    }

    async fn get_view(
        &self,
        order_id: &OrderId,
        customer_id: Option<CustomerId>,
    ) -> Result<OrderView, RepositoryError> {
        let entity = sqlx::query_as::<_, OrderViewEntity>(
            r#"SELECT o.order_id, o.order_date, o.status, s.store_name,
                      pt.name AS payment_type, sm.name AS shipment_method,
                      o.subtotal, o.discount, o.tax, o.grand_total
               FROM orders o
               JOIN stores s ON s.store_id = o.store_id
               JOIN payment_types pt ON pt.payment_type_id = o.payment_type_id
               JOIN shipment_methods sm ON sm.shipment_method_id = o.shipment_method_id
               WHERE o.order_id = $1 AND o.is_deleted = FALSE
                 AND ($2::uuid IS NULL OR o.customer_id = $2)"#,
        )
        .bind(order_id.as_str())
        .bind(customer_id.map(|c| c.as_uuid()))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepositoryError::NotFound)?;

        let lines = self.fetch_line_views(order_id).await?;
        entity.into_domain(lines)
    }

    async fn list_views_by_customer(
        &self,
        customer_id: &CustomerId,
        page: u32,
        page_size: u32,
    ) -> Result<PagedResult<OrderView>, RepositoryError> {
        let total_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE customer_id = $1 AND is_deleted = FALSE",
        )
        .bind(customer_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let offset = (page.saturating_sub(1) as i64) * page_size as i64;
        let entities = sqlx::query_as::<_, OrderViewEntity>(
            r#"SELECT o.order_id, o.order_date, o.status, s.store_name,
                      pt.name AS payment_type, sm.name AS shipment_method,
                      o.subtotal, o.discount, o.tax, o.grand_total
               FROM orders o
               JOIN stores s ON s.store_id = o.store_id
               JOIN payment_types pt ON pt.payment_type_id = o.payment_type_id
               JOIN shipment_methods sm ON sm.shipment_method_id = o.shipment_method_id
               WHERE o.customer_id = $1 AND o.is_deleted = FALSE
               ORDER BY o.order_date DESC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(customer_id.as_uuid())
        .bind(page_size as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let mut views = Vec::with_capacity(entities.len());
        for entity in entities {
            let order_id = OrderId::new(entity.order_id.clone());
            let lines = self.fetch_line_views(&order_id).await?;
            views.push(entity.into_domain(lines)?);
        }

        Ok(PagedResult::new(views, total_count as u64, page, page_size))
    }

    async fn update_status(
        &self,
        order_id: &OrderId,
        expected: OrderStatus,
        new_status: OrderStatus,
        actor: &CustomerId,
    ) -> Result<(), RepositoryError> {
        // Guarded on the status the caller validated against, so a write
        // based on a stale read affects zero rows instead of persisting an
        // illegal transition.
        let result = sqlx::query(
            r#"UPDATE orders SET status = $2, updated_by = $3
               WHERE order_id = $1 AND is_deleted = FALSE AND status = $4"#,
        )
        .bind(order_id.as_str())
        .bind(new_status.to_string())
        .bind(actor.as_uuid())
        .bind(expected.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn cancel_with_restock(
        &self,
        order: &Order,
        actor: &CustomerId,
    ) -> Result<(), RepositoryError> {
        // The status change and every line's stock release are one
        // transaction; a failure rolls all of it back.
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // Guarding on a cancellable status makes a racing second cancel
        // affect zero rows, so stock is never restocked twice.
        let result = sqlx::query(
            r#"UPDATE orders SET status = $2, updated_by = $3
               WHERE order_id = $1 AND is_deleted = FALSE
                 AND status IN ('pending', 'processing')"#,
        )
        .bind(order.id.as_str())
        .bind(OrderStatus::Cancelled.to_string())
        .bind(actor.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        for line in &order.lines {
            let released = sqlx::query(
                r#"UPDATE inventory
                   SET quantity_available = quantity_available + $2,
                       quantity_reserved = GREATEST(quantity_reserved - $2, 0)
                   WHERE variant_id = $1"#,
            )
            .bind(line.variant_id.as_uuid())
            .bind(line.quantity)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

            if released.rows_affected() == 0 {
                warn!(
                    order_id = %order.id,
                    variant_id = %line.variant_id,
                    "no inventory row to restock on cancellation"
                );
            }
        }

        tx.commit().await.map_err(map_sqlx_error)
    }
}
