use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::errors::RepositoryError;
use business::domain::order::model::OrderStatus;
use business::domain::order::status_catalog::OrderStatusCatalog;

use crate::db::map_sqlx_error;

pub struct OrderStatusCatalogPostgres {
    pool: PgPool,
}

impl OrderStatusCatalogPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStatusCatalog for OrderStatusCatalogPostgres {
    async fn default_status(&self) -> Result<OrderStatus, RepositoryError> {
        // Prefer the pending entry; fall back to the first catalog row so a
        // renamed catalog still yields a usable initial status.
        let name = match sqlx::query_scalar::<_, String>(
            "SELECT name FROM order_statuses WHERE LOWER(name) = 'pending' LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        {
            Some(name) => name,
            None => sqlx::query_scalar::<_, String>(
                "SELECT name FROM order_statuses ORDER BY order_status_id LIMIT 1",
            )
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(RepositoryError::NotFound)?,
        };

        name.parse::<OrderStatus>()
            .map_err(|_| RepositoryError::DatabaseError)
    }
}
