use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::StoreId;
use business::domain::store::model::Store;
use business::domain::store::repository::StoreRepository;

use crate::db::map_sqlx_error;

use super::entity::StoreEntity;

pub struct StoreRepositoryPostgres {
    pool: PgPool,
}

impl StoreRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreRepository for StoreRepositoryPostgres {
    async fn get_by_id(&self, store_id: &StoreId) -> Result<Store, RepositoryError> {
        let entity = sqlx::query_as::<_, StoreEntity>(
            "SELECT store_id, store_name, is_active FROM stores WHERE store_id = $1 AND is_deleted = FALSE",
        )
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }
}
