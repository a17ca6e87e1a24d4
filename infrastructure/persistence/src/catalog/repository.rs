use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::catalog::model::VariantSnapshot;
use business::domain::catalog::repository::CatalogLookup;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::VariantId;

use crate::db::map_sqlx_error;

use super::entity::VariantEntity;

pub struct CatalogLookupPostgres {
    pool: PgPool,
}

impl CatalogLookupPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogLookup for CatalogLookupPostgres {
    async fn resolve_variant(
        &self,
        variant_id: &VariantId,
    ) -> Result<Option<VariantSnapshot>, RepositoryError> {
        // Soft-delete of either the variant or its parent product makes the
        // variant unavailable.
        let entity = sqlx::query_as::<_, VariantEntity>(
            r#"SELECT pv.variant_id, pv.product_id, p.product_name, pv.price,
                      (pv.is_deleted OR p.is_deleted) AS is_deleted
               FROM product_variants pv
               JOIN products p ON p.product_id = pv.product_id
               WHERE pv.variant_id = $1"#,
        )
        .bind(variant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(entity.map(|e| e.into_domain()))
    }
}
