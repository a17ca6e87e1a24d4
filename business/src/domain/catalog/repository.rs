use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::VariantId;

use super::model::VariantSnapshot;

/// Read-only port into the product catalog.
///
/// Returns `None` for unknown variants; soft-deleted variants come back with
/// the `is_deleted` flag set so callers can treat both cases the same way.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn resolve_variant(
        &self,
        variant_id: &VariantId,
    ) -> Result<Option<VariantSnapshot>, RepositoryError>;
}
