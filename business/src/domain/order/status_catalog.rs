use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::model::OrderStatus;

/// Port over the status catalog store.
///
/// New orders start in whatever the catalog designates as the default
/// (normally `Pending`); a catalog without entries is a deployment fault
/// surfaced as `ConfigurationError` by the workflow.
#[async_trait]
pub trait OrderStatusCatalog: Send + Sync {
    async fn default_status(&self) -> Result<OrderStatus, RepositoryError>;
}
