use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::StoreId;

use super::model::Store;

#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn get_by_id(&self, store_id: &StoreId) -> Result<Store, RepositoryError>;
}
