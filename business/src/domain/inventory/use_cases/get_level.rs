use async_trait::async_trait;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::model::InventoryRecord;
use crate::domain::shared::value_objects::VariantId;

#[async_trait]
pub trait GetStockLevelUseCase: Send + Sync {
    async fn execute(&self, variant_id: VariantId) -> Result<InventoryRecord, InventoryError>;
}
