use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::model::InventoryRecord;
use crate::domain::inventory::repository::InventoryLedger;
use crate::domain::inventory::use_cases::get_level::GetStockLevelUseCase;
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::VariantId;

pub struct GetStockLevelUseCaseImpl {
    pub inventory: Arc<dyn InventoryLedger>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetStockLevelUseCase for GetStockLevelUseCaseImpl {
    async fn execute(&self, variant_id: VariantId) -> Result<InventoryRecord, InventoryError> {
        self.logger
            .debug(&format!("Reading stock level for variant {}", variant_id));

        Ok(self.inventory.get_level(&variant_id).await?)
    }
}
