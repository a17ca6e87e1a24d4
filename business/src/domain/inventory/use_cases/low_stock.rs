use async_trait::async_trait;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::model::InventoryRecord;
use crate::domain::shared::pagination::PagedResult;

pub struct LowStockReportParams {
    pub page: u32,
    pub page_size: u32,
}

#[async_trait]
pub trait LowStockReportUseCase: Send + Sync {
    async fn execute(
        &self,
        params: LowStockReportParams,
    ) -> Result<PagedResult<InventoryRecord>, InventoryError>;
}
