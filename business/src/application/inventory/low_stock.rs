use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::model::InventoryRecord;
use crate::domain::inventory::repository::InventoryLedger;
use crate::domain::inventory::use_cases::low_stock::{LowStockReportParams, LowStockReportUseCase};
use crate::domain::logger::Logger;
use crate::domain::shared::pagination::PagedResult;

pub struct LowStockReportUseCaseImpl {
    pub inventory: Arc<dyn InventoryLedger>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl LowStockReportUseCase for LowStockReportUseCaseImpl {
    async fn execute(
        &self,
        params: LowStockReportParams,
    ) -> Result<PagedResult<InventoryRecord>, InventoryError> {
        let page = params.page.max(1);
        let page_size = params.page_size.max(1);

        self.logger
            .debug(&format!("Low stock report (page {}, size {})", page, page_size));

        Ok(self.inventory.low_stock(page, page_size).await?)
    }
}
