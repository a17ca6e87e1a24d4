use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::list_by_customer::{ListOrdersParams, ListOrdersUseCase};
use crate::domain::order::view::OrderView;
use crate::domain::shared::pagination::PagedResult;

pub struct ListOrdersUseCaseImpl {
    pub orders: Arc<dyn OrderRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ListOrdersUseCase for ListOrdersUseCaseImpl {
    async fn execute(
        &self,
        params: ListOrdersParams,
    ) -> Result<PagedResult<OrderView>, OrderError> {
        let page = params.page.max(1);
        let page_size = params.page_size.max(1);

        self.logger.debug(&format!(
            "Listing orders for customer {} (page {}, size {})",
            params.customer_id, page, page_size
        ));

        self.orders
            .list_views_by_customer(&params.customer_id, page, page_size)
            .await
            .map_err(|_| OrderError::PersistenceFailure)
    }
}
