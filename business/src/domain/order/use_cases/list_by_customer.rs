use async_trait::async_trait;

use crate::domain::order::errors::OrderError;
use crate::domain::order::view::OrderView;
use crate::domain::shared::pagination::PagedResult;
use crate::domain::shared::value_objects::CustomerId;

pub struct ListOrdersParams {
    pub customer_id: CustomerId,
    pub page: u32,
    pub page_size: u32,
}

#[async_trait]
pub trait ListOrdersUseCase: Send + Sync {
    async fn execute(&self, params: ListOrdersParams)
        -> Result<PagedResult<OrderView>, OrderError>;
}
