use async_trait::async_trait;

use crate::domain::order::errors::OrderError;
use crate::domain::order::view::OrderView;
use crate::domain::shared::value_objects::{CustomerId, OrderId};

#[async_trait]
pub trait GetOrderUseCase: Send + Sync {
    async fn execute(
        &self,
        order_id: OrderId,
        customer_id: CustomerId,
    ) -> Result<OrderView, OrderError>;
}
