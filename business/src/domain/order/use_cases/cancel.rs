use async_trait::async_trait;

use crate::domain::order::errors::OrderError;
use crate::domain::shared::value_objects::{CustomerId, OrderId};

#[async_trait]
pub trait CancelOrderUseCase: Send + Sync {
    async fn execute(&self, order_id: OrderId, customer_id: CustomerId)
        -> Result<(), OrderError>;
}
