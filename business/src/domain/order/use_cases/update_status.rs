use async_trait::async_trait;

use crate::domain::order::errors::OrderError;
use crate::domain::order::model::OrderStatus;
use crate::domain::shared::value_objects::{CustomerId, OrderId};

pub struct UpdateOrderStatusParams {
    pub order_id: OrderId,
    pub new_status: OrderStatus,
    pub actor_id: CustomerId,
}

/// Administrative status update; still validated against the state machine.
#[async_trait]
pub trait UpdateOrderStatusUseCase: Send + Sync {
    async fn execute(&self, params: UpdateOrderStatusParams) -> Result<(), OrderError>;
}
